mod progress;
mod registry;
mod report;
mod service;
mod view;

use serde::Serialize;
use std::fmt;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use registry::SessionRegistry;
pub use report::{WRONG_ANSWERS_FILE_NAME, wrong_answers_report};
pub use service::QuizSession;
pub use view::{AnswerFeedback, OptionView, QuestionView};

/// Screen a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menu,
    Practice,
    Test,
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Menu => f.write_str("menu"),
            Phase::Practice => f.write_str("practice"),
            Phase::Test => f.write_str("test"),
            Phase::Result => f.write_str("result"),
        }
    }
}
