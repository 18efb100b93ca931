#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::SessionError;

pub use sessions::{
    AnswerFeedback, OptionView, Phase, QuestionView, QuizSession, SessionProgress,
    SessionRegistry, WRONG_ANSWERS_FILE_NAME, wrong_answers_report,
};
