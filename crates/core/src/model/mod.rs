mod ids;
mod question;
mod score;
mod session;
mod settings;
mod store;

pub use ids::{ParseIdError, QuestionId, SessionId};

pub use question::{OptionKey, ParseOptionKeyError, Question, QuestionDraft, QuestionError};
pub use score::{PASS_PERCENT, Score, TestResult, Verdict, compute_result};
pub use session::{AnswerOutcome, AnswerRecord, Mode, SessionState, SessionStateError};
pub use settings::{DEFAULT_TEST_QUESTION_LIMIT, QuizSettings, SettingsError};
pub use store::{LoadError, QuestionStore};
