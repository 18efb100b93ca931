use thiserror::Error;

/// Number of questions in a full test.
pub const DEFAULT_TEST_QUESTION_LIMIT: usize = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("test question limit must be > 0")]
    InvalidTestQuestionLimit,
}

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    test_question_limit: usize,
}

impl QuizSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTestQuestionLimit` if the limit is zero.
    pub fn new(test_question_limit: usize) -> Result<Self, SettingsError> {
        if test_question_limit == 0 {
            return Err(SettingsError::InvalidTestQuestionLimit);
        }
        Ok(Self {
            test_question_limit,
        })
    }

    /// Maximum number of answers recorded before a test ends.
    #[must_use]
    pub fn test_question_limit(&self) -> usize {
        self.test_question_limit
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            test_question_limit: DEFAULT_TEST_QUESTION_LIMIT,
        }
    }
}
