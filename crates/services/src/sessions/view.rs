use serde::Serialize;

use quiz_core::model::{OptionKey, Question, QuestionId};

/// Presentation-agnostic view of the question being asked.
///
/// `display_index` is 1-based: the store position in practice mode, the
/// answer count in test mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub display_index: usize,
    pub question_id: QuestionId,
    pub text: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub key: OptionKey,
    pub text: String,
}

impl QuestionView {
    #[must_use]
    pub fn new(display_index: usize, question: &Question) -> Self {
        Self {
            display_index,
            question_id: question.id(),
            text: question.text().to_owned(),
            options: question
                .options()
                .map(|(key, text)| OptionView {
                    key,
                    text: text.to_owned(),
                })
                .collect(),
        }
    }
}

/// Feedback returned after submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub chosen: OptionKey,
    pub correct_option: OptionKey,
    /// True when this answer ended the run: the test limit was reached or no
    /// unused question remains.
    pub session_complete: bool,
}
