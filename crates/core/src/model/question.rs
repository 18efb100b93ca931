use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Raised when a chosen or stored answer key is not one of `a`, `b`, `c`, `d`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid option key {raw:?}: expected one of a, b, c, d")]
pub struct ParseOptionKeyError {
    pub raw: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid correct_option: {0}")]
    InvalidCorrectOption(#[from] ParseOptionKeyError),

    #[error("question id must be a positive integer")]
    ZeroId,
}

//
// ─── OPTION KEY ────────────────────────────────────────────────────────────────
//

/// Key of one of the four answer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "a",
            OptionKey::B => "b",
            OptionKey::C => "c",
            OptionKey::D => "d",
        }
    }

    fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = ParseOptionKeyError;

    /// Accepts a single letter in either case, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a" | "A" => Ok(OptionKey::A),
            "b" | "B" => Ok(OptionKey::B),
            "c" | "C" => Ok(OptionKey::C),
            "d" | "D" => Ok(OptionKey::D),
            _ => Err(ParseOptionKeyError { raw: s.to_owned() }),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; 4],
    correct: OptionKey,
}

impl Question {
    /// Creates a question, validating the prompt, options and id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingField` if the prompt or any option is blank,
    /// and `QuestionError::ZeroId` for id 0.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: [String; 4],
        correct: OptionKey,
    ) -> Result<Self, QuestionError> {
        if id.value() == 0 {
            return Err(QuestionError::ZeroId);
        }
        let text = required("question", Some(text.into()))?;
        let [a, b, c, d] = options;
        let options = [
            required("option_a", Some(a))?,
            required("option_b", Some(b))?,
            required("option_c", Some(c))?,
            required("option_d", Some(d))?,
        ];
        Ok(Self {
            id,
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    /// Options paired with their keys, in `a`..`d` order.
    pub fn options(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .map(move |key| (key, self.option(key)))
    }

    #[must_use]
    pub fn correct_option(&self) -> OptionKey {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, chosen: OptionKey) -> bool {
        self.correct == chosen
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question row as produced by an external parser.
///
/// Every field is optional so that missing columns surface as `QuestionError`
/// during validation instead of as decoder failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub option_a: Option<String>,
    #[serde(default)]
    pub option_b: Option<String>,
    #[serde(default)]
    pub option_c: Option<String>,
    #[serde(default)]
    pub option_d: Option<String>,
    #[serde(default)]
    pub correct_option: Option<String>,
}

impl QuestionDraft {
    /// Convenience constructor for a complete row without an id.
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: [&str; 4],
        correct_option: impl Into<String>,
    ) -> Self {
        let [a, b, c, d] = options;
        Self {
            id: None,
            question: Some(question.into()),
            option_a: Some(a.to_owned()),
            option_b: Some(b.to_owned()),
            option_c: Some(c.to_owned()),
            option_d: Some(d.to_owned()),
            correct_option: Some(correct_option.into()),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Validate into a `Question`, using `fallback_id` when the row has no id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for blank or missing fields, an unknown
    /// `correct_option`, or an explicit id of 0.
    pub fn validate(self, fallback_id: QuestionId) -> Result<Question, QuestionError> {
        let id = self.id.map_or(fallback_id, QuestionId::new);
        let correct = required("correct_option", self.correct_option)?.parse::<OptionKey>()?;
        let text = required("question", self.question)?;
        let options = [
            required("option_a", self.option_a)?,
            required("option_b", self.option_b)?,
            required("option_c", self.option_c)?,
            required("option_d", self.option_d)?,
        ];
        Question::new(id, text, options, correct)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, QuestionError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(QuestionError::MissingField(field)),
    }
}
