use std::collections::HashMap;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

/// Raised when a batch of rows cannot be turned into a question store.
///
/// Row numbers are 1-based in input order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: QuestionError,
    },

    #[error("row {row}: duplicate question id {id} (first used on row {first_row})")]
    DuplicateId {
        row: usize,
        first_row: usize,
        id: QuestionId,
    },
}

/// Ordered, immutable set of questions addressed by position `0..len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionStore {
    questions: Vec<Question>,
}

impl QuestionStore {
    /// Validate raw rows into a store.
    ///
    /// Rows without an id are numbered `position + 1`, so a source with no id
    /// column is numbered 1..N in input order. Loading is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidRow` for the first malformed row and
    /// `LoadError::DuplicateId` if two rows share an id.
    pub fn load(rows: impl IntoIterator<Item = QuestionDraft>) -> Result<Self, LoadError> {
        let mut questions = Vec::new();
        let mut seen: HashMap<QuestionId, usize> = HashMap::new();

        for (position, draft) in rows.into_iter().enumerate() {
            let row = position + 1;
            let fallback = QuestionId::new(u64::try_from(row).unwrap_or(u64::MAX));
            let question = draft
                .validate(fallback)
                .map_err(|source| LoadError::InvalidRow { row, source })?;

            if let Some(&first_row) = seen.get(&question.id()) {
                return Err(LoadError::DuplicateId {
                    row,
                    first_row,
                    id: question.id(),
                });
            }
            seen.insert(question.id(), row);
            questions.push(question);
        }

        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at the given store position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionKey;

    fn row(text: &str, correct: &str) -> QuestionDraft {
        QuestionDraft::new(text, ["one", "two", "three", "four"], correct)
    }

    #[test]
    fn assigns_sequential_ids_when_absent() {
        let store = QuestionStore::load(vec![row("Q1", "a"), row("Q2", "b"), row("Q3", "c")]).unwrap();

        let ids: Vec<u64> = store.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(1).unwrap().text(), "Q2");
        assert_eq!(store.get(2).unwrap().correct_option(), OptionKey::C);
        assert!(store.get(3).is_none());
    }

    #[test]
    fn keeps_explicit_ids() {
        let store = QuestionStore::load(vec![row("Q1", "a").with_id(10), row("Q2", "b").with_id(20)])
            .unwrap();
        let ids: Vec<u64> = store.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn row_missing_option_c_fails_whole_load() {
        let mut broken = row("Q2", "a");
        broken.option_c = None;

        let err = QuestionStore::load(vec![row("Q1", "a"), broken, row("Q3", "d")]).unwrap_err();

        assert_eq!(
            err,
            LoadError::InvalidRow {
                row: 2,
                source: QuestionError::MissingField("option_c"),
            }
        );
        assert_eq!(err.to_string(), "row 2: missing required field `option_c`");
    }

    #[test]
    fn invalid_correct_option_fails_load() {
        let err = QuestionStore::load(vec![row("Q1", "z")]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidRow {
                row: 1,
                source: QuestionError::InvalidCorrectOption(_)
            }
        ));
    }

    #[test]
    fn duplicate_ids_fail_load() {
        // Row 2 has no id and is numbered 2, colliding with row 1's explicit id.
        let err = QuestionStore::load(vec![row("Q1", "a").with_id(2), row("Q2", "b")]).unwrap_err();
        assert_eq!(
            err,
            LoadError::DuplicateId {
                row: 2,
                first_row: 1,
                id: QuestionId::new(2),
            }
        );
    }

    #[test]
    fn empty_input_yields_empty_store() {
        let store = QuestionStore::load(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
