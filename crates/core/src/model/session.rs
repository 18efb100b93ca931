use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::question::{OptionKey, Question};
use crate::model::score::{Score, TestResult, compute_result};
use crate::model::store::QuestionStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("no mode selected")]
    NoModeSelected,
}

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No mode selected; the mode-selection menu.
    #[default]
    Menu,
    Practice,
    Test,
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// A recorded test answer.
///
/// Copies the prompt text and both keys so it stays readable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub position: usize,
    pub question: String,
    pub your_answer: OptionKey,
    pub correct: OptionKey,
}

impl AnswerRecord {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.your_answer == self.correct
    }
}

/// Immediate feedback for a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option: OptionKey,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Per-user quiz state: mode, presented positions, score and test answers.
///
/// Owned by whoever drives the session; never shared between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    mode: Mode,
    used: HashSet<usize>,
    score: Score,
    answers: Vec<AnswerRecord>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Store positions presented so far in the current mode-session.
    #[must_use]
    pub fn used_positions(&self) -> &HashSet<usize> {
        &self.used
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Clears mode, used positions, score and answers together.
    pub fn reset(&mut self) {
        self.mode = Mode::Menu;
        self.used.clear();
        self.score = Score::ZERO;
        self.answers.clear();
    }

    pub fn enter_practice(&mut self) {
        self.reset();
        self.mode = Mode::Practice;
    }

    pub fn enter_test(&mut self) {
        self.reset();
        self.mode = Mode::Test;
    }

    /// Positions of `store` not yet presented, ascending.
    #[must_use]
    pub fn remaining_positions(&self, store: &QuestionStore) -> Vec<usize> {
        (0..store.len())
            .filter(|position| !self.used.contains(position))
            .collect()
    }

    #[must_use]
    pub fn is_exhausted(&self, store: &QuestionStore) -> bool {
        (0..store.len()).all(|position| self.used.contains(&position))
    }

    /// Draw an unused question uniformly at random and mark it used.
    ///
    /// Returns `None` once every position has been presented. The store itself
    /// is never reordered.
    pub fn select_next<'s, R: Rng + ?Sized>(
        &mut self,
        store: &'s QuestionStore,
        rng: &mut R,
    ) -> Option<(usize, &'s Question)> {
        let remaining = self.remaining_positions(store);
        let position = *remaining.choose(rng)?;
        let question = store.get(position)?;
        self.used.insert(position);
        Some((position, question))
    }

    /// Score `chosen` against `question`.
    ///
    /// In test mode the answer is appended and the score updated; practice mode
    /// only reports correctness.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NoModeSelected` when called from the menu.
    pub fn record_answer(
        &mut self,
        position: usize,
        question: &Question,
        chosen: OptionKey,
    ) -> Result<AnswerOutcome, SessionStateError> {
        let correct = question.is_correct(chosen);
        match self.mode {
            Mode::Menu => return Err(SessionStateError::NoModeSelected),
            Mode::Practice => {}
            Mode::Test => {
                self.answers.push(AnswerRecord {
                    position,
                    question: question.text().to_owned(),
                    your_answer: chosen,
                    correct: question.correct_option(),
                });
                self.score.apply(correct);
            }
        }

        Ok(AnswerOutcome {
            correct,
            correct_option: question.correct_option(),
        })
    }

    /// True once `limit` answers are recorded or no unused question remains.
    #[must_use]
    pub fn is_test_complete(&self, store: &QuestionStore, limit: usize) -> bool {
        self.answers.len() >= limit || self.is_exhausted(store)
    }

    pub fn wrong_answers(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().filter(|answer| !answer.is_correct())
    }

    /// Verdict over the answers recorded so far.
    #[must_use]
    pub fn result(&self) -> TestResult {
        compute_result(self.score, self.answers.len())
    }
}
