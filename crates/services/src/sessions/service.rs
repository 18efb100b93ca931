use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use quiz_core::model::{
    AnswerRecord, Mode, OptionKey, QuestionStore, QuizSettings, SessionState, TestResult,
};
use storage::QuestionSource;

use super::Phase;
use super::progress::SessionProgress;
use super::report::wrong_answers_report;
use super::view::{AnswerFeedback, QuestionView};
use crate::error::SessionError;

//
// ─── CURRENT QUESTION ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Current {
    position: usize,
    display_index: usize,
    answered: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's quiz: mode menu, practice and test runs over a shared store.
///
/// Answering and advancing are separate steps: `next_question` presents a
/// question (re-presenting it until answered) and `submit_answer` scores it once.
pub struct QuizSession<R = StdRng> {
    store: Arc<QuestionStore>,
    settings: QuizSettings,
    state: SessionState,
    current: Option<Current>,
    result: Option<TestResult>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Create a session whose question order is seeded from the OS.
    #[must_use]
    pub fn new(store: Arc<QuestionStore>, settings: QuizSettings) -> Self {
        Self::with_rng(store, settings, StdRng::from_os_rng())
    }

    /// Create a session with a reproducible question order.
    #[must_use]
    pub fn seeded(store: Arc<QuestionStore>, settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(store, settings, StdRng::seed_from_u64(seed))
    }

    /// Load and validate a question bank, then open a session over it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the source cannot be read or any row is malformed.
    pub fn from_source(
        source: &dyn QuestionSource,
        settings: QuizSettings,
    ) -> Result<Self, SessionError> {
        let store = source.load_store()?;
        Ok(Self::new(Arc::new(store), settings))
    }
}

impl<R: Rng> QuizSession<R> {
    #[must_use]
    pub fn with_rng(store: Arc<QuestionStore>, settings: QuizSettings, rng: R) -> Self {
        Self {
            store,
            settings,
            state: SessionState::new(),
            current: None,
            result: None,
            rng,
        }
    }

    #[must_use]
    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state.mode() {
            Mode::Menu => Phase::Menu,
            Mode::Practice => Phase::Practice,
            Mode::Test if self.result.is_some() => Phase::Result,
            Mode::Test => Phase::Test,
        }
    }

    /// Final result, available once the test run has ended.
    #[must_use]
    pub fn result(&self) -> Option<TestResult> {
        self.result
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let presented = self.state.used_positions().len();
        SessionProgress {
            phase: self.phase(),
            answered: self.state.answers().len(),
            presented,
            remaining: self.store.len().saturating_sub(presented),
            limit: (self.state.mode() == Mode::Test).then(|| self.settings.test_question_limit()),
        }
    }

    /// Enter practice mode from the menu.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the menu.
    pub fn start_practice(&mut self) -> Result<(), SessionError> {
        self.ensure_menu(Phase::Practice)?;
        self.state.enter_practice();
        self.current = None;
        info!(questions = self.store.len(), "practice started");
        Ok(())
    }

    /// Enter test mode from the menu, starting from a clean score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the menu.
    pub fn start_test(&mut self) -> Result<(), SessionError> {
        self.ensure_menu(Phase::Test)?;
        self.state.enter_test();
        self.current = None;
        self.result = None;
        info!(
            questions = self.store.len(),
            limit = self.settings.test_question_limit(),
            "test started"
        );
        Ok(())
    }

    /// Return to the menu, clearing all run state.
    ///
    /// Allowed from practice at any point and from the result screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` from the menu or an unfinished test.
    pub fn back_to_menu(&mut self) -> Result<(), SessionError> {
        let from = self.phase();
        if !matches!(from, Phase::Practice | Phase::Result) {
            return Err(SessionError::InvalidTransition {
                from,
                to: Phase::Menu,
            });
        }
        self.state.reset();
        self.current = None;
        self.result = None;
        debug!(%from, "returned to menu");
        Ok(())
    }

    /// Present the next question, or `None` when the run is over.
    ///
    /// Calling this again before answering returns the same question. In test
    /// mode `None` means the session has moved to the result screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` from the menu.
    pub fn next_question(&mut self) -> Result<Option<QuestionView>, SessionError> {
        let phase = self.phase();
        match phase {
            Phase::Menu => return Err(SessionError::NotInProgress(phase)),
            Phase::Result => return Ok(None),
            Phase::Practice | Phase::Test => {}
        }

        if let Some(current) = self.current.filter(|current| !current.answered) {
            return Ok(self
                .store
                .get(current.position)
                .map(|question| QuestionView::new(current.display_index, question)));
        }

        let limit = self.settings.test_question_limit();
        if phase == Phase::Test && self.state.is_test_complete(&self.store, limit) {
            self.finish_test();
            return Ok(None);
        }

        let Some((position, question)) = self.state.select_next(&self.store, &mut self.rng) else {
            self.current = None;
            match phase {
                Phase::Test => self.finish_test(),
                _ => info!("practice complete: all questions presented"),
            }
            return Ok(None);
        };

        let display_index = match phase {
            Phase::Test => self.state.answers().len() + 1,
            _ => position + 1,
        };
        debug!(position, display_index, id = %question.id(), "question selected");
        let view = QuestionView::new(display_index, question);
        self.current = Some(Current {
            position,
            display_index,
            answered: false,
        });
        Ok(Some(view))
    }

    /// Parse a raw choice and submit it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidChoice` for anything but `a`-`d`, before
    /// any state changes; otherwise as `submit_answer`.
    pub fn submit_choice(&mut self, raw: &str) -> Result<AnswerFeedback, SessionError> {
        let chosen: OptionKey = raw.parse()?;
        self.submit_answer(chosen)
    }

    /// Score the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside practice/test and
    /// `SessionError::NoPendingQuestion` if nothing is awaiting an answer.
    pub fn submit_answer(&mut self, chosen: OptionKey) -> Result<AnswerFeedback, SessionError> {
        let phase = self.phase();
        if !matches!(phase, Phase::Practice | Phase::Test) {
            return Err(SessionError::NotInProgress(phase));
        }
        let Some(current) = self.current.as_mut().filter(|current| !current.answered) else {
            return Err(SessionError::NoPendingQuestion);
        };
        let question = self
            .store
            .get(current.position)
            .ok_or(SessionError::NoPendingQuestion)?;

        let outcome = self.state.record_answer(current.position, question, chosen)?;
        current.answered = true;
        debug!(
            position = current.position,
            %chosen,
            correct = outcome.correct,
            "answer recorded"
        );

        let session_complete = match phase {
            Phase::Test => {
                let limit = self.settings.test_question_limit();
                let done = self.state.is_test_complete(&self.store, limit);
                if done {
                    self.finish_test();
                }
                done
            }
            _ => self.state.is_exhausted(&self.store),
        };

        Ok(AnswerFeedback {
            correct: outcome.correct,
            chosen,
            correct_option: outcome.correct_option,
            session_complete,
        })
    }

    /// Wrong answers of the current or finished test run.
    #[must_use]
    pub fn wrong_answers(&self) -> Vec<&AnswerRecord> {
        self.state.wrong_answers().collect()
    }

    /// Export of the wrong answers, one `Q: .. | Your: .. | Correct: ..` line each.
    #[must_use]
    pub fn wrong_answers_report(&self) -> Option<String> {
        wrong_answers_report(self.state.answers())
    }

    fn ensure_menu(&self, to: Phase) -> Result<(), SessionError> {
        let from = self.phase();
        if from == Phase::Menu {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { from, to })
        }
    }

    fn finish_test(&mut self) {
        let result = self.state.result();
        info!(
            score = %result.score,
            total = result.total,
            verdict = %result.verdict,
            "test completed"
        );
        self.current = None;
        self.result = Some(result);
    }
}

impl<R> fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("store_len", &self.store.len())
            .field("mode", &self.state.mode())
            .field("used", &self.state.used_positions().len())
            .field("answers", &self.state.answers().len())
            .field("current", &self.current)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
