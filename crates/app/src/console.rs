use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use quiz_core::model::{AnswerRecord, TestResult};
use services::{AnswerFeedback, QuestionView, QuizSession, SessionError};

/// What to do with a finished test besides printing the verdict.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResultOptions {
    pub(crate) export: Option<PathBuf>,
    pub(crate) json: bool,
}

#[derive(Serialize)]
struct ResultOutput<'a> {
    #[serde(flatten)]
    result: TestResult,
    passing_threshold: f64,
    wrong_answers: Vec<&'a AnswerRecord>,
}

/// Line-oriented terminal front-end over a quiz session.
pub(crate) struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub(crate) fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Mode-selection loop until `q` or end of input.
    pub(crate) fn run_menu(&mut self, session: &mut QuizSession, options: &ResultOptions) -> Result<()> {
        loop {
            let Some(choice) = self.read_line("\nSelect mode: [p]ractice, [t]est, [q]uit: ")? else {
                return Ok(());
            };
            match choice.to_ascii_lowercase().as_str() {
                "p" | "practice" => self.run_practice(session)?,
                "t" | "test" => {
                    self.run_test(session, options)?;
                }
                "q" | "quit" => return Ok(()),
                _ => writeln!(self.output, "Unknown choice {choice:?}.")?,
            }
        }
    }

    /// One practice pass; `q` or end of input returns to the menu early.
    pub(crate) fn run_practice(&mut self, session: &mut QuizSession) -> Result<()> {
        session.start_practice()?;
        writeln!(
            self.output,
            "Practice mode: answer with a-d, q returns to the menu."
        )?;

        loop {
            let Some(view) = session.next_question()? else {
                writeln!(self.output, "All questions completed.")?;
                break;
            };
            self.show_question(&view)?;
            let Some(feedback) = self.ask_answer(session, true)? else {
                break;
            };
            if feedback.correct {
                writeln!(self.output, "Correct!")?;
            } else {
                writeln!(
                    self.output,
                    "Wrong. Correct answer is {}.",
                    feedback.correct_option.as_str().to_uppercase()
                )?;
            }
        }

        session.back_to_menu()?;
        Ok(())
    }

    /// One full test run followed by the result screen.
    pub(crate) fn run_test(&mut self, session: &mut QuizSession, options: &ResultOptions) -> Result<TestResult> {
        session.start_test()?;
        writeln!(
            self.output,
            "Test mode: up to {} questions, +1 per correct answer, -0.25 per wrong answer.",
            session.settings().test_question_limit()
        )?;

        while let Some(view) = session.next_question()? {
            self.show_question(&view)?;
            if self.ask_answer(session, false)?.is_none() {
                bail!("input closed before the test finished");
            }
        }
        let result = session.result().context("test ended without a result")?;
        if result.total < session.settings().test_question_limit() {
            writeln!(self.output, "No more questions available.")?;
        }
        self.show_result(session, result, options)?;
        session.back_to_menu()?;
        Ok(result)
    }

    fn show_result(&mut self, session: &QuizSession, result: TestResult, options: &ResultOptions) -> Result<()> {
        writeln!(self.output, "\nTest completed")?;
        writeln!(self.output, "Your Score: {} / {}", result.score, result.total)?;
        writeln!(self.output, "Result: {}", result.verdict)?;

        if let Some(report) = session.wrong_answers_report() {
            let wrong = session.wrong_answers().len();
            writeln!(self.output, "Wrong answers: {wrong}")?;
            if let Some(path) = &options.export {
                std::fs::write(path, report)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), wrong, "wrong answers exported");
                writeln!(self.output, "Wrong answers saved to {}", path.display())?;
            }
        }

        if options.json {
            let output = ResultOutput {
                result,
                passing_threshold: result.passing_threshold(),
                wrong_answers: session.wrong_answers(),
            };
            writeln!(self.output, "{}", serde_json::to_string(&output)?)?;
        }
        Ok(())
    }

    fn show_question(&mut self, view: &QuestionView) -> Result<()> {
        writeln!(self.output, "\nQ{}: {}", view.display_index, view.text)?;
        for option in &view.options {
            writeln!(
                self.output,
                "  {}) {}",
                option.key.as_str().to_uppercase(),
                option.text
            )?;
        }
        Ok(())
    }

    /// Prompt until a valid key is submitted. `None` means the user backed out.
    fn ask_answer(&mut self, session: &mut QuizSession, allow_quit: bool) -> Result<Option<AnswerFeedback>> {
        loop {
            let Some(line) = self.read_line("Your answer (a-d): ")? else {
                return Ok(None);
            };
            if allow_quit && line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match session.submit_choice(&line) {
                Ok(feedback) => return Ok(Some(feedback)),
                Err(SessionError::InvalidChoice(_)) => {
                    writeln!(self.output, "Please answer a, b, c or d.")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}
