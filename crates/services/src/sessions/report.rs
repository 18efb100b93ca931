use quiz_core::model::AnswerRecord;

/// Default file name for an exported wrong-answer report.
pub const WRONG_ANSWERS_FILE_NAME: &str = "wrong_answers.txt";

/// Plain-text report with one line per wrong answer.
///
/// Returns `None` when every answer was correct.
#[must_use]
pub fn wrong_answers_report<'a>(answers: impl IntoIterator<Item = &'a AnswerRecord>) -> Option<String> {
    let lines: Vec<String> = answers
        .into_iter()
        .filter(|answer| !answer.is_correct())
        .map(|answer| {
            format!(
                "Q: {} | Your: {} | Correct: {}",
                answer.question, answer.your_answer, answer.correct
            )
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
