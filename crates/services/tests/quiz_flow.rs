use std::collections::HashSet;
use std::sync::Arc;

use quiz_core::model::{OptionKey, QuestionDraft, QuizSettings, Verdict};
use services::{Phase, QuizSession};
use storage::{InMemorySource, QuestionSource, read_csv_rows};

fn bank(size: usize) -> InMemorySource {
    let keys = ["a", "b", "c", "d"];
    InMemorySource::new(
        (0..size)
            .map(|i| {
                QuestionDraft::new(
                    format!("Question {}", i + 1),
                    ["first", "second", "third", "fourth"],
                    keys[i % 4],
                )
            })
            .collect(),
    )
}

fn correct_key(session: &QuizSession, text: &str) -> OptionKey {
    session
        .store()
        .iter()
        .find(|q| q.text() == text)
        .map(|q| q.correct_option())
        .unwrap()
}

#[test]
fn full_test_caps_at_fifty_answers() {
    let mut session = QuizSession::from_source(&bank(60), QuizSettings::default()).unwrap();
    session.start_test().unwrap();

    let mut asked = HashSet::new();
    while let Some(view) = session.next_question().unwrap() {
        assert!(asked.insert(view.question_id));
        assert_eq!(view.display_index, asked.len());
        assert_eq!(session.progress().answered, asked.len() - 1);
        let key = correct_key(&session, &view.text);
        session.submit_answer(key).unwrap();
    }

    assert_eq!(asked.len(), 50);
    assert_eq!(session.phase(), Phase::Result);
    let result = session.result().unwrap();
    assert_eq!(result.total, 50);
    assert_eq!(result.score.value(), 50.0);
    assert_eq!(result.verdict, Verdict::Pass);
}

#[test]
fn small_bank_ends_test_on_exhaustion_with_scaled_threshold() {
    let mut session = QuizSession::from_source(&bank(10), QuizSettings::default()).unwrap();
    session.start_test().unwrap();

    // 6 right, 4 wrong: 6 - 1 = 5 < 0.6 * 10
    let mut asked = 0;
    while let Some(view) = session.next_question().unwrap() {
        let right = correct_key(&session, &view.text);
        let key = if asked < 6 {
            right
        } else {
            OptionKey::ALL.into_iter().find(|k| *k != right).unwrap()
        };
        asked += 1;
        session.submit_answer(key).unwrap();
    }

    let result = session.result().unwrap();
    assert_eq!(result.total, 10);
    assert_eq!(result.score.value(), 5.0);
    assert_eq!(result.verdict, Verdict::Fail);

    let report = session.wrong_answers_report().unwrap();
    assert_eq!(report.lines().count(), 4);
    assert!(report.lines().all(|line| line.starts_with("Q: Question ")));
}

#[test]
fn practice_then_menu_then_practice_sees_every_question_again() {
    let store = Arc::new(bank(5).load_store().unwrap());
    let mut session = QuizSession::seeded(store, QuizSettings::default(), 5);

    for _ in 0..2 {
        session.start_practice().unwrap();
        let mut seen = HashSet::new();
        while let Some(view) = session.next_question().unwrap() {
            seen.insert(view.question_id);
            session.submit_answer(OptionKey::A).unwrap();
        }
        assert_eq!(seen.len(), 5);
        session.back_to_menu().unwrap();
        assert!(session.state().used_positions().is_empty());
    }
}

#[test]
fn csv_bank_drives_a_session() {
    let rows = read_csv_rows(
        "\
question,option_a,option_b,option_c,option_d,correct_option
Q1,a,b,c,d,a
Q2,a,b,c,d,b
"
        .as_bytes(),
    )
    .unwrap();
    let mut session =
        QuizSession::from_source(&InMemorySource::new(rows), QuizSettings::default()).unwrap();
    session.start_test().unwrap();

    while let Some(view) = session.next_question().unwrap() {
        let key = correct_key(&session, &view.text);
        session.submit_answer(key).unwrap();
    }

    assert_eq!(session.result().unwrap().score.value(), 2.0);
}
