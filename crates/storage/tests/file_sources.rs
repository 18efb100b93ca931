use std::path::PathBuf;

use quiz_core::model::{LoadError, OptionKey, QuestionError, QuestionId};
use storage::{QuestionSource, StorageError, open_source};

fn write_bank(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quiz-storage-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_bank_loads_into_store() {
    let path = write_bank(
        "bank.csv",
        "\
question,option_a,option_b,option_c,option_d,correct_option
Largest planet?,Mars,Jupiter,Venus,Earth,b
Smallest prime?,1,2,3,5,b
H2O is?,Salt,Water,Air,Gold,b
",
    );

    let store = open_source(&path).unwrap().load_store().unwrap();

    assert_eq!(store.len(), 3);
    let ids: Vec<_> = store.iter().map(|q| q.id()).collect();
    assert_eq!(
        ids,
        vec![QuestionId::new(1), QuestionId::new(2), QuestionId::new(3)]
    );
    assert_eq!(store.get(0).unwrap().option(OptionKey::B), "Jupiter");
}

#[test]
fn csv_row_missing_option_c_rejects_whole_bank() {
    let path = write_bank(
        "broken.csv",
        "\
question,option_a,option_b,option_c,option_d,correct_option
Q1,a,b,c,d,a
Q2,a,b,,d,a
Q3,a,b,c,d,a
",
    );

    let err = open_source(&path).unwrap().load_store().unwrap_err();

    match err {
        StorageError::Load(LoadError::InvalidRow { row, source }) => {
            assert_eq!(row, 2);
            assert_eq!(source, QuestionError::MissingField("option_c"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn json_bank_loads_into_store() {
    let path = write_bank(
        "bank.json",
        r#"[
            {"id": 5, "question": "Q5", "option_a": "a", "option_b": "b", "option_c": "c", "option_d": "d", "correct_option": "d"},
            {"id": 9, "question": "Q9", "option_a": "a", "option_b": "b", "option_c": "c", "option_d": "d", "correct_option": "A"}
        ]"#,
    );

    let store = open_source(&path).unwrap().load_store().unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap().id(), QuestionId::new(5));
    assert_eq!(store.get(1).unwrap().correct_option(), OptionKey::A);
}
