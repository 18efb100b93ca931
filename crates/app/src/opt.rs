use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quiz_core::model::DEFAULT_TEST_QUESTION_LIMIT;
use services::WRONG_ANSWERS_FILE_NAME;

#[derive(Debug, Parser)]
#[command(name = "quiz", about = "Multiple-choice practice and test tool")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Question bank (.csv or .json). Required.
    #[arg(short, long, global = true, env = "QUIZ_FILE")]
    pub(crate) file: Option<PathBuf>,

    /// Questions per test.
    #[arg(long, global = true, env = "QUIZ_TEST_SIZE", default_value_t = DEFAULT_TEST_QUESTION_LIMIT)]
    pub(crate) test_size: usize,

    /// Fixed seed for a reproducible question order.
    #[arg(long, global = true)]
    pub(crate) seed: Option<u64>,

    /// Write wrong answers of a finished test to this file.
    #[arg(
        long,
        global = true,
        num_args(0..=1),
        require_equals(true),
        default_missing_value(WRONG_ANSWERS_FILE_NAME)
    )]
    pub(crate) export: Option<PathBuf>,

    /// Print the test result as a JSON line.
    #[arg(long, global = true)]
    pub(crate) json: bool,

    #[arg(short, long, global = true)]
    pub(crate) debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Choose practice or test interactively (default).
    Menu,
    /// Go through every question once, unscored.
    Practice,
    /// Scored test with negative marking.
    Test,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["quiz", "--file", "bank.csv"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.test_size, 50);
        assert_eq!(cli.export, None);
        assert!(!cli.json);
    }

    #[test]
    fn bare_export_uses_default_file_name() {
        let cli = Cli::try_parse_from(["quiz", "-f", "bank.csv", "--export", "test"]).unwrap();
        assert_eq!(cli.export, Some(PathBuf::from("wrong_answers.txt")));
        assert_eq!(cli.command, Some(Commands::Test));

        let cli = Cli::try_parse_from(["quiz", "-f", "bank.csv", "--export=out.txt", "--test-size", "10"]).unwrap();
        assert_eq!(cli.export, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.test_size, 10);
    }

    #[test]
    fn parses_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quiz", "test", "--file", "bank.csv", "--seed", "7", "--export", "--json", "-d",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Test));
        assert_eq!(cli.file, Some(PathBuf::from("bank.csv")));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.export, Some(PathBuf::from("wrong_answers.txt")));
        assert!(cli.json);
        assert!(cli.debug);

        let cli = Cli::try_parse_from(["quiz", "practice", "-f", "bank.json", "--test-size", "5"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Practice));
        assert_eq!(cli.test_size, 5);
    }

    #[test]
    fn file_and_test_size_fall_back_to_env() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|name| name.to_str())
                .map(str::to_owned)
        };
        assert_eq!(env_of("file").as_deref(), Some("QUIZ_FILE"));
        assert_eq!(env_of("test_size").as_deref(), Some("QUIZ_TEST_SIZE"));
        assert_eq!(env_of("seed"), None);
    }
}
