mod console;
mod opt;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::debug;

use quiz_core::model::QuizSettings;
use services::QuizSession;
use storage::open_source;

use crate::console::{Console, ResultOptions};
use crate::opt::{Cli, Commands};

fn run(cli: Cli) -> Result<()> {
    telemetry::setup(cli.debug).context("failed to initialize logging")?;
    debug!(?cli, "parsed arguments");

    let settings = QuizSettings::new(cli.test_size).context("invalid --test-size")?;

    let file = cli
        .file
        .context("no question bank given, pass --file or set QUIZ_FILE")?;

    // Loading is all-or-nothing: a malformed bank stops here, before any question is shown.
    let store = open_source(&file)?
        .load_store()
        .with_context(|| format!("failed to load questions from {}", file.display()))?;
    println!("Loaded {} questions.", store.len());

    let store = Arc::new(store);
    let mut session = match cli.seed {
        Some(seed) => QuizSession::seeded(store, settings, seed),
        None => QuizSession::new(store, settings),
    };

    let options = ResultOptions {
        export: cli.export,
        json: cli.json,
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => console.run_menu(&mut session, &options),
        Commands::Practice => console.run_practice(&mut session),
        Commands::Test => console.run_test(&mut session, &options).map(|_| ()),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        // At this layer (binary glue), printing once is fine.
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
