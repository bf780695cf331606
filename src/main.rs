mod term;

use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use trophy_snake::{Config, SnakeGame};

use crate::term::TermManager;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_logging(&config)?;

    let term = TermManager::new().context("acquiring the terminal")?;
    let mut game = SnakeGame::new(term, config)?;
    let result = game.run()?;

    std::process::exit(result.exit_code());
}

/// Logs go to a file, if one is configured; the terminal belongs to the game.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("trophy-snake starting");
    Ok(())
}
