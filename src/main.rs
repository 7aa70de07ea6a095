use std::fs::File;

use anyhow::{Context, Result};
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use snake::clock::ThreadClock;
use snake::config::{GameConfig, HIGH_SCORE_FILE};
use snake::engine::GameEngine;
use snake::game::{GameSummary, Outcome};
use snake::highscore::FileHighScoreStore;
use snake::term::{TermInput, TermManager};

const LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    // The terminal is the game screen, so logs go to a file
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(LOG_FILE).context("Failed to create log file")?,
    )
    .context("Failed to initialize logger")?;

    let store = FileHighScoreStore::new(HIGH_SCORE_FILE);
    let mut engine = GameEngine::new(GameConfig::default(), TermInput, TermManager::new(), ThreadClock, store)
        .context("Invalid game configuration")?;

    engine.renderer_mut().setup().context("Failed to set up terminal")?;

    let result = engine.run().and_then(|summary| {
        // Keep the summary on screen until the player is done reading
        TermInput.read_key_blocking()?;
        Ok(summary)
    });

    engine.renderer_mut().restore().context("Failed to restore terminal")?;
    let summary = result.context("Terminal I/O failed during the game")?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &GameSummary) {
    match summary.outcome {
        Outcome::Won => println!("YOU WON"),
        _ => println!("GAME OVER"),
    }
    println!("Final Score: {}", summary.score);
    println!("High Score: {}", summary.high_score);

    if !summary.persisted {
        warn!("High score {} was not saved", summary.high_score);
        eprintln!("Warning: could not save the high score to {}", HIGH_SCORE_FILE);
    }

    info!("Exiting with score {}", summary.score);
}
