use std::fs;
use std::io::{self, ErrorKind};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::{error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("could not read high score from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("high score file {} is not a number: {source}", path.display())]
    Parse { path: PathBuf, source: ParseIntError },
    #[error("could not write high score to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Where the best score survives between runs.
pub trait HighScoreStore {
    /// The stored score, 0 if there is none or it cannot be read.
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// Keeps the score as a bare number in a text file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like `load` but reports why nothing could be read. A missing file
    /// counts as a score of 0, not an error.
    pub fn try_load(&self) -> Result<u32, HighScoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(HighScoreError::Read { path: self.path.clone(), source }),
        };

        text.trim()
            .parse()
            .map_err(|source| HighScoreError::Parse { path: self.path.clone(), source })
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        self.try_load().unwrap_or_else(|e| {
            warn!("Ignoring stored high score: {}", e);
            0
        })
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| {
            let e = HighScoreError::Write { path: self.path.clone(), source };
            error!("{}", e);
            e
        })
    }
}
