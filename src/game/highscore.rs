//! Top-5 high-score list persisted as plain text.
//!
//! The file holds one non-negative integer per line with no header. Lines may
//! be in any order on disk; the list is normalised on load and every write is
//! sorted descending, de-duplicated and capped.

use std::path::{Path, PathBuf};

use super::error::GameError;

/// Number of scores kept
pub const MAX_HIGH_SCORES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    scores: Vec<u32>,
}

impl HighScoreStore {
    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Read the list from `path`. A missing file is an empty list; any line
    /// that is not an integer fails the load.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, GameError> {
        let path = path.into();
        let scores = match std::fs::read_to_string(&path) {
            Ok(text) => parse_scores(&path, &text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(?path, "no high score file yet");
                Vec::new()
            }
            Err(source) => return Err(GameError::Io { path, source }),
        };

        let mut store = Self {
            path: Some(path),
            scores,
        };
        store.normalize();
        Ok(store)
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Add a finished round's score and persist the list.
    ///
    /// Returns the 0-based rank when the score was inserted, and `None` when it
    /// is already on the list or too low to make it. The in-memory list is
    /// updated even if the write fails.
    pub fn commit(&mut self, score: u32) -> Result<Option<usize>, GameError> {
        if self.scores.contains(&score) {
            return Ok(None);
        }
        self.scores.push(score);
        self.normalize();
        let rank = self.scores.iter().position(|s| *s == score);
        self.save()?;
        Ok(rank)
    }

    /// Write the list, one score per line
    pub fn save(&self) -> Result<(), GameError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| GameError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let mut text = String::new();
        for score in &self.scores {
            text.push_str(&score.to_string());
            text.push('\n');
        }
        std::fs::write(path, text).map_err(|source| GameError::Io {
            path: path.clone(),
            source,
        })
    }

    fn normalize(&mut self) {
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.dedup();
        self.scores.truncate(MAX_HIGH_SCORES);
    }
}

fn parse_scores(path: &Path, text: &str) -> Result<Vec<u32>, GameError> {
    let mut scores = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let score = trimmed
            .parse::<u32>()
            .map_err(|_| GameError::PersistenceCorruption {
                path: path.to_path_buf(),
                line: index + 1,
                content: line.to_string(),
            })?;
        scores.push(score);
    }
    Ok(scores)
}
