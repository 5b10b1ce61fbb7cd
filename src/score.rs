use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::GridSize;

/// Directory under the platform data dir shared by the score and log files.
pub const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Returns the platform data directory for this game.
#[must_use]
pub fn app_data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    app_data_dir().join(SCORE_FILE_NAME)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
struct GridBest {
    grid: GridSize,
    score: usize,
}

/// Best scores, one per grid size.
///
/// Lengths reached on different grids are not comparable, so each grid keeps
/// its own record.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    #[serde(default)]
    best: Vec<GridBest>,
}

impl ScoreBook {
    /// Reads the book at `path`.
    ///
    /// A missing file is an empty book; an unreadable or malformed one is an
    /// error so the caller can warn before play starts.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => return Err(error),
        };

        serde_json::from_str(&raw).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }

    /// Writes the book to `path`, creating parent directories when needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        fs::write(path, json)
    }

    /// Best score recorded on `grid`, 0 when none.
    #[must_use]
    pub fn best_for(&self, grid: GridSize) -> usize {
        self.best
            .iter()
            .find(|entry| entry.grid == grid)
            .map_or(0, |entry| entry.score)
    }

    /// Records `score` on `grid`; returns true when it beats the stored best.
    pub fn record(&mut self, grid: GridSize, score: usize) -> bool {
        match self.best.iter_mut().find(|entry| entry.grid == grid) {
            Some(entry) if score > entry.score => {
                entry.score = score;
                true
            }
            Some(_) => false,
            None => {
                self.best.push(GridBest { grid, score });
                true
            }
        }
    }
}
