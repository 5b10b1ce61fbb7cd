use std::fs::{self, File};
use std::path::{Path, PathBuf};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::Error;
use crate::score::app_data_dir;

const LOG_FILE_NAME: &str = "grid-snake.log";

/// Default log file location next to the score file.
#[must_use]
pub fn default_log_path() -> PathBuf {
    app_data_dir().join(LOG_FILE_NAME)
}

/// Routes `log` records to `path`, truncating any previous session's log.
///
/// The terminal is in raw mode while playing, so records never go to the
/// screen. `LevelFilter::Off` installs nothing.
pub fn init(level: LevelFilter, path: &Path) -> Result<(), Error> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(level, Config::default(), File::create(path)?)?;
    Ok(())
}
