use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Failures surfaced by the game's outer layers.
///
/// The simulation itself never fails; collisions are ordinary state changes.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot parse config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
