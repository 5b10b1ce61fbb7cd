use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;
use crate::input::Direction;
use crate::snake::Position;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Largest accepted grid edge.
pub const MAX_GRID_EDGE: u16 = 256;

/// Default head cell at spawn.
pub const DEFAULT_START_POINT: Position = Position { x: 8, y: 8 };

/// Default snake length at spawn, head included.
pub const DEFAULT_START_LENGTH: u16 = 3;

/// Default number of food slots on the board.
pub const DEFAULT_FOOD_AMOUNT: u16 = 40;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// How long the final frame stays up unless a key dismisses it.
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

pub const GLYPH_EMPTY: &str = "○ ";
pub const GLYPH_SNAKE_HEAD: &str = "🐲";
pub const GLYPH_SNAKE_BODY: &str = "🟢";
pub const GLYPH_FOOD: &str = "🍫";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Glyphs drawn for each kind of cell.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub empty: String,
    pub snake_head: String,
    pub snake_body: String,
    pub food: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            empty: GLYPH_EMPTY.to_owned(),
            snake_head: GLYPH_SNAKE_HEAD.to_owned(),
            snake_body: GLYPH_SNAKE_BODY.to_owned(),
            food: GLYPH_FOOD.to_owned(),
        }
    }
}

/// Everything that shapes one game session.
///
/// Every field is optional in a JSON config file; missing fields keep the
/// compiled-in defaults.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start_point: Position,
    pub start_length: u16,
    /// `None` keeps the snake still until the first direction key.
    pub start_direction: Option<Direction>,
    pub food_amount: u16,
    pub tick_interval_ms: u64,
    pub glyphs: Glyphs,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            start_point: DEFAULT_START_POINT,
            start_length: DEFAULT_START_LENGTH,
            start_direction: Some(Direction::Up),
            food_amount: DEFAULT_FOOD_AMOUNT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            glyphs: Glyphs::default(),
        }
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be between 1x1 and {max}x{max}, got {width}x{height}", max = MAX_GRID_EDGE)]
    GridSize { width: u16, height: u16 },
    #[error("start point ({x}, {y}) lies outside the grid")]
    StartOutsideGrid { x: i32, y: i32 },
    #[error("start length must be at least 1")]
    ZeroStartLength,
    #[error("{food_amount} food items leave no free cell on a {cells}-cell grid")]
    TooMuchFood { food_amount: u16, cells: usize },
    #[error("tick interval must be at least {min} ms, got {0} ms", min = MIN_TICK_INTERVAL_MS)]
    TickTooShort(u64),
    #[error("glyph for {0} must not be empty")]
    EmptyGlyph(&'static str),
}

impl GameConfig {
    /// Reads a JSON config file; absent fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that a session can be started with this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 || width > MAX_GRID_EDGE || height > MAX_GRID_EDGE {
            return Err(ConfigError::GridSize { width, height });
        }

        if !self.start_point.is_within_bounds(self.grid) {
            return Err(ConfigError::StartOutsideGrid {
                x: self.start_point.x,
                y: self.start_point.y,
            });
        }

        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }

        let cells = self.grid.total_cells();
        if usize::from(self.food_amount) >= cells {
            return Err(ConfigError::TooMuchFood {
                food_amount: self.food_amount,
                cells,
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickTooShort(self.tick_interval_ms));
        }

        let glyphs = [
            ("empty cells", &self.glyphs.empty),
            ("the snake head", &self.glyphs.snake_head),
            ("the snake body", &self.glyphs.snake_body),
            ("food", &self.glyphs.food),
        ];
        for (name, glyph) in glyphs {
            if glyph.is_empty() {
                return Err(ConfigError::EmptyGlyph(name));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
