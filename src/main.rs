use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use grid_snake::config::{GameConfig, GridSize, GAME_OVER_HOLD};
use grid_snake::game::GameState;
use grid_snake::input::{poll_input, wait_for_key, GameInput};
use grid_snake::renderer;
use grid_snake::score::{scores_path, ScoreBook};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use grid_snake::ui::hud::HudInfo;
use grid_snake::{logging, Error};
use log::{info, warn};
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding the built-in game settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Number of food items kept on the board.
    #[arg(long)]
    food: Option<u16>,

    /// Milliseconds between snake moves.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Neither read nor write the best-score file.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, Error> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        config.grid = GridSize {
            width: self.width.unwrap_or(config.grid.width),
            height: self.height.unwrap_or(config.grid.height),
        };
        if let Some(food) = self.food {
            config.food_amount = food;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// How a session ended.
enum Outcome {
    GameOver,
    Quit,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli) -> Result<(), Error> {
    let config = cli.game_config()?;

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(error) = logging::init(cli.log_level.into(), &log_path) {
        eprintln!("Warning: logging disabled: {error}");
    }
    info!("starting session with {config:?}");

    let scores_file = scores_path();
    let mut score_book = if cli.no_save {
        None
    } else {
        match ScoreBook::load(&scores_file) {
            Ok(book) => Some(book),
            Err(error) => {
                warn!("cannot read best scores: {error}");
                eprintln!("Warning: best scores unavailable this session: {error}");
                None
            }
        }
    };
    let high_score = score_book
        .as_ref()
        .map_or(0, |book| book.best_for(config.grid));

    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(&config, seed),
        None => GameState::new(&config),
    };

    install_panic_hook();
    let outcome = {
        let mut session = TerminalSession::enter()?;
        run(&mut session, &mut state, &config, high_score)?
    };

    let score = state.score();
    info!("session ended after {} ticks with score {score}", state.tick_count);
    println!("Your Score: {score}");

    if let Some(book) = score_book.as_mut() {
        if matches!(outcome, Outcome::GameOver) && book.record(config.grid, score) {
            if let Err(error) = book.save(&scores_file) {
                warn!("cannot save best scores: {error}");
                eprintln!("Failed to save high score: {error}");
            }
        }
        println!(
            "Best Score ({}x{}): {}",
            config.grid.width,
            config.grid.height,
            book.best_for(config.grid)
        );
    }

    Ok(())
}

fn run(
    session: &mut TerminalSession,
    state: &mut GameState,
    config: &GameConfig,
    high_score: usize,
) -> Result<Outcome, Error> {
    let hud = HudInfo { high_score };
    let tick_interval = config.tick_interval();

    loop {
        session.draw(|frame| renderer::render(frame, state, &config.glyphs, &hud))?;

        if state.is_over() {
            wait_for_key(GAME_OVER_HOLD)?;
            return Ok(Outcome::GameOver);
        }

        let deadline = Instant::now() + tick_interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            match poll_input(remaining)? {
                Some(GameInput::Quit) => return Ok(Outcome::Quit),
                Some(input) => state.apply_input(input),
                None => {}
            }
        }

        state.tick();
    }
}
