use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Deserialize;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// Any direction is legal while the snake has none.
#[must_use]
pub fn direction_change_is_valid(current: Option<Direction>, next: Direction) -> bool {
    current.is_none_or(|current| next != current.opposite())
}

/// Translates one key event; keys without a binding map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(GameInput::Direction(Direction::Up)),
            'a' => Some(GameInput::Direction(Direction::Left)),
            's' => Some(GameInput::Direction(Direction::Down)),
            'd' => Some(GameInput::Direction(Direction::Right)),
            'p' | ' ' => Some(GameInput::Pause),
            'q' => Some(GameInput::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Waits up to `timeout` for one terminal event and maps it.
///
/// Returns `Ok(None)` on timeout and for events that carry no game input.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Waits until a key is pressed or `timeout` runs out.
///
/// Returns true when a key press ended the wait.
pub fn wait_for_key(timeout: Duration) -> io::Result<bool> {
    wait_until_key(Instant::now() + timeout, poll_key_press)
}

fn poll_key_press(timeout: Duration) -> io::Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }

    Ok(matches!(event::read()?, Event::Key(key) if key.kind == KeyEventKind::Press))
}

fn wait_until_key<F>(deadline: Instant, mut poll: F) -> io::Result<bool>
where
    F: FnMut(Duration) -> io::Result<bool>,
{
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }

        if poll(remaining)? {
            return Ok(true);
        }
    }
}
