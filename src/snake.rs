use std::collections::VecDeque;

use serde::Deserialize;

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Option<Direction>,
    buffered_direction: Option<Direction>,
    next_buffered_direction: Option<Direction>,
}

impl Snake {
    /// Creates a snake of `length` segments with its head at `start`.
    ///
    /// The tail trails away from `direction` (to the right when there is no
    /// direction yet) and may extend past the grid edge.
    #[must_use]
    pub fn new(start: Position, length: u16, direction: Option<Direction>) -> Self {
        let trail = direction.map_or(Direction::Right, Direction::opposite);
        let mut segments = Vec::with_capacity(usize::from(length.max(1)));
        let mut segment = start;
        segments.push(segment);
        for _ in 1..length {
            segment = segment.step(trail);
            segments.push(segment);
        }

        Self::from_segments(segments, direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Option<Direction>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head");

        Self {
            body: VecDeque::from(segments),
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
        }
    }

    /// Commits the buffered turn and returns the direction for this tick.
    ///
    /// A second queued turn is promoted so it applies on the following tick.
    pub fn turn(&mut self) -> Option<Direction> {
        self.direction = self.buffered_direction;
        if let Some(next) = self.next_buffered_direction.take() {
            self.buffered_direction = Some(next);
        }
        self.direction
    }

    /// Returns the cell the head enters on the current direction, if moving.
    #[must_use]
    pub fn next_head_position(&self) -> Option<Position> {
        self.direction.map(|direction| self.head().step(direction))
    }

    /// Moves the head to `next_head`; every segment follows the one ahead.
    ///
    /// With `grow` set the old tail cell is kept, adding one segment.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Buffers the next direction, supporting a two-deep queue for quick turns.
    ///
    /// When no turn is queued yet, the direction is stored as the primary
    /// buffered direction (rejecting direct reversals of the current direction).
    /// When a turn is already queued, a second direction is stored with
    /// last-input-wins semantics (rejecting reversals of the queued direction).
    pub fn buffer_direction(&mut self, direction: Direction) {
        if self.buffered_direction == self.direction {
            if direction_change_is_valid(self.direction, direction) {
                self.buffered_direction = Some(direction);
            }
        } else if direction_change_is_valid(self.buffered_direction, direction) {
            self.next_buffered_direction = Some(direction);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if any segment other than the head occupies `position`.
    #[must_use]
    pub fn body_occupies(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
