use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, GridSize};
use crate::food::FoodField;
use crate::input::GameInput;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: FoodField,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::new(
            config.start_point,
            config.start_length,
            config.start_direction,
        );
        let food = FoodField::spawn(
            &mut rng,
            config.grid,
            usize::from(config.food_amount),
            &snake,
        );

        Self {
            snake,
            food,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            bounds: config.grid,
            rng,
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        self.snake.turn();
        let Some(next_head) = self.snake.next_head_position() else {
            return;
        };

        if !next_head.is_within_bounds(self.bounds) {
            self.end(DeathReason::WallCollision);
            return;
        }

        if self.snake.body_occupies(next_head) {
            self.end(DeathReason::SelfCollision);
            return;
        }

        let eaten = self.food.slot_at(next_head);
        self.snake.advance(next_head, eaten.is_some());

        if let Some(slot) = eaten {
            debug!(
                "food eaten at ({}, {}), length now {}",
                next_head.x,
                next_head.y,
                self.snake.len()
            );
            if self
                .food
                .relocate(slot, &mut self.rng, self.bounds, &self.snake)
                .is_none()
            {
                info!("board full, food slot {slot} retired");
            }
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Running {
                    self.snake.buffer_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Running => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Running,
                    other => other,
                };
            }
            GameInput::Quit => {}
        }
    }

    /// Final and running score: the snake length.
    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    fn end(&mut self, reason: DeathReason) {
        info!(
            "game over after {} ticks: {reason:?}, score {}",
            self.tick_count,
            self.score()
        );
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GameConfig, GridSize};
    use crate::food::FoodField;
    use crate::input::{Direction, GameInput};

    use super::{DeathReason, GameState, GameStatus};
    use crate::snake::{Position, Snake};

    fn config(width: u16, height: u16) -> GameConfig {
        GameConfig {
            grid: GridSize { width, height },
            start_point: Position { x: 0, y: 0 },
            start_length: 1,
            food_amount: 0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn default_session_moves_up_from_start() {
        let mut state = GameState::new_with_seed(&GameConfig::default(), 9);
        state.food = FoodField::from_positions(Vec::new());

        state.tick();

        assert_eq!(state.snake.head(), Position { x: 8, y: 7 });
        assert_eq!(state.score(), 3);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn default_session_spawns_every_food_slot() {
        let state = GameState::new_with_seed(&GameConfig::default(), 4);

        assert_eq!(state.food.active_count(), 40);
        assert!(state.food.positions().all(|food| !state.snake.occupies(food)));
    }

    #[test]
    fn snake_grows_on_the_tick_it_eats() {
        let mut state = GameState::new_with_seed(&config(10, 10), 1);
        state.snake = Snake::new(Position { x: 1, y: 1 }, 2, Some(Direction::Right));
        state.food = FoodField::from_positions(vec![Position { x: 2, y: 1 }]);

        state.tick();

        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.food.active_count(), 1);
        assert!(!state.food.contains(Position { x: 2, y: 1 }));

        state.food = FoodField::from_positions(Vec::new());
        state.tick();
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(&config(4, 4), 2);
        state.snake = Snake::new(Position { x: 3, y: 1 }, 1, Some(Direction::Right));

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(state.snake.head(), Position { x: 3, y: 1 });
    }

    #[test]
    fn fresh_snake_survives_its_first_tick_in_any_direction() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut state = GameState::new_with_seed(&config(10, 10), 12);
            state.snake = Snake::new(Position { x: 5, y: 5 }, 3, Some(direction));

            state.tick();

            assert_eq!(state.status, GameStatus::Running, "{direction:?}");
            assert_eq!(state.snake.head(), Position { x: 5, y: 5 }.step(direction));
        }
    }

    #[test]
    fn every_wall_ends_the_game() {
        let cases = [
            (Position { x: 0, y: 5 }, Direction::Left),
            (Position { x: 9, y: 5 }, Direction::Right),
            (Position { x: 5, y: 0 }, Direction::Up),
            (Position { x: 5, y: 9 }, Direction::Down),
        ];

        for (start, direction) in cases {
            let mut state = GameState::new_with_seed(&config(10, 10), 11);
            state.snake = Snake::new(start, 1, Some(direction));

            state.tick();

            assert_eq!(
                state.death_reason,
                Some(DeathReason::WallCollision),
                "{direction:?} from {start:?}"
            );
            assert_eq!(state.snake.head(), start);
        }
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(&config(6, 6), 3);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 3 },
                Position { x: 2, y: 3 },
                Position { x: 3, y: 3 },
                Position { x: 3, y: 2 },
            ],
            Some(Direction::Down),
        );

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn entering_the_current_tail_cell_is_fatal() {
        let mut state = GameState::new_with_seed(&config(6, 6), 5);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
            ],
            Some(Direction::Down),
        );

        state.tick();

        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn no_ticks_after_game_over() {
        let mut state = GameState::new_with_seed(&config(2, 2), 6);
        state.snake = Snake::new(Position { x: 0, y: 0 }, 1, Some(Direction::Up));

        state.tick();
        state.tick();

        assert!(state.is_over());
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn reverse_input_within_a_tick_is_ignored() {
        let mut state = GameState::new_with_seed(&config(10, 10), 7);
        state.snake = Snake::new(Position { x: 5, y: 5 }, 3, Some(Direction::Up));

        state.apply_input(GameInput::Direction(Direction::Down));
        state.tick();

        assert_eq!(state.snake.head(), Position { x: 5, y: 4 });
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn paused_session_does_not_move() {
        let mut state = GameState::new_with_seed(&config(10, 10), 8);
        state.snake = Snake::new(Position { x: 5, y: 5 }, 1, Some(Direction::Left));

        state.apply_input(GameInput::Pause);
        state.apply_input(GameInput::Direction(Direction::Up));
        state.tick();
        assert_eq!(state.snake.head(), Position { x: 5, y: 5 });
        assert_eq!(state.status, GameStatus::Paused);

        state.apply_input(GameInput::Pause);
        state.tick();
        assert_eq!(state.snake.head(), Position { x: 4, y: 5 });
    }

    #[test]
    fn food_slot_retires_when_board_fills() {
        let mut state = GameState::new_with_seed(&config(3, 1), 10);
        state.snake = Snake::from_segments(
            vec![Position { x: 1, y: 0 }, Position { x: 0, y: 0 }],
            Some(Direction::Right),
        );
        state.food = FoodField::from_positions(vec![Position { x: 2, y: 0 }]);

        state.tick();

        assert_eq!(state.score(), 3);
        assert_eq!(state.food.active_count(), 0);
        assert_eq!(state.status, GameStatus::Running);
    }
}
