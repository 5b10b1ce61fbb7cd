use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Fixed set of food slots; a slot is `None` once the board has no room left.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FoodField {
    slots: Vec<Option<Position>>,
}

impl FoodField {
    /// Fills `amount` slots with distinct free cells, each drawn uniformly
    /// from the cells still free.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        amount: usize,
        snake: &Snake,
    ) -> Self {
        let mut free = free_cells(bounds, snake, &Self { slots: Vec::new() });
        let slots = (0..amount)
            .map(|_| {
                if free.is_empty() {
                    return None;
                }
                let index = rng.gen_range(0..free.len());
                Some(free.swap_remove(index))
            })
            .collect();

        Self { slots }
    }

    /// Creates a field whose slots hold exactly `positions`.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self {
            slots: positions.into_iter().map(Some).collect(),
        }
    }

    /// Returns the slot index of the active food at `position`.
    #[must_use]
    pub fn slot_at(&self, position: Position) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(position))
    }

    /// Returns true if an active food item sits at `position`.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.slot_at(position).is_some()
    }

    /// Moves the food in slot `index` to a fresh free cell.
    ///
    /// Deactivates the slot and returns `None` when every cell is taken.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Option<Position> {
        self.slots[index] = None;
        let position = spawn_position(rng, bounds, snake, self);
        self.slots[index] = position;
        position
    }

    /// Number of slots, active or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of food items currently on the board.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Iterates over the positions of active food.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.slots.iter().flatten().copied()
    }
}

/// Picks a uniformly random cell free of snake segments and active food.
///
/// Returns `None` when the board is full.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    food: &FoodField,
) -> Option<Position> {
    let candidates = free_cells(bounds, snake, food);
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

/// Lists the in-bounds cells holding neither a snake segment nor active food,
/// in row-major order.
fn free_cells(bounds: GridSize, snake: &Snake, food: &FoodField) -> Vec<Position> {
    let mut taken = vec![false; bounds.total_cells()];
    let occupied = snake.segments().copied().chain(food.positions());
    for position in occupied {
        if let Some(index) = cell_index(bounds, position) {
            taken[index] = true;
        }
    }

    let width = i32::from(bounds.width).max(1);
    taken
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .filter_map(|(index, _)| {
            let index = i32::try_from(index).ok()?;
            Some(Position {
                x: index % width,
                y: index / width,
            })
        })
        .collect()
}

fn cell_index(bounds: GridSize, position: Position) -> Option<usize> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x = usize::try_from(position.x).ok()?;
    let y = usize::try_from(position.y).ok()?;
    Some(y * usize::from(bounds.width) + x)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{spawn_position, FoodField};
    use crate::snake::{Position, Snake};

    fn grid(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn food_spawn_never_overlaps_snake_or_other_food() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            Some(Direction::Left),
        );

        for _ in 0..50 {
            let food = FoodField::spawn(&mut rng, grid(8, 6), 20, &snake);
            let positions: HashSet<_> = food.positions().collect();

            assert_eq!(food.active_count(), 20);
            assert_eq!(positions.len(), 20);
            assert!(positions.iter().all(|position| !snake.occupies(*position)));
        }
    }

    #[test]
    fn crowded_large_grid_spawns_quickly_without_overlap() {
        let mut rng = StdRng::seed_from_u64(21);
        let bounds = grid(256, 256);
        let snake = Snake::new(Position { x: 8, y: 8 }, 3, Some(Direction::Up));

        let food = FoodField::spawn(&mut rng, bounds, 65_000, &snake);
        let positions: HashSet<_> = food.positions().collect();

        assert_eq!(food.active_count(), 65_000);
        assert_eq!(positions.len(), 65_000);
        assert!(positions
            .iter()
            .all(|position| position.is_within_bounds(bounds) && !snake.occupies(*position)));
    }

    #[test]
    fn spawn_leaves_slots_empty_when_cells_run_out() {
        let mut rng = StdRng::seed_from_u64(2);
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }], None);

        let food = FoodField::spawn(&mut rng, grid(3, 1), 4, &snake);

        assert_eq!(food.capacity(), 4);
        assert_eq!(food.active_count(), 2);
        assert!(food.contains(Position { x: 1, y: 0 }));
        assert!(food.contains(Position { x: 2, y: 0 }));
    }

    #[test]
    fn spawn_position_returns_none_on_full_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }], None);
        let food = FoodField::from_positions(vec![Position { x: 1, y: 0 }]);

        assert_eq!(spawn_position(&mut rng, grid(2, 1), &snake, &food), None);
    }

    #[test]
    fn spawn_position_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }], None);
        let food = FoodField::from_positions(vec![Position { x: 1, y: 0 }]);

        assert_eq!(
            spawn_position(&mut rng, grid(3, 1), &snake, &food),
            Some(Position { x: 2, y: 0 })
        );
    }

    #[test]
    fn relocate_moves_food_to_a_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::from_segments(vec![Position { x: 1, y: 1 }], None);
        let mut food = FoodField::from_positions(vec![
            Position { x: 0, y: 0 },
            Position { x: 2, y: 2 },
        ]);

        let moved = food
            .relocate(0, &mut rng, grid(3, 3), &snake)
            .expect("board has free cells");

        assert!(!snake.occupies(moved));
        assert_ne!(moved, Position { x: 2, y: 2 });
        assert_eq!(food.slot_at(moved), Some(0));
        assert_eq!(food.active_count(), 2);
    }

    #[test]
    fn relocate_deactivates_slot_on_full_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let snake = Snake::from_segments(
            vec![Position { x: 0, y: 0 }, Position { x: 1, y: 0 }],
            Some(Direction::Left),
        );
        let mut food = FoodField::from_positions(vec![Position { x: 0, y: 0 }]);

        assert_eq!(food.relocate(0, &mut rng, grid(2, 1), &snake), None);
        assert_eq!(food.active_count(), 0);
        assert_eq!(food.capacity(), 1);
    }
}
