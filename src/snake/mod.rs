//! Snake plugin - handles steering input, the initial direction, and the
//! per-tick movement rules.

use bevy::prelude::*;
use rand::prelude::*;
use std::collections::VecDeque;

use crate::food::place_food;
use crate::game::{Direction, GeometryError, GridBounds, Position, SteerRequested};

/// Plugin for snake steering input.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SteerRequested>()
            .add_systems(Update, snake_steering_input);
    }
}

/// System to turn arrow/WASD presses into steering requests.
fn snake_steering_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut steer_writer: MessageWriter<SteerRequested>,
) {
    if let Some(direction) = Direction::from_input(&keyboard_input) {
        steer_writer.write(SteerRequested(direction));
    }
}

/// Directions whose first step from `start` stays off the wall border.
pub fn safe_directions(start: Position, bounds: GridBounds) -> Vec<Direction> {
    let mut directions = Vec::with_capacity(4);
    if start.y > 1 {
        directions.push(Direction::Up);
    }
    if start.y < bounds.rows - 2 {
        directions.push(Direction::Down);
    }
    if start.x > 1 {
        directions.push(Direction::Left);
    }
    if start.x < bounds.columns - 2 {
        directions.push(Direction::Right);
    }
    directions
}

/// Picks a random direction that does not drive `start` straight into a wall.
pub fn pick_direction<R: Rng + ?Sized>(
    start: Position,
    bounds: GridBounds,
    rng: &mut R,
) -> Result<Direction, GeometryError> {
    safe_directions(start, bounds)
        .choose(rng)
        .copied()
        .ok_or(GeometryError::NoSafeDirection { from: start })
}

/// What the snake ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Result of advancing the snake by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Head advanced and the tail followed.
    Moved,
    /// Head landed on food; the snake kept its tail and new food was placed.
    Ate { at: Position },
    /// Head would have entered a wall or the body. Nothing was changed.
    Crashed(Collision),
    /// Head landed on food and the snake now fills the whole interior.
    Filled,
}

/// Advances the snake (head first) one cell in `direction`.
///
/// Collisions leave the snake and food untouched. Eating grows the snake by
/// one and places fresh food clear of the grown body.
pub fn advance<R: Rng + ?Sized>(
    snake: &mut VecDeque<Position>,
    food: &mut Option<Position>,
    direction: Direction,
    bounds: GridBounds,
    rng: &mut R,
) -> Step {
    let Some(head) = snake.front().copied() else {
        return Step::Crashed(Collision::Body);
    };
    let new_head = head.step(direction);

    if bounds.is_wall(new_head) {
        return Step::Crashed(Collision::Wall);
    }
    // Every segment counts, including the tail that would move away this tick.
    if snake.contains(&new_head) {
        return Step::Crashed(Collision::Body);
    }

    snake.push_front(new_head);

    if food.is_some_and(|f| f.collides_with(&new_head)) {
        return match place_food(snake, bounds, rng) {
            Ok(next) => {
                *food = Some(next);
                Step::Ate { at: new_head }
            }
            Err(_) => {
                *food = None;
                Step::Filled
            }
        };
    }

    snake.pop_back();
    Step::Moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn grid(columns: i32, rows: i32) -> GridBounds {
        GridBounds::new(columns, rows).unwrap()
    }

    fn snake(cells: &[(i32, i32)]) -> VecDeque<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn moving_keeps_length_and_vacates_the_tail() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut body = snake(&[(5, 5)]);
        let mut food = Some(Position::new(10, 10));

        let step = advance(&mut body, &mut food, Direction::Right, grid(20, 20), &mut rng);

        assert_eq!(step, Step::Moved);
        assert_eq!(body, snake(&[(6, 5)]));
        assert_eq!(food, Some(Position::new(10, 10)));
    }

    #[test]
    fn longer_snake_follows_its_head() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut body = snake(&[(5, 5), (5, 6), (5, 7)]);
        let mut food = Some(Position::new(1, 1));

        advance(&mut body, &mut food, Direction::Left, grid(20, 20), &mut rng);

        assert_eq!(body, snake(&[(4, 5), (5, 5), (5, 6)]));
        assert!(!body.contains(&Position::new(5, 7)));
    }

    #[test]
    fn eating_grows_and_replaces_food() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = grid(20, 20);
        let mut body = snake(&[(6, 5), (5, 5)]);
        let mut food = Some(Position::new(7, 5));

        let step = advance(&mut body, &mut food, Direction::Right, bounds, &mut rng);

        assert_eq!(
            step,
            Step::Ate {
                at: Position::new(7, 5)
            }
        );
        assert_eq!(body, snake(&[(7, 5), (6, 5), (5, 5)]));
        let food = food.unwrap();
        assert!(bounds.is_interior(food));
        assert!(!body.contains(&food));
    }

    #[test]
    fn stepping_onto_a_wall_crashes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut body = snake(&[(1, 5)]);
        let mut food = Some(Position::new(9, 9));

        let step = advance(&mut body, &mut food, Direction::Left, grid(20, 20), &mut rng);

        assert_eq!(step, Step::Crashed(Collision::Wall));
        assert_eq!(body, snake(&[(1, 5)]));
    }

    #[test]
    fn every_border_cell_crashes() {
        let bounds = grid(20, 20);
        let mut rng = StdRng::seed_from_u64(0);
        let cases = [
            ((1, 9), Direction::Left),
            ((18, 9), Direction::Right),
            ((9, 1), Direction::Up),
            ((9, 18), Direction::Down),
        ];
        for ((x, y), direction) in cases {
            let mut body = snake(&[(x, y)]);
            let mut food = None;
            assert_eq!(
                advance(&mut body, &mut food, direction, bounds, &mut rng),
                Step::Crashed(Collision::Wall)
            );
        }
    }

    #[test]
    fn biting_the_body_crashes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut body = snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        let mut food = None;

        let step = advance(&mut body, &mut food, Direction::Down, grid(20, 20), &mut rng);

        assert_eq!(step, Step::Crashed(Collision::Body));
    }

    #[test]
    fn the_tail_still_counts_as_body() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut body = snake(&[(5, 5), (5, 6)]);
        let mut food = None;

        let step = advance(&mut body, &mut food, Direction::Down, grid(20, 20), &mut rng);

        assert_eq!(step, Step::Crashed(Collision::Body));
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let mut rng = StdRng::seed_from_u64(0);
        let bounds = grid(4, 4);
        let mut body = snake(&[(1, 2), (2, 2), (2, 1)]);
        let mut food = Some(Position::new(1, 1));

        let step = advance(&mut body, &mut food, Direction::Up, bounds, &mut rng);

        assert_eq!(step, Step::Filled);
        assert_eq!(body.len(), 4);
        assert_eq!(food, None);
    }

    #[test]
    fn corner_start_only_allows_moves_away_from_walls() {
        let bounds = grid(20, 20);
        assert_eq!(
            safe_directions(Position::new(1, 1), bounds),
            vec![Direction::Down, Direction::Right]
        );
        assert_eq!(
            safe_directions(Position::new(18, 18), bounds),
            vec![Direction::Up, Direction::Left]
        );
        assert_eq!(safe_directions(Position::new(9, 9), bounds).len(), 4);
    }

    #[test]
    fn picked_direction_never_hits_a_wall_first() {
        let bounds = grid(5, 5);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = bounds.random_interior(&mut rng);
            let direction = pick_direction(start, bounds, &mut rng).unwrap();
            assert!(bounds.is_interior(start.step(direction)));
        }
    }

    #[test]
    fn single_cell_interior_has_no_safe_direction() {
        let mut rng = StdRng::seed_from_u64(0);
        let start = Position::new(1, 1);
        assert_eq!(
            pick_direction(start, grid(3, 3), &mut rng),
            Err(GeometryError::NoSafeDirection { from: start })
        );
    }
}
