//! Food placement on free interior cells.

use rand::prelude::*;
use std::collections::VecDeque;

use crate::game::{
    DENSE_OCCUPANCY_DENOMINATOR, DENSE_OCCUPANCY_NUMERATOR, GeometryError, GridBounds, Position,
};

/// Picks a uniformly random interior cell that no snake segment occupies.
///
/// While the snake is sparse this samples random interior cells until one is
/// free. Once the snake covers more than 80% of the interior it enumerates the
/// free cells instead, so the call always terminates and reports
/// [`GeometryError::NoFreeCell`] when the interior is full.
pub fn place_food<R: Rng + ?Sized>(
    snake: &VecDeque<Position>,
    bounds: GridBounds,
    rng: &mut R,
) -> Result<Position, GeometryError> {
    let interior = bounds.interior_len();

    if snake.len() * DENSE_OCCUPANCY_DENOMINATOR <= interior * DENSE_OCCUPANCY_NUMERATOR {
        loop {
            let position = bounds.random_interior(rng);
            if !snake.iter().any(|segment| segment.collides_with(&position)) {
                return Ok(position);
            }
        }
    }

    let free: Vec<Position> = bounds
        .interior()
        .filter(|cell| !snake.contains(cell))
        .collect();

    free.choose(rng).copied().ok_or(GeometryError::NoFreeCell {
        columns: bounds.columns,
        rows: bounds.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn grid(columns: i32, rows: i32) -> GridBounds {
        GridBounds::new(columns, rows).unwrap()
    }

    #[test]
    fn never_lands_on_walls_or_the_snake() {
        let bounds = grid(20, 20);
        let snake: VecDeque<_> = (3..12).map(|x| Position::new(x, 7)).collect();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let food = place_food(&snake, bounds, &mut rng).unwrap();
            assert!(bounds.is_interior(food), "{food:?} is on the wall");
            assert!(!snake.contains(&food), "{food:?} is on the snake");
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let bounds = grid(5, 5);
        let free = Position::new(2, 3);
        let snake: VecDeque<_> = bounds.interior().filter(|c| *c != free).collect();

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place_food(&snake, bounds, &mut rng), Ok(free));
    }

    #[test]
    fn full_interior_is_an_error() {
        let bounds = grid(4, 4);
        let snake: VecDeque<_> = bounds.interior().collect();

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            place_food(&snake, bounds, &mut rng),
            Err(GeometryError::NoFreeCell {
                columns: 4,
                rows: 4
            })
        );
    }

    #[test]
    fn covers_every_free_cell_of_a_small_grid() {
        let bounds = grid(4, 4);
        let snake = VecDeque::from([Position::new(1, 1)]);
        let mut seen = std::collections::HashSet::new();

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            seen.insert(place_food(&snake, bounds, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }
}
