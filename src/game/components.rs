//! Grid value types and ECS components for the snake game.

use bevy::prelude::*;
use rand::Rng;

use super::{GeometryError, MIN_VALID_GRID_SIDE};

/// A grid cell. `x` is the column, `y` is the row; rows grow downward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        match direction {
            Direction::Up => Position::new(self.x, self.y - 1),
            Direction::Down => Position::new(self.x, self.y + 1),
            Direction::Left => Position::new(self.x - 1, self.y),
            Direction::Right => Position::new(self.x + 1, self.y),
        }
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Reads keyboard input and returns the direction pressed this frame, if any.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>) -> Option<Direction> {
        if keyboard_input.just_pressed(KeyCode::ArrowUp) || keyboard_input.just_pressed(KeyCode::KeyW)
        {
            Some(Direction::Up)
        } else if keyboard_input.just_pressed(KeyCode::ArrowDown)
            || keyboard_input.just_pressed(KeyCode::KeyS)
        {
            Some(Direction::Down)
        } else if keyboard_input.just_pressed(KeyCode::ArrowLeft)
            || keyboard_input.just_pressed(KeyCode::KeyA)
        {
            Some(Direction::Left)
        } else if keyboard_input.just_pressed(KeyCode::ArrowRight)
            || keyboard_input.just_pressed(KeyCode::KeyD)
        {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "^",
            Direction::Down => "v",
            Direction::Left => "<",
            Direction::Right => ">",
        }
    }
}

/// Playable grid size. Column 0, column `columns - 1`, row 0 and row
/// `rows - 1` are wall cells; everything else is interior.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridBounds {
    pub columns: i32,
    pub rows: i32,
}

impl GridBounds {
    pub fn new(columns: i32, rows: i32) -> Result<Self, GeometryError> {
        if columns < MIN_VALID_GRID_SIDE || rows < MIN_VALID_GRID_SIDE {
            return Err(GeometryError::GridTooSmall {
                columns,
                rows,
                min: MIN_VALID_GRID_SIDE,
            });
        }
        Ok(GridBounds { columns, rows })
    }

    /// True when `position` sits on the wall border or outside it.
    pub fn is_wall(&self, position: Position) -> bool {
        position.x <= 0
            || position.y <= 0
            || position.x >= self.columns - 1
            || position.y >= self.rows - 1
    }

    pub fn is_interior(&self, position: Position) -> bool {
        !self.is_wall(position)
    }

    pub fn interior_len(&self) -> usize {
        ((self.columns - 2) * (self.rows - 2)) as usize
    }

    /// Every interior cell, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.rows - 1).flat_map(move |y| (1..self.columns - 1).map(move |x| Position::new(x, y)))
    }

    /// A uniformly random interior cell.
    pub fn random_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(1..self.columns - 1),
            rng.random_range(1..self.rows - 1),
        )
    }
}

/// Marker for the sidebar root node.
#[derive(Component)]
pub struct Sidebar;

/// Marker for the start button.
#[derive(Component)]
pub struct StartButton;

/// On-screen direction pad button.
#[derive(Component)]
pub struct ControlButton(pub Direction);

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the session message UI element.
#[derive(Component)]
pub struct MessageText;

/// Expanding ring drawn where food was eaten.
#[derive(Component)]
pub struct PulseEffect {
    pub position: Position,
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_grids_without_an_interior() {
        assert_eq!(
            GridBounds::new(2, 10),
            Err(GeometryError::GridTooSmall {
                columns: 2,
                rows: 10,
                min: 3
            })
        );
        assert!(GridBounds::new(3, 3).is_ok());
    }

    #[test]
    fn border_cells_are_walls() {
        let bounds = GridBounds::new(20, 20).unwrap();
        for i in 0..20 {
            assert!(bounds.is_wall(Position::new(0, i)));
            assert!(bounds.is_wall(Position::new(19, i)));
            assert!(bounds.is_wall(Position::new(i, 0)));
            assert!(bounds.is_wall(Position::new(i, 19)));
        }
        assert!(bounds.is_interior(Position::new(1, 1)));
        assert!(bounds.is_interior(Position::new(18, 18)));
        assert!(bounds.is_wall(Position::new(25, 5)));
    }

    #[test]
    fn interior_lists_every_inner_cell_once() {
        let bounds = GridBounds::new(6, 5).unwrap();
        let cells: Vec<_> = bounds.interior().collect();
        assert_eq!(cells.len(), bounds.interior_len());
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|c| bounds.is_interior(*c)));
    }

    #[test]
    fn step_moves_one_cell_with_rows_growing_down() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Position::new(6, 5));
    }
}
