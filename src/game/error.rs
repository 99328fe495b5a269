//! Geometry errors raised when a grid leaves no legal cell or move.

use thiserror::Error;

use super::Position;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("grid {columns}x{rows} is smaller than the {min}x{min} minimum")]
    GridTooSmall { columns: i32, rows: i32, min: i32 },

    #[error("no free interior cell left for food on a {columns}x{rows} grid")]
    NoFreeCell { columns: i32, rows: i32 },

    #[error("every direction from ({}, {}) runs into a wall", .from.x, .from.y)]
    NoSafeDirection { from: Position },
}
