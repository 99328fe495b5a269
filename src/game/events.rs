//! Game events (messages).

use bevy::prelude::*;

use super::{Direction, Position};

/// Message sent by input adapters to begin a session.
#[derive(Message, Debug, Clone, Copy)]
pub struct StartRequested;

/// Message sent by input adapters to change the travel direction.
#[derive(Message, Debug, Clone, Copy)]
pub struct SteerRequested(pub Direction);

/// Message triggered when food is eaten (for visual effects).
#[derive(Message, Debug, Clone, Copy)]
pub struct FoodEaten {
    pub position: Position,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    Wall,
    SelfBite,
    BoardCleared,
}

/// Message triggered when the running session ends.
#[derive(Message, Debug, Clone, Copy)]
pub struct SessionEnded {
    pub score: u32,
    pub cause: EndCause,
}
