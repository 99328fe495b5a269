//! Core game module containing shared types, resources, events, and constants.

mod components;
mod constants;
mod error;
mod events;
mod resources;

pub use components::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use resources::*;
