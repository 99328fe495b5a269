//! Game constants for grid sizing, pacing, colors, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

// Window
pub const DEFAULT_WINDOW_WIDTH: u32 = 1050;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;

// Grid sizing
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const CELLS_ALONG_SHORT_SIDE: f32 = 20.0;
pub const MIN_GRID_SIDE: i32 = 5;
pub const MIN_VALID_GRID_SIDE: i32 = 3;

// Pacing
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const TICK_INTERVAL_STEP: Duration = Duration::from_millis(20);
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

// Food placement switches from sampling to enumeration above this share of the interior
pub const DENSE_OCCUPANCY_NUMERATOR: usize = 4;
pub const DENSE_OCCUPANCY_DENOMINATOR: usize = 5;

// End of session
pub const GAME_OVER_MESSAGE: &str = "Game Over";
pub const BOARD_CLEARED_MESSAGE: &str = "Board Cleared";
pub const FLASH_DURATION: Duration = Duration::from_millis(1500);
pub const FLASH_BLINK: Duration = Duration::from_millis(500);

// Visual settings
pub const CORNER_RADIUS: f32 = 4.0;
pub const FOOD_PULSE_SECONDS: f32 = 0.8;

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgba(0.9, 0.9, 0.9, 1.0);
pub const SNAKE_SEGMENT_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);
pub const SNAKE_FLASH_COLOR: Color = Color::srgba(1.0, 0.25, 0.25, 1.0);
pub const FOOD_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 1.0);
pub const FOOD_BURST_COLOR: Color = Color::srgba(1.0, 1.0, 0.3, 0.8);
pub const WALL_COLOR: Color = Color::srgba(0.25, 0.45, 0.75, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);
pub const SIDEBAR_COLOR: Color = Color::srgba(0.07, 0.07, 0.09, 1.0);
pub const BUTTON_COLOR: Color = Color::srgba(0.2, 0.5, 0.25, 1.0);
pub const BUTTON_HOVER_COLOR: Color = Color::srgba(0.3, 0.65, 0.35, 1.0);
pub const BUTTON_DISABLED_COLOR: Color = Color::srgba(0.25, 0.25, 0.25, 1.0);
pub const MESSAGE_COLOR: Color = Color::srgba(1.0, 0.3, 0.3, 1.0);

// Z-index constants for rendering layers
pub const Z_ARENA: f32 = 0.0;
pub const Z_WALL: f32 = 0.5;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
pub const Z_EFFECT: f32 = 2.5;
