//! Grid plugin - derives grid bounds and cell size from the window size.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, GameConfig, GridBounds, GridLayout, MIN_GRID_SIDE,
};

/// Plugin that keeps [`GridLayout`] in step with the primary window.
pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<GridLayout>()
            .add_systems(PreUpdate, fit_grid_to_window);
    }
}

// Guards against `(w / (w / n)).floor()` landing just under `n`.
const FLOOR_EPSILON: f32 = 1e-4;

/// Size the grid so that the shorter of the board area's sides holds
/// `cells_along_short_side` cells, then fit as many whole cells as possible
/// along the longer side. Degenerate windows clamp to the minimum grid.
pub fn compute_layout(width: f32, height: f32, config: &GameConfig) -> GridLayout {
    let board_width = (width - config.sidebar_width).max(0.0);
    let board_height = height.max(0.0);
    let short_side = board_width.min(board_height);

    let viewport = Vec2::new(width.max(0.0), board_height);
    let min_bounds = GridBounds {
        columns: MIN_GRID_SIDE,
        rows: MIN_GRID_SIDE,
    };

    if short_side <= 0.0 || config.cells_along_short_side <= 0.0 {
        return GridLayout {
            bounds: min_bounds,
            cell_size: 0.0,
            viewport,
            sidebar_width: viewport.x,
        };
    }

    let cell_size = short_side / config.cells_along_short_side;
    let columns = ((board_width / cell_size + FLOOR_EPSILON).floor() as i32).max(MIN_GRID_SIDE);
    let rows = ((board_height / cell_size + FLOOR_EPSILON).floor() as i32).max(MIN_GRID_SIDE);

    GridLayout {
        bounds: GridBounds::new(columns, rows).unwrap_or(min_bounds),
        cell_size,
        viewport,
        sidebar_width: (viewport.x - columns as f32 * cell_size).max(0.0),
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        compute_layout(
            DEFAULT_WINDOW_WIDTH as f32,
            DEFAULT_WINDOW_HEIGHT as f32,
            &GameConfig::default(),
        )
    }
}

/// Recompute the layout whenever the primary window changes.
fn fit_grid_to_window(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    config: Res<GameConfig>,
    mut layout: ResMut<GridLayout>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let next = compute_layout(window.width(), window.height(), &config);
    if next.bounds != layout.bounds {
        info!(
            columns = next.bounds.columns,
            rows = next.bounds.rows,
            cell_size = next.cell_size,
            "grid resized"
        );
    }
    layout.set_if_neq(next);
}
