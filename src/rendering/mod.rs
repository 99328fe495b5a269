//! Rendering plugin - draws the board, walls, food and snake every frame, plus
//! the food-eaten burst and the game-over blink.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use std::f32::consts::TAU;

use crate::game::{
    ARENA_COLOR, CORNER_RADIUS, FOOD_BURST_COLOR, FOOD_COLOR, FOOD_PULSE_SECONDS, Flash,
    FoodEaten, GameConfig, GridLayout, PulseEffect, SNAKE_FLASH_COLOR, SNAKE_HEAD_COLOR,
    SNAKE_SEGMENT_COLOR, WALL_COLOR, Z_ARENA, Z_EFFECT, Z_FOOD, Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
    Z_WALL,
};
use crate::session::Session;

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FoodEaten>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    draw_arena,
                    draw_food,
                    draw_snake,
                    spawn_food_eaten_effect,
                    pulse_effect_system,
                )
                    .chain(),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Normalize corner radius relative to the shape size (0.0 to 1.0 range).
fn corner_radii(size: f32) -> Vec4 {
    if size <= 0.0 {
        Vec4::ZERO
    } else {
        Vec4::splat((CORNER_RADIUS / (size / 2.0)).min(1.0))
    }
}

/// System to draw the board background and its wall border.
fn draw_arena(mut painter: ShapePainter, layout: Res<GridLayout>) {
    painter.reset();
    painter.color = ARENA_COLOR;
    painter.set_translation(layout.board_center().extend(Z_ARENA));
    painter.rect(layout.board_size());

    let bounds = layout.bounds;
    let size = layout.cell_size;
    painter.color = WALL_COLOR;
    painter.corner_radii = corner_radii(size);
    for x in 0..bounds.columns {
        for y in [0, bounds.rows - 1] {
            painter.set_translation(layout.cell_center(x, y).extend(Z_WALL));
            painter.rect(Vec2::splat(size * 0.95));
        }
    }
    for y in 1..bounds.rows - 1 {
        for x in [0, bounds.columns - 1] {
            painter.set_translation(layout.cell_center(x, y).extend(Z_WALL));
            painter.rect(Vec2::splat(size * 0.95));
        }
    }
}

/// System to draw food with a pulsing effect.
fn draw_food(
    mut painter: ShapePainter,
    layout: Res<GridLayout>,
    session: Res<Session>,
    time: Res<Time>,
) {
    let Some(food) = session.food else {
        return;
    };

    // Use sine wave for smooth pulsing
    let progress = (time.elapsed_secs() % FOOD_PULSE_SECONDS) / FOOD_PULSE_SECONDS;
    let scale = 1.0 + (progress * TAU).sin() * 0.15;

    painter.reset();
    painter.color = FOOD_COLOR;
    painter.set_translation(layout.cell_center(food.x, food.y).extend(Z_FOOD));
    painter.circle(layout.cell_size / 2.0 * scale);
}

/// System to draw the snake, blinking it while the game-over flash runs.
fn draw_snake(
    mut painter: ShapePainter,
    layout: Res<GridLayout>,
    session: Res<Session>,
    flash: Res<Flash>,
    config: Res<GameConfig>,
) {
    let lit = flash.is_lit(config.flash_blink);
    let size = layout.cell_size;

    painter.reset();
    painter.corner_radii = corner_radii(size);
    for (index, segment) in session.snake.iter().enumerate().rev() {
        let (color, z, scale) = match (lit, index) {
            (true, _) => (SNAKE_FLASH_COLOR, Z_SNAKE_SEGMENT, 1.0),
            (false, 0) => (SNAKE_HEAD_COLOR, Z_SNAKE_HEAD, 0.9),
            (false, _) => (SNAKE_SEGMENT_COLOR, Z_SNAKE_SEGMENT, 1.0),
        };
        painter.color = color;
        painter.set_translation(layout.cell_center(segment.x, segment.y).extend(z));
        painter.rect(Vec2::splat(size * scale));
    }
}

/// System to spawn visual effect when food is eaten.
fn spawn_food_eaten_effect(
    mut commands: Commands,
    mut food_eaten_reader: MessageReader<FoodEaten>,
) {
    for event in food_eaten_reader.read() {
        commands.spawn(PulseEffect {
            position: event.position,
            timer: Timer::from_seconds(0.3, TimerMode::Once),
            start_scale: 1.0,
            end_scale: 2.5,
        });
    }
}

/// System to grow and fade food-eaten bursts, despawning finished ones.
fn pulse_effect_system(
    mut commands: Commands,
    mut painter: ShapePainter,
    time: Res<Time>,
    layout: Res<GridLayout>,
    mut effects: Query<(Entity, &mut PulseEffect)>,
) {
    painter.reset();
    painter.hollow = true;
    painter.thickness = (layout.cell_size * 0.1).max(1.0);

    for (entity, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let progress = effect.timer.fraction();
        let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
        painter.color = FOOD_BURST_COLOR.with_alpha(0.8 * (1.0 - progress));
        painter.set_translation(
            layout
                .cell_center(effect.position.x, effect.position.y)
                .extend(Z_EFFECT),
        );
        painter.circle(layout.cell_size / 2.0 * scale);
    }
}
