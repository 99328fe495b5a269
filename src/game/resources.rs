//! Game resources (singleton state).

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use super::{
    BASE_TICK_INTERVAL, CELLS_ALONG_SHORT_SIDE, FLASH_BLINK, FLASH_DURATION, GridBounds,
    MIN_TICK_INTERVAL, SIDEBAR_WIDTH, TICK_INTERVAL_STEP,
};

/// Session phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// How the tick interval shrinks as food is eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub base: Duration,
    pub step: Duration,
    pub floor: Duration,
}

impl Pacing {
    /// Interval after one more food item, never below the floor.
    pub fn after_food(&self, current: Duration) -> Duration {
        current.saturating_sub(self.step).max(self.floor)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            base: BASE_TICK_INTERVAL,
            step: TICK_INTERVAL_STEP,
            floor: MIN_TICK_INTERVAL,
        }
    }
}

/// Tunables for sizing, pacing and effects.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub sidebar_width: f32,
    pub cells_along_short_side: f32,
    pub pacing: Pacing,
    pub flash_duration: Duration,
    pub flash_blink: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            sidebar_width: SIDEBAR_WIDTH,
            cells_along_short_side: CELLS_ALONG_SHORT_SIDE,
            pacing: Pacing::default(),
            flash_duration: FLASH_DURATION,
            flash_blink: FLASH_BLINK,
        }
    }
}

/// Grid bounds plus the pixel geometry used to draw them.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub bounds: GridBounds,
    pub cell_size: f32,
    pub viewport: Vec2,
    pub sidebar_width: f32,
}

impl GridLayout {
    /// World-space center of a cell, with the board anchored to the top-left
    /// corner of the window and a camera centered on the window.
    pub fn cell_center(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            -self.viewport.x / 2.0 + (x as f32 + 0.5) * self.cell_size,
            self.viewport.y / 2.0 - (y as f32 + 0.5) * self.cell_size,
        )
    }

    pub fn board_size(&self) -> Vec2 {
        Vec2::new(
            self.bounds.columns as f32 * self.cell_size,
            self.bounds.rows as f32 * self.cell_size,
        )
    }

    pub fn board_center(&self) -> Vec2 {
        let size = self.board_size();
        Vec2::new(
            -self.viewport.x / 2.0 + size.x / 2.0,
            self.viewport.y / 2.0 - size.y / 2.0,
        )
    }
}

/// Random source shared by food placement and session start.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        GameRng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng(StdRng::from_os_rng())
    }
}

/// The single repeating timer that drives movement ticks.
#[derive(Resource)]
pub struct TickClock {
    pub timer: Timer,
    // Set by `restart`; the frame that restarted the clock does not count.
    restarted: bool,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        TickClock {
            timer: Timer::new(interval, TimerMode::Repeating),
            restarted: false,
        }
    }

    /// Restart from zero with the given interval, starting from the next frame.
    pub fn restart(&mut self, interval: Duration) {
        self.timer.set_duration(interval);
        self.timer.reset();
        self.restarted = true;
    }

    /// Re-arm only when the interval actually changed.
    pub fn rearm(&mut self, interval: Duration) {
        if self.timer.duration() != interval {
            self.timer.set_duration(interval);
            self.timer.reset();
        }
    }

    /// Feeds one frame's time into the clock and returns how many ticks are due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if std::mem::take(&mut self.restarted) {
            return 0;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        TickClock::new(BASE_TICK_INTERVAL)
    }
}

/// Transient blink shown after a session ends. Has no effect on game state.
#[derive(Resource, Default)]
pub struct Flash {
    timer: Option<Timer>,
}

impl Flash {
    pub fn trigger(&mut self, duration: Duration) {
        self.timer = Some(Timer::new(duration, TimerMode::Once));
    }

    pub fn clear(&mut self) {
        self.timer = None;
    }

    pub fn tick(&mut self, delta: Duration) {
        if let Some(timer) = self.timer.as_mut() {
            timer.tick(delta);
            if timer.is_finished() {
                self.timer = None;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// True during the lit half of each blink period.
    pub fn is_lit(&self, blink: Duration) -> bool {
        let Some(timer) = self.timer.as_ref() else {
            return false;
        };
        let half = (blink.as_millis() / 2).max(1);
        (timer.elapsed().as_millis() / half) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_speeds_up_until_the_floor() {
        let pacing = Pacing::default();
        assert_eq!(
            pacing.after_food(Duration::from_millis(500)),
            Duration::from_millis(480)
        );
        assert_eq!(
            pacing.after_food(Duration::from_millis(60)),
            Duration::from_millis(50)
        );
        assert_eq!(
            pacing.after_food(Duration::from_millis(50)),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn tick_clock_rearms_only_on_change() {
        let mut clock = TickClock::new(Duration::from_millis(500));
        clock.timer.tick(Duration::from_millis(200));

        clock.rearm(Duration::from_millis(500));
        assert_eq!(clock.timer.elapsed(), Duration::from_millis(200));

        clock.rearm(Duration::from_millis(480));
        assert_eq!(clock.timer.elapsed(), Duration::ZERO);
        assert_eq!(clock.timer.duration(), Duration::from_millis(480));
    }

    #[test]
    fn tick_clock_reports_every_interval_a_long_frame_covers() {
        let mut clock = TickClock::new(Duration::from_millis(50));
        assert_eq!(clock.advance(Duration::from_millis(30)), 0);
        assert_eq!(clock.advance(Duration::from_millis(130)), 3);
        assert_eq!(clock.advance(Duration::from_millis(40)), 1);
    }

    #[test]
    fn tick_clock_ignores_the_frame_it_was_restarted_in() {
        let mut clock = TickClock::new(Duration::from_millis(500));
        clock.restart(Duration::from_millis(500));

        assert_eq!(clock.advance(Duration::from_millis(400)), 0);
        assert_eq!(clock.timer.elapsed(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(400)), 0);
        assert_eq!(clock.advance(Duration::from_millis(100)), 1);
    }

    #[test]
    fn flash_blinks_then_expires() {
        let blink = Duration::from_millis(500);
        let mut flash = Flash::default();
        assert!(!flash.is_active());

        flash.trigger(Duration::from_millis(1500));
        assert!(flash.is_lit(blink));

        flash.tick(Duration::from_millis(300));
        assert!(!flash.is_lit(blink));

        flash.tick(Duration::from_millis(300));
        assert!(flash.is_lit(blink));

        flash.tick(Duration::from_millis(1000));
        assert!(!flash.is_active());
    }

    #[test]
    fn cell_centers_start_at_the_top_left_corner() {
        let layout = GridLayout {
            bounds: GridBounds::new(20, 20).unwrap(),
            cell_size: 10.0,
            viewport: Vec2::new(450.0, 200.0),
            sidebar_width: 250.0,
        };
        assert_eq!(layout.cell_center(0, 0), Vec2::new(-220.0, 95.0));
        assert_eq!(layout.cell_center(1, 2), Vec2::new(-210.0, 75.0));
        assert_eq!(layout.board_center(), Vec2::new(-125.0, 0.0));
    }
}
