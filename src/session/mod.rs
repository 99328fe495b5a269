//! Session plugin - owns the session state, the movement clock, and the
//! start/steer/tick flow.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use crate::food::place_food;
use crate::game::{
    BOARD_CLEARED_MESSAGE, Direction, EndCause, Flash, FoodEaten, GAME_OVER_MESSAGE, GameConfig,
    GamePhase, GameRng, GeometryError, GridBounds, GridLayout, Pacing, Position, SessionEnded,
    StartRequested, SteerRequested, TickClock,
};
use crate::snake::{Collision, Step, advance, pick_direction};

/// Plugin for the session lifecycle and the movement loop.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<GridLayout>()
            .init_resource::<GameRng>()
            .init_resource::<TickClock>()
            .init_resource::<Flash>()
            .init_resource::<Session>()
            .add_message::<StartRequested>()
            .add_message::<SteerRequested>()
            .add_message::<FoodEaten>()
            .add_message::<SessionEnded>()
            .add_systems(
                Update,
                (
                    handle_start_requests,
                    apply_steering,
                    refit_to_grid,
                    drive_ticks,
                    announce_session_end,
                    tick_flash,
                )
                    .chain(),
            );
    }
}

/// State of one play-through. The snake is stored head first.
#[derive(Resource, Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub snake: VecDeque<Position>,
    pub food: Option<Position>,
    pub direction: Option<Direction>,
    pub score: u32,
    pub tick_interval: Duration,
    pub message: String,
    pacing: Pacing,
}

impl FromWorld for Session {
    fn from_world(world: &mut World) -> Self {
        let pacing = world
            .get_resource::<GameConfig>()
            .map(|config| config.pacing)
            .unwrap_or_default();
        Session::new(pacing)
    }
}

impl Session {
    pub fn new(pacing: Pacing) -> Self {
        Session {
            phase: GamePhase::Idle,
            snake: VecDeque::new(),
            food: None,
            direction: None,
            score: 0,
            tick_interval: pacing.base,
            message: String::new(),
            pacing,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Begins a fresh session on `bounds`. Returns `Ok(false)` without
    /// touching anything when a session is already running.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        bounds: GridBounds,
        rng: &mut R,
    ) -> Result<bool, GeometryError> {
        if self.is_running() {
            return Ok(false);
        }

        let origin = bounds.random_interior(rng);
        let snake = VecDeque::from([origin]);
        let food = place_food(&snake, bounds, rng)?;
        let direction = pick_direction(origin, bounds, rng)?;

        self.snake = snake;
        self.food = Some(food);
        self.direction = Some(direction);
        self.score = 0;
        self.message.clear();
        self.tick_interval = self.pacing.base;
        self.phase = GamePhase::Running;
        Ok(true)
    }

    /// Sets the direction used by the next tick. Ignored unless running.
    /// Returns true when the direction actually changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.is_running() || self.direction == Some(direction) {
            return false;
        }
        self.direction = Some(direction);
        true
    }

    /// Runs one movement tick. Returns `None` when nothing can move: no
    /// running session or no direction yet.
    pub fn tick<R: Rng + ?Sized>(&mut self, bounds: GridBounds, rng: &mut R) -> Option<Step> {
        if !self.is_running() {
            return None;
        }
        let direction = self.direction?;

        let step = advance(&mut self.snake, &mut self.food, direction, bounds, rng);
        match step {
            Step::Moved => {}
            Step::Ate { .. } => self.reward(),
            Step::Crashed(_) => self.end(GAME_OVER_MESSAGE),
            Step::Filled => {
                self.reward();
                self.end(BOARD_CLEARED_MESSAGE);
            }
        }
        Some(step)
    }

    /// Moves food that a shrinking grid pushed out of the interior.
    pub fn refit<R: Rng + ?Sized>(
        &mut self,
        bounds: GridBounds,
        rng: &mut R,
    ) -> Result<(), GeometryError> {
        if !self.is_running() {
            return Ok(());
        }
        if let Some(food) = self.food
            && bounds.is_interior(food)
        {
            return Ok(());
        }
        self.food = Some(place_food(&self.snake, bounds, rng)?);
        Ok(())
    }

    fn reward(&mut self) {
        self.score += 1;
        self.tick_interval = self.pacing.after_food(self.tick_interval);
    }

    fn end(&mut self, message: &str) {
        self.phase = GamePhase::Ended;
        self.message = message.to_string();
    }
}

/// System to start a session when asked and nothing is running.
fn handle_start_requests(
    mut start_reader: MessageReader<StartRequested>,
    layout: Res<GridLayout>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    mut clock: ResMut<TickClock>,
    mut flash: ResMut<Flash>,
) {
    if start_reader.read().count() == 0 || session.is_running() {
        return;
    }

    match session.start(layout.bounds, &mut rng.0) {
        Ok(true) => {
            clock.restart(session.tick_interval);
            flash.clear();
            info!(
                origin = ?session.snake.front(),
                direction = ?session.direction,
                food = ?session.food,
                "session started"
            );
        }
        Ok(false) => {}
        Err(err) => error!("cannot start session: {err}"),
    }
}

/// System to apply the most recent steering request. A real turn restarts
/// the movement clock, so the next step comes one full interval later.
fn apply_steering(
    mut steer_reader: MessageReader<SteerRequested>,
    mut session: ResMut<Session>,
    mut clock: ResMut<TickClock>,
) {
    if let Some(SteerRequested(direction)) = steer_reader.read().last().copied()
        && session.is_running()
        && session.steer(direction)
    {
        clock.restart(session.tick_interval);
    }
}

/// System to keep food inside the grid after a resize.
fn refit_to_grid(
    layout: Res<GridLayout>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
) {
    if !layout.is_changed() || !session.is_running() {
        return;
    }
    if let Err(err) = session.refit(layout.bounds, &mut rng.0) {
        warn!("food could not be re-placed after resize: {err}");
        session.food = None;
    }
}

/// System to advance the snake whenever the movement clock fires, then
/// re-arm the clock if eating changed the interval.
fn drive_ticks(
    time: Res<Time>,
    layout: Res<GridLayout>,
    mut clock: ResMut<TickClock>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    mut food_eaten_writer: MessageWriter<FoodEaten>,
    mut ended_writer: MessageWriter<SessionEnded>,
) {
    if !session.is_running() {
        return;
    }

    let fired = clock.advance(time.delta());
    for _ in 0..fired {
        let Some(step) = session.tick(layout.bounds, &mut rng.0) else {
            return;
        };

        if let Some(cause) = end_cause(step, &session, &mut food_eaten_writer) {
            ended_writer.write(SessionEnded {
                score: session.score,
                cause,
            });
            return;
        }

        // A new interval drops whatever was left of this frame's backlog.
        if clock.timer.duration() != session.tick_interval {
            clock.rearm(session.tick_interval);
            return;
        }
    }
}

fn end_cause(
    step: Step,
    session: &Session,
    food_eaten_writer: &mut MessageWriter<FoodEaten>,
) -> Option<EndCause> {
    match step {
        Step::Moved => None,
        Step::Ate { at } => {
            debug!(
                score = session.score,
                interval_ms = session.tick_interval.as_millis() as u64,
                "food eaten"
            );
            food_eaten_writer.write(FoodEaten { position: at });
            None
        }
        Step::Crashed(Collision::Wall) => Some(EndCause::Wall),
        Step::Crashed(Collision::Body) => Some(EndCause::SelfBite),
        Step::Filled => Some(EndCause::BoardCleared),
    }
}

/// System to log the end of a session and start the blink.
fn announce_session_end(
    mut ended_reader: MessageReader<SessionEnded>,
    config: Res<GameConfig>,
    mut flash: ResMut<Flash>,
) {
    for ended in ended_reader.read() {
        info!(cause = ?ended.cause, score = ended.score, "session ended");
        flash.trigger(config.flash_duration);
    }
}

fn tick_flash(time: Res<Time>, mut flash: ResMut<Flash>) {
    if flash.is_active() {
        flash.tick(time.delta());
    }
}
