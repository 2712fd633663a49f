//! Brick Out - A deterministic brick-breaker simulation
//!
//! Core modules:
//! - `sim`: Step-based simulation (paddle, ball, bricks, game state machine)
//! - `config`: Construction-time tuning, loadable from JSON
//!
//! Rendering and input capture live outside this crate. A driver calls
//! [`sim::BrickOutModel::move_paddle`] on input, [`sim::BrickOutModel::update`]
//! once per frame, and reads state back out for drawing.

pub mod config;
pub mod sim;

pub use config::{BallConfig, BrickConfig, Config, ConfigError, PaddleConfig};
pub use sim::BrickOutModel;

/// Game configuration constants
pub mod consts {
    use crate::sim::BrickColor;

    /// Default playfield dimensions
    pub const CANVAS_WIDTH: f32 = 700.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Paddle defaults - center anchored, sits above the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 12.0;
    /// Ball spawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 60.0;
    /// Distance above the paddle while following it
    pub const BALL_FOLLOW_OFFSET: f32 = 20.0;
    /// Launch velocity (per tick) - straight up
    pub const BALL_LAUNCH_SPEED_X: f32 = 0.0;
    pub const BALL_LAUNCH_SPEED_Y: f32 = -5.0;
    /// Minimum horizontal speed after a wall bounce
    pub const BALL_MIN_WALL_SPEED: f32 = 1.5;
    /// Random horizontal perturbation on wall bounce (±)
    pub const BALL_WALL_JITTER: f32 = 0.3;
    /// Clearance from a wall/ceiling after repositioning
    pub const BALL_WALL_CLEARANCE: f32 = 1.0;
    /// Share of paddle velocity transferred to the ball on contact
    pub const PADDLE_VELOCITY_TRANSFER: f32 = 0.5;
    /// Horizontal speed cap after a paddle hit
    pub const BALL_MAX_SPEED_X: f32 = 6.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Row colors, top to bottom
    pub const ROW_COLORS: [BrickColor; 5] = [
        BrickColor::RED,
        BrickColor::ORANGE,
        BrickColor::YELLOW,
        BrickColor::GREEN,
        BrickColor::BLUE,
    ];

    /// Scoring
    pub const POINTS_PER_BRICK: u32 = 10;
    pub const STARTING_LIVES: u32 = 3;
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when `min > max` the result is `min`.
#[inline]
pub fn constrain(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
