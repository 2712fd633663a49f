//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and step-based:
//! - One `update()` call is one tick, no delta time
//! - Randomness only through an injected `NoiseSource`
//! - No rendering or input dependencies

pub mod collision;
pub mod noise;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Bounce, Rect, Wall, ball_brick_overlap, ball_paddle_overlap};
pub use noise::{FixedNoise, NoiseSource, SeededNoise};
pub use snapshot::{BallView, PaddleView, Snapshot};
pub use state::{
    Ball, Brick, BrickColor, BrickOutModel, GameEvent, GamePhase, MAX_PENDING_EVENTS, Paddle,
};
pub use tick::generate_bricks;
