//! Game state and core simulation types
//!
//! The paddle, ball and bricks are plain values owned by a single
//! [`BrickOutModel`]. The model alone decides whether the ball follows the
//! paddle or moves freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    Bounce, Rect, Wall, ball_brick_overlap, ball_paddle_overlap, ceiling_contact, side_wall_contact,
};
use super::noise::{NoiseSource, SeededNoise};
use super::tick::generate_bricks;
use crate::config::{BallConfig, Config, PaddleConfig};
use crate::constrain;

/// Current phase of gameplay, derived from the model's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball follows the paddle, waiting for launch
    Idle,
    /// Ball moves freely
    Playing,
    /// Lives exhausted (terminal until reset)
    Over,
    /// Bricks exhausted (terminal until reset)
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Over | GamePhase::Won)
    }
}

/// Something that happened during a tick, for effects and HUD updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce(Wall),
    CeilingBounce,
    PaddleHit { paddle_velocity: f32 },
    BrickDestroyed { brick: Brick },
    LifeLost { lives_left: u32 },
    GameOver { score: u64 },
    GameWon { score: u64 },
}

/// Maximum undrained events kept by a model
pub const MAX_PENDING_EVENTS: usize = 256;

/// The player's paddle (horizontal motion only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Center y (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Position before the most recent move
    pub prev_x: f32,
    /// Displacement of the most recent move
    pub velocity: f32,
    canvas_width: f32,
}

impl Paddle {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self::from_config(&PaddleConfig::default(), canvas_width, canvas_height)
    }

    pub fn from_config(config: &PaddleConfig, canvas_width: f32, canvas_height: f32) -> Self {
        let x = canvas_width / 2.0;
        Self {
            x,
            y: canvas_height - config.bottom_offset,
            width: config.width,
            height: config.height,
            prev_x: x,
            velocity: 0.0,
            canvas_width,
        }
    }

    /// Move to `target_x`, clamped so the paddle stays inside the playfield.
    /// Velocity reflects only this move.
    pub fn move_to(&mut self, target_x: f32) {
        self.prev_x = self.x;
        let half = self.width / 2.0;
        let x = constrain(target_x, half, self.canvas_width - half);
        self.velocity = x - self.prev_x;
        self.x = x;
    }

    /// Collision box
    pub fn rect(&self) -> Rect {
        Rect::from_center(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// RGB color tag for a brick (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BrickColor {
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const ORANGE: Self = Self::rgb(255, 127, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xRRGGBB`
    pub fn to_hex(&self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

/// A static brick, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: BrickColor,
}

impl Brick {
    /// Brick with the default dimensions
    pub fn new(x: f32, y: f32, color: BrickColor) -> Self {
        use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH};
        Self::with_size(x, y, BRICK_WIDTH, BRICK_HEIGHT, color)
    }

    pub fn with_size(x: f32, y: f32, width: f32, height: f32, color: BrickColor) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_top_left(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// The ball: a point mass with a square hit-box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Diameter / hit-box side
    pub size: f32,
    canvas: Vec2,
    tuning: BallConfig,
}

impl Ball {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self::from_config(&BallConfig::default(), canvas_width, canvas_height)
    }

    pub fn from_config(config: &BallConfig, canvas_width: f32, canvas_height: f32) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: config.size,
            canvas: Vec2::new(canvas_width, canvas_height),
            tuning: *config,
        };
        ball.reset();
        ball
    }

    /// Back to the launch spot with the straight-up launch velocity
    pub fn reset(&mut self) {
        self.pos = Vec2::new(self.canvas.x / 2.0, self.canvas.y - self.tuning.spawn_offset);
        self.vel = Vec2::new(self.tuning.launch_speed_x, self.tuning.launch_speed_y);
    }

    /// Advance one tick and resolve side-wall and ceiling contact.
    ///
    /// A wall bounce always reverses horizontal direction and leaves at least
    /// the minimum wall speed after jitter. The bottom edge is not a wall.
    pub fn update(&mut self, noise: &mut impl NoiseSource) -> Bounce {
        self.pos += self.vel;

        let half = self.size / 2.0;
        let mut bounce = Bounce::default();

        if let Some(wall) = side_wall_contact(self.pos.x, half, self.canvas.x) {
            // Direction after the bounce; a stalled ball leaves away from the wall
            let dir = if self.vel.x != 0.0 {
                -self.vel.x.signum()
            } else {
                match wall {
                    Wall::Left => 1.0,
                    Wall::Right => -1.0,
                }
            };
            let min_speed = self.tuning.min_wall_speed;
            let jitter = self.tuning.wall_jitter;
            let reversed = dir * self.vel.x.abs().max(min_speed);
            let jittered = reversed + noise.sample(-jitter, jitter);
            self.vel.x = dir * (jittered * dir).max(min_speed);

            let clearance = self.tuning.wall_clearance;
            self.pos.x = match wall {
                Wall::Left => half + clearance,
                Wall::Right => self.canvas.x - half - clearance,
            };
            bounce.wall = Some(wall);
        }

        if ceiling_contact(self.pos.y, half) {
            self.vel.y = -self.vel.y;
            self.pos.y = half + self.tuning.wall_clearance;
            bounce.ceiling = true;
        }

        bounce
    }

    /// Rebound off the paddle if overlapping. Returns true on contact.
    ///
    /// The ball always leaves upward and picks up part of the paddle's
    /// velocity, capped at the maximum horizontal speed.
    pub fn check_paddle(&mut self, paddle: &Paddle) -> bool {
        if !ball_paddle_overlap(self.pos, self.size, &paddle.rect()) {
            return false;
        }
        self.vel.y = -self.vel.y.abs();
        let max = self.tuning.max_speed_x;
        let transferred = self.vel.x + paddle.velocity * self.tuning.paddle_transfer;
        self.vel.x = constrain(transferred, -max, max);
        true
    }

    pub fn hits(&self, brick: &Brick) -> bool {
        ball_brick_overlap(self.pos, self.size, &brick.rect())
    }

    pub fn is_off_bottom(&self) -> bool {
        self.pos.y > self.canvas.y
    }

    /// Sit just above the paddle (following mode)
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.x, paddle.y - self.tuning.follow_offset);
    }

    /// Hit-box
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// Complete brick-out game: one paddle, one ball, a field of bricks
#[derive(Debug, Clone)]
pub struct BrickOutModel<N: NoiseSource = SeededNoise> {
    pub(super) config: Config,
    pub(super) paddle: Paddle,
    pub(super) ball: Ball,
    /// Live bricks; membership is the brick's whole lifecycle
    pub(super) bricks: Vec<Brick>,
    pub(super) score: u64,
    pub(super) lives: u32,
    pub(super) game_started: bool,
    pub(super) game_over: bool,
    pub(super) game_won: bool,
    pub(super) events: Vec<GameEvent>,
    pub(super) noise: N,
}

impl BrickOutModel<SeededNoise> {
    /// Default tuning with a random jitter seed
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self::from_config(Config::new(canvas_width, canvas_height))
    }

    /// Default tuning with a fixed jitter seed
    pub fn with_seed(canvas_width: f32, canvas_height: f32, seed: u64) -> Self {
        Self::from_config(Config::new(canvas_width, canvas_height).with_seed(seed))
    }

    /// Build from a config; draws a random seed when the config has none
    pub fn from_config(mut config: Config) -> Self {
        let seed = *config.seed.get_or_insert_with(rand::random);
        Self::with_noise(config, SeededNoise::new(seed))
    }

    /// Seed of the jitter source
    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }
}

impl<N: NoiseSource> BrickOutModel<N> {
    /// Build from a config with an explicit jitter source
    pub fn with_noise(config: Config, noise: N) -> Self {
        let (w, h) = (config.canvas_width, config.canvas_height);
        let model = Self {
            paddle: Paddle::from_config(&config.paddle, w, h),
            ball: Ball::from_config(&config.ball, w, h),
            bricks: generate_bricks(&config),
            score: 0,
            lives: config.starting_lives,
            game_started: false,
            game_over: false,
            game_won: false,
            events: Vec::new(),
            noise,
            config,
        };
        log::info!(
            "Brick-out model created: {}x{}, {} bricks, seed {:?}",
            w,
            h,
            model.bricks.len(),
            model.config.seed
        );
        model
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::Over
        } else if self.game_won {
            GamePhase::Won
        } else if self.game_started {
            GamePhase::Playing
        } else {
            GamePhase::Idle
        }
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn game_won(&self) -> bool {
        self.game_won
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.config.canvas_width, self.config.canvas_height)
    }

    /// Events not yet drained, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    // Scenario staging for drivers and tests

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn bricks_mut(&mut self) -> &mut Vec<Brick> {
        &mut self.bricks
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }
}
