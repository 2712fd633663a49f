//! Construction-time configuration
//!
//! A model copies its `Config` when it is built and never re-reads it, so
//! physics constants stay fixed for the lifetime of a game.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BrickColor;

/// Paddle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom of the playfield to the paddle center
    pub bottom_offset: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            bottom_offset: PADDLE_BOTTOM_OFFSET,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Diameter, also the side of the square hit-box
    pub size: f32,
    pub spawn_offset: f32,
    pub follow_offset: f32,
    pub launch_speed_x: f32,
    pub launch_speed_y: f32,
    pub min_wall_speed: f32,
    pub wall_jitter: f32,
    pub wall_clearance: f32,
    pub paddle_transfer: f32,
    pub max_speed_x: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: BALL_SIZE,
            spawn_offset: BALL_SPAWN_OFFSET,
            follow_offset: BALL_FOLLOW_OFFSET,
            launch_speed_x: BALL_LAUNCH_SPEED_X,
            launch_speed_y: BALL_LAUNCH_SPEED_Y,
            min_wall_speed: BALL_MIN_WALL_SPEED,
            wall_jitter: BALL_WALL_JITTER,
            wall_clearance: BALL_WALL_CLEARANCE,
            paddle_transfer: PADDLE_VELOCITY_TRANSFER,
            max_speed_x: BALL_MAX_SPEED_X,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: u32,
    pub cols: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub offset_left: f32,
    /// Row colors, top to bottom (cycled when there are more rows)
    pub colors: Vec<BrickColor>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            offset_left: BRICK_OFFSET_LEFT,
            colors: ROW_COLORS.to_vec(),
        }
    }
}

/// Complete model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Rules ===
    pub starting_lives: u32,
    pub points_per_brick: u32,

    /// Seed for wall-bounce jitter (`None` draws a random seed)
    pub seed: Option<u64>,

    // === Actors ===
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            starting_lives: STARTING_LIVES,
            points_per_brick: POINTS_PER_BRICK,

            seed: None,

            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
        }
    }
}

impl Config {
    /// Default tuning on a `width` x `height` playfield
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Read and parse a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject configurations the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("paddle.width", self.paddle.width),
            ("paddle.height", self.paddle.height),
            ("ball.size", self.ball.size),
            ("bricks.width", self.bricks.width),
            ("bricks.height", self.bricks.height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        let non_negative = [
            ("paddle.bottom_offset", self.paddle.bottom_offset),
            ("ball.min_wall_speed", self.ball.min_wall_speed),
            ("ball.wall_jitter", self.ball.wall_jitter),
            ("ball.wall_clearance", self.ball.wall_clearance),
            ("ball.max_speed_x", self.ball.max_speed_x),
            ("bricks.padding", self.bricks.padding),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        if self.paddle.width > self.canvas_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle.width,
                canvas: self.canvas_width,
            });
        }
        let (rows, cols) = (self.bricks.rows, self.bricks.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBrickGrid);
        }
        if (rows as usize).saturating_mul(cols as usize) > MAX_BRICKS {
            return Err(ConfigError::BrickGridTooLarge { rows, cols });
        }
        if self.bricks.colors.is_empty() {
            return Err(ConfigError::NoBrickColors);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}

/// Upper bound on `bricks.rows * bricks.cols` accepted by [`Config::validate`]
pub const MAX_BRICKS: usize = 10_000;

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
    InvalidDimension { field: &'static str, value: f32 },
    PaddleTooWide { paddle: f32, canvas: f32 },
    EmptyBrickGrid,
    BrickGridTooLarge { rows: u32, cols: u32 },
    NoBrickColors,
    NoLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Serialize(e) => write!(f, "failed to serialize config: {}", e),
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "{} must be a finite positive number, got {}", field, value)
            }
            ConfigError::PaddleTooWide { paddle, canvas } => {
                write!(f, "paddle width {} exceeds canvas width {}", paddle, canvas)
            }
            ConfigError::EmptyBrickGrid => {
                write!(f, "brick grid needs at least one row and column")
            }
            ConfigError::BrickGridTooLarge { rows, cols } => {
                write!(f, "brick grid {}x{} exceeds {} bricks", rows, cols, MAX_BRICKS)
            }
            ConfigError::NoBrickColors => write!(f, "brick grid needs at least one row color"),
            ConfigError::NoLives => write!(f, "starting_lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) | ConfigError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}
