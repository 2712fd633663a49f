//! Read-only view of a model for renderers

use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use super::state::{Ball, Brick, BrickOutModel, Paddle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            size: ball.size,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub paddle: PaddleView,
    pub ball: BallView,
    pub bricks: Vec<Brick>,
    pub score: u64,
    pub lives: u32,
    pub game_started: bool,
    pub game_over: bool,
    pub game_won: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<N: NoiseSource> BrickOutModel<N> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: PaddleView::from(&self.paddle),
            ball: BallView::from(&self.ball),
            bricks: self.bricks.clone(),
            score: self.score,
            lives: self.lives,
            game_started: self.game_started,
            game_over: self.game_over,
            game_won: self.game_won,
        }
    }
}
