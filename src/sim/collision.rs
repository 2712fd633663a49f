//! Collision detection for axis-aligned boxes
//!
//! Everything in the playfield is a rectangle: the ball's square hit-box,
//! the paddle and the bricks. All overlap tests are inclusive, so boxes that
//! merely touch count as colliding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle anchored at its top-left corner
    pub fn from_top_left(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Rectangle centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other.min.x, other.max.x) && self.overlaps_y(other.min.y, other.max.y)
    }

    #[inline]
    fn overlaps_x(&self, min: f32, max: f32) -> bool {
        self.max.x >= min && self.min.x <= max
    }

    #[inline]
    fn overlaps_y(&self, min: f32, max: f32) -> bool {
        self.max.y >= min && self.min.y <= max
    }

    /// Whether `x` lies within the horizontal extent
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }
}

/// A side wall of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
}

/// Bounces applied during one ball step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub wall: Option<Wall>,
    pub ceiling: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.wall.is_some() || self.ceiling
    }
}

/// Side wall the ball center is touching or beyond, if any.
/// The left wall wins when both apply (playfield narrower than the ball).
pub fn side_wall_contact(x: f32, half_size: f32, canvas_width: f32) -> Option<Wall> {
    if x <= half_size {
        Some(Wall::Left)
    } else if x >= canvas_width - half_size {
        Some(Wall::Right)
    } else {
        None
    }
}

/// Whether the ball center is touching or above the ceiling
#[inline]
pub fn ceiling_contact(y: f32, half_size: f32) -> bool {
    y <= half_size
}

/// Ball vs paddle.
///
/// Vertically the ball's full hit-box must overlap the paddle; horizontally
/// only the ball's center is tested against the paddle's extent, so a ball
/// clipping the paddle corner falls past it.
pub fn ball_paddle_overlap(ball_pos: Vec2, ball_size: f32, paddle: &Rect) -> bool {
    let half = ball_size / 2.0;
    paddle.overlaps_y(ball_pos.y - half, ball_pos.y + half) && paddle.spans_x(ball_pos.x)
}

/// Ball vs brick: full hit-box overlap
pub fn ball_brick_overlap(ball_pos: Vec2, ball_size: f32, brick: &Rect) -> bool {
    Rect::from_center(ball_pos, Vec2::splat(ball_size)).overlaps(brick)
}
