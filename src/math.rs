//! Geometry primitives: 2D vector and center/half-extent rectangle.
//!
//! Both are plain value types.  `Rect` is stored as a center point plus
//! half-extents; the edge accessors are derived, never stored.

use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// `self += v * dt` — the per-frame integration step.
    pub fn scaled_add(&mut self, v: Vec2, dt: f32) {
        self.x += v.x * dt;
        self.y += v.y * dt;
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle: center position plus half-extents.
/// Invariant: half-extents are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    half_width: f32,
    half_height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, half_width: f32, half_height: f32) -> Self {
        debug_assert!(half_width >= 0.0 && half_height >= 0.0);
        Rect {
            pos,
            half_width,
            half_height,
        }
    }

    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Rect::new(Vec2::ZERO, half_width, half_height)
    }

    pub fn set_center(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.half_width
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_height
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.half_height
    }
}
