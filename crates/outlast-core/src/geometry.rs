//! Plane geometry used by collision, targeting and AI.
//!
//! World space is a continuous plane with `y` pointing down (screen
//! convention), so an angle of `PI / 2` faces "south".

use serde::{Deserialize, Serialize};

/// 2D position / direction vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians).
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        distance(self.x, self.y, other.x, other.y)
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Axis-aligned rectangle, top-left origin plus extents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w` x `h` centered on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        rect_intersect(self, other)
    }

    pub fn intersects_circle(&self, cx: f32, cy: f32, radius: f32) -> bool {
        circle_rect_intersect(cx, cy, radius, self)
    }
}

/// Straight-line distance between two points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1).hypot(y2 - y1)
}

/// Rectangles overlap, touching edges included.
pub fn rect_intersect(a: &Rect, b: &Rect) -> bool {
    !(b.x > a.x + a.w || b.x + b.w < a.x || b.y > a.y + a.h || b.y + b.h < a.y)
}

/// Circle overlaps the rectangle, touching included.
///
/// Finds the rectangle point closest to the circle center and compares its
/// distance with the radius.
pub fn circle_rect_intersect(cx: f32, cy: f32, radius: f32, rect: &Rect) -> bool {
    let nearest_x = clamp(cx, rect.x, rect.x + rect.w);
    let nearest_y = clamp(cy, rect.y, rect.y + rect.h);
    distance(cx, cy, nearest_x, nearest_y) <= radius
}

/// Clamp `val` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics on an inverted range; `max` wins.
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    val.max(min).min(max)
}
