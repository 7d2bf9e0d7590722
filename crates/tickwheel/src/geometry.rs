//! Cylinder projection math shared by the tick registry, the controller and the layout.
//!
//! The dial is modelled as a circle whose 90° front arc projects orthogonally onto the
//! full draw width, so a tick at angle `a` lands at `center_x + radius * sin(a)`.

use std::f64::consts::{FRAC_PI_4, PI, TAU};

/// Angular span of the cylinder that faces the viewer.
pub const VISIBLE_WINDOW: f64 = PI / 2.0;
pub const VISIBLE_HALF_WINDOW: f64 = FRAC_PI_4;

/// Radius relative to the draw width: `0.5 / sin(45°)`.
pub const REL_R: f64 = 0.5 / std::f64::consts::FRAC_1_SQRT_2;

pub const SIN60: f64 = 0.866_025_403_784_438_6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_x(self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Horizontal span between two x coordinates in either order, full height of `self`.
    pub fn span_x(&self, a: f64, b: f64) -> Self {
        Self::new(a.min(b), self.top, a.max(b), self.bottom)
    }
}

/// Projection of the simulated cylinder onto the horizontal draw axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub radius: f64,
    pub center_x: f64,
}

impl Projection {
    pub fn for_bounds(bounds: &Rect) -> Self {
        Self {
            radius: bounds.width() * REL_R,
            center_x: bounds.center_x(),
        }
    }

    /// Incremental rotation (radians) for an incremental horizontal drag.
    ///
    /// The offset is clamped to `[-radius, radius]` first; outside that domain `asin` is
    /// undefined.
    pub fn offset_to_angle_delta(&self, offset: f64) -> f64 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        (offset.clamp(-self.radius, self.radius) / self.radius).asin()
    }

    pub fn tick_screen_x(&self, angle: f64) -> f64 {
        self.center_x + self.radius * angle.sin()
    }
}

/// Normalizes `angle` into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// True when `angle` lies inside the 90° window centered on 0.
pub fn is_front_facing(angle: f64) -> bool {
    let a = normalize_angle(angle);
    a <= VISIBLE_HALF_WINDOW || a >= TAU - VISIBLE_HALF_WINDOW
}

/// Linear offset to degree mapping used while dragging. Positive offsets (drag right)
/// yield negative degrees.
pub fn offset_to_degree(total_offset: f64, draw_width: f64, min: i32, max: i32) -> f64 {
    if draw_width <= 0.0 {
        return 0.0;
    }
    let ratio = total_offset * 2.0 / draw_width;
    -(ratio * f64::from(max)).clamp(f64::from(min), f64::from(max))
}

/// Inverse of [`offset_to_degree`], used on commit and programmatic updates.
pub fn degree_to_offset(degree: f64, draw_width: f64, max: i32) -> f64 {
    let half = (draw_width / 2.0).max(0.0);
    if max == 0 || half == 0.0 {
        return 0.0;
    }
    -(half * degree / f64::from(max)).clamp(-half, half)
}

/// Rounds half away from zero and truncates.
pub fn round_half_away(value: f64) -> i32 {
    let flag = if value >= 0.0 { 0.5 } else { -0.5 };
    (value + flag) as i32
}
