//! Viewport state (zoom, pan, 90°-step rotation) and the display matrix.
//!
//! The matrix maps canvas space to display space. Its four rotation
//! branches keep zoom centered on the content midpoint while repositioning
//! the rotated content back into its frame; the offsets are exact and any
//! deviation shows up as content drifting against its frame while zooming
//! at a non-zero rotation.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, WHEEL_ZOOM_DIVISOR};
use crate::geometry::Point;

/// Invalid viewport parameters supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),
    #[error("zoom bounds must satisfy 0 < min <= max, got min {min}, max {max}")]
    InvalidZoomBounds { min: f64, max: f64 },
}

/// Viewport rotation, restricted to quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// The rotation in degrees.
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Parse a degree count (any multiple of 90, negatives allowed).
    ///
    /// # Errors
    /// [`ViewportError::InvalidRotation`] if `degrees` is not a multiple
    /// of 90.
    pub fn from_degrees(degrees: i32) -> Result<Self, ViewportError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            _ => Err(ViewportError::InvalidRotation(degrees)),
        }
    }

    /// One quarter turn clockwise, wrapping 270 → 0.
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        match self {
            Self::R0 => Self::R90,
            Self::R90 => Self::R180,
            Self::R180 => Self::R270,
            Self::R270 => Self::R0,
        }
    }

    /// One quarter turn counterclockwise, wrapping 0 → 270.
    #[must_use]
    pub fn rotated_ccw(self) -> Self {
        match self {
            Self::R0 => Self::R270,
            Self::R90 => Self::R0,
            Self::R180 => Self::R90,
            Self::R270 => Self::R180,
        }
    }

    /// Whether the rotation swaps the content's width and height.
    #[must_use]
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<i32> for Rotation {
    type Error = ViewportError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

/// Validated zoom clamp range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    min: f64,
    max: f64,
}

impl ZoomBounds {
    /// # Errors
    /// [`ViewportError::InvalidZoomBounds`] unless `0 < min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ViewportError> {
        if min > 0.0 && min <= max {
            Ok(Self { min, max })
        } else {
            Err(ViewportError::InvalidZoomBounds { min, max })
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `zoom` clamped into the range.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_ZOOM, max: DEFAULT_MAX_ZOOM }
    }
}

/// A 2D affine transform as the SVG-style 6-tuple
/// `(a, b, c, d, e, f)`: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// The inverse transform, or `None` when singular. The host's
    /// screen-to-canvas mapper is this inverse applied to raw positions.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }
}

/// Zoom / pan / rotation state for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation: Rotation,
    pub zoom_bounds: ZoomBounds,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotation: Rotation::R0,
            zoom_bounds: ZoomBounds::default(),
        }
    }
}

impl Viewport {
    /// The canvas-to-display matrix for content of the given (unrotated)
    /// size.
    ///
    /// Starts from `[zoom, 0, 0, zoom, tx, ty]`, then each rotation branch
    /// swaps/negates the scale axes and adds the offset that keeps zoom
    /// centered on the content midpoint and the rotated content inside its
    /// frame.
    #[must_use]
    pub fn matrix(&self, content_width: f64, content_height: f64) -> Matrix {
        let zoom = self.zoom;
        let (w, h) = (content_width, content_height);
        let mut m = Matrix {
            a: zoom,
            b: 0.0,
            c: 0.0,
            d: zoom,
            e: self.translate_x,
            f: self.translate_y,
        };

        match self.rotation {
            Rotation::R0 => {
                m.e -= (w / 2.0) * (zoom - 1.0);
                m.f -= (h / 2.0) * (zoom - 1.0);
            }
            Rotation::R90 => {
                m.b = m.a;
                m.a = 0.0;
                m.c = -m.d;
                m.d = 0.0;
                m.e += h + (h / 2.0) * (zoom - 1.0);
                m.f -= (w / 2.0) * (zoom - 1.0);
            }
            Rotation::R180 => {
                m.a = -m.a;
                m.d = -m.d;
                m.e += w + (w / 2.0) * (zoom - 1.0);
                m.f += h + (h / 2.0) * (zoom - 1.0);
            }
            Rotation::R270 => {
                m.b = -m.a;
                m.a = 0.0;
                m.c = m.d;
                m.d = 0.0;
                m.e -= (h / 2.0) * (zoom - 1.0);
                m.f += w + (w / 2.0) * (zoom - 1.0);
            }
        }

        m
    }

    /// Apply a wheel step: `zoom - delta_y / 100`, clamped. Wheel-up
    /// (negative delta) zooms in.
    pub fn apply_wheel(&mut self, delta_y: f64) {
        self.zoom = self.zoom_bounds.clamp(self.zoom - delta_y / WHEEL_ZOOM_DIVISOR);
    }

    /// Shift the pan by `(dx, dy)` canvas units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Step the rotation one quarter turn clockwise.
    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotated_cw();
    }

    /// Step the rotation one quarter turn counterclockwise.
    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotated_ccw();
    }

    /// The frame size for content of the given size: width and height swap
    /// at 90° and 270°.
    #[must_use]
    pub fn frame_size(&self, content_width: f64, content_height: f64) -> (f64, f64) {
        if self.rotation.is_quarter_turn() {
            (content_height, content_width)
        } else {
            (content_width, content_height)
        }
    }
}
