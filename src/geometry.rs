//! Pure geometry: translation, resizing, bounds, and drag-to-shape builders.
//!
//! Every operation here is a total function from value to value. The one
//! thing a drawable kind may not support (resizing a freehand path) returns
//! the value unchanged with a diagnostic; nothing in this module errors or
//! panics. The resize algorithms hold the anchor invariant: the edge or
//! corner opposite the dragged handle never moves.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_DRAWABLE_SIZE;
use crate::doc::{CropRect, Drawable};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grown outward by `amount` on every side.
    #[must_use]
    pub fn inflated(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Whether `p` lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Ellipse geometry in center/radius form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseBounds {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

/// Horizontal half of a resize handle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleX {
    Left,
    Right,
}

/// Vertical half of a resize handle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleY {
    Top,
    Bottom,
}

/// The drawable shifted by `(dx, dy)`.
///
/// Rect and ellipse shift origin/center, a line shifts both endpoints, a
/// path shifts every point.
#[must_use]
pub fn translate(drawable: &Drawable, dx: f64, dy: f64) -> Drawable {
    let mut d = drawable.clone();
    match &mut d {
        Drawable::Rect { x, y, .. } => {
            *x += dx;
            *y += dy;
        }
        Drawable::Ellipse { cx, cy, .. } => {
            *cx += dx;
            *cy += dy;
        }
        Drawable::Line { x1, y1, x2, y2, .. } => {
            *x1 += dx;
            *y1 += dy;
            *x2 += dx;
            *y2 += dy;
        }
        Drawable::Path { points, .. } => {
            for p in points {
                p.x += dx;
                p.y += dy;
            }
        }
    }
    d
}

/// The drawable resized by dragging the `(handle_x, handle_y)` corner to the
/// pointer position `(px, py)`.
///
/// Rect and crop keep the opposite edges fixed and floor each dimension at
/// [`MIN_DRAWABLE_SIZE`]. An ellipse splits the pointer delta in half
/// between radius and center so its opposite edge stays put. A line moves
/// only the dragged endpoint. A path cannot be resized: returned unchanged
/// with a diagnostic.
#[must_use]
pub fn resize(
    drawable: &Drawable,
    handle_x: HandleX,
    handle_y: HandleY,
    px: f64,
    py: f64,
) -> Drawable {
    let mut d = drawable.clone();
    match &mut d {
        Drawable::Rect { x, y, width, height, .. } => {
            (*x, *y, *width, *height) =
                resize_box(*x, *y, *width, *height, handle_x, handle_y, px, py);
        }
        Drawable::Ellipse { cx, cy, rx, ry, .. } => {
            // Half the pointer delta goes to the radius, half to the
            // center, so the edge opposite the handle stays fixed.
            match handle_x {
                HandleX::Left => {
                    let half = (px - (*cx - *rx)) / 2.0;
                    *rx = (*rx - half).max(MIN_DRAWABLE_SIZE);
                    *cx += half;
                }
                HandleX::Right => {
                    let half = (px - (*cx + *rx)) / 2.0;
                    *rx = (*rx + half).max(MIN_DRAWABLE_SIZE);
                    *cx += half;
                }
            }
            match handle_y {
                HandleY::Top => {
                    let half = (py - (*cy - *ry)) / 2.0;
                    *ry = (*ry - half).max(MIN_DRAWABLE_SIZE);
                    *cy += half;
                }
                HandleY::Bottom => {
                    let half = (py - (*cy + *ry)) / 2.0;
                    *ry = (*ry + half).max(MIN_DRAWABLE_SIZE);
                    *cy += half;
                }
            }
        }
        Drawable::Line { x1, y1, x2, y2, .. } => {
            match handle_x {
                HandleX::Left => *x1 = px,
                HandleX::Right => *x2 = px,
            }
            match handle_y {
                HandleY::Top => *y1 = py,
                HandleY::Bottom => *y2 = py,
            }
        }
        Drawable::Path { id, .. } => {
            tracing::warn!(id = id.as_str(), "cannot resize a path drawable");
        }
    }
    d
}

/// The crop resized by dragging a corner handle; same algorithm and floor
/// as a rect.
#[must_use]
pub fn resize_crop(crop: &CropRect, handle_x: HandleX, handle_y: HandleY, px: f64, py: f64) -> CropRect {
    let (x, y, width, height) =
        resize_box(crop.x, crop.y, crop.width, crop.height, handle_x, handle_y, px, py);
    CropRect { x, y, width, height }
}

/// Shared rect/crop corner-resize: the dragged edges follow the pointer,
/// the opposite edges stay anchored, each dimension floors at
/// [`MIN_DRAWABLE_SIZE`].
fn resize_box(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    handle_x: HandleX,
    handle_y: HandleY,
    px: f64,
    py: f64,
) -> (f64, f64, f64, f64) {
    let (mut x, mut y, mut width, mut height) = (x, y, width, height);

    match handle_x {
        HandleX::Left => {
            width = (width - (px - x)).max(MIN_DRAWABLE_SIZE);
            x = px;
        }
        HandleX::Right => {
            width = (px - x).max(MIN_DRAWABLE_SIZE);
        }
    }
    match handle_y {
        HandleY::Top => {
            height = (height - (py - y)).max(MIN_DRAWABLE_SIZE);
            y = py;
        }
        HandleY::Bottom => {
            height = (py - y).max(MIN_DRAWABLE_SIZE);
        }
    }

    (x, y, width, height)
}

/// Axis-aligned bounding box, or `None` for a path with no points.
#[must_use]
pub fn bounds(drawable: &Drawable) -> Option<Bounds> {
    match drawable {
        Drawable::Rect { x, y, width, height, .. } => Some(Bounds::new(*x, *y, *width, *height)),
        Drawable::Ellipse { cx, cy, rx, ry, .. } => {
            Some(Bounds::new(cx - rx, cy - ry, rx * 2.0, ry * 2.0))
        }
        Drawable::Line { x1, y1, x2, y2, .. } => {
            let x = x1.min(*x2);
            let y = y1.min(*y2);
            Some(Bounds::new(x, y, x1.max(*x2) - x, y1.max(*y2) - y))
        }
        Drawable::Path { points, .. } => {
            let first = points.first()?;
            let mut min = *first;
            let mut max = *first;
            for p in points {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
            Some(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
        }
    }
}

/// Normalize two arbitrary drag corners to a canonical rect.
///
/// Rejects the drag only when BOTH dimensions are under their floor; a
/// shape clearing the floor on one axis alone is accepted. That asymmetry
/// is deliberate behavior preservation (see DESIGN.md).
#[must_use]
pub fn rect_from_drag(p0: Point, p1: Point, min_width: f64, min_height: f64) -> Option<Bounds> {
    let x = p0.x.min(p1.x);
    let y = p0.y.min(p1.y);
    let width = p0.x.max(p1.x) - x;
    let height = p0.y.max(p1.y) - y;

    if width < min_width && height < min_height {
        return None;
    }

    Some(Bounds::new(x, y, width, height))
}

/// [`rect_from_drag`] in center/radius form; same floor rule.
#[must_use]
pub fn ellipse_from_drag(p0: Point, p1: Point, min_width: f64, min_height: f64) -> Option<EllipseBounds> {
    let b = rect_from_drag(p0, p1, min_width, min_height)?;
    Some(EllipseBounds {
        cx: b.x + b.width / 2.0,
        cy: b.y + b.height / 2.0,
        rx: b.width / 2.0,
        ry: b.height / 2.0,
    })
}

/// Line endpoints from a drag. Always defined: a line has no size floor and
/// keeps the drag direction (no corner normalization).
#[must_use]
pub fn line_from_drag(p0: Point, p1: Point) -> (Point, Point) {
    (p0, p1)
}
