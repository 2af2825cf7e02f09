//! Hit-testing pointer positions against drawables, handles, and the crop.
//!
//! Bodies hit on their bounding box inflated by half the shape's stroke
//! width. The selected drawable additionally exposes a move indicator (its
//! bounds inflated by half the indicator stroke width) and corner resize
//! handles; [`HandleLayout`] is the single source of truth for where those
//! sit, shared between this module and the renderer so handles are hit
//! exactly where they are drawn.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CROP_INDICATOR_STROKE_WIDTH, INDICATOR_STROKE_WIDTH};
use crate::doc::{CropRect, Drawable, DrawableId};
use crate::geometry::{self, Bounds, HandleX, HandleY, Point};

/// Which part of a drawable or the crop was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The shape body (bounding-box semantics).
    Body,
    /// The move indicator of the selected drawable or the crop.
    MoveHandle,
    /// A corner resize handle.
    ResizeHandle(HandleX, HandleY),
}

/// Result of a drawable hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: DrawableId,
    pub part: HitPart,
}

/// Placement of the selection indicator and its resize handles.
///
/// `indicator` is the move area; each handle is a circle of radius
/// [`Self::handle_radius`] at the listed center. Lines put their two
/// handles on the endpoints themselves; paths expose no resize handles.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleLayout {
    pub indicator: Bounds,
    pub stroke_width: f64,
    pub handles: Vec<(HandleX, HandleY, Point)>,
}

impl HandleLayout {
    /// Layout for a drawable, or `None` when it has no bounds (empty path).
    #[must_use]
    pub fn for_drawable(drawable: &Drawable) -> Option<Self> {
        let stroke_width = INDICATOR_STROKE_WIDTH;
        let indicator = geometry::bounds(drawable)?.inflated(stroke_width / 2.0);

        let handles = match drawable {
            Drawable::Line { x1, y1, x2, y2, .. } => vec![
                (HandleX::Left, HandleY::Top, Point::new(*x1, *y1)),
                (HandleX::Right, HandleY::Bottom, Point::new(*x2, *y2)),
            ],
            Drawable::Path { .. } => Vec::new(),
            Drawable::Rect { .. } | Drawable::Ellipse { .. } => {
                corner_handles(indicator, stroke_width)
            }
        };

        Some(Self { indicator, stroke_width, handles })
    }

    /// Layout for the crop rectangle.
    #[must_use]
    pub fn for_crop(crop: &CropRect) -> Self {
        let stroke_width = CROP_INDICATOR_STROKE_WIDTH;
        let indicator =
            Bounds::new(crop.x, crop.y, crop.width, crop.height).inflated(stroke_width / 2.0);
        Self { indicator, stroke_width, handles: corner_handles(indicator, stroke_width) }
    }

    /// Radius of each resize handle circle.
    #[must_use]
    pub fn handle_radius(&self) -> f64 {
        self.stroke_width
    }

    /// The handle under `pos`, if any.
    #[must_use]
    pub fn hit_handle(&self, pos: Point) -> Option<(HandleX, HandleY)> {
        let radius = self.handle_radius();
        self.handles
            .iter()
            .find(|(_, _, center)| {
                let dx = pos.x - center.x;
                let dy = pos.y - center.y;
                dx * dx + dy * dy <= radius * radius
            })
            .map(|(hx, hy, _)| (*hx, *hy))
    }

    /// Whether `pos` falls on the move indicator.
    #[must_use]
    pub fn contains(&self, pos: Point) -> bool {
        self.indicator.contains(pos)
    }
}

/// Handle centers at the indicator corners, pushed outward by half the
/// indicator stroke width.
fn corner_handles(indicator: Bounds, stroke_width: f64) -> Vec<(HandleX, HandleY, Point)> {
    let half = stroke_width / 2.0;
    let left = indicator.x - half;
    let right = indicator.right() + half;
    let top = indicator.y - half;
    let bottom = indicator.bottom() + half;
    vec![
        (HandleX::Left, HandleY::Top, Point::new(left, top)),
        (HandleX::Right, HandleY::Top, Point::new(right, top)),
        (HandleX::Left, HandleY::Bottom, Point::new(left, bottom)),
        (HandleX::Right, HandleY::Bottom, Point::new(right, bottom)),
    ]
}

/// Whether `pos` falls on the drawable's body: its bounding box inflated by
/// half its stroke width. Empty paths hit nothing.
#[must_use]
pub fn body_contains(drawable: &Drawable, pos: Point) -> bool {
    geometry::bounds(drawable)
        .is_some_and(|b| b.inflated(drawable.stroke_width() / 2.0).contains(pos))
}

/// Test which drawable (if any) is under `pos`.
///
/// The selected drawable's handles take priority; after that, bodies are
/// tested top-down (reverse z-order).
#[must_use]
pub fn hit_test(pos: Point, drawables: &[Drawable], selected_id: Option<&str>) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| drawables.iter().find(|d| d.id() == id)) {
        if let Some(layout) = HandleLayout::for_drawable(selected) {
            if let Some((hx, hy)) = layout.hit_handle(pos) {
                return Some(Hit {
                    id: selected.id().to_owned(),
                    part: HitPart::ResizeHandle(hx, hy),
                });
            }
            if layout.contains(pos) {
                return Some(Hit { id: selected.id().to_owned(), part: HitPart::MoveHandle });
            }
        }
    }

    drawables
        .iter()
        .rev()
        .find(|d| body_contains(d, pos))
        .map(|d| Hit { id: d.id().to_owned(), part: HitPart::Body })
}

/// Test which part of the crop (if any) is under `pos`.
#[must_use]
pub fn hit_test_crop(pos: Point, crop: &CropRect) -> Option<HitPart> {
    let layout = HandleLayout::for_crop(crop);
    if let Some((hx, hy)) = layout.hit_handle(pos) {
        return Some(HitPart::ResizeHandle(hx, hy));
    }
    if layout.contains(pos) {
        return Some(HitPart::MoveHandle);
    }
    None
}
