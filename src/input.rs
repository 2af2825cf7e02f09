//! Input model: tools, draw style, keyboard intents, and the gesture
//! session.
//!
//! `Session` is the single transient value tracking one in-progress pointer
//! gesture between begin and end. Each variant carries exactly the context
//! its move handler needs: absolute-tracking gestures (resize) carry the
//! handle identity, delta-tracking gestures (move, pan) carry the previous
//! pointer position, and draw gestures carry a per-tool [`DragTracker`].
//! The engine creates a session on begin, advances it on move, and consumes
//! it on end or teardown; holding the gesture as a value (rather than as
//! captured listeners) is what makes discarding it deterministic.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::DrawableId;
use crate::geometry::{HandleX, HandleY, Point};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default). Dragging empty canvas pans.
    #[default]
    Select,
    /// Freehand path drawing.
    Pen,
    /// Draw a rectangle.
    Rect,
    /// Draw an ellipse.
    Ellipse,
    /// Draw a straight line segment.
    Line,
    /// Define or adjust the crop rectangle.
    Crop,
}

impl Tool {
    /// Whether this tool draws a new shape on drag.
    #[must_use]
    pub fn is_draw(self) -> bool {
        matches!(self, Self::Pen | Self::Rect | Self::Ellipse | Self::Line)
    }
}

/// Style applied to newly drawn shapes. Lines and paths ignore `fill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: "black".to_owned(),
            stroke: "black".to_owned(),
            stroke_width: 5.0,
        }
    }
}

/// A keyboard intent, already filtered by the host (key events while a text
/// control has focus never reach the engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Delete / Backspace: remove the selected drawable, or the crop when
    /// the crop tool is active.
    Delete,
    /// Escape: clear the selection.
    Escape,
    /// Enter: confirm the crop and leave crop mode.
    Confirm,
}

/// Pointer positions recorded by an in-progress draw gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragTracker {
    /// Two-corner tools (rect, ellipse, line, crop): the anchored start
    /// corner and the latest pointer position.
    Corners { start: Point, current: Point },
    /// The pen: every pointer position in arrival order.
    Points { points: Vec<Point> },
}

impl DragTracker {
    /// A corner tracker anchored at `start`.
    #[must_use]
    pub fn corners(start: Point) -> Self {
        Self::Corners { start, current: start }
    }

    /// A point tracker seeded with the begin position.
    #[must_use]
    pub fn points(seed: Point) -> Self {
        Self::Points { points: vec![seed] }
    }

    /// Record the next pointer position. Corners replace `current`; points
    /// append unconditionally (no distance threshold, no dedup).
    pub fn advance(&mut self, pos: Point) {
        match self {
            Self::Corners { current, .. } => *current = pos,
            Self::Points { points } => points.push(pos),
        }
    }
}

/// The active gesture, if any. At most one session exists at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Drawing a new shape with one of the draw tools.
    Drawing { tool: Tool, tracker: DragTracker },
    /// Resizing the selected drawable by one of its corner handles.
    ResizingShape { id: DrawableId, handle_x: HandleX, handle_y: HandleY },
    /// Moving the selected drawable; `last` is the previous pointer
    /// position (movement is applied as accumulated deltas).
    MovingShape { id: DrawableId, last: Point },
    /// Dragging out a new crop rectangle.
    DefiningCrop { tracker: DragTracker },
    /// Resizing the crop by one of its corner handles.
    ResizingCrop { handle_x: HandleX, handle_y: HandleY },
    /// Moving the crop; delta-tracked like a shape move.
    MovingCrop { last: Point },
    /// Panning the viewport; delta-tracked.
    Panning { last: Point },
}

impl Session {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
