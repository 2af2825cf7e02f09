//! The interaction controller: pointer gestures, selection, and commits.
//!
//! `EngineCore` owns the document, viewport, UI state, and the single
//! active [`Session`]. Every handler runs synchronously inside the host's
//! input dispatch and returns the [`Action`]s the host must process.
//! Committed changes carry cloned snapshots — the host never observes the
//! engine's internal state mutating under a value it was already handed.
//!
//! The engine is deliberately free of host bindings (no renderer, no event
//! loop, no coordinate conversion) so every gesture can be driven in plain
//! unit tests.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::consts::MIN_DRAWABLE_SIZE;
use crate::doc::{CropRect, DocStore, Drawable, DrawableId, IdSource, UuidSource};
use crate::geometry::{self, Bounds, EllipseBounds, Point};
use crate::hit::{self, Hit, HitPart};
use crate::input::{DragTracker, DrawStyle, KeyIntent, Session, Tool};
use crate::viewport::{Matrix, Viewport};

/// Actions returned from input handlers for the host to process.
///
/// `DrawablesChanged` / `CropChanged` / `SelectionChanged` fire after each
/// committed mutation and carry the new value; `RenderNeeded` asks the host
/// to redraw (provisional geometry, selection highlights, viewport).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DrawablesChanged(Vec<Drawable>),
    CropChanged(Option<CropRect>),
    SelectionChanged(Option<DrawableId>),
    RenderNeeded,
}

/// In-progress geometry of the active draw or crop-define gesture,
/// exposed so the renderer can preview the shape under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Provisional {
    Rect(Bounds),
    Ellipse(EllipseBounds),
    Line(Point, Point),
    Path(Vec<Point>),
    Crop(Bounds),
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected drawable, if any.
    pub selected_id: Option<DrawableId>,
    /// Style applied to newly drawn shapes.
    pub style: DrawStyle,
}

/// Core engine state: document, viewport, UI state, and the active session.
pub struct EngineCore {
    pub doc: DocStore,
    pub viewport: Viewport,
    pub ui: UiState,
    session: Session,
    ids: Box<dyn IdSource>,
    pub content_width: f64,
    pub content_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCore {
    /// A fresh engine with UUID ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_source(Box::new(UuidSource))
    }

    /// A fresh engine drawing ids from `ids` (deterministic sources for
    /// tests, host schemes in embeddings).
    #[must_use]
    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            doc: DocStore::new(),
            viewport: Viewport::default(),
            ui: UiState::default(),
            session: Session::Idle,
            ids,
            content_width: 0.0,
            content_height: 0.0,
        }
    }

    // --- Host data inputs ---

    /// Hydrate the document from a host snapshot.
    pub fn load_snapshot(&mut self, drawables: Vec<Drawable>) {
        self.doc.load_snapshot(drawables);
    }

    /// Set or clear the crop from host state.
    pub fn set_crop(&mut self, crop: Option<CropRect>) {
        self.doc.set_crop(crop);
    }

    /// Dimensions of the unrotated background content.
    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.content_width = width;
        self.content_height = height;
    }

    // --- Tool / style ---

    /// Switch the active tool. Clears the selection; an active session is
    /// discarded without committing.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.session.is_active() {
            tracing::warn!(?tool, "tool changed during an active session; session discarded");
            self.session = Session::Idle;
        }
        self.ui.tool = tool;
        self.clear_selection(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Style for subsequently drawn shapes.
    pub fn set_style(&mut self, style: DrawStyle) {
        self.ui.style = style;
    }

    // --- Pointer events (already in canvas space) ---

    /// Pointer down. Starts at most one session; a begin while a session is
    /// already active is a host contract violation and is ignored.
    pub fn pointer_begin(&mut self, pos: Point) -> Vec<Action> {
        if self.session.is_active() {
            tracing::warn!("pointer begin while a session is active; ignored");
            return Vec::new();
        }

        match self.ui.tool {
            Tool::Pen | Tool::Rect | Tool::Ellipse | Tool::Line => {
                self.begin_draw(self.ui.tool, pos)
            }
            Tool::Crop => self.begin_crop(pos),
            Tool::Select => self.begin_select(pos),
        }
    }

    /// Pointer moved. Advances the active session; with no session this is
    /// a plain hover and does nothing.
    pub fn pointer_move(&mut self, pos: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match &mut self.session {
            Session::Idle => {}
            Session::Drawing { tracker, .. } | Session::DefiningCrop { tracker } => {
                tracker.advance(pos);
                actions.push(Action::RenderNeeded);
            }
            Session::ResizingShape { id, handle_x, handle_y } => {
                let (hx, hy) = (*handle_x, *handle_y);
                let id = id.clone();
                match self.doc.get(&id) {
                    Some(drawable) => {
                        let resized = geometry::resize(drawable, hx, hy, pos.x, pos.y);
                        self.doc.replace(resized);
                        actions.push(Action::DrawablesChanged(self.doc.snapshot()));
                        actions.push(Action::RenderNeeded);
                    }
                    None => {
                        tracing::warn!(id = id.as_str(), "resize target is gone; aborting gesture");
                        self.session = Session::Idle;
                    }
                }
            }
            Session::MovingShape { id, last } => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                *last = pos;
                let id = id.clone();
                match self.doc.get(&id) {
                    Some(drawable) => {
                        let moved = geometry::translate(drawable, dx, dy);
                        self.doc.replace(moved);
                        actions.push(Action::DrawablesChanged(self.doc.snapshot()));
                        actions.push(Action::RenderNeeded);
                    }
                    None => {
                        tracing::warn!(id = id.as_str(), "move target is gone; aborting gesture");
                        self.session = Session::Idle;
                    }
                }
            }
            Session::ResizingCrop { handle_x, handle_y } => {
                let (hx, hy) = (*handle_x, *handle_y);
                match self.doc.crop() {
                    Some(crop) => {
                        self.doc
                            .set_crop(Some(geometry::resize_crop(&crop, hx, hy, pos.x, pos.y)));
                        actions.push(Action::CropChanged(self.doc.crop()));
                        actions.push(Action::RenderNeeded);
                    }
                    None => {
                        tracing::warn!("crop is gone during resize; aborting gesture");
                        self.session = Session::Idle;
                    }
                }
            }
            Session::MovingCrop { last } => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                *last = pos;
                match self.doc.crop() {
                    Some(crop) => {
                        self.doc.set_crop(Some(crop.translated(dx, dy)));
                        actions.push(Action::CropChanged(self.doc.crop()));
                        actions.push(Action::RenderNeeded);
                    }
                    None => {
                        tracing::warn!("crop is gone during move; aborting gesture");
                        self.session = Session::Idle;
                    }
                }
            }
            Session::Panning { last } => {
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                *last = pos;
                self.viewport.pan_by(dx, dy);
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    /// Pointer up. Consumes the session: draw and crop-define gestures
    /// commit their geometry (when it clears the size floor), everything
    /// else has already committed incrementally on move.
    pub fn pointer_end(&mut self, _pos: Point) -> Vec<Action> {
        let session = std::mem::take(&mut self.session);
        let mut actions = Vec::new();

        match session {
            Session::Idle => {
                tracing::debug!("pointer end without an active session");
                return actions;
            }
            Session::Drawing { tool, tracker } => {
                if let Some(provisional) = draw_provisional(tool, &tracker) {
                    let id = self.ids.next_id();
                    if let Some(drawable) = build_drawable(provisional, id.clone(), &self.ui.style)
                    {
                        self.doc.push(drawable);
                        // the fresh shape is selected so its handles appear
                        self.ui.selected_id = Some(id);
                        actions.push(Action::DrawablesChanged(self.doc.snapshot()));
                        actions.push(Action::SelectionChanged(self.ui.selected_id.clone()));
                    }
                }
                actions.push(Action::RenderNeeded);
            }
            Session::DefiningCrop { tracker } => {
                if let DragTracker::Corners { start, current } = tracker {
                    if let Some(b) = geometry::rect_from_drag(
                        start,
                        current,
                        MIN_DRAWABLE_SIZE,
                        MIN_DRAWABLE_SIZE,
                    ) {
                        self.doc.set_crop(Some(CropRect::new(b.x, b.y, b.width, b.height)));
                        actions.push(Action::CropChanged(self.doc.crop()));
                    }
                }
                actions.push(Action::RenderNeeded);
            }
            Session::ResizingShape { .. }
            | Session::MovingShape { .. }
            | Session::ResizingCrop { .. }
            | Session::MovingCrop { .. }
            | Session::Panning { .. } => {
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    /// Wheel scroll: zoom, clamped to the viewport's bounds.
    pub fn wheel(&mut self, delta_y: f64) -> Vec<Action> {
        self.viewport.apply_wheel(delta_y);
        vec![Action::RenderNeeded]
    }

    // --- Keyboard intents ---

    /// Handle a host-filtered keyboard intent. Ignored while a gesture is
    /// in progress.
    pub fn key(&mut self, intent: KeyIntent) -> Vec<Action> {
        if self.session.is_active() {
            tracing::debug!(?intent, "key intent during an active session; ignored");
            return Vec::new();
        }

        let mut actions = Vec::new();
        match intent {
            KeyIntent::Delete => {
                if self.ui.tool == Tool::Crop && self.doc.crop().is_some() {
                    self.doc.set_crop(None);
                    actions.push(Action::CropChanged(None));
                    actions.push(Action::RenderNeeded);
                } else if let Some(id) = self.ui.selected_id.take() {
                    if self.doc.remove(&id).is_some() {
                        actions.push(Action::DrawablesChanged(self.doc.snapshot()));
                    }
                    actions.push(Action::SelectionChanged(None));
                    actions.push(Action::RenderNeeded);
                }
            }
            KeyIntent::Escape => {
                self.clear_selection(&mut actions);
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
            }
            KeyIntent::Confirm => {
                if self.ui.tool == Tool::Crop && self.doc.crop().is_some() {
                    self.ui.tool = Tool::Select;
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions
    }

    // --- Viewport controls ---

    /// Rotate the viewport one quarter turn clockwise.
    pub fn rotate_cw(&mut self) -> Vec<Action> {
        self.viewport.rotate_cw();
        vec![Action::RenderNeeded]
    }

    /// Rotate the viewport one quarter turn counterclockwise.
    pub fn rotate_ccw(&mut self) -> Vec<Action> {
        self.viewport.rotate_ccw();
        vec![Action::RenderNeeded]
    }

    // --- Teardown ---

    /// Discard the active session without committing anything. The host
    /// must call this when it tears the editor down mid-gesture; it is a
    /// no-op when idle.
    pub fn cancel_session(&mut self) -> Vec<Action> {
        if !self.session.is_active() {
            return Vec::new();
        }
        tracing::debug!("active session discarded without commit");
        self.session = Session::Idle;
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected drawable id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn session_active(&self) -> bool {
        self.session.is_active()
    }

    /// In-progress geometry of the active draw/crop-define gesture.
    #[must_use]
    pub fn provisional(&self) -> Option<Provisional> {
        match &self.session {
            Session::Drawing { tool, tracker } => draw_provisional(*tool, tracker),
            Session::DefiningCrop { tracker } => match tracker {
                DragTracker::Corners { start, current } => {
                    geometry::rect_from_drag(*start, *current, MIN_DRAWABLE_SIZE, MIN_DRAWABLE_SIZE)
                        .map(Provisional::Crop)
                }
                DragTracker::Points { .. } => None,
            },
            _ => None,
        }
    }

    /// The region the renderer should display: the crop when one exists
    /// (and the crop tool is not adjusting it), the rotated frame
    /// otherwise.
    #[must_use]
    pub fn visible_region(&self) -> Bounds {
        if self.ui.tool != Tool::Crop {
            if let Some(crop) = self.doc.crop() {
                return Bounds::new(crop.x, crop.y, crop.width, crop.height);
            }
        }
        let (w, h) = self.viewport.frame_size(self.content_width, self.content_height);
        Bounds::new(0.0, 0.0, w, h)
    }

    /// The active canvas-to-display matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.viewport.matrix(self.content_width, self.content_height)
    }

    // --- Gesture starts ---

    fn begin_draw(&mut self, tool: Tool, pos: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.clear_selection(&mut actions);
        let tracker = if tool == Tool::Pen {
            DragTracker::points(pos)
        } else {
            DragTracker::corners(pos)
        };
        self.session = Session::Drawing { tool, tracker };
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_crop(&mut self, pos: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.clear_selection(&mut actions);
        match self.doc.crop() {
            None => {
                self.session = Session::DefiningCrop { tracker: DragTracker::corners(pos) };
                actions.push(Action::RenderNeeded);
            }
            Some(crop) => match hit::hit_test_crop(pos, &crop) {
                Some(HitPart::ResizeHandle(hx, hy)) => {
                    self.session = Session::ResizingCrop { handle_x: hx, handle_y: hy };
                    actions.push(Action::RenderNeeded);
                }
                Some(HitPart::MoveHandle | HitPart::Body) => {
                    self.session = Session::MovingCrop { last: pos };
                    actions.push(Action::RenderNeeded);
                }
                // a crop already exists and the pointer missed it
                None => {}
            },
        }
        actions
    }

    fn begin_select(&mut self, pos: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match hit::hit_test(pos, self.doc.drawables(), self.ui.selected_id.as_deref()) {
            Some(Hit { id, part: HitPart::ResizeHandle(hx, hy) }) => {
                self.session = Session::ResizingShape { id, handle_x: hx, handle_y: hy };
                actions.push(Action::RenderNeeded);
            }
            Some(Hit { id, part: HitPart::MoveHandle }) => {
                self.session = Session::MovingShape { id, last: pos };
                actions.push(Action::RenderNeeded);
            }
            Some(Hit { id, part: HitPart::Body }) => {
                // discrete select; the click never reaches the background
                if self.ui.selected_id.as_deref() != Some(id.as_str()) {
                    self.ui.selected_id = Some(id);
                    actions.push(Action::SelectionChanged(self.ui.selected_id.clone()));
                    actions.push(Action::RenderNeeded);
                }
            }
            None => {
                self.clear_selection(&mut actions);
                self.session = Session::Panning { last: pos };
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    fn clear_selection(&mut self, actions: &mut Vec<Action>) {
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
    }
}

/// The per-tool draw strategy: map a drag tracker to provisional geometry.
/// Rect and ellipse apply the size floor (both axes under it rejects the
/// drag); lines and pen strokes always produce geometry.
fn draw_provisional(tool: Tool, tracker: &DragTracker) -> Option<Provisional> {
    match (tool, tracker) {
        (Tool::Rect, DragTracker::Corners { start, current }) => {
            geometry::rect_from_drag(*start, *current, MIN_DRAWABLE_SIZE, MIN_DRAWABLE_SIZE)
                .map(Provisional::Rect)
        }
        (Tool::Ellipse, DragTracker::Corners { start, current }) => {
            geometry::ellipse_from_drag(*start, *current, MIN_DRAWABLE_SIZE, MIN_DRAWABLE_SIZE)
                .map(Provisional::Ellipse)
        }
        (Tool::Line, DragTracker::Corners { start, current }) => {
            let (a, b) = geometry::line_from_drag(*start, *current);
            Some(Provisional::Line(a, b))
        }
        (Tool::Pen, DragTracker::Points { points }) => Some(Provisional::Path(points.clone())),
        _ => {
            tracing::warn!(?tool, "draw session with a mismatched tracker");
            None
        }
    }
}

/// Materialize committed provisional geometry as a drawable.
fn build_drawable(provisional: Provisional, id: DrawableId, style: &DrawStyle) -> Option<Drawable> {
    match provisional {
        Provisional::Rect(b) => Some(Drawable::Rect {
            id,
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
        }),
        Provisional::Ellipse(e) => Some(Drawable::Ellipse {
            id,
            cx: e.cx,
            cy: e.cy,
            rx: e.rx,
            ry: e.ry,
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
        }),
        Provisional::Line(a, b) => Some(Drawable::Line {
            id,
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
        }),
        Provisional::Path(points) => Some(Drawable::Path {
            id,
            points,
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
        }),
        Provisional::Crop(_) => {
            tracing::warn!("crop geometry cannot become a drawable");
            None
        }
    }
}
