#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::Drawable;

// =============================================================
// Helpers
// =============================================================

fn rect(x: f64, y: f64, width: f64, height: f64) -> Drawable {
    Drawable::Rect {
        id: "r1".into(),
        x,
        y,
        width,
        height,
        fill: "black".into(),
        stroke: "none".into(),
        stroke_width: 0.0,
    }
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Drawable {
    Drawable::Ellipse {
        id: "e1".into(),
        cx,
        cy,
        rx,
        ry,
        fill: "black".into(),
        stroke: "none".into(),
        stroke_width: 0.0,
    }
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Drawable {
    Drawable::Line { id: "l1".into(), x1, y1, x2, y2, stroke: "black".into(), stroke_width: 5.0 }
}

fn path(points: &[(f64, f64)]) -> Drawable {
    Drawable::Path {
        id: "p1".into(),
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        stroke: "black".into(),
        stroke_width: 5.0,
    }
}

fn rect_fields(d: &Drawable) -> (f64, f64, f64, f64) {
    match d {
        Drawable::Rect { x, y, width, height, .. } => (*x, *y, *width, *height),
        other => panic!("expected rect, got {other:?}"),
    }
}

fn ellipse_fields(d: &Drawable) -> (f64, f64, f64, f64) {
    match d {
        Drawable::Ellipse { cx, cy, rx, ry, .. } => (*cx, *cy, *rx, *ry),
        other => panic!("expected ellipse, got {other:?}"),
    }
}

fn line_fields(d: &Drawable) -> (f64, f64, f64, f64) {
    match d {
        Drawable::Line { x1, y1, x2, y2, .. } => (*x1, *y1, *x2, *y2),
        other => panic!("expected line, got {other:?}"),
    }
}

fn path_points(d: &Drawable) -> Vec<Point> {
    match d {
        Drawable::Path { points, .. } => points.clone(),
        other => panic!("expected path, got {other:?}"),
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_edges() {
    let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(b.right(), 40.0);
    assert_eq!(b.bottom(), 60.0);
}

#[test]
fn bounds_inflated_grows_every_side() {
    let b = Bounds::new(10.0, 10.0, 20.0, 20.0).inflated(2.5);
    assert_eq!(b.x, 7.5);
    assert_eq!(b.y, 7.5);
    assert_eq!(b.width, 25.0);
    assert_eq!(b.height, 25.0);
}

#[test]
fn bounds_contains_interior_and_edges() {
    let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(b.contains(pt(5.0, 5.0)));
    assert!(b.contains(pt(0.0, 0.0)));
    assert!(b.contains(pt(10.0, 10.0)));
    assert!(!b.contains(pt(10.1, 5.0)));
    assert!(!b.contains(pt(5.0, -0.1)));
}

// =============================================================
// translate
// =============================================================

#[test]
fn translate_rect_shifts_origin() {
    let d = translate(&rect(10.0, 20.0, 30.0, 40.0), 5.0, -7.0);
    assert_eq!(rect_fields(&d), (15.0, 13.0, 30.0, 40.0));
}

#[test]
fn translate_ellipse_shifts_center() {
    let d = translate(&ellipse(50.0, 60.0, 20.0, 10.0), -5.0, 5.0);
    assert_eq!(ellipse_fields(&d), (45.0, 65.0, 20.0, 10.0));
}

#[test]
fn translate_line_shifts_both_endpoints() {
    let d = translate(&line(0.0, 0.0, 10.0, 20.0), 3.0, 4.0);
    assert_eq!(line_fields(&d), (3.0, 4.0, 13.0, 24.0));
}

#[test]
fn translate_path_shifts_every_point() {
    let d = translate(&path(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]), 1.0, 2.0);
    assert_eq!(path_points(&d), vec![pt(1.0, 2.0), pt(6.0, 7.0), pt(11.0, 2.0)]);
}

#[test]
fn translate_round_trip_rect() {
    let original = rect(10.0, 20.0, 30.0, 40.0);
    let back = translate(&translate(&original, 7.0, -3.0), -7.0, 3.0);
    assert_eq!(back, original);
}

#[test]
fn translate_round_trip_ellipse() {
    let original = ellipse(50.0, 60.0, 20.0, 10.0);
    let back = translate(&translate(&original, 11.0, 13.0), -11.0, -13.0);
    assert_eq!(back, original);
}

#[test]
fn translate_round_trip_line() {
    let original = line(1.0, 2.0, 3.0, 4.0);
    let back = translate(&translate(&original, 100.0, 200.0), -100.0, -200.0);
    assert_eq!(back, original);
}

#[test]
fn translate_round_trip_path() {
    let original = path(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
    let back = translate(&translate(&original, 4.0, 8.0), -4.0, -8.0);
    assert_eq!(path_points(&back), path_points(&original));
}

// =============================================================
// resize: rect
// =============================================================

#[test]
fn resize_rect_right_bottom_tracks_pointer() {
    let d = resize(&rect(10.0, 10.0, 30.0, 40.0), HandleX::Right, HandleY::Bottom, 60.0, 80.0);
    assert_eq!(rect_fields(&d), (10.0, 10.0, 50.0, 70.0));
}

#[test]
fn resize_rect_left_top_moves_origin_and_anchors_opposite_corner() {
    let d = resize(&rect(10.0, 10.0, 30.0, 40.0), HandleX::Left, HandleY::Top, 5.0, 5.0);
    let (x, y, width, height) = rect_fields(&d);
    assert_eq!((x, y, width, height), (5.0, 5.0, 35.0, 45.0));
    // the opposite (bottom-right) corner must not move
    assert_eq!(x + width, 40.0);
    assert_eq!(y + height, 50.0);
}

#[test]
fn resize_rect_floors_at_minimum() {
    let d = resize(&rect(0.0, 0.0, 20.0, 20.0), HandleX::Right, HandleY::Bottom, 5.0, 5.0);
    assert_eq!(rect_fields(&d), (0.0, 0.0, 10.0, 10.0));
}

#[test]
fn resize_rect_inverted_drag_never_goes_below_floor() {
    let d = resize(&rect(0.0, 0.0, 50.0, 50.0), HandleX::Right, HandleY::Bottom, -100.0, -100.0);
    let (_, _, width, height) = rect_fields(&d);
    assert_eq!(width, 10.0);
    assert_eq!(height, 10.0);
}

#[test]
fn resize_rect_left_only_leaves_vertical_axis_untouched() {
    let d = resize(&rect(10.0, 10.0, 30.0, 40.0), HandleX::Left, HandleY::Bottom, 0.0, 50.0);
    let (x, y, width, height) = rect_fields(&d);
    assert_eq!((x, width), (0.0, 40.0));
    assert_eq!((y, height), (10.0, 40.0));
}

// =============================================================
// resize: ellipse
// =============================================================

#[test]
fn resize_ellipse_right_splits_delta_between_radius_and_center() {
    // right edge at 70; pointer 90 => delta 20, half 10
    let d = resize(&ellipse(50.0, 50.0, 20.0, 20.0), HandleX::Right, HandleY::Bottom, 90.0, 70.0);
    let (cx, cy, rx, ry) = ellipse_fields(&d);
    assert_eq!((cx, rx), (60.0, 30.0));
    // left edge stays fixed
    assert_eq!(cx - rx, 30.0);
    assert_eq!((cy, ry), (50.0, 20.0));
}

#[test]
fn resize_ellipse_left_keeps_right_edge_fixed() {
    // left edge at 30; pointer 10 => delta -20, half -10
    let d = resize(&ellipse(50.0, 50.0, 20.0, 20.0), HandleX::Left, HandleY::Bottom, 10.0, 70.0);
    let (cx, _, rx, _) = ellipse_fields(&d);
    assert_eq!((cx, rx), (40.0, 30.0));
    assert_eq!(cx + rx, 70.0);
}

#[test]
fn resize_ellipse_top_adjusts_vertical_axis() {
    // top edge at 30; pointer 10 => delta -20, half -10
    let d = resize(&ellipse(50.0, 50.0, 20.0, 20.0), HandleX::Right, HandleY::Top, 70.0, 10.0);
    let (_, cy, _, ry) = ellipse_fields(&d);
    assert_eq!((cy, ry), (40.0, 30.0));
    assert_eq!(cy + ry, 70.0);
}

#[test]
fn resize_ellipse_radius_floors_at_minimum() {
    let d = resize(&ellipse(50.0, 50.0, 20.0, 20.0), HandleX::Right, HandleY::Bottom, 0.0, 0.0);
    let (_, _, rx, ry) = ellipse_fields(&d);
    assert_eq!(rx, 10.0);
    assert_eq!(ry, 10.0);
}

// =============================================================
// resize: line
// =============================================================

#[test]
fn resize_line_left_top_moves_first_endpoint_only() {
    let d = resize(&line(0.0, 0.0, 100.0, 100.0), HandleX::Left, HandleY::Top, 25.0, 30.0);
    assert_eq!(line_fields(&d), (25.0, 30.0, 100.0, 100.0));
}

#[test]
fn resize_line_right_bottom_moves_second_endpoint_only() {
    let d = resize(&line(0.0, 0.0, 100.0, 100.0), HandleX::Right, HandleY::Bottom, 80.0, 90.0);
    assert_eq!(line_fields(&d), (0.0, 0.0, 80.0, 90.0));
}

#[test]
fn resize_line_mixed_handles_split_across_endpoints() {
    let d = resize(&line(0.0, 0.0, 100.0, 100.0), HandleX::Left, HandleY::Bottom, 10.0, 90.0);
    assert_eq!(line_fields(&d), (10.0, 0.0, 100.0, 90.0));
}

#[test]
fn resize_line_has_no_floor() {
    let d = resize(&line(0.0, 0.0, 100.0, 100.0), HandleX::Right, HandleY::Bottom, 1.0, 1.0);
    assert_eq!(line_fields(&d), (0.0, 0.0, 1.0, 1.0));
}

// =============================================================
// resize: path
// =============================================================

#[test]
fn resize_path_is_a_noop() {
    let original = path(&[(0.0, 0.0), (10.0, 10.0)]);
    let d = resize(&original, HandleX::Right, HandleY::Bottom, 500.0, 500.0);
    assert_eq!(d, original);
}

// =============================================================
// resize: crop
// =============================================================

#[test]
fn resize_crop_left_top() {
    let crop = CropRect::new(0.0, 0.0, 100.0, 100.0);
    let resized = resize_crop(&crop, HandleX::Left, HandleY::Top, 10.0, 10.0);
    assert_eq!(resized, CropRect::new(10.0, 10.0, 90.0, 90.0));
}

#[test]
fn resize_crop_right_bottom_floors() {
    let crop = CropRect::new(0.0, 0.0, 100.0, 100.0);
    let resized = resize_crop(&crop, HandleX::Right, HandleY::Bottom, 2.0, 2.0);
    assert_eq!(resized, CropRect::new(0.0, 0.0, 10.0, 10.0));
}

// =============================================================
// bounds
// =============================================================

#[test]
fn bounds_of_rect_is_itself() {
    let b = bounds(&rect(10.0, 20.0, 30.0, 40.0));
    assert_eq!(b, Some(Bounds::new(10.0, 20.0, 30.0, 40.0)));
}

#[test]
fn bounds_of_ellipse_spans_diameters() {
    let b = bounds(&ellipse(50.0, 60.0, 20.0, 10.0));
    assert_eq!(b, Some(Bounds::new(30.0, 50.0, 40.0, 20.0)));
}

#[test]
fn bounds_of_line_normalizes_endpoints() {
    let b = bounds(&line(100.0, 10.0, 20.0, 90.0));
    assert_eq!(b, Some(Bounds::new(20.0, 10.0, 80.0, 80.0)));
}

#[test]
fn bounds_of_path_spans_all_points() {
    let b = bounds(&path(&[(5.0, 50.0), (25.0, 10.0), (15.0, 30.0)]));
    assert_eq!(b, Some(Bounds::new(5.0, 10.0, 20.0, 40.0)));
}

#[test]
fn bounds_of_single_point_path_is_zero_sized() {
    let b = bounds(&path(&[(5.0, 5.0)]));
    assert_eq!(b, Some(Bounds::new(5.0, 5.0, 0.0, 0.0)));
}

#[test]
fn bounds_of_empty_path_is_none() {
    assert_eq!(bounds(&path(&[])), None);
}

// =============================================================
// drag builders
// =============================================================

#[test]
fn rect_from_drag_normalizes_corners() {
    let b = rect_from_drag(pt(40.0, 50.0), pt(10.0, 10.0), 10.0, 10.0);
    assert_eq!(b, Some(Bounds::new(10.0, 10.0, 30.0, 40.0)));
}

#[test]
fn rect_from_drag_is_corner_order_independent() {
    let a = rect_from_drag(pt(10.0, 10.0), pt(40.0, 50.0), 10.0, 10.0);
    let b = rect_from_drag(pt(40.0, 50.0), pt(10.0, 10.0), 10.0, 10.0);
    assert_eq!(a, b);
}

#[test]
fn rect_from_drag_rejects_when_both_axes_below_floor() {
    assert_eq!(rect_from_drag(pt(0.0, 0.0), pt(5.0, 5.0), 10.0, 10.0), None);
}

#[test]
fn rect_from_drag_accepts_when_only_width_clears_floor() {
    let b = rect_from_drag(pt(0.0, 0.0), pt(30.0, 2.0), 10.0, 10.0);
    assert_eq!(b, Some(Bounds::new(0.0, 0.0, 30.0, 2.0)));
}

#[test]
fn rect_from_drag_accepts_when_only_height_clears_floor() {
    let b = rect_from_drag(pt(0.0, 0.0), pt(2.0, 30.0), 10.0, 10.0);
    assert_eq!(b, Some(Bounds::new(0.0, 0.0, 2.0, 30.0)));
}

#[test]
fn rect_from_drag_accepts_exactly_at_floor() {
    let b = rect_from_drag(pt(0.0, 0.0), pt(10.0, 3.0), 10.0, 10.0);
    assert!(b.is_some());
}

#[test]
fn ellipse_from_drag_returns_center_radius_form() {
    let e = ellipse_from_drag(pt(10.0, 10.0), pt(50.0, 30.0), 10.0, 10.0);
    assert_eq!(e, Some(EllipseBounds { cx: 30.0, cy: 20.0, rx: 20.0, ry: 10.0 }));
}

#[test]
fn ellipse_from_drag_applies_the_same_floor_rule() {
    assert_eq!(ellipse_from_drag(pt(0.0, 0.0), pt(4.0, 4.0), 10.0, 10.0), None);
    assert!(ellipse_from_drag(pt(0.0, 0.0), pt(40.0, 4.0), 10.0, 10.0).is_some());
}

#[test]
fn line_from_drag_keeps_direction_and_has_no_floor() {
    let (a, b) = line_from_drag(pt(50.0, 50.0), pt(10.0, 80.0));
    assert_eq!(a, pt(50.0, 50.0));
    assert_eq!(b, pt(10.0, 80.0));

    let (a, b) = line_from_drag(pt(0.0, 0.0), pt(1.0, 1.0));
    assert_eq!(a, pt(0.0, 0.0));
    assert_eq!(b, pt(1.0, 1.0));
}
