//! Tests for plotter rectangles and placement spans.

use plot_common::{PlotterRect, Span};

// ============================================================================
// Rectangle tests
// ============================================================================

#[test]
fn test_rect_from_xywh() {
    let rect = PlotterRect::from_xywh(10.0, 20.0, 30.0, 40.0);
    assert_eq!(rect.left, 10.0);
    assert_eq!(rect.top, 20.0);
    assert_eq!(rect.right, 40.0);
    assert_eq!(rect.bottom, 60.0);
}

#[test]
fn test_touching_edges_do_not_intersect() {
    let a = PlotterRect::new(0.0, 0.0, 10.0, 10.0);
    let right = PlotterRect::new(10.0, 0.0, 20.0, 10.0);
    let below = PlotterRect::new(0.0, 10.0, 10.0, 20.0);

    assert!(!a.intersects(&right));
    assert!(!a.intersects(&below));
    assert!(a.intersection(&right).is_none());
}

#[test]
fn test_contains_is_inclusive() {
    let rect = PlotterRect::new(0.0, 0.0, 100.0, 100.0);
    assert!(rect.contains(&rect));
    assert!(rect.contains_point(0.0, 100.0));
    assert!(!rect.contains_point(100.5, 50.0));
}

#[test]
fn test_contained_rect_intersection_is_itself() {
    let outer = PlotterRect::new(0.0, 0.0, 100.0, 100.0);
    let inner = PlotterRect::new(25.0, 10.0, 75.0, 90.0);
    assert_eq!(outer.intersection(&inner), Some(inner));
}

// ============================================================================
// Span tests
// ============================================================================

#[test]
fn test_span_from_tuple() {
    let span: Span = (5.0, 1.0).into();
    assert_eq!(span, Span::new(5.0, 1.0));
    assert!(span.is_descending());
    assert!(!span.reversed().is_descending());
}

#[test]
fn test_from_spans_normalizes_both_axes() {
    // Mirrored on both axes: x runs right to left, y runs top to bottom.
    let rect = PlotterRect::from_spans(Span::new(80.0, 20.0), Span::new(10.0, 60.0));
    assert_eq!(rect, PlotterRect::new(20.0, 10.0, 80.0, 60.0));
}

#[test]
fn test_zero_length_span() {
    let span = Span::new(3.0, 3.0);
    assert_eq!(span.length(), 0.0);
    assert!(!span.is_descending());
}

#[test]
fn test_span_json() {
    let span: Span = serde_json::from_str(r#"{"start": 1.5, "end": -2.0}"#).unwrap();
    assert_eq!(span, Span::new(1.5, -2.0));
}
