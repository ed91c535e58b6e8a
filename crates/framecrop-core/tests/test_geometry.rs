use approx::assert_relative_eq;

use framecrop_core::frame::Frame;
use framecrop_core::geometry::{
    clamp_offset, clamp_source_rect, covers, drawn_rect, drawn_size, offset_bounds,
    preview_to_export_scale, project_radius, source_window, ClipShape, Point, Rect, Size,
};
use framecrop_core::view::ViewState;

// ---------------------------------------------------------------------------
// Draw size and offset bounds
// ---------------------------------------------------------------------------

#[test]
fn test_landscape_is_height_limited() {
    let drawn = drawn_size(1600, 900, 480.0, 1.0);
    assert_relative_eq!(drawn.height, 480.0);
    assert_relative_eq!(drawn.width, 853.333, epsilon = 1e-2);
}

#[test]
fn test_portrait_is_width_limited() {
    let drawn = drawn_size(900, 1600, 480.0, 1.5);
    assert_relative_eq!(drawn.width, 720.0);
    assert_relative_eq!(drawn.height, 1280.0, epsilon = 1e-2);
}

#[test]
fn test_landscape_bounds_on_rounded_frame() {
    let frame = Frame::rounded_rect(480, 1024);
    let bounds = frame.offset_bounds(1600, 900, 1.0);
    assert_relative_eq!(bounds.min_x, -186.667, epsilon = 1e-2);
    assert_relative_eq!(bounds.max_x, 186.667, epsilon = 1e-2);
    assert_relative_eq!(bounds.min_y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(bounds.max_y, 0.0, epsilon = 1e-4);
}

#[test]
fn test_square_image_at_unit_scale_cannot_move() {
    for frame in [Frame::circle(480, 16.0), Frame::rounded_rect(480, 1024)] {
        let bounds = frame.offset_bounds(1000, 1000, 1.0);
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 0.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 0.0);
    }
}

#[test]
fn test_circle_bounds_use_clip_diameter() {
    // 480 canvas, 16 padding: the image must cover a 448 px circle.
    let frame = Frame::circle(480, 16.0);
    assert_eq!(frame.preview_frame_edge(), 448.0);
    let bounds = frame.offset_bounds(1000, 1000, 2.0);
    assert_relative_eq!(bounds.max_x, 224.0);
    assert_relative_eq!(bounds.min_y, -224.0);
}

#[test]
fn test_offset_bounds_are_symmetric() {
    let bounds = offset_bounds(Size::new(700.0, 500.0), 480.0);
    assert_relative_eq!(bounds.min_x, -bounds.max_x);
    assert_relative_eq!(bounds.min_y, -bounds.max_y);
}

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_clamp_offset_within_range() {
    assert_eq!(clamp_offset(5.0, -10.0, 10.0), 5.0);
    assert_eq!(clamp_offset(-50.0, -10.0, 10.0), -10.0);
    assert_eq!(clamp_offset(50.0, -10.0, 10.0), 10.0);
}

#[test]
fn test_clamp_view_reports_movement() {
    let frame = Frame::rounded_rect(480, 1024);
    let mut view = ViewState {
        scale: 1.0,
        offset_x: 300.0,
        offset_y: -40.0,
        frame_radius: Some(96.0),
    };
    assert!(frame.clamp_view(1600, 900, &mut view));
    assert_relative_eq!(view.offset_x, 186.667, epsilon = 1e-2);
    assert_eq!(view.offset_y, 0.0);
    assert!(!frame.clamp_view(1600, 900, &mut view));
}

// ---------------------------------------------------------------------------
// Clip shapes and coverage
// ---------------------------------------------------------------------------

#[test]
fn test_circle_clip_radius() {
    let clip = ClipShape::circle(480.0, 16.0);
    assert_eq!(
        clip,
        ClipShape::Circle {
            center: Point::new(240.0, 240.0),
            radius: 224.0,
        }
    );
    assert!(clip.contains(Point::new(240.0, 20.0)));
    assert!(!clip.contains(Point::new(20.0, 20.0)));
}

#[test]
fn test_covers_detects_gap() {
    let clip = ClipShape::circle(480.0, 0.0);
    let exact = Rect::new(0.0, 0.0, 480.0, 480.0);
    assert!(covers(&exact, &clip));
    let shifted = Rect::new(1.0, 0.0, 480.0, 480.0);
    assert!(!covers(&shifted, &clip));
}

#[test]
fn test_drawn_rect_follows_offset() {
    let rect = drawn_rect(
        Size::new(600.0, 480.0),
        Point::new(240.0, 240.0),
        Point::new(20.0, 0.0),
    );
    assert_eq!(rect, Rect::new(-40.0, 0.0, 600.0, 480.0));
}

#[test]
fn test_project_radius_from_reference_frame() {
    assert_relative_eq!(project_radius(96.0, 1024.0), 96.0);
    assert_relative_eq!(project_radius(96.0, 480.0), 45.0);
    assert_relative_eq!(project_radius(512.0, 2048.0), 1024.0);
}

// ---------------------------------------------------------------------------
// Source window and projection
// ---------------------------------------------------------------------------

#[test]
fn test_source_window_centred_square() {
    let center = Point::new(1000.0, 1000.0);
    let window = source_window(2000, 2000, 2000.0, 1.0, Point::default(), center);
    assert_eq!(window, Rect::new(0.0, 0.0, 2000.0, 2000.0));
}

#[test]
fn test_source_window_zoomed_shows_middle() {
    let center = Point::new(250.0, 250.0);
    let window = source_window(1000, 1000, 500.0, 2.0, Point::default(), center);
    assert_relative_eq!(window.x, 250.0);
    assert_relative_eq!(window.y, 250.0);
    assert_relative_eq!(window.width, 500.0);
    assert_relative_eq!(window.height, 500.0);
}

#[test]
fn test_preview_and_export_show_same_source_fraction() {
    let (width, height) = (1600u32, 900u32);
    let frame = Frame::circle(480, 16.0);
    let mut view = ViewState {
        scale: 1.5,
        offset_x: 120.0,
        offset_y: -45.0,
        frame_radius: None,
    };
    frame.clamp_view(width, height, &mut view);

    let preview_edge = frame.preview_frame_edge();
    let preview = source_window(
        width,
        height,
        preview_edge,
        view.scale,
        view.offset(),
        frame.preview_center(),
    );

    let export_edge = frame.export_edge(width, height) as f32;
    let k = preview_to_export_scale(preview_edge, export_edge);
    let export = source_window(
        width,
        height,
        export_edge,
        view.scale,
        Point::new(view.offset_x * k, view.offset_y * k),
        Point::new(export_edge / 2.0, export_edge / 2.0),
    );

    let w = width as f32;
    let h = height as f32;
    assert_relative_eq!(preview.x / w, export.x / w, epsilon = 1e-4);
    assert_relative_eq!(preview.y / h, export.y / h, epsilon = 1e-4);
    assert_relative_eq!(preview.width / w, export.width / w, epsilon = 1e-4);
    assert_relative_eq!(preview.height / h, export.height / h, epsilon = 1e-4);
}

#[test]
fn test_clamp_source_rect_leaves_inner_rect() {
    let rect = Rect::new(10.0, 20.0, 50.0, 50.0);
    assert_eq!(clamp_source_rect(rect, 100, 100), rect);
}

#[test]
fn test_clamp_source_rect_keeps_aspect() {
    let rect = Rect::new(30.0, 10.0, 100.0, 40.0);
    let clamped = clamp_source_rect(rect, 100, 100);
    assert!(clamped.right() <= 100.0 + 1e-4);
    assert_relative_eq!(clamped.width / clamped.height, 2.5, epsilon = 1e-4);
    assert_relative_eq!(clamped.center().y, rect.center().y, epsilon = 1e-4);
}
