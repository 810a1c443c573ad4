use latent_canvas::config::presets;
use latent_canvas::core::{Point, Viewport};
use latent_canvas::render::{
    CirclePrimitive, Color, FrameStyle, LinePrimitive, MarkerId, MarkerPrimitive, NullRenderer,
    RenderFrame, Renderer, ScatterStyle, Surface, TextHAlign, draw_frame, draw_scatter,
    generate_ticks,
};

#[test]
fn generate_ticks_includes_both_endpoints() {
    let ticks = generate_ticks(presets::Z_RANGE, 6).expect("ticks");
    assert_eq!(ticks.len(), 6);
    assert_eq!(ticks[0], -3.0);
    assert_eq!(ticks[5], 3.0);
    assert!(generate_ticks(presets::Z_RANGE, 1).is_err());
}

#[test]
fn frame_draws_axes_ticks_labels_and_border() {
    let config = presets::latent_plot();
    let scales = config.scales().expect("scales");
    let mut frame = RenderFrame::new(config.viewport);

    draw_frame(&mut frame, scales, 6, &FrameStyle::default()).expect("frame");

    // Two axis lines, two border segments, one tick per label.
    assert_eq!(frame.lines.len(), 4 + 2 * 6);
    assert_eq!(frame.texts.len(), 2 * 6);

    let x_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(x_labels, ["-3.0", "-1.8", "-0.6", "0.6", "1.8", "3.0"]);

    let top_y_label = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Right)
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .expect("y labels");
    assert_eq!(top_y_label.text, "3.0");
    assert_eq!(top_y_label.y, 10.0);
}

#[test]
fn null_renderer_counts_frame_content() {
    let config = presets::latent_plot();
    let scales = config.scales().expect("scales");
    let mut frame = RenderFrame::new(config.viewport);
    draw_frame(&mut frame, scales, 3, &FrameStyle::default()).expect("frame");
    frame
        .set_marker(
            MarkerId::SELECTOR_DOT,
            MarkerPrimitive::Circle(CirclePrimitive::new(140.0, 110.0, 9.0, Color::RED)),
        )
        .expect("marker");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_line_count, 10);
    assert_eq!(renderer.last_text_count, 6);
    assert_eq!(renderer.last_marker_count, 1);
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn clear_keeps_retained_markers() {
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    frame
        .draw_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, Color::BLACK))
        .expect("line");
    frame
        .set_marker(
            MarkerId::REMOTE_DOT,
            MarkerPrimitive::Circle(CirclePrimitive::new(5.0, 5.0, 2.0, Color::RED)),
        )
        .expect("marker");

    frame.clear();
    assert!(frame.lines.is_empty());
    assert!(frame.marker(MarkerId::REMOTE_DOT).is_some());

    frame.remove_marker(MarkerId::REMOTE_DOT);
    assert!(frame.is_empty());
}

#[test]
fn invalid_primitives_are_rejected() {
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    assert!(
        frame
            .draw_line(LinePrimitive::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, Color::BLACK))
            .is_err()
    );
    assert!(
        frame
            .draw_circle(CirclePrimitive::new(1.0, 1.0, -2.0, Color::RED))
            .is_err()
    );
    assert!(frame.is_empty());
}

#[test]
fn scatter_draws_highlight_last() {
    let config = presets::latent_plot();
    let scales = config.scales().expect("scales");
    let mut frame = RenderFrame::new(config.viewport);
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(-1.0, 2.0)];
    let colors = [Color::BLACK; 3];
    let style = ScatterStyle::default();

    draw_scatter(&mut frame, scales, &points, &colors, Some(0), &style).expect("scatter");

    assert_eq!(frame.circles.len(), 3);
    let last = frame.circles.last().expect("highlight");
    assert_eq!((last.cx, last.cy), (140.0, 110.0));
    assert_eq!(last.radius, style.highlight_radius_px);

    assert!(draw_scatter(&mut frame, scales, &points, &colors[..2], None, &style).is_err());
}
