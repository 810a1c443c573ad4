use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use latent_canvas::CanvasError;
use latent_canvas::config::AreaSelectorConfig;
use latent_canvas::core::{Margins, PlotArea, Point, Range, Rect, Viewport};
use latent_canvas::interaction::{
    AreaSelector, AreaSpace, InteractionMode, PointerEvent, PointerPhase, SelectionReadout,
};
use latent_canvas::render::{MarkerId, MarkerPrimitive, RenderFrame};

type Log = Rc<RefCell<Vec<Rect>>>;

fn plot() -> (PlotArea, RenderFrame) {
    let viewport = Viewport::new(200, 200);
    let area = Margins::uniform(0.0).plot_area(viewport).expect("area");
    (area, RenderFrame::new(viewport))
}

fn unit_selector(frame: &mut RenderFrame, area: PlotArea) -> (AreaSelector, Log, Log) {
    let changes: Log = Rc::default();
    let commits: Log = Rc::default();
    let (change_sink, commit_sink) = (Rc::clone(&changes), Rc::clone(&commits));
    let selector = AreaSelector::builder(area)
        .with_space(AreaSpace::FlippedUnit)
        .with_initial(Rect::new(0.1, 0.1, 0.2, 0.2))
        .on_change(move |rect| change_sink.borrow_mut().push(rect))
        .on_commit(move |rect| commit_sink.borrow_mut().push(rect))
        .build(frame)
        .expect("selector");
    (selector, changes, commits)
}

fn assert_rect_eq(actual: Rect, expected: Rect) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
    assert_relative_eq!(actual.width, expected.width, epsilon = 1e-9);
    assert_relative_eq!(actual.height, expected.height, epsilon = 1e-9);
}

#[test]
fn initial_rect_is_converted_and_reported_once() {
    let (area, mut frame) = plot();
    let (selector, changes, commits) = unit_selector(&mut frame, area);

    assert_rect_eq(selector.rect_px(), Rect::new(20.0, 140.0, 40.0, 40.0));
    assert_eq!(changes.borrow().len(), 1);
    assert_rect_eq(changes.borrow()[0], Rect::new(0.1, 0.1, 0.2, 0.2));
    assert!(commits.borrow().is_empty());

    assert!(matches!(
        frame.marker(MarkerId::SELECTION_RECT),
        Some(MarkerPrimitive::Rect(_))
    ));
    match frame.marker(MarkerId::RESIZE_HANDLE) {
        Some(MarkerPrimitive::Rect(handle)) => {
            assert_eq!((handle.x, handle.y), (46.0, 166.0));
            assert_eq!((handle.width, handle.height), (14.0, 14.0));
        }
        other => panic!("unexpected handle marker: {other:?}"),
    }
}

#[test]
fn dragging_by_100px_moves_half_the_unit_width() {
    let (area, mut frame) = plot();
    let (mut selector, changes, commits) = unit_selector(&mut frame, area);

    assert_eq!(selector.pointer_down(Point::new(25.0, 145.0)), InteractionMode::Dragging);
    let moved = selector
        .pointer_move(&mut frame, Point::new(125.0, 145.0))
        .expect("move")
        .expect("active");
    assert_rect_eq(moved, Rect::new(0.6, 0.1, 0.2, 0.2));
    assert!(commits.borrow().is_empty());

    let committed = selector.pointer_up().expect("commit");
    assert_rect_eq(committed, Rect::new(0.6, 0.1, 0.2, 0.2));
    assert_eq!(commits.borrow().len(), 1);
    assert_eq!(changes.borrow().len(), 2);
    assert_eq!(selector.pointer_up(), None);
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn dragging_past_the_edge_clamps_to_one_minus_width() {
    let (area, mut frame) = plot();
    let (mut selector, _, _) = unit_selector(&mut frame, area);

    selector.pointer_down(Point::new(25.0, 145.0));
    let moved = selector
        .pointer_move(&mut frame, Point::new(900.0, -900.0))
        .expect("move")
        .expect("active");
    assert_rect_eq(moved, Rect::new(0.8, 0.8, 0.2, 0.2));
    assert_rect_eq(selector.rect_px(), Rect::new(160.0, 0.0, 40.0, 40.0));
}

#[test]
fn resize_handle_wins_and_size_is_bounded() {
    let (area, mut frame) = plot();
    let (mut selector, _, commits) = unit_selector(&mut frame, area);

    // Inside both the body and the handle.
    assert_eq!(selector.pointer_down(Point::new(55.0, 175.0)), InteractionMode::Resizing);

    selector
        .pointer_move(&mut frame, Point::new(95.0, 175.0))
        .expect("grow");
    assert_rect_eq(selector.rect_px(), Rect::new(20.0, 140.0, 80.0, 40.0));

    selector
        .pointer_move(&mut frame, Point::new(900.0, 900.0))
        .expect("overshoot");
    assert_rect_eq(selector.rect_px(), Rect::new(20.0, 140.0, 180.0, 60.0));

    selector
        .pointer_move(&mut frame, Point::new(0.0, 0.0))
        .expect("shrink");
    assert_rect_eq(selector.rect_px(), Rect::new(20.0, 140.0, 10.0, 10.0));

    selector.pointer_up();
    assert_eq!(commits.borrow().len(), 1);
    assert_rect_eq(commits.borrow()[0], Rect::new(0.1, 0.25, 0.05, 0.05));
}

#[test]
fn press_outside_the_rect_starts_nothing() {
    let (area, mut frame) = plot();
    let (mut selector, changes, commits) = unit_selector(&mut frame, area);

    assert_eq!(selector.pointer_down(Point::new(150.0, 20.0)), InteractionMode::Idle);
    assert_eq!(
        selector
            .pointer_move(&mut frame, Point::new(160.0, 30.0))
            .expect("idle"),
        None
    );
    assert_eq!(selector.pointer_up(), None);
    assert_eq!(changes.borrow().len(), 1);
    assert!(commits.borrow().is_empty());
}

#[test]
fn oversized_initial_rect_is_clamped_into_the_area() {
    let (area, mut frame) = plot();
    let selector = AreaSelector::builder(area)
        .with_initial(Rect::new(190.0, 190.0, 50.0, 2.0))
        .build(&mut frame)
        .expect("selector");
    assert_rect_eq(selector.rect_px(), Rect::new(150.0, 190.0, 50.0, 10.0));
}

#[test]
fn initial_rect_outside_the_space_is_rejected() {
    let (area, mut frame) = plot();
    let result = AreaSelector::builder(area)
        .with_space(AreaSpace::FlippedUnit)
        .with_initial(Rect::new(1.2, 0.1, 0.2, 0.2))
        .build(&mut frame);
    assert!(matches!(result, Err(CanvasError::OutOfBounds { .. })));

    let size = Range::new(0.4, 1.4).expect("size");
    let hue = Range::new(0.3, 0.8).expect("hue");
    let result = AreaSelector::builder(area)
        .with_space(AreaSpace::Domain { x: size, y: hue })
        .with_initial(Rect::new(0.5, 0.9, 0.1, 0.1))
        .build(&mut frame);
    assert!(matches!(result, Err(CanvasError::OutOfBounds { value, .. }) if value == 0.9));

    let result = AreaSelector::builder(area)
        .with_config(AreaSelectorConfig::default().with_min_size(0.0))
        .build(&mut frame);
    assert!(matches!(result, Err(CanvasError::InvalidConfiguration(_))));
}

#[test]
fn domain_space_reports_data_units_and_readout() {
    let (area, mut frame) = plot();
    let size = Range::new(0.4, 1.4).expect("size");
    let hue = Range::new(0.3, 0.8).expect("hue");
    let mut selector = AreaSelector::builder(area)
        .with_space(AreaSpace::Domain { x: size, y: hue })
        .with_initial(Rect::new(0.5, 0.4, 0.5, 0.25))
        .build(&mut frame)
        .expect("selector");

    // x: 0.1 unit -> 20px, width 0.5 unit -> 100px; y top at 1 - (0.2 + 0.5).
    assert_rect_eq(selector.rect_px(), Rect::new(20.0, 60.0, 100.0, 100.0));

    let readout = SelectionReadout::from_rect(selector.rect(), size, hue);
    assert_relative_eq!(readout.x_from, 0.5, epsilon = 1e-9);
    assert_relative_eq!(readout.x_to, 1.0, epsilon = 1e-9);
    assert_relative_eq!(readout.y_from, 0.4, epsilon = 1e-9);
    assert_relative_eq!(readout.y_to, 0.65, epsilon = 1e-9);
    assert_relative_eq!(readout.area_percent, 25.0, epsilon = 1e-9);
    assert_eq!(readout.area_label(), "25.00%");

    selector
        .handle_event(&mut frame, PointerEvent::mouse(PointerPhase::Down, 30.0, 70.0))
        .expect("down");
    selector
        .handle_event(&mut frame, PointerEvent::mouse(PointerPhase::Move, 30.0, 170.0))
        .expect("move");
    // Moved down to the bottom edge: y in data units drops to the domain floor.
    assert_relative_eq!(selector.rect().y, 0.3, epsilon = 1e-9);
}
