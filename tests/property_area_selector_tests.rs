use latent_canvas::config::AreaSelectorConfig;
use latent_canvas::core::{Margins, Point, Rect, Viewport};
use latent_canvas::interaction::{AreaSelector, AreaSpace, InteractionMode};
use latent_canvas::render::RenderFrame;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Gesture {
    Body { dx: f64, dy: f64 },
    Handle { dx: f64, dy: f64 },
}

fn gesture() -> impl Strategy<Value = Gesture> {
    let delta = -400.0f64..400.0;
    prop_oneof![
        (delta.clone(), delta.clone()).prop_map(|(dx, dy)| Gesture::Body { dx, dy }),
        (delta.clone(), delta).prop_map(|(dx, dy)| Gesture::Handle { dx, dy }),
    ]
}

const EPS: f64 = 1e-9;

proptest! {
    #[test]
    fn area_selector_stays_inside_plot_area(
        width in 100u32..600,
        height in 100u32..600,
        min_size in 1.0f64..30.0,
        gestures in proptest::collection::vec(gesture(), 1..24)
    ) {
        let viewport = Viewport::new(width, height);
        let area = Margins::new(10.0, 20.0, 15.0, 25.0)
            .plot_area(viewport)
            .expect("area");
        let mut frame = RenderFrame::new(viewport);
        let mut selector = AreaSelector::builder(area)
            .with_space(AreaSpace::Unit)
            .with_config(AreaSelectorConfig::default().with_min_size(min_size))
            .build(&mut frame)
            .expect("selector");

        for gesture in gestures {
            let rect = selector.rect_px();
            let (start, dx, dy, expected) = match gesture {
                Gesture::Body { dx, dy } => (
                    Point::new(rect.x + rect.width * 0.25, rect.y + rect.height * 0.25),
                    dx,
                    dy,
                    InteractionMode::Dragging,
                ),
                Gesture::Handle { dx, dy } => (
                    Point::new(rect.right() - 0.5, rect.bottom() - 0.5),
                    dx,
                    dy,
                    InteractionMode::Resizing,
                ),
            };
            let before = selector.rect_px();
            let mode = selector.pointer_down(start);
            if expected == InteractionMode::Resizing {
                prop_assert_eq!(mode, InteractionMode::Resizing);
            }
            selector
                .pointer_move(&mut frame, Point::new(start.x + dx, start.y + dy))
                .expect("move");
            prop_assert!(selector.pointer_up().is_some());

            let after = selector.rect_px();
            prop_assert!(after.x >= area.min_x - EPS);
            prop_assert!(after.y >= area.min_y - EPS);
            prop_assert!(after.right() <= area.max_x + EPS);
            prop_assert!(after.bottom() <= area.max_y + EPS);
            prop_assert!(after.width >= min_size - EPS);
            prop_assert!(after.height >= min_size - EPS);

            if mode == InteractionMode::Dragging {
                prop_assert!((after.width - before.width).abs() <= EPS);
                prop_assert!((after.height - before.height).abs() <= EPS);
            }

            let unit = selector.rect();
            prop_assert!((0.0..=1.0).contains(&unit.x));
            prop_assert!((0.0..=1.0).contains(&unit.y));
            prop_assert!(unit.x + unit.width <= 1.0 + EPS);
            prop_assert!(unit.y + unit.height <= 1.0 + EPS);
        }
    }
}

#[test]
fn rect_fields_are_unchanged_without_gestures() {
    let viewport = Viewport::new(200, 200);
    let area = Margins::uniform(0.0).plot_area(viewport).expect("area");
    let mut frame = RenderFrame::new(viewport);
    let selector = AreaSelector::builder(area)
        .with_initial(Rect::new(10.0, 10.0, 30.0, 30.0))
        .build(&mut frame)
        .expect("selector");
    assert_eq!(selector.rect(), Rect::new(10.0, 10.0, 30.0, 30.0));
}
