use approx::assert_relative_eq;
use latent_canvas::config::presets;
use latent_canvas::core::{AxisOrientation, Margins, Point, Range, Scale, ScalePair, Viewport};

fn latent_scales() -> ScalePair {
    presets::latent_plot().scales().expect("latent scales")
}

#[test]
fn latent_x_scale_matches_reference_pixels() {
    let scales = latent_scales();
    assert_relative_eq!(scales.x.to_pixel(0.0), 140.0);
    assert_relative_eq!(scales.x.to_pixel(-3.0), 40.0);
    assert_relative_eq!(scales.x.to_pixel(3.0), 240.0);
}

#[test]
fn y_scale_is_inverted() {
    let scales = latent_scales();
    assert_eq!(scales.y.orientation(), AxisOrientation::Descending);
    assert_relative_eq!(scales.y.to_pixel(3.0), 10.0);
    assert_relative_eq!(scales.y.to_pixel(-3.0), 210.0);
    assert_eq!(scales.y.pixel_endpoints(), (210.0, 10.0));
    assert_relative_eq!(scales.y.to_domain(10.0), 3.0);
}

#[test]
fn point_round_trip_through_pair() {
    let scales = latent_scales();
    let point = Point::new(1.25, -2.5);
    let back = scales.to_domain(scales.to_pixel(point));
    assert_relative_eq!(back.x, point.x, epsilon = 1e-12);
    assert_relative_eq!(back.y, point.y, epsilon = 1e-12);
}

#[test]
fn lengths_ignore_orientation() {
    let scales = latent_scales();
    assert_relative_eq!(scales.x.length_to_pixels(6.0), 200.0);
    assert_relative_eq!(scales.y.length_to_pixels(6.0), 200.0);
    assert_relative_eq!(scales.y.length_to_domain(100.0), 3.0);
}

#[test]
fn from_endpoints_detects_orientation() {
    let domain = Range::new(0.0, 1.0).expect("domain");
    let descending = Scale::from_endpoints(domain, 100.0, 0.0).expect("scale");
    assert_eq!(descending.orientation(), AxisOrientation::Descending);
    assert_relative_eq!(descending.to_pixel(0.25), 75.0);

    let ascending = Scale::from_endpoints(domain, 0.0, 100.0).expect("scale");
    assert_eq!(ascending.orientation(), AxisOrientation::Ascending);
    assert!(Scale::from_endpoints(domain, 5.0, 5.0).is_err());
}

#[test]
fn margins_that_swallow_the_viewport_are_rejected() {
    let z = Range::new(-3.0, 3.0).expect("z");
    let result = ScalePair::for_plot(Viewport::new(60, 60), Margins::uniform(30.0), z, z);
    assert!(result.is_err());
    assert!(ScalePair::for_plot(Viewport::new(0, 60), Margins::uniform(0.0), z, z).is_err());
}
