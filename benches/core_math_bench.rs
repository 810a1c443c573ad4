use criterion::{Criterion, criterion_group, criterion_main};
use latent_canvas::config::presets;
use latent_canvas::core::{GridData, Point};
use latent_canvas::interaction::AreaSelector;
use latent_canvas::render::raster::gaussian_heatmap;
use latent_canvas::render::{GridStyle, RenderFrame, Surface, draw_grid};
use std::hint::black_box;

fn bench_scale_pair_round_trip(c: &mut Criterion) {
    let scales = presets::latent_plot().scales().expect("valid scales");

    c.bench_function("scale_pair_round_trip", |b| {
        b.iter(|| {
            let px = scales.to_pixel(black_box(Point::new(1.234, -2.345)));
            let _ = scales.to_domain(px);
        })
    });
}

fn bench_grid_mesh_10x10(c: &mut Criterion) {
    let config = presets::latent_plot();
    let scales = config.scales().expect("valid scales");
    let grid = GridData::uniform(presets::Z_RANGE, presets::Z_RANGE, presets::GRID_SIZE, presets::GRID_SIZE)
        .expect("valid grid");
    let mut frame = RenderFrame::new(config.viewport);

    c.bench_function("grid_mesh_10x10", |b| {
        b.iter(|| {
            frame.clear();
            draw_grid(&mut frame, scales, black_box(&grid), &GridStyle::default())
                .expect("grid should draw");
        })
    });
}

fn bench_area_selector_drag_100(c: &mut Criterion) {
    let config = presets::latent_plot();
    let area = config.plot_area().expect("valid area");
    let mut frame = RenderFrame::new(config.viewport);
    let mut selector = AreaSelector::builder(area)
        .build(&mut frame)
        .expect("valid selector");

    c.bench_function("area_selector_drag_100", |b| {
        b.iter(|| {
            let start = selector.rect_px();
            let grab = Point::new(start.x + 1.0, start.y + 1.0);
            selector.pointer_down(grab);
            for step in 0..100 {
                let offset = f64::from(step);
                selector
                    .pointer_move(&mut frame, Point::new(grab.x + offset, grab.y - offset))
                    .expect("move should succeed");
            }
            selector.pointer_up();
        })
    });
}

fn bench_gaussian_heatmap_256(c: &mut Criterion) {
    c.bench_function("gaussian_heatmap_256", |b| {
        b.iter(|| {
            let _ = gaussian_heatmap(black_box(256), black_box(256), 3.0)
                .expect("heatmap should build");
        })
    });
}

criterion_group!(
    benches,
    bench_scale_pair_round_trip,
    bench_grid_mesh_10x10,
    bench_area_selector_drag_100,
    bench_gaussian_heatmap_256
);
criterion_main!(benches);
