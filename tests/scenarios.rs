//! End-to-end checks of the CPU half of the pipeline: dataset to scales to
//! matrices to sprite geometry.

use glam::{DMat4, DVec2};
use oxidescatter::data::{Axis, Dataset};
use oxidescatter::render::sprite::{expand_instance, sprite_size};
use oxidescatter::render::{PlotLayout, Viewport, ZoomState};
use oxidescatter::PlotError;

const EPS: f64 = 1e-9;

fn diagonal() -> Dataset {
    Dataset::new(vec![-1.0, 0.0, 1.0], vec![-1.0, 0.0, 1.0]).unwrap()
}

fn layout(dataset: &Dataset, width: f64, height: f64) -> PlotLayout {
    PlotLayout::compute(dataset, Viewport::new(width, height, 1.0).unwrap()).unwrap()
}

#[test]
fn square_viewport_centers_origin() {
    let layout = layout(&diagonal(), 600.0, 600.0);
    assert_eq!(layout.scales.x.domain(), [-1.0, 1.0]);
    assert_eq!(layout.scales.x.range(), [0.0, 600.0]);
    assert_eq!(layout.scales.y.range(), [0.0, 600.0]);

    let pixel = layout.transforms.data_to_pixel_point(DVec2::ZERO);
    assert!((pixel - DVec2::new(300.0, 300.0)).length() < EPS);

    let clip = layout
        .transforms
        .data_to_clip(DVec2::ZERO, &ZoomState::IDENTITY.matrix());
    assert!(clip.length() < EPS);
}

#[test]
fn wide_viewport_buffers_the_long_axis() {
    let layout = layout(&diagonal(), 800.0, 600.0);
    assert_eq!(layout.scales.x.range(), [100.0, 700.0]);
    assert_eq!(layout.scales.y.range(), [0.0, 600.0]);

    let max = layout.transforms.data_to_pixel_point(DVec2::new(1.0, 1.0));
    assert!((max.x - 700.0).abs() < EPS);
    let min = layout.transforms.data_to_pixel_point(DVec2::new(-1.0, -1.0));
    assert!((min.x - 100.0).abs() < EPS);
}

#[test]
fn equal_x_values_fail_before_any_gpu_work() {
    let flat = Dataset::new(vec![2.5; 4], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    let err = PlotLayout::compute(&flat, Viewport::new(600.0, 600.0, 1.0).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        PlotError::InvalidDomain {
            axis: Axis::X,
            value
        } if value == 2.5
    ));
}

#[test]
fn identity_zoom_leaves_clip_positions_alone() {
    let layout = layout(&diagonal(), 800.0, 600.0);
    for point in [DVec2::new(-1.0, -1.0), DVec2::ZERO, DVec2::new(1.0, 1.0)] {
        let with_zoom = layout
            .transforms
            .data_to_clip(point, &ZoomState::IDENTITY.matrix());
        let without = layout.transforms.data_to_clip(point, &DMat4::IDENTITY);
        assert!((with_zoom - without).length() < EPS);
    }
}

#[test]
fn zooming_in_four_times_doubles_the_sprite() {
    let base = sprite_size(1.0, 1000.0);
    assert!((sprite_size(4.0, 1000.0) - 2.0 * base).abs() < EPS);
    assert!((sprite_size(16.0, 1000.0) - 4.0 * base).abs() < EPS);
}

#[test]
fn expanded_sprite_stays_centered_on_its_point() {
    let layout = layout(&diagonal(), 600.0, 600.0);
    let zoom = ZoomState::new(4.0, 0.0, 0.0).matrix();
    let combined = layout.transforms.combined(&zoom);
    let corners = expand_instance(DVec2::ZERO, &zoom, &combined, 1000.0);
    let center = corners.iter().fold(DVec2::ZERO, |acc, c| acc + c.truncate().truncate())
        / corners.len() as f64;
    let expected = layout.transforms.data_to_clip(DVec2::ZERO, &zoom);
    assert!((center - expected).length() < 1e-6);
}
