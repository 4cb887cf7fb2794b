use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::*;
use crate::config::OrientationConfig;
use crate::error::ErrorKind;
use crate::estimator::OrientationEstimator;
use crate::synthetic;

fn field_of(image: &Grid2<f32>, config: OrientationConfig) -> OrientationField {
    OrientationEstimator::new(config)
        .unwrap()
        .compute(image)
        .unwrap()
}

fn ridges_50x37(config: OrientationConfig) -> OrientationField {
    field_of(&synthetic::parallel_ridges(50, 37, 1.1), config)
}

#[test]
fn test_query_outside_image_is_out_of_range() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    let err = field.orientation(50, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(matches!(
        err,
        OrientationError::OutOfRange {
            x: 50,
            y: 0,
            width: 50,
            height: 37
        }
    ));
    assert!(field.coherence(0, 37).is_err());

    // The field is still usable afterwards.
    assert!(field.orientation(49, 36).is_ok());
}

#[test]
fn test_block_cell_mapping() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    assert_eq!(field.cell_of(0, 0).unwrap(), (0, 0));
    assert_eq!(field.cell_of(15, 16).unwrap(), (0, 1));
    assert_eq!(field.cell_of(49, 36).unwrap(), (3, 2));
    assert_eq!(field.orientation(20, 20).unwrap(), field.cell(1, 1));
}

#[test]
fn test_pixel_cell_mapping_is_identity() {
    let field = ridges_50x37(OrientationConfig::pixelwise(8));
    assert_eq!(field.cell_of(17, 29).unwrap(), (17, 29));
    assert_eq!(field.orientation(17, 29).unwrap(), field.cell(17, 29));
}

#[test]
fn test_cell_outside_grid_is_none() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    assert_eq!(field.cell(4, 0), None);
    assert_eq!(field.cell(0, 3), None);
}

#[test]
fn test_queries_are_repeatable() {
    let field = ridges_50x37(OrientationConfig::pixelwise(8));
    for _ in 0..3 {
        assert_eq!(field.orientation(25, 18).unwrap(), field.orientation(25, 18).unwrap());
        assert_eq!(field.coherence(25, 18).unwrap(), field.coherence(25, 18).unwrap());
    }
}

#[test]
fn test_coherence_in_unit_interval() {
    let field = ridges_50x37(OrientationConfig::pixelwise(6));
    for &c in field.coherence_cells().iter() {
        assert!((0.0..=1.0).contains(&c));
    }
}

// ============================================================================
// Sample export
// ============================================================================

#[test]
fn test_sample_lattice_clamps_last_point() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    let samples = field.sample_vectors(16).unwrap();
    assert_eq!((samples.columns(), samples.rows()), (4, 3));
    assert_eq!(samples.len(), 12);

    let points: Vec<(usize, usize)> = samples.map(|s| (s.x, s.y)).collect();
    let xs: Vec<usize> = points[..4].iter().map(|p| p.0).collect();
    assert_eq!(xs, vec![8, 24, 40, 49]);
    let ys: Vec<usize> = points.iter().step_by(4).map(|p| p.1).collect();
    assert_eq!(ys, vec![8, 24, 36]);
}

#[test]
fn test_sample_positions_are_pixel_centers() {
    let field = ridges_50x37(OrientationConfig::pixelwise(8));
    for sample in field.sample_vectors(10).unwrap() {
        assert_eq!(
            sample.position,
            Vec2::new(sample.x as f32 + 0.5, sample.y as f32 + 0.5)
        );
        assert_eq!(sample.angle, field.orientation(sample.x, sample.y).unwrap());
    }
}

#[test]
fn test_sample_passes_restart() {
    let field = ridges_50x37(OrientationConfig::pixelwise(8));
    let first: Vec<VectorSample> = field.sample_vectors(7).unwrap().collect();
    let second: Vec<VectorSample> = field.sample_vectors(7).unwrap().collect();
    assert_eq!(first, second);

    let mut iter = field.sample_vectors(7).unwrap();
    iter.next();
    let rest = iter.clone();
    assert_eq!(rest.len(), first.len() - 1);
    assert_eq!(iter.collect::<Vec<_>>(), rest.collect::<Vec<_>>());
}

#[test]
fn test_exhausted_samples_stay_exhausted() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    let mut iter = field.sample_vectors(100).unwrap();
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn test_zero_step_rejected() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    let err = field.sample_vectors(0).unwrap_err();
    assert!(matches!(err, OrientationError::InvalidStep { step: 0 }));
}

#[test]
fn test_block_vectors_visit_every_block() {
    let field = ridges_50x37(OrientationConfig::blockwise(16));
    let samples: Vec<VectorSample> = field.block_vectors().collect();
    assert_eq!(samples.len(), field.width() * field.height());
    for (i, sample) in samples.iter().enumerate() {
        let (cx, cy) = (i % field.width(), i / field.width());
        assert_eq!(field.cell_of(sample.x, sample.y).unwrap(), (cx, cy));
        assert_eq!(sample.angle, field.cell(cx, cy));
    }
}

#[test]
fn test_sample_direction_follows_angle() {
    let field = field_of(
        &synthetic::vertical_ridges(32, 32, 8.0),
        OrientationConfig::blockwise(8),
    );
    let sample = field.block_vectors().nth(5).unwrap();
    let angle = sample.angle.unwrap();
    assert!((angle - FRAC_PI_2).abs() < 1e-6);
    let dir = sample.direction().unwrap();
    assert!(dir.x.abs() < 1e-6 && (dir.y.abs() - 1.0).abs() < 1e-6);
}

#[test]
fn test_flat_field_samples_are_undefined() {
    let field = field_of(&synthetic::uniform(20, 20, 5.0), OrientationConfig::pixelwise(4));
    assert!(
        field
            .sample_vectors(5)
            .unwrap()
            .all(|s| s.angle.is_none() && s.direction().is_none())
    );
}

// ============================================================================
// Summary statistics
// ============================================================================

#[test]
fn test_circular_variance_of_uniform_orientation() {
    let field = field_of(
        &synthetic::vertical_ridges(32, 32, 8.0),
        OrientationConfig::blockwise(8),
    );
    assert_eq!(field.defined_count(), 16);
    assert!(field.circular_variance().unwrap() < 1e-5);
}
