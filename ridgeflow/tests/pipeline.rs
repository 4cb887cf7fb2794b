//! End-to-end runs through the public API and the collaborator seams.

use std::convert::Infallible;

use ridgeflow::angle::axial_distance;
use ridgeflow::prelude::*;
use ridgeflow::{ErrorKind, GradientOperator, Grid2, synthetic};

fn ridges_u8(width: usize, height: usize) -> Grid2<u8> {
    synthetic::parallel_ridges(width, height, 0.9).map(|&v| v.round().clamp(0.0, 255.0) as u8)
}

#[test]
fn test_closure_source_into_collecting_sink() -> anyhow::Result<()> {
    let source = || -> std::result::Result<Grid2<f32>, Infallible> { Ok(synthetic::vertical_ridges(40, 40, 8.0)) };
    let image = source.acquire()?;

    let field = OrientationEstimator::new(OrientationConfig::blockwise(10))?.compute(&image)?;
    let mut sink: Vec<VectorSample> = Vec::new();
    sink.render(&image, field.block_vectors())?;

    assert_eq!(sink.len(), 16);
    for sample in &sink {
        let angle = sample.angle.expect("textured block");
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn test_strided_view_matches_packed_grid() -> anyhow::Result<()> {
    let (width, height, stride) = (30, 20, 32);
    let packed = ridges_u8(width, height);
    let mut buffer = vec![0u8; stride * height];
    for y in 0..height {
        buffer[y * stride..y * stride + width].copy_from_slice(packed.row(y));
    }
    let view = GrayView::new(width, height, stride, &buffer)?;

    let estimator = OrientationEstimator::new(OrientationConfig::pixelwise(6))?;
    let a = estimator.compute(&packed)?;
    let b = estimator.compute(&view)?;
    for y in 0..height {
        for x in 0..width {
            assert_eq!(a.orientation(x, y)?, b.orientation(x, y)?);
        }
    }
    Ok(())
}

#[test]
fn test_yaml_config_drives_estimator() -> anyhow::Result<()> {
    let config = OrientationConfig::from_yaml_str("block_size: 8\ngranularity: block\n")?;
    assert_eq!(config.granularity, Granularity::Block);

    let field = OrientationEstimator::new(config)?.compute(&ridges_u8(33, 24))?;
    assert_eq!((field.width(), field.height()), (5, 3));
    Ok(())
}

#[test]
fn test_invalid_yaml_config_is_invalid_argument() {
    let err = OrientationConfig::from_yaml_str("block_size: 0\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_scharr_and_sobel_agree_on_interior() -> anyhow::Result<()> {
    let image = synthetic::parallel_ridges(64, 64, 1.2);
    let sobel = OrientationEstimator::new(OrientationConfig::pixelwise(16))?.compute(&image)?;
    let scharr = OrientationEstimator::new(
        OrientationConfig::pixelwise(16).with_operator(GradientOperator::Scharr),
    )?
    .compute(&image)?;

    for y in (16..48).step_by(5) {
        for x in (16..48).step_by(5) {
            let a = sobel.orientation(x, y)?.expect("textured pixel");
            let b = scharr.orientation(x, y)?.expect("textured pixel");
            assert!(axial_distance(a, 1.2) < 0.05);
            assert!(axial_distance(a, b) < 0.05);
        }
    }
    Ok(())
}

#[test]
fn test_out_of_range_query_keeps_field_usable() -> anyhow::Result<()> {
    let field = OrientationEstimator::new(OrientationConfig::default())?.compute(&ridges_u8(20, 20))?;
    let err = field.orientation(20, 20).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(matches!(err, OrientationError::OutOfRange { .. }));
    assert!(field.orientation(19, 19).is_ok());
    Ok(())
}
