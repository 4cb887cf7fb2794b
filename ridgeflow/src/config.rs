//! Construction parameters for orientation estimation.

use serde::{Deserialize, Serialize};

use crate::error::{OrientationError, Result};

/// Default block side, in pixels.
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Default bound below which doubled-angle moments count as zero.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// What one orientation cell covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One angle per pixel. Each pixel averages over the `block_size` square
    /// around it, clipped to the image.
    #[default]
    Pixel,
    /// One angle per non-overlapping block aligned to the image origin.
    /// Blocks in the last row and column are clipped to the image.
    Block,
}

/// 3×3 derivative operator used for gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientOperator {
    #[default]
    Sobel,
    /// Better rotational symmetry than Sobel at the same cost.
    Scharr,
}

/// Parameters for a field computation.
///
/// ```yaml
/// block_size: 16
/// granularity: pixel
/// epsilon: 1.0e-6
/// operator: sobel
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Side of the aggregation window, in pixels. Must be positive.
    pub block_size: usize,
    pub granularity: Granularity,
    /// A cell whose `|Gxx|` and `|Gxy|` are both at most this is undefined.
    /// The moments scale with the square of intensity, so the value depends on
    /// the input range.
    pub epsilon: f64,
    pub operator: GradientOperator,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            granularity: Granularity::default(),
            epsilon: DEFAULT_EPSILON,
            operator: GradientOperator::default(),
        }
    }
}

impl OrientationConfig {
    pub fn pixelwise(block_size: usize) -> Self {
        Self {
            block_size,
            granularity: Granularity::Pixel,
            ..Self::default()
        }
    }

    pub fn blockwise(block_size: usize) -> Self {
        Self {
            block_size,
            granularity: Granularity::Block,
            ..Self::default()
        }
    }

    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    pub fn with_operator(self, operator: GradientOperator) -> Self {
        Self { operator, ..self }
    }

    /// Parses and validates a YAML document. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(OrientationError::InvalidBlockSize {
                block_size: self.block_size,
            });
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(OrientationError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config_is_valid() {
        let config = OrientationConfig::default();
        assert_eq!(config.block_size, 16);
        assert_eq!(config.granularity, Granularity::Pixel);
        assert_eq!(config.operator, GradientOperator::Sobel);
        assert_eq!(config.epsilon, 1e-6);
        config.validate().unwrap();
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let err = OrientationConfig::blockwise(0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(
            err,
            OrientationError::InvalidBlockSize { block_size: 0 }
        ));
    }

    #[test]
    fn test_bad_epsilon_rejected() {
        for epsilon in [-1.0, f64::NAN, f64::INFINITY] {
            let err = OrientationConfig::default()
                .with_epsilon(epsilon)
                .validate()
                .unwrap_err();
            assert!(matches!(err, OrientationError::InvalidEpsilon { .. }));
        }
        OrientationConfig::default()
            .with_epsilon(0.0)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_yaml_partial_document_uses_defaults() {
        let config = OrientationConfig::from_yaml_str("block_size: 8\ngranularity: block\n").unwrap();
        assert_eq!(config.block_size, 8);
        assert_eq!(config.granularity, Granularity::Block);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.operator, GradientOperator::Sobel);
    }

    #[test]
    fn test_yaml_invalid_block_size_rejected() {
        let err = OrientationConfig::from_yaml_str("block_size: 0").unwrap_err();
        assert!(matches!(err, OrientationError::InvalidBlockSize { .. }));
    }

    #[test]
    fn test_yaml_negative_block_size_is_parse_error() {
        let err = OrientationConfig::from_yaml_str("block_size: -4").unwrap_err();
        assert!(matches!(err, OrientationError::Config(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_yaml_round_trip_preserves_operator() {
        let config = OrientationConfig::blockwise(12).with_operator(GradientOperator::Scharr);
        let yaml = config.to_yaml_string().unwrap();
        assert!(yaml.contains("scharr"), "{yaml}");
        assert_eq!(OrientationConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
