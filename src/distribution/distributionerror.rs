use thiserror::Error;

use crate::math::curve::curveerror::CurveError;

/// Why a set of samples cannot describe a distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("x must be strictly increasing (violated at index {0})")]
    NotIncreasing(usize),

    #[error("non-finite sample at index {0}")]
    NonFinite(usize),

    #[error("density must be non-negative, got {value} at index {index}")]
    NegativeDensity { index: usize, value: f64 },

    #[error("density sums to zero, cumulative normalization is undefined")]
    ZeroTotal,

    #[error("interpolation degree {0} is not supported (use 1 or 3)")]
    UnsupportedDegree(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("invalid distribution input: {0}")]
    InvalidDistributionInput(#[from] InvalidInput),

    #[error("insufficient samples for {curve}: degree {degree} needs {required} points, got {actual}")]
    InsufficientSamples {
        curve: &'static str,
        degree: usize,
        required: usize,
        actual: usize,
    },

    #[error("failed to fit {curve}: {source}")]
    CurveFit {
        curve: &'static str,
        source: CurveError,
    },
}

impl DistributionError {
    pub fn curve_fit(curve: &'static str, source: CurveError) -> DistributionError {
        match source {
            CurveError::TooFewPoints { polynomial_type, required, actual } => {
                DistributionError::InsufficientSamples {
                    curve,
                    degree: polynomial_type.degree(),
                    required,
                    actual,
                }
            }
            CurveError::NotSorted(index) => InvalidInput::NotIncreasing(index).into(),
            CurveError::NonFinite(index) => InvalidInput::NonFinite(index).into(),
            CurveError::SingularSystem => DistributionError::CurveFit { curve, source },
        }
    }
}
