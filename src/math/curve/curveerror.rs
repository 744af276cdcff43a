use thiserror::Error;

use crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("{polynomial_type:?} interpolation needs at least {required} points, got {actual}")]
    TooFewPoints {
        polynomial_type: PolynomialType,
        required: usize,
        actual: usize,
    },

    #[error("x values must be strictly increasing (violated at index {0})")]
    NotSorted(usize),

    #[error("non-finite point at index {0}")]
    NonFinite(usize),

    #[error("spline moment system is singular")]
    SingularSystem,
}
