use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;
use crate::math::curve::curveerror::CurveError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Subpolynomial {
    coefs: Vec<f64>,
    deriv_coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    pub fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        let deriv_coefs = Self::compute_deriv_coefs(&coefs);
        Subpolynomial { coefs, deriv_coefs, lhs_x }
    }

    fn compute_deriv_coefs(coefs: &[f64]) -> Vec<f64> {
        let order = coefs.len() - 1;
        if order == 0 {
            vec![0.0]
        } else {
            (0..order)
                .map(|i| (order - i) as f64 * coefs[i])
                .collect()
        }
    }

    pub fn value(&self, x: f64) -> f64 {
        self.evaluate(&self.coefs, x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.evaluate(&self.deriv_coefs, x)
    }

    fn evaluate(&self, coefs: &[f64], x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Linear
// ─────────────────────────────────────────────

fn generate_linear_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    (0..(points.len() - 1))
        .map(|i| vec![
            Point2D::slope(&points[i], &points[i + 1]),
            points[i].y(),
        ])
        .collect()
}

// ─────────────────────────────────────────────
// Not-a-knot cubic spline
// ─────────────────────────────────────────────
//
// Solve for the second derivatives (moments) m[0..=n]. Interior rows come
// from C² continuity:
//   h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
//     = 6*( (y[i+1]-y[i])/h[i] - (y[i]-y[i-1])/h[i-1] )
// The boundary rows make the third derivative continuous at x[1] and x[n-1]:
//   -h[1]*m[0] + (h[0]+h[1])*m[1] - h[0]*m[2] = 0
//   -h[n-1]*m[n-2] + (h[n-2]+h[n-1])*m[n-1] - h[n-2]*m[n] = 0
// Both boundary rows are independent only with 3 or more intervals.

/// Per-segment cubic coefficients from the knot moments, stored as
/// [d, c, b, a] for S_i(x) = a + b*(x-x_i) + c*(x-x_i)^2 + d*(x-x_i)^3.
fn cubic_coefs_from_moments(points: &[Point2D], h: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let d = (m[i + 1] - m[i]) / (6.0 * h[i]);
            let c = m[i] / 2.0;
            let b = (points[i + 1].y() - points[i].y()) / h[i]
                  - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            let a = points[i].y();
            vec![d, c, b, a]
        })
        .collect()
}

fn build_interior_system(points: &[Point2D], h: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (
            (points[i + 1].y() - points[i].y()) / h[i]
          - (points[i].y()     - points[i - 1].y()) / h[i - 1]
        );
    }
    (mat, rhs)
}

fn generate_not_a_knot_cubic_coef_list(points: &[Point2D]) -> Result<Vec<Vec<f64>>, CurveError> {
    let n = points.len() - 1;
    let h: Vec<f64> = (0..n).map(|i| points[i + 1].x() - points[i].x()).collect();

    let (mut mat, rhs) = build_interior_system(points, &h);

    mat[(0, 0)] = -h[1];
    mat[(0, 1)] =  h[0] + h[1];
    mat[(0, 2)] = -h[0];

    mat[(n, n - 2)] = -h[n - 1];
    mat[(n, n - 1)] =  h[n - 2] + h[n - 1];
    mat[(n, n)]     = -h[n - 2];

    let m = mat
        .lu()
        .solve(&rhs)
        .ok_or(CurveError::SingularSystem)?;
    if m.iter().any(|moment| !moment.is_finite()) {
        return Err(CurveError::SingularSystem);
    }
    Ok(cubic_coefs_from_moments(points, &h, m.as_slice()))
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PolynomialType {
    Linear,
    /// Interpolating cubic spline with interior knots x[2..n-2]
    NotAKnotCubic,
}

impl PolynomialType {
    /// Maps a spline degree onto the matching interpolation scheme.
    pub fn from_degree(degree: usize) -> Option<PolynomialType> {
        match degree {
            1 => Some(PolynomialType::Linear),
            3 => Some(PolynomialType::NotAKnotCubic),
            _ => None,
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            PolynomialType::Linear        => 1,
            PolynomialType::NotAKnotCubic => 3,
        }
    }

    pub fn necessary_points(&self) -> usize {
        self.degree() + 1
    }
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

/// Interpolating piecewise polynomial over strictly increasing knots.
///
/// Queries left of the first knot or right of the last one continue the
/// boundary segment's polynomial.
#[derive(Debug, Clone)]
pub struct PiecewisePolynomial {
    max_x: f64,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    pub fn new(
        polynomial_type: PolynomialType,
        points: Vec<Point2D>,
    ) -> Result<PiecewisePolynomial, CurveError> {
        Self::validate(polynomial_type, &points)?;

        let coef_list = match polynomial_type {
            PolynomialType::Linear        => generate_linear_coef_list(&points),
            PolynomialType::NotAKnotCubic => generate_not_a_knot_cubic_coef_list(&points)?,
        };

        let subpolynomial_list = coef_list
            .into_iter()
            .zip(points.iter())
            .map(|(coefs, pt)| Subpolynomial::new(coefs, pt.x()))
            .collect();

        Ok(PiecewisePolynomial {
            subpolynomial_list,
            max_x: points[points.len() - 1].x(),
        })
    }

    fn validate(polynomial_type: PolynomialType, points: &[Point2D]) -> Result<(), CurveError> {
        let required = polynomial_type.necessary_points();
        if points.len() < required {
            return Err(CurveError::TooFewPoints {
                polynomial_type,
                required,
                actual: points.len(),
            });
        }
        if let Some(i) = points.iter().position(|pt| !pt.x().is_finite() || !pt.y().is_finite()) {
            return Err(CurveError::NonFinite(i));
        }
        if let Some(i) = (1..points.len()).find(|&i| points[i].x() <= points[i - 1].x()) {
            return Err(CurveError::NotSorted(i));
        }
        Ok(())
    }

    fn find_segment(&self, x: f64) -> usize {
        if x <= self.min_x() {
            0
        } else if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            // NaN fails every comparison and lands here with no segment to its left
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x)
                .saturating_sub(1)
        }
    }
}

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<Point2D> {
        let mut pts: Vec<Point2D> = self
            .subpolynomial_list
            .iter()
            .map(|s| Point2D::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        if let Some(last) = self.subpolynomial_list.last() {
            pts.push(Point2D::new(self.max_x, last.value(self.max_x)));
        }
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].derivative(x)
    }
}
