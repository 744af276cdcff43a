use rand::Rng;
use rand::distr;

use crate::distribution::distributionerror::{
    DistributionError,
    InvalidInput
};
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};
use crate::math::grid::linspace;
use crate::plot::plotsurface::{
    PlotError,
    PlotStyle,
    PlotSurface
};

pub const DEFAULT_DEGREE: usize = 3;

pub const PLOT_POINTS: usize = 200;

/// Probability distribution described by a sampled, non-negative density.
///
/// The density, its normalized cumulative sum and the inverse of that sum
/// are fitted once as interpolating splines and never change afterwards.
#[derive(Debug, Clone)]
pub struct Distribution {
    x: Vec<f64>,
    y: Vec<f64>,
    degree: usize,
    density: PiecewisePolynomial,
    cumulative: PiecewisePolynomial,
    inverse_cumulative: PiecewisePolynomial,
}

impl Distribution {
    /// Cubic fit of the density `y` sampled at `x`.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Distribution, DistributionError> {
        Self::with_degree(x, y, DEFAULT_DEGREE)
    }

    pub fn with_degree(
        x: Vec<f64>,
        y: Vec<f64>,
        degree: usize,
    ) -> Result<Distribution, DistributionError> {
        Self::validate(&x, &y, degree)?;
        let polynomial_type = PolynomialType::from_degree(degree)
            .ok_or(InvalidInput::UnsupportedDegree(degree))?;

        let density = PiecewisePolynomial::new(polynomial_type, Point2D::zip(&x, &y))
            .map_err(|e| DistributionError::curve_fit("density", e))?;

        let levels = normalized_cumulative_sum(&y)?;
        let cumulative = PiecewisePolynomial::new(polynomial_type, Point2D::zip(&x, &levels))
            .map_err(|e| DistributionError::curve_fit("cumulative", e))?;

        let (unique_levels, first_x) = first_occurrences(&levels, &x);
        if unique_levels.len() < levels.len() {
            tracing::warn!(
                "{} repeated cumulative levels collapsed before inverting",
                levels.len() - unique_levels.len()
            );
        }
        let inverse_cumulative = PiecewisePolynomial::new(
            polynomial_type,
            Point2D::zip(&unique_levels, &first_x),
        )
        .map_err(|e| DistributionError::curve_fit("inverse cumulative", e))?;

        if let Some(&t) = x.iter().find(|&&t| cumulative.derivative(t) < 0.0) {
            tracing::warn!("fitted cumulative curve decreases near x = {}", t);
        }

        tracing::debug!(
            "fitted degree {} distribution over [{}, {}] from {} samples",
            degree,
            x[0],
            x[x.len() - 1],
            x.len()
        );

        Ok(Distribution {
            x,
            y,
            degree,
            density,
            cumulative,
            inverse_cumulative,
        })
    }

    fn validate(x: &[f64], y: &[f64], degree: usize) -> Result<(), DistributionError> {
        if x.len() != y.len() {
            return Err(InvalidInput::LengthMismatch { x_len: x.len(), y_len: y.len() }.into());
        }
        if degree >= x.len() {
            return Err(DistributionError::InsufficientSamples {
                curve: "density",
                degree,
                required: degree.saturating_add(1),
                actual: x.len(),
            });
        }
        if let Some(i) = (0..x.len()).find(|&i| !x[i].is_finite() || !y[i].is_finite()) {
            return Err(InvalidInput::NonFinite(i).into());
        }
        if let Some(i) = (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
            return Err(InvalidInput::NotIncreasing(i).into());
        }
        if let Some(index) = y.iter().position(|&v| v < 0.0) {
            return Err(InvalidInput::NegativeDensity { index, value: y[index] }.into());
        }
        Ok(())
    }

    /// Density at `t`. Outside the sampled range the boundary polynomial is
    /// continued, so the result there is only an approximation.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.density.value(t)
    }

    pub fn evaluate_batch(&self, ts: &[f64]) -> Vec<f64> {
        self.density.values(ts)
    }

    pub fn cumulative(&self, t: f64) -> f64 {
        self.cumulative.value(t)
    }

    /// Percent-point function. Meaningful for `p` in `[0, 1]`.
    pub fn inverse_cumulative(&self, p: f64) -> f64 {
        self.inverse_cumulative.value(p)
    }

    /// Probability mass between `t1` and `t2`; negative when `t1 > t2`.
    pub fn probability(&self, t1: f64, t2: f64) -> f64 {
        self.cumulative(t2) - self.cumulative(t1)
    }

    /// Draws `count` values by inverse-transform sampling.
    ///
    /// The first inverse knot sits at `y[0] / Σy`. Draws below it are
    /// extrapolated, so when `y[0] > 0` samples can fall up to about one grid
    /// step left of `min_x()`.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count)
            .map(|_| self.inverse_cumulative(rng.random::<f64>()))
            .collect()
    }

    pub fn sample_with_default_rng(&self, count: usize) -> Vec<f64> {
        self.sample(count, &mut rand::rng())
    }

    /// Hands the density over [`PLOT_POINTS`] evenly spaced points to `surface`.
    pub fn plot(
        &self,
        surface: &mut dyn PlotSurface,
        style: Option<&PlotStyle>,
    ) -> Result<(), PlotError> {
        let ts = linspace(self.min_x(), self.max_x(), PLOT_POINTS);
        let values = self.evaluate_batch(&ts);
        surface.plot(&ts, &values, style)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn min_x(&self) -> f64 {
        self.x[0]
    }

    pub fn max_x(&self) -> f64 {
        self.x[self.x.len() - 1]
    }
}

impl distr::Distribution<f64> for Distribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_cumulative(rng.random::<f64>())
    }
}

/// Running sum of `y` divided by its total.
fn normalized_cumulative_sum(y: &[f64]) -> Result<Vec<f64>, DistributionError> {
    let mut running = 0.0;
    let mut levels: Vec<f64> = y
        .iter()
        .map(|&v| {
            running += v;
            running
        })
        .collect();

    let total = running;
    if total <= 0.0 {
        return Err(InvalidInput::ZeroTotal.into());
    }
    if !total.is_finite() {
        return Err(InvalidInput::NonFinite(y.len() - 1).into());
    }
    for level in levels.iter_mut() {
        *level /= total;
    }
    Ok(levels)
}

/// Distinct values of the non-decreasing `levels`, each paired with the `x`
/// of its first occurrence.
fn first_occurrences(levels: &[f64], x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut unique_levels: Vec<f64> = Vec::with_capacity(levels.len());
    let mut first_x: Vec<f64> = Vec::with_capacity(levels.len());
    for (&level, &t) in levels.iter().zip(x.iter()) {
        if unique_levels.last().is_some_and(|&prev| prev == level) {
            continue;
        }
        unique_levels.push(level);
        first_x.push(t);
    }
    (unique_levels, first_x)
}
