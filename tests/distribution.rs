use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use splinepdf::distribution::distribution::{
    Distribution,
    PLOT_POINTS
};
use splinepdf::distribution::distributionerror::{
    DistributionError,
    InvalidInput
};
use splinepdf::math::goodnessoffit::{
    kolmogorov_smirnov_critical_value,
    kolmogorov_smirnov_statistic
};
use splinepdf::math::grid::linspace;
use splinepdf::plot::jsonplotsurface::JsonPlotSurface;
use splinepdf::plot::plotsurface::{
    PlotError,
    PlotStyle,
    PlotSurface
};

fn triangular() -> Distribution {
    let x = linspace(0.0, 1.0, 10);
    let y = x.iter().map(|t| 2.0 * t).collect();
    Distribution::new(x, y).unwrap()
}

fn gaussian() -> Distribution {
    let x = linspace(-4.0, 4.0, 41);
    let y = x.iter().map(|t: &f64| (-t * t / 2.0).exp()).collect();
    Distribution::new(x, y).unwrap()
}

// ======================== Construction ========================

#[test]
fn triangular_scenario() {
    let pdf = triangular();
    assert!((pdf.evaluate(0.5) - 1.0).abs() < 1e-9);
    assert!((pdf.probability(0.0, 1.0) - 1.0).abs() < 1e-9);
}

#[test]
fn reproduces_samples_at_knots() {
    for pdf in [triangular(), gaussian()] {
        for (x, y) in pdf.x().iter().zip(pdf.y().iter()) {
            assert!((pdf.evaluate(*x) - y).abs() < 1e-9, "density at {x}");
        }
    }
}

#[test]
fn cumulative_ends_at_one() {
    let pdf = gaussian();
    assert!((pdf.cumulative(4.0) - 1.0).abs() < 1e-12);
    assert!((pdf.cumulative(0.0) - 0.54).abs() < 0.01);
}

#[test]
fn leading_mass_stays_in_first_level() {
    // the running sum starts at y[0] / total, so mass at the left edge is
    // not part of probability(min, max)
    let x = linspace(0.0, 1.0, 10);
    let pdf = Distribution::new(x, vec![1.0; 10]).unwrap();
    assert!((pdf.cumulative(0.0) - 0.1).abs() < 1e-12);
    assert!((pdf.probability(0.0, 1.0) - 0.9).abs() < 1e-12);
    assert!((pdf.evaluate(0.37) - 1.0).abs() < 1e-9);
}

#[test]
fn repeated_levels_keep_first_abscissa() {
    let x: Vec<f64> = (0..7).map(|i| i as f64).collect();
    let pdf = Distribution::new(x, vec![0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 1.0]).unwrap();
    assert!(pdf.inverse_cumulative(0.0).abs() < 1e-9);
    assert!((pdf.inverse_cumulative(1.0) - 6.0).abs() < 1e-9);
    assert!((pdf.probability(0.0, 6.0) - 1.0).abs() < 1e-12);
}

#[test]
fn nan_queries_yield_nan() {
    let pdf = triangular();
    assert!(pdf.evaluate(f64::NAN).is_nan());
    assert!(pdf.cumulative(f64::NAN).is_nan());
    assert!(pdf.inverse_cumulative(f64::NAN).is_nan());
    assert!(pdf.probability(0.0, f64::NAN).is_nan());
}

#[test]
fn leading_mass_extrapolates_below_domain() {
    // levels start at 0.1, so draws under it land left of x = 0
    let x = linspace(0.0, 1.0, 10);
    let pdf = Distribution::new(x, vec![1.0; 10]).unwrap();
    assert!((pdf.inverse_cumulative(0.0) - (-1.0 / 9.0)).abs() < 1e-9);
    let samples = pdf.sample(1000, &mut StdRng::seed_from_u64(1));
    let lowest = samples.iter().copied().fold(f64::INFINITY, f64::min);
    assert!(lowest < pdf.min_x());
    assert!(lowest >= pdf.min_x() - 1.0 / 9.0 - 1e-9);
}

#[test]
fn extrapolation_is_not_an_error() {
    let pdf = triangular();
    assert!((pdf.evaluate(1.5) - 3.0).abs() < 1e-6);
    assert!(pdf.evaluate(-0.25).is_finite());
}

// ======================== Errors ========================

#[test]
fn all_zero_density_is_rejected() {
    let x = linspace(0.0, 1.0, 6);
    let err = Distribution::new(x, vec![0.0; 6]).unwrap_err();
    assert_eq!(err, DistributionError::InvalidDistributionInput(InvalidInput::ZeroTotal));
}

#[test]
fn length_mismatch_is_rejected() {
    let err = Distribution::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0; 5]).unwrap_err();
    assert_eq!(
        err,
        DistributionError::InvalidDistributionInput(InvalidInput::LengthMismatch { x_len: 4, y_len: 5 })
    );
}

#[test]
fn unsorted_x_is_rejected() {
    let err = Distribution::new(vec![0.0, 1.0, 1.0, 2.0], vec![1.0; 4]).unwrap_err();
    assert_eq!(err, DistributionError::InvalidDistributionInput(InvalidInput::NotIncreasing(2)));
}

#[test]
fn negative_density_is_rejected() {
    let err = Distribution::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, -0.5, 1.0, 1.0]).unwrap_err();
    assert_eq!(
        err,
        DistributionError::InvalidDistributionInput(InvalidInput::NegativeDensity { index: 1, value: -0.5 })
    );
}

#[test]
fn non_finite_sample_is_rejected() {
    let err = Distribution::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, f64::INFINITY, 1.0, 1.0]).unwrap_err();
    assert_eq!(err, DistributionError::InvalidDistributionInput(InvalidInput::NonFinite(1)));
}

#[test]
fn non_finite_abscissa_is_rejected() {
    let err = Distribution::new(vec![0.0, 1.0, f64::NAN, 3.0], vec![1.0; 4]).unwrap_err();
    assert_eq!(err, DistributionError::InvalidDistributionInput(InvalidInput::NonFinite(2)));
}

#[test]
fn huge_degree_is_insufficient() {
    let err = Distribution::with_degree(vec![0.0, 1.0, 2.0, 3.0], vec![1.0; 4], usize::MAX).unwrap_err();
    assert_eq!(
        err,
        DistributionError::InsufficientSamples {
            curve: "density",
            degree: usize::MAX,
            required: usize::MAX,
            actual: 4,
        }
    );
}

#[test]
fn degree_above_sample_count_is_insufficient() {
    let err = Distribution::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 1.0]).unwrap_err();
    assert_eq!(
        err,
        DistributionError::InsufficientSamples { curve: "density", degree: 3, required: 4, actual: 3 }
    );
}

#[test]
fn unsupported_degree() {
    let x = linspace(0.0, 1.0, 8);
    let err = Distribution::with_degree(x, vec![1.0; 8], 2).unwrap_err();
    assert_eq!(err, DistributionError::InvalidDistributionInput(InvalidInput::UnsupportedDegree(2)));
}

#[test]
fn too_few_distinct_levels_for_inverse() {
    let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
    let err = Distribution::new(x, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap_err();
    assert_eq!(
        err,
        DistributionError::InsufficientSamples {
            curve: "inverse cumulative",
            degree: 3,
            required: 4,
            actual: 2,
        }
    );
}

#[test]
fn error_messages_name_the_problem() {
    let err = Distribution::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid distribution input: density sums to zero, cumulative normalization is undefined"
    );
}

// ======================== Sampling ========================

#[test]
fn sample_count_and_range() {
    let pdf = triangular();
    let mut rng = StdRng::seed_from_u64(2024);
    let samples = pdf.sample(1000, &mut rng);
    assert_eq!(samples.len(), 1000);
    let tolerance = 1e-6;
    assert!(samples
        .iter()
        .all(|&s| s >= pdf.min_x() - tolerance && s <= pdf.max_x() + tolerance));
}

#[test]
fn samples_follow_cumulative() {
    let pdf = triangular();
    let mut rng = StdRng::seed_from_u64(17);
    let samples = pdf.sample(1000, &mut rng);
    let d = kolmogorov_smirnov_statistic(&samples, |t| pdf.cumulative(t)).unwrap();
    assert!(d < kolmogorov_smirnov_critical_value(samples.len(), 0.001), "KS statistic {d}");
}

#[test]
fn seeded_sampling_is_reproducible() {
    let pdf = gaussian();
    let first = pdf.sample(50, &mut StdRng::seed_from_u64(3));
    let second = pdf.sample(50, &mut StdRng::seed_from_u64(3));
    assert_eq!(first, second);
    assert_eq!(pdf.sample_with_default_rng(25).len(), 25);
    assert!(pdf.sample(0, &mut StdRng::seed_from_u64(3)).is_empty());
}

#[test]
fn shared_across_threads() {
    let pdf = std::sync::Arc::new(gaussian());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pdf = std::sync::Arc::clone(&pdf);
            std::thread::spawn(move || pdf.sample(100, &mut StdRng::seed_from_u64(i)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 100);
    }
}

// ======================== Plotting ========================

struct RecordingSurface {
    series: Vec<(Vec<f64>, Vec<f64>, Option<PlotStyle>)>,
}

impl PlotSurface for RecordingSurface {
    fn plot(&mut self, x: &[f64], y: &[f64], style: Option<&PlotStyle>) -> Result<(), PlotError> {
        self.series.push((x.to_vec(), y.to_vec(), style.cloned()));
        Ok(())
    }
}

#[test]
fn plot_hands_density_to_surface() {
    let pdf = triangular();
    let mut surface = RecordingSurface { series: Vec::new() };
    pdf.plot(&mut surface, None).unwrap();

    let (xs, ys, style) = &surface.series[0];
    assert_eq!(xs.len(), PLOT_POINTS);
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[PLOT_POINTS - 1], 1.0);
    assert!(style.is_none());
    for (x, y) in xs.iter().zip(ys.iter()) {
        assert!((y - 2.0 * x).abs() < 1e-9);
    }
}

#[test]
fn plot_to_json() {
    let pdf = gaussian();
    let mut surface = JsonPlotSurface::new(Vec::new());
    pdf.plot(&mut surface, Some(&PlotStyle::labelled("gaussian").with_line_width(1.5))).unwrap();
    let text = String::from_utf8(surface.into_inner()).unwrap();
    let series: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(series["x"].as_array().unwrap().len(), PLOT_POINTS);
    assert_eq!(series["style"]["label"], "gaussian");
    assert_eq!(series["style"]["line_width"], 1.5);
}

// ======================== Laws ========================

proptest! {
    #[test]
    fn cumulative_is_monotone(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
        let pdf = triangular();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(pdf.cumulative(lo) <= pdf.cumulative(hi) + 1e-12);
    }

    #[test]
    fn probability_is_a_mass(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
        let pdf = triangular();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p = pdf.probability(lo, hi);
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&p), "probability {}", p);
    }

    #[test]
    fn inverse_round_trip(p in 0.01_f64..0.99) {
        let pdf = triangular();
        let back = pdf.cumulative(pdf.inverse_cumulative(p));
        prop_assert!((back - p).abs() < 5e-3, "p = {}, cdf(ppf(p)) = {}", p, back);
    }

    #[test]
    fn gaussian_round_trip(p in 0.01_f64..0.99) {
        let pdf = gaussian();
        let back = pdf.cumulative(pdf.inverse_cumulative(p));
        prop_assert!((back - p).abs() < 1e-3, "p = {}, cdf(ppf(p)) = {}", p, back);
    }
}
