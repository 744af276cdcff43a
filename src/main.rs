use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use splinepdf::configuration::DistributionConfig;
use splinepdf::math::goodnessoffit::{
    kolmogorov_smirnov_critical_value,
    kolmogorov_smirnov_statistic
};
use splinepdf::plot::jsonplotsurface::JsonPlotSurface;
use splinepdf::plot::plotsurface::PlotStyle;

const KS_ALPHA: f64 = 0.01;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading distribution from {}", path);
            DistributionConfig::from_file(&path)?
        }
        None => {
            info!("No configuration given, using the triangular density on [0, 1]");
            DistributionConfig::triangular(10)
        }
    };

    let distribution = config.build()?;
    let (lo, hi) = (distribution.min_x(), distribution.max_x());
    let mid = 0.5 * (lo + hi);
    info!("density({}) = {:.6}", mid, distribution.evaluate(mid));
    info!("P({} <= X <= {}) = {:.6}", lo, hi, distribution.probability(lo, hi));

    let sampling = config.sampling();
    let samples = distribution.sample(sampling.count(), &mut sampling.rng());
    if let Some(d) = kolmogorov_smirnov_statistic(&samples, |t| distribution.cumulative(t)) {
        let critical = kolmogorov_smirnov_critical_value(samples.len(), KS_ALPHA);
        info!(
            "drew {} samples, KS statistic {:.4} (critical {:.4} at alpha {})",
            samples.len(),
            d,
            critical,
            KS_ALPHA
        );
    }

    let stdout = io::stdout();
    let mut surface = JsonPlotSurface::new(stdout.lock());
    distribution.plot(&mut surface, Some(&PlotStyle::labelled("density")))?;
    Ok(())
}
