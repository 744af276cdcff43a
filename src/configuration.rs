use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::distribution::distribution::{
    DEFAULT_DEGREE,
    Distribution
};
use crate::distribution::distributionerror::DistributionError;
use crate::math::grid::linspace;

pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error(transparent)]
    DistributionError(#[from] DistributionError),
}

fn default_degree() -> usize {
    DEFAULT_DEGREE
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_sample_count")]
    count: usize,
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            count: DEFAULT_SAMPLE_COUNT,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn new(count: usize, seed: Option<u64>) -> SamplingConfig {
        SamplingConfig { count, seed }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Seeded generator when a seed is configured, otherwise one seeded from the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// JSON description of a sampled density:
///
/// ```json
/// { "x": [0.0, 0.5, 1.0, 1.5], "y": [0.0, 1.0, 2.0, 1.0],
///   "degree": 3, "sampling": { "count": 500, "seed": 42 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default = "default_degree")]
    degree: usize,
    #[serde(default)]
    sampling: SamplingConfig,
}

impl DistributionConfig {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> DistributionConfig {
        DistributionConfig {
            x,
            y,
            degree: DEFAULT_DEGREE,
            sampling: SamplingConfig::default(),
        }
    }

    /// Density `2x` sampled at `num` evenly spaced points of `[0, 1]`.
    pub fn triangular(num: usize) -> DistributionConfig {
        let x = linspace(0.0, 1.0, num);
        let y = x.iter().map(|t| 2.0 * t).collect();
        DistributionConfig::new(x, y)
    }

    pub fn with_degree(mut self, degree: usize) -> DistributionConfig {
        self.degree = degree;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> DistributionConfig {
        self.sampling = sampling;
        self
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<DistributionConfig, ConfigurationError> {
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> Result<DistributionConfig, ConfigurationError> {
        let file = File::open(file_path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn build(&self) -> Result<Distribution, ConfigurationError> {
        let distribution = Distribution::with_degree(self.x.clone(), self.y.clone(), self.degree)?;
        Ok(distribution)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }
}
