use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("series has {x_len} x values but {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_width: Option<f64>,
}

impl PlotStyle {
    pub fn labelled(label: &str) -> PlotStyle {
        PlotStyle {
            label: Some(label.to_owned()),
            ..PlotStyle::default()
        }
    }

    pub fn with_color(mut self, color: &str) -> PlotStyle {
        self.color = Some(color.to_owned());
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> PlotStyle {
        self.line_width = Some(line_width);
        self
    }
}

/// Anything that can draw a 2-D line series.
pub trait PlotSurface {
    fn plot(&mut self, x: &[f64], y: &[f64], style: Option<&PlotStyle>) -> Result<(), PlotError>;
}
