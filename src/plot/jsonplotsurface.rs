use std::io::Write;

use serde::Serialize;

use crate::plot::plotsurface::{
    PlotError,
    PlotStyle,
    PlotSurface
};

#[derive(Serialize)]
struct PlotSeries<'a> {
    x: &'a [f64],
    y: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a PlotStyle>,
}

/// Writes every series as one JSON object per line, ready for an external
/// renderer.
pub struct JsonPlotSurface<W: Write> {
    writer: W,
    series_count: usize,
}

impl<W: Write> JsonPlotSurface<W> {
    pub fn new(writer: W) -> JsonPlotSurface<W> {
        JsonPlotSurface { writer, series_count: 0 }
    }

    pub fn series_count(&self) -> usize {
        self.series_count
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlotSurface for JsonPlotSurface<W> {
    fn plot(&mut self, x: &[f64], y: &[f64], style: Option<&PlotStyle>) -> Result<(), PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        let series = PlotSeries { x, y, style };
        serde_json::to_writer(&mut self.writer, &series)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.series_count += 1;
        Ok(())
    }
}
