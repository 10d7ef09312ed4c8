/// Summary of a transform run, optionally saved as JSON next to the output.
use crate::bounds::MarkerBounds;
use crate::c3d::Processor;
use crate::error::Result;
use crate::output::{report_path, write_replacing};
use crate::transform::TransformMode;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: TransformMode,
    /// Row vector times matrix, rows are input axes.
    pub matrix: [[f64; 3]; 3],
    pub processor: Processor,
    pub float_storage: bool,
    pub marker_count: usize,
    pub frame_count: usize,
    pub frame_rate: f32,
    /// Samples flagged invalid by the capture system.
    pub invalid_samples: usize,
    pub point_units: Option<String>,
    pub labels: Vec<String>,
    pub bounds_before: MarkerBounds,
    pub bounds_after: MarkerBounds,
    /// Size of the rotated marker cloud along x, y, z.
    pub extent_after: [f64; 3],
}

impl TransformReport {
    /// Save as pretty JSON beside the output file, returning the JSON path.
    pub fn save(&self) -> Result<PathBuf> {
        let path = report_path(&self.output)?;
        let json = serde_json::to_string_pretty(self)?;
        write_replacing(&path, json.as_bytes())?;
        Ok(path)
    }

    pub fn log_summary(&self) {
        log::info!(
            "{} -> {} ({}, {} markers x {} frames, {} invalid samples)",
            self.input.display(),
            self.output.display(),
            self.mode,
            self.marker_count,
            self.frame_count,
            self.invalid_samples
        );
    }
}
