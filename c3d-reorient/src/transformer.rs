/// Coordinate transformer orchestrating read, rotate and write of one acquisition.
use crate::bounds::MarkerBounds;
use crate::c3d::Acquisition;
use crate::error::Result;
use crate::output::{resolve_output_path, write_replacing};
use crate::report::TransformReport;
use crate::transform::{TransformMode, rotate_markers};
use std::path::{Path, PathBuf};

/// Rotates the marker trajectories of a single C3D file.
pub struct CoordinateTransformer {
    /// Acquisition file to read.
    input_path: PathBuf,
    mode: TransformMode,
    /// Write back to the input instead of a `modified_` sibling.
    overwrite: bool,
    /// Save a JSON summary next to the output.
    save_report: bool,
}

impl CoordinateTransformer {
    pub fn new(input_path: impl AsRef<Path>, mode: TransformMode, overwrite: bool) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            mode,
            overwrite,
            save_report: false,
        }
    }

    pub fn with_report(mut self, save_report: bool) -> Self {
        self.save_report = save_report;
        self
    }

    /// Where the transformed acquisition will be written.
    pub fn output_path(&self) -> Result<PathBuf> {
        resolve_output_path(&self.input_path, self.overwrite)
    }

    /// Executes the transform and writes the result.
    pub fn run(&self) -> Result<TransformReport> {
        let output_path = self.output_path()?;
        log::info!(
            "Transforming {} with {}",
            self.input_path.display(),
            self.mode
        );

        let mut acquisition = Acquisition::read(&self.input_path)?;
        self.log_file_info(&acquisition);

        let bounds_before = MarkerBounds::from_markers(acquisition.markers());
        self.log_bounds("Input bounds", &bounds_before);

        rotate_markers(acquisition.markers_mut(), self.mode);

        let bounds_after = MarkerBounds::from_markers(acquisition.markers());
        self.log_bounds("Transformed bounds", &bounds_after);

        write_replacing(&output_path, &acquisition.to_bytes()?)?;
        log::info!("Saved {}", output_path.display());

        let report = TransformReport {
            input: self.input_path.clone(),
            output: output_path,
            mode: self.mode,
            matrix: *self.mode.matrix(),
            processor: acquisition.processor(),
            float_storage: acquisition.is_float(),
            marker_count: acquisition.marker_count(),
            frame_count: acquisition.frame_count(),
            frame_rate: acquisition.header().frame_rate,
            invalid_samples: count_invalid(&acquisition),
            point_units: acquisition.point_units(),
            labels: acquisition.markers().iter().map(|m| m.label.clone()).collect(),
            bounds_before,
            extent_after: bounds_after.extent(),
            bounds_after,
        };

        if self.save_report {
            let path = report.save()?;
            log::info!("Saved {}", path.display());
        }

        report.log_summary();
        Ok(report)
    }

    fn log_file_info(&self, acquisition: &Acquisition) {
        let header = acquisition.header();
        log::info!("C3D file information:");
        log::info!("  Processor: {:?}", acquisition.processor());
        log::info!("  Markers: {}", acquisition.marker_count());
        log::info!(
            "  Frames: {} (first {}, {} Hz)",
            acquisition.frame_count(),
            header.first_frame,
            header.frame_rate
        );
        log::info!(
            "  Storage: {} (scale {})",
            if acquisition.is_float() { "float" } else { "integer" },
            header.scale_factor
        );
        if let Some(units) = acquisition.point_units() {
            log::info!("  Units: {}", units);
        }
        log::debug!(
            "  Analog values per frame: {}",
            header.analog_per_frame
        );
    }

    fn log_bounds(&self, title: &str, bounds: &MarkerBounds) {
        if bounds.is_empty() {
            log::info!("{}: no valid samples", title);
            return;
        }
        log::info!("{}:", title);
        for (axis, name) in ["X", "Y", "Z"].iter().enumerate() {
            log::info!("  {}: {:.2} to {:.2}", name, bounds.min[axis], bounds.max[axis]);
        }
    }
}

fn count_invalid(acquisition: &Acquisition) -> usize {
    acquisition
        .markers()
        .iter()
        .map(|m| m.residuals.iter().filter(|&&r| r < 0.0).count())
        .sum()
}

/// Rotate the markers of `path` and write the result, returning the output path.
/// With `overwrite` the input file is replaced, otherwise the output is the
/// input's file name prefixed with `modified_` in the same directory.
pub fn transform(path: impl AsRef<Path>, mode: TransformMode, overwrite: bool) -> Result<PathBuf> {
    Ok(CoordinateTransformer::new(path, mode, overwrite).run()?.output)
}
