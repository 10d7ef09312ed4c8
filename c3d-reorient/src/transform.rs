/// Transform modes and rotation of marker trajectories.
use crate::c3d::Marker;
use crate::error::{Result, TransformError};
use constants::coordinate_system::{Y_TO_X_ROTATION, Y_TO_Z_ROTATION, rotate_row};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Named lab-frame rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    /// Rotation about the vertical axis carrying Y onto X.
    #[default]
    YToX,
    /// Rotation about X turning Y-up into Z-up.
    YToZ,
}

impl TransformMode {
    pub const ALL: [TransformMode; 2] = [TransformMode::YToX, TransformMode::YToZ];

    pub fn name(self) -> &'static str {
        match self {
            Self::YToX => "y_to_x",
            Self::YToZ => "y_to_z",
        }
    }

    pub fn matrix(self) -> &'static [[f64; 3]; 3] {
        match self {
            Self::YToX => &Y_TO_X_ROTATION,
            Self::YToZ => &Y_TO_Z_ROTATION,
        }
    }

    /// Parse a mode name, substituting `y_to_x` for anything unrecognised.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!(
                "Unknown transform mode '{}', falling back to {}",
                name,
                Self::default()
            );
            Self::default()
        })
    }

    /// Rotate one coordinate row.
    pub fn apply(self, row: [f64; 3]) -> [f64; 3] {
        rotate_row(row, self.matrix())
    }
}

impl FromStr for TransformMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| TransformError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotate every frame of every marker in place, markers in parallel.
pub fn rotate_markers(markers: &mut [Marker], mode: TransformMode) {
    let pb = ProgressBar::new(markers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} markers ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message(format!("Applying {mode}"));

    markers.par_iter_mut().for_each(|marker| {
        for row in marker.coordinates.iter_mut() {
            *row = mode.apply(*row);
        }
        pb.inc(1);
    });

    pb.finish_with_message("Markers rotated");
}
