/// Axis-aligned box around the valid marker samples of an acquisition.
use crate::c3d::Marker;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerBounds {
    /// Smallest x, y, z seen.
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for MarkerBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl MarkerBounds {
    /// Inverted box that any sample widens.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    /// Bounds over the valid samples of all markers.
    pub fn from_markers(markers: &[Marker]) -> Self {
        markers
            .par_iter()
            .map(|marker| {
                marker
                    .coordinates
                    .iter()
                    .enumerate()
                    .filter(|&(frame, _)| marker.is_valid(frame))
                    .fold(Self::empty(), |mut bounds, (_, &sample)| {
                        bounds.include(sample);
                        bounds
                    })
            })
            .reduce_with(Self::merge)
            .unwrap_or_default()
    }

    pub fn include(&mut self, sample: [f64; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(sample[axis]);
            self.max[axis] = self.max[axis].max(sample[axis]);
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(other.min[axis]);
            self.max[axis] = self.max[axis].max(other.max[axis]);
        }
        self
    }

    /// No valid sample has been seen.
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0]
    }

    /// Size along x, y, z; zero when empty.
    pub fn extent(&self) -> [f64; 3] {
        if self.is_empty() {
            return [0.0; 3];
        }
        [0, 1, 2].map(|axis| self.max[axis] - self.min[axis])
    }
}
