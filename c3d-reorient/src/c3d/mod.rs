/// C3D acquisition reader and writer.

pub mod header;
pub mod parameters;
pub mod points;
pub mod processor;

use crate::error::{Result, TransformError};
use constants::c3d_format::{BLOCK_SIZE, SATURATED_FRAME};
pub use header::Header;
pub use parameters::{Parameter, ParameterData, Parameters};
pub use points::{Marker, PointLayout};
pub use processor::Processor;
use std::fs;
use std::path::Path;

/// One motion-capture recording held in memory. The complete file image is
/// kept next to its decoded form; saving re-encodes only marker coordinates
/// into it, so parameters, residuals, analog samples and trailing blocks are
/// written back unchanged.
#[derive(Debug, Clone)]
pub struct Acquisition {
    raw: Vec<u8>,
    processor: Processor,
    header: Header,
    parameters: Parameters,
    layout: PointLayout,
    markers: Vec<Marker>,
}

impl Acquisition {
    /// Load and decode a C3D file.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read(path).map_err(|e| TransformError::io(path, e))?;
        Self::from_bytes(raw)
    }

    /// Decode a C3D file image.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
        let parameter_block = Header::parameter_block(&raw)?;
        let parameter_offset = (usize::from(parameter_block) - 1) * BLOCK_SIZE;
        let [_, _, _, code] = processor::take::<4>(&raw, parameter_offset, "parameter section")?;
        let processor = Processor::from_code(code)?;

        let header = Header::parse(&raw, processor)?;
        let parameters = Parameters::parse(&raw, parameter_offset, processor)?;

        if let Some(used) = parameters.get("POINT", "USED").and_then(Parameter::first_number) {
            if used as usize != usize::from(header.point_count) {
                log::warn!(
                    "POINT:USED is {} but the header declares {} points; using the header",
                    used,
                    header.point_count
                );
            }
        }

        let layout = PointLayout::new(&header, frame_count(&header, &parameters));
        let markers = layout.decode(&raw, processor, &point_labels(&parameters))?;

        Ok(Self {
            raw,
            processor,
            header,
            parameters,
            layout,
            markers,
        })
    }

    /// Encode the current marker coordinates into a complete file image.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = self.raw.clone();
        self.layout.encode(&mut bytes, self.processor, &self.markers)?;
        Ok(bytes)
    }

    pub fn processor(&self) -> Processor {
        self.processor
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut [Marker] {
        &mut self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn frame_count(&self) -> usize {
        self.layout.frame_count
    }

    pub fn is_float(&self) -> bool {
        self.layout.is_float()
    }

    /// Length unit of the point data, `POINT:UNITS` when present.
    pub fn point_units(&self) -> Option<String> {
        self.parameters
            .get("POINT", "UNITS")
            .and_then(|p| p.strings().into_iter().next())
            .filter(|units| !units.is_empty())
    }
}

/// Header frame count, widened by `TRIAL:ACTUAL_*_FIELD` when the header saturates.
fn frame_count(header: &Header, parameters: &Parameters) -> usize {
    if header.last_frame != SATURATED_FRAME {
        return header.frame_count();
    }

    let field = |name: &str| -> Option<usize> {
        let words = parameters.get("TRIAL", name)?.numbers();
        let low = *words.first()? as i16 as u16;
        let high = words.get(1).map_or(0, |&w| w as i16 as u16);
        Some((usize::from(high) << 16) | usize::from(low))
    };

    match (field("ACTUAL_START_FIELD"), field("ACTUAL_END_FIELD")) {
        (Some(start), Some(end)) if end >= start => end - start + 1,
        _ => header.frame_count(),
    }
}

/// Marker labels from `POINT:LABELS` followed by `POINT:LABELS2`.
fn point_labels(parameters: &Parameters) -> Vec<String> {
    ["LABELS", "LABELS2"]
        .iter()
        .filter_map(|name| parameters.get("POINT", name))
        .flat_map(Parameter::strings)
        .collect()
}
