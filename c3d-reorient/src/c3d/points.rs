/// Point data section layout and coordinate codec.
use crate::c3d::header::Header;
use crate::c3d::processor::{Processor, take};
use crate::error::{Result, TransformError};

/// One marker trajectory with a residual per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub coordinates: Vec<[f64; 3]>,
    /// Negative for samples the capture system flagged as invalid.
    pub residuals: Vec<f64>,
}

impl Marker {
    pub fn frame_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_valid(&self, frame: usize) -> bool {
        self.residuals.get(frame).is_some_and(|&r| r >= 0.0)
    }
}

/// Byte geometry of the data section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLayout {
    pub offset: usize,
    pub point_count: usize,
    pub frame_count: usize,
    /// Bytes per stored value (4 for floats, 2 for integers).
    pub word_size: usize,
    pub frame_size: usize,
    pub scale: f64,
}

impl PointLayout {
    pub fn new(header: &Header, frame_count: usize) -> Self {
        let word_size = if header.is_float() { 4 } else { 2 };
        let point_count = usize::from(header.point_count);
        let frame_size = (point_count * 4 + usize::from(header.analog_per_frame)) * word_size;

        Self {
            offset: header.data_offset(),
            point_count,
            frame_count,
            word_size,
            frame_size,
            scale: header.point_scale(),
        }
    }

    pub fn is_float(&self) -> bool {
        self.word_size == 4
    }

    pub fn end(&self) -> usize {
        self.offset + self.frame_size * self.frame_count
    }

    /// Byte offset of the first word (X) of `point` in `frame`.
    fn position(&self, point: usize, frame: usize) -> usize {
        self.offset + frame * self.frame_size + point * 4 * self.word_size
    }

    fn read_value(&self, bytes: &[u8], at: usize, processor: Processor) -> Result<f64> {
        if self.is_float() {
            Ok(f64::from(processor.read_f32(take::<4>(bytes, at, "data section")?)))
        } else {
            Ok(f64::from(processor.read_i16(take::<2>(bytes, at, "data section")?)) * self.scale)
        }
    }

    /// Residual in file units; -1 marks an invalid sample.
    fn read_residual(&self, bytes: &[u8], at: usize, processor: Processor) -> Result<f64> {
        let word = if self.is_float() {
            processor.read_f32(take::<4>(bytes, at, "data section")?) as i32 as i16
        } else {
            processor.read_i16(take::<2>(bytes, at, "data section")?)
        };

        if word < 0 {
            Ok(-1.0)
        } else {
            Ok(f64::from(word & 0x00ff) * self.scale)
        }
    }

    /// Decode every marker trajectory.
    pub fn decode(
        &self,
        bytes: &[u8],
        processor: Processor,
        labels: &[String],
    ) -> Result<Vec<Marker>> {
        if self.end() > bytes.len() {
            return Err(TransformError::truncated("data section", self.end(), bytes.len()));
        }

        (0..self.point_count)
            .map(|point| {
                let mut coordinates = Vec::with_capacity(self.frame_count);
                let mut residuals = Vec::with_capacity(self.frame_count);

                for frame in 0..self.frame_count {
                    let at = self.position(point, frame);
                    let mut xyz = [0.0; 3];
                    for (axis, value) in xyz.iter_mut().enumerate() {
                        *value = self.read_value(bytes, at + axis * self.word_size, processor)?;
                    }
                    coordinates.push(xyz);
                    residuals.push(self.read_residual(bytes, at + 3 * self.word_size, processor)?);
                }

                let label = labels
                    .get(point)
                    .filter(|l| !l.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("uname*{}", point + 1));

                Ok(Marker {
                    label,
                    coordinates,
                    residuals,
                })
            })
            .collect()
    }

    /// Write marker coordinates back in place. Residual words and analog
    /// samples are left untouched.
    pub fn encode(&self, bytes: &mut [u8], processor: Processor, markers: &[Marker]) -> Result<()> {
        if self.end() > bytes.len() {
            return Err(TransformError::truncated("data section", self.end(), bytes.len()));
        }
        if markers.len() != self.point_count {
            return Err(TransformError::malformed(format!(
                "{} markers cannot fill {} point slots",
                markers.len(),
                self.point_count
            )));
        }

        for (point, marker) in markers.iter().enumerate() {
            if marker.frame_count() != self.frame_count {
                return Err(TransformError::malformed(format!(
                    "marker '{}' has {} frames, file holds {}",
                    marker.label,
                    marker.frame_count(),
                    self.frame_count
                )));
            }

            for (frame, xyz) in marker.coordinates.iter().enumerate() {
                let at = self.position(point, frame);
                for (axis, &value) in xyz.iter().enumerate() {
                    let start = at + axis * self.word_size;
                    if self.is_float() {
                        bytes[start..start + 4].copy_from_slice(&processor.write_f32(value as f32));
                    } else {
                        let word = self.quantize(value, point, frame)?;
                        bytes[start..start + 2].copy_from_slice(&processor.write_i16(word));
                    }
                }
            }
        }

        Ok(())
    }

    fn quantize(&self, value: f64, marker: usize, frame: usize) -> Result<i16> {
        let scaled = (value / self.scale).round();

        if scaled < f64::from(i16::MIN) || scaled > f64::from(i16::MAX) || scaled.is_nan() {
            return Err(TransformError::ValueOutOfRange {
                marker,
                frame,
                value,
            });
        }
        Ok(scaled as i16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(float: bool) -> PointLayout {
        let word_size = if float { 4 } else { 2 };
        PointLayout {
            offset: 0,
            point_count: 1,
            frame_count: 2,
            word_size,
            frame_size: 4 * word_size,
            scale: 0.5,
        }
    }

    fn marker(coordinates: Vec<[f64; 3]>) -> Marker {
        Marker {
            label: "LASI".to_string(),
            residuals: vec![0.0; coordinates.len()],
            coordinates,
        }
    }

    #[test]
    fn integer_storage_applies_scale() {
        let layout = layout(false);
        let mut bytes = vec![0u8; layout.end()];
        let original = marker(vec![[1.0, -2.5, 100.0], [0.0, 0.5, -0.5]]);

        layout.encode(&mut bytes, Processor::Intel, &[original.clone()]).unwrap();
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), 2);

        let decoded = layout.decode(&bytes, Processor::Intel, &[]).unwrap();
        assert_eq!(decoded[0].coordinates, original.coordinates);
        assert_eq!(decoded[0].label, "uname*1");
    }

    #[test]
    fn encode_leaves_residual_word() {
        let layout = layout(true);
        let mut bytes = vec![0u8; layout.end()];
        bytes[12..16].copy_from_slice(&(-1.0f32).to_be_bytes());

        layout
            .encode(&mut bytes, Processor::Mips, &[marker(vec![[1.0, 2.0, 3.0]; 2])])
            .unwrap();

        assert_eq!(&bytes[12..16], &(-1.0f32).to_be_bytes());
        let decoded = layout.decode(&bytes, Processor::Mips, &["RASI".to_string()]).unwrap();
        assert!(!decoded[0].is_valid(0));
        assert!(decoded[0].is_valid(1));
        assert_eq!(decoded[0].label, "RASI");
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let layout = layout(false);
        let mut bytes = vec![0u8; layout.end()];
        let err = layout
            .encode(&mut bytes, Processor::Intel, &[marker(vec![[20_000.0, 0.0, 0.0]; 2])])
            .unwrap_err();
        assert!(matches!(err, TransformError::ValueOutOfRange { marker: 0, frame: 0, .. }));
    }

    #[test]
    fn short_data_section_is_truncated() {
        let layout = layout(true);
        let bytes = vec![0u8; layout.end() - 1];
        assert!(matches!(
            layout.decode(&bytes, Processor::Intel, &[]),
            Err(TransformError::Truncated { .. })
        ));
    }
}
