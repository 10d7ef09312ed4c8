/// C3D header block decoding.
use crate::c3d::processor::{Processor, take};
use crate::error::{Result, TransformError};
use constants::c3d_format::{BLOCK_SIZE, PARAMETER_KEY};

/// Fields of the first 512-byte block that locate and shape the point data.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// 1-based block number of the parameter section.
    pub parameter_block: u8,
    pub point_count: u16,
    /// Analog values stored per 3D frame (channels times samples).
    pub analog_per_frame: u16,
    pub first_frame: u16,
    pub last_frame: u16,
    pub max_interpolation_gap: u16,
    /// Negative when points are stored as floats.
    pub scale_factor: f32,
    /// 1-based block number of the data section.
    pub data_start: u16,
    pub analog_samples_per_frame: u16,
    pub frame_rate: f32,
}

impl Header {
    /// Parameter block number, readable before the processor type is known.
    pub fn parameter_block(bytes: &[u8]) -> Result<u8> {
        let [block, key] = take::<2>(bytes, 0, "header")?;
        if key != PARAMETER_KEY {
            return Err(TransformError::malformed(format!(
                "header key is 0x{key:02x}, expected 0x{PARAMETER_KEY:02x}"
            )));
        }
        if block == 0 {
            return Err(TransformError::malformed("parameter block number is zero"));
        }
        Ok(block)
    }

    pub fn parse(bytes: &[u8], processor: Processor) -> Result<Self> {
        if bytes.len() < BLOCK_SIZE {
            return Err(TransformError::truncated("header", BLOCK_SIZE, bytes.len()));
        }

        let word = |index: usize| -> Result<u16> {
            Ok(processor.read_u16(take::<2>(bytes, (index - 1) * 2, "header")?))
        };
        let float = |index: usize| -> Result<f32> {
            Ok(processor.read_f32(take::<4>(bytes, (index - 1) * 2, "header")?))
        };

        let header = Self {
            parameter_block: Self::parameter_block(bytes)?,
            point_count: word(2)?,
            analog_per_frame: word(3)?,
            first_frame: word(4)?,
            last_frame: word(5)?,
            max_interpolation_gap: word(6)?,
            scale_factor: float(7)?,
            data_start: word(9)?,
            analog_samples_per_frame: word(10)?,
            frame_rate: float(11)?,
        };

        if header.data_start == 0 {
            return Err(TransformError::malformed("data start block is zero"));
        }
        if header.scale_factor == 0.0 || !header.scale_factor.is_finite() {
            return Err(TransformError::malformed(format!(
                "point scale factor is {}",
                header.scale_factor
            )));
        }

        Ok(header)
    }

    /// Points are stored as IEEE/DEC floats rather than scaled integers.
    pub fn is_float(&self) -> bool {
        self.scale_factor < 0.0
    }

    /// Multiplier applied to integer point words.
    pub fn point_scale(&self) -> f64 {
        f64::from(self.scale_factor.abs())
    }

    /// Frame count declared by the header alone.
    pub fn frame_count(&self) -> usize {
        if self.last_frame < self.first_frame {
            0
        } else {
            usize::from(self.last_frame - self.first_frame) + 1
        }
    }

    pub fn data_offset(&self) -> usize {
        (usize::from(self.data_start) - 1) * BLOCK_SIZE
    }

    pub fn parameter_offset(&self) -> usize {
        (usize::from(self.parameter_block) - 1) * BLOCK_SIZE
    }
}
