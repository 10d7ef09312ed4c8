/// Byte order and float encoding selected by the parameter section's processor byte.
use crate::error::{Result, TransformError};
use constants::c3d_format::{PROCESSOR_DEC, PROCESSOR_INTEL, PROCESSOR_MIPS};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Processor {
    /// Little-endian integers, IEEE floats.
    Intel,
    /// Little-endian integers, VAX F-floating floats.
    Dec,
    /// Big-endian integers, IEEE floats.
    Mips,
}

impl Processor {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            PROCESSOR_INTEL => Ok(Self::Intel),
            PROCESSOR_DEC => Ok(Self::Dec),
            PROCESSOR_MIPS => Ok(Self::Mips),
            other => Err(TransformError::UnsupportedProcessor(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Intel => PROCESSOR_INTEL,
            Self::Dec => PROCESSOR_DEC,
            Self::Mips => PROCESSOR_MIPS,
        }
    }

    pub fn read_i16(self, bytes: [u8; 2]) -> i16 {
        match self {
            Self::Mips => i16::from_be_bytes(bytes),
            _ => i16::from_le_bytes(bytes),
        }
    }

    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        self.read_i16(bytes) as u16
    }

    pub fn write_i16(self, value: i16) -> [u8; 2] {
        match self {
            Self::Mips => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        }
    }

    pub fn write_u16(self, value: u16) -> [u8; 2] {
        self.write_i16(value as i16)
    }

    /// Decode a 32-bit float. DEC floats are word-swapped and biased by two
    /// in the exponent relative to IEEE, hence the division by four.
    pub fn read_f32(self, bytes: [u8; 4]) -> f32 {
        match self {
            Self::Intel => f32::from_le_bytes(bytes),
            Self::Mips => f32::from_be_bytes(bytes),
            Self::Dec => f32::from_le_bytes([bytes[2], bytes[3], bytes[0], bytes[1]]) / 4.0,
        }
    }

    pub fn write_f32(self, value: f32) -> [u8; 4] {
        match self {
            Self::Intel => value.to_le_bytes(),
            Self::Mips => value.to_be_bytes(),
            Self::Dec => {
                let ieee = (value * 4.0).to_le_bytes();
                [ieee[2], ieee[3], ieee[0], ieee[1]]
            }
        }
    }
}

/// Copy `N` bytes starting at `offset`, failing when the buffer is too short.
pub(crate) fn take<const N: usize>(
    bytes: &[u8],
    offset: usize,
    section: &'static str,
) -> Result<[u8; N]> {
    bytes
        .get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| TransformError::truncated(section, offset + N, bytes.len()))
}
