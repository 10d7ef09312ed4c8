/// C3D files are addressed in 512-byte blocks.
pub const BLOCK_SIZE: usize = 512;

/// Second header byte and the parameter section signature.
pub const PARAMETER_KEY: u8 = 0x50;

/// Processor type codes stored in byte 3 of the parameter section.
pub const PROCESSOR_INTEL: u8 = 84;
pub const PROCESSOR_DEC: u8 = 85;
pub const PROCESSOR_MIPS: u8 = 86;

/// Header value of the last frame when the real count overflows 16 bits.
pub const SATURATED_FRAME: u16 = u16::MAX;

/// Parameter data type tags (element size in bytes, char is negative).
pub const TYPE_CHAR: i8 = -1;
pub const TYPE_BYTE: i8 = 1;
pub const TYPE_INT: i8 = 2;
pub const TYPE_FLOAT: i8 = 4;

/// Prefix given to the output file name when the input is not overwritten.
pub const MODIFIED_PREFIX: &str = "modified_";

/// Suffix of the JSON summary written next to the output.
pub const REPORT_SUFFIX: &str = "_transform.json";
