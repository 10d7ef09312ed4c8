/// Error types for reading, rotating and writing C3D acquisitions.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for coordinate transform runs.
#[derive(Error, Debug)]
pub enum TransformError {
    /// File system access failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section of the file is shorter than its declared size.
    #[error("Truncated {section}: need {needed} bytes, file has {available}")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    /// The file structure is inconsistent.
    #[error("Malformed C3D file: {0}")]
    Malformed(String),

    /// Processor type byte is not Intel, DEC or MIPS.
    #[error("Unsupported processor type {0} (expected 84, 85 or 86)")]
    UnsupportedProcessor(u8),

    /// Transform mode name is not recognised.
    #[error("Unknown transform mode '{0}' (expected y_to_x or y_to_z)")]
    UnknownMode(String),

    /// A rotated coordinate no longer fits the file's integer storage.
    #[error("Marker {marker} frame {frame}: value {value} does not fit integer point storage")]
    ValueOutOfRange {
        marker: usize,
        frame: usize,
        value: f64,
    },

    /// Path cannot be used to derive an output file.
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Report serialization failed.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),

    /// Command line could not be parsed.
    #[error("{0}")]
    Usage(String),
}

/// Result type alias for coordinate transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    /// Create an I/O error bound to the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a truncation error.
    #[must_use]
    pub const fn truncated(section: &'static str, needed: usize, available: usize) -> Self {
        Self::Truncated {
            section,
            needed,
            available,
        }
    }

    /// Create a malformed file error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a usage error.
    #[must_use]
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::truncated("data section", 2048, 1000);
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1000"));

        let err = TransformError::UnknownMode("z_to_y".to_string());
        assert!(err.to_string().contains("z_to_y"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = TransformError::io(
            "trial/Gait_05.c3d",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("Gait_05.c3d"));
    }
}
