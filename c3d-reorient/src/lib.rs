/// C3D lab coordinate system transform: rotates every marker trajectory of a file

pub mod bounds;
pub mod c3d;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod transform;
pub mod transformer;

pub use c3d::{Acquisition, Marker};
pub use error::{Result, TransformError};
pub use report::TransformReport;
pub use transform::TransformMode;
pub use transformer::{CoordinateTransformer, transform};
