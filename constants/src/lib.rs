pub mod c3d_format;
pub mod coordinate_system;
