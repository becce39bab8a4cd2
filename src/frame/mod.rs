pub mod rotation;
pub mod spherical;
pub mod octant;

pub use rotation::{apply_rotation, compose, rotation, transpose, Axis, Orientation};
pub use spherical::{to_spherical, wrap_azimuth, Spherical, SphericalCoord};
pub use octant::Octant;
