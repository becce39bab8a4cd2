pub mod error;
pub mod frame;
pub mod dynamics;
pub mod vehicle;
pub mod gnc;
pub mod sim;
pub mod io;

pub use error::{AttitudeError, Result};

// Flat re-exports of the types most callers need
pub mod types {
    pub use crate::dynamics::state::{AxisRates, Point, SimConfig, Snapshot, Stage};
    pub use crate::frame::{Axis, Orientation, Spherical};
    pub use crate::vehicle::{CubeSat, ReactionWheel};
}
