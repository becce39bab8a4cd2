pub mod clock;
pub mod event;
pub mod runner;
pub mod telemetry;

pub use clock::{Clock, ManualClock, WallClock};
pub use runner::{AttitudeSimulator, ManeuverReport, ReorientReport};
pub use telemetry::{Discard, Recorder, Telemetry};
