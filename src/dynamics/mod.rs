pub mod state;

pub use state::{AxisRates, Point, SimConfig, Snapshot, Stage};
