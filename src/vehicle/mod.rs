pub mod reaction_wheel;
pub mod satellite;

pub use reaction_wheel::{ReactionWheel, ReactionWheelBuilder};
pub use satellite::{CubeSat, CubeSatBuilder, presets};
