pub mod planner;
pub mod profile;

pub use planner::{plan_roll, RollPlan, Secondary};
pub use profile::{ManeuverProfile, Phase, ProfileSample};
