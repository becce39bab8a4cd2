pub mod csv;
pub mod input;
pub mod json;

pub use input::{parse_target, ParseTargetError};
