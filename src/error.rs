use thiserror::Error;

/// Failures raised by the attitude core.
///
/// Every variant is a broken precondition, not a transient condition: the
/// operation that returns one has left the simulator state untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttitudeError {
    /// The roll planner only accepts azimuths in [0, 2π).
    #[error("local azimuth {azimuth} rad is outside [0, 2π) in the roll planner")]
    AzimuthOutOfRange { azimuth: f64 },

    /// The zero vector has no spherical direction.
    #[error("target ({x}, {y}, {z}) is the zero vector and has no direction")]
    DegenerateTarget { x: f64, y: f64, z: f64 },

    #[error("target ({x}, {y}, {z}) has a non-finite coordinate")]
    NonFiniteTarget { x: f64, y: f64, z: f64 },

    /// Ranges outside [`MIN_RANGE`, `MAX_RANGE`] lose the angles to
    /// underflow or give an unbounded zoom.
    ///
    /// [`MIN_RANGE`]: crate::dynamics::state::MIN_RANGE
    /// [`MAX_RANGE`]: crate::dynamics::state::MAX_RANGE
    #[error("target range {rho} is outside the supported [{min}, {max}]")]
    RangeOutOfBounds { rho: f64, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, AttitudeError>;
