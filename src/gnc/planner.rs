use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::error::{AttitudeError, Result};
use crate::frame::Axis;

// ---------------------------------------------------------------------------
// Planner: minimum roll, then one tilt
// ---------------------------------------------------------------------------

/// The tilt that finishes alignment after the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Secondary {
    Pitch,
    Yaw,
}

impl Secondary {
    pub fn axis(self) -> Axis {
        match self {
            Secondary::Pitch => Axis::Pitch,
            Secondary::Yaw => Axis::Yaw,
        }
    }
}

/// Maneuver sequence that puts a target onto the local boresight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollPlan {
    /// Signed roll, |roll| ≤ π/4.
    pub roll: f64,
    /// `azimuth − roll`: the azimuth the roll sweeps from, so the ticked
    /// azimuth ends exactly on the target's.
    pub offset: f64,
    pub next: Secondary,
    /// Direction of the tilt (+1 / −1). The polar angle it drives is
    /// unsigned; only the rotation direction flips.
    pub next_sign: f64,
}

/// Choose the smallest roll that lines the target up for a single pitch or
/// yaw, given the target's local azimuth in [0, 2π).
///
/// Roll lands the target on the nearest of the ±x / ±y half-planes:
///
/// | azimuth          | roll      | next  | sign |
/// |------------------|-----------|-------|------|
/// | [0, π/4]         | φ         | Yaw   | +1   |
/// | (π/4, 3π/4]      | φ − π/2   | Pitch | −1   |
/// | (3π/4, 5π/4]     | φ − π     | Yaw   | −1   |
/// | (5π/4, 7π/4]     | φ − 3π/2  | Pitch | +1   |
/// | (7π/4, 2π)       | φ − 2π    | Yaw   | +1   |
pub fn plan_roll(azimuth: f64) -> Result<RollPlan> {
    if !(0.0..TAU).contains(&azimuth) {
        return Err(AttitudeError::AzimuthOutOfRange { azimuth });
    }

    let (roll, next, next_sign) = if azimuth <= FRAC_PI_4 {
        (azimuth, Secondary::Yaw, 1.0)
    } else if azimuth <= 3.0 * FRAC_PI_4 {
        (azimuth - FRAC_PI_2, Secondary::Pitch, -1.0)
    } else if azimuth <= 5.0 * FRAC_PI_4 {
        (azimuth - PI, Secondary::Yaw, -1.0)
    } else if azimuth <= 7.0 * FRAC_PI_4 {
        (azimuth - 3.0 * FRAC_PI_2, Secondary::Pitch, 1.0)
    } else {
        (azimuth - TAU, Secondary::Yaw, 1.0)
    };

    Ok(RollPlan {
        roll,
        offset: azimuth - roll,
        next,
        next_sign,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
