use crate::gnc::ManeuverProfile;

pub const DEFAULT_MAX_TORQUE: f64 = 0.012;     // N·m
pub const DEFAULT_MAX_MOMENTUM: f64 = 0.03;    // N·m·s

// ---------------------------------------------------------------------------
// Reaction wheel (one body axis)
// ---------------------------------------------------------------------------

/// Single-axis reaction wheel driving a rigid body of inertia `inertia`.
///
/// The motor is bang-bang: full torque one way, zero, or full torque the
/// other way, switching instantly with no losses. Spinning the wheel from
/// rest to its momentum limit at full torque defines every derived limit.
#[derive(Debug, Clone)]
pub struct ReactionWheel {
    pub max_torque: f64,          // N·m
    pub max_momentum: f64,        // N·m·s
    pub t_sat: f64,               // s, time to saturate at max torque
    pub alpha_max: f64,           // rad/s^2, body acceleration at max torque
    pub omega_max: f64,           // rad/s, body rate at wheel saturation
    pub theta_sat: f64,           // rad, body rotation while spinning up to saturation
    saturation: f64,              // %, signed by rotation direction
}

impl ReactionWheel {
    pub fn new(inertia: f64, max_torque: f64, max_momentum: f64) -> Self {
        let t_sat = max_momentum / max_torque;
        let alpha_max = max_torque / inertia;
        let omega_max = alpha_max * t_sat;
        let theta_sat = 0.5 * alpha_max * t_sat * t_sat;
        Self {
            max_torque,
            max_momentum,
            t_sat,
            alpha_max,
            omega_max,
            theta_sat,
            saturation: 0.0,
        }
    }

    /// Wheel with the default torque and momentum limits.
    pub fn with_inertia(inertia: f64) -> Self {
        Self::new(inertia, DEFAULT_MAX_TORQUE, DEFAULT_MAX_MOMENTUM)
    }

    /// Plan a rest-to-rest rotation of `angle` radians (signed).
    ///
    /// Angles beyond `2·theta_sat` spin the wheel to saturation, coast at
    /// `omega_max`, then spin down. Smaller angles never saturate and get a
    /// triangular profile with no coast.
    pub fn compute_maneuver(&self, angle: f64) -> ManeuverProfile {
        if angle == 0.0 {
            return ManeuverProfile::idle();
        }

        let angle_abs = angle.abs();
        let alpha = self.alpha_max * angle.signum();

        if angle_abs > 2.0 * self.theta_sat {
            ManeuverProfile {
                t_accel: self.t_sat,
                t_coast: (angle_abs - 2.0 * self.theta_sat) / self.omega_max,
                t_decel: self.t_sat,
                alpha,
            }
        } else {
            let t = (angle_abs / self.alpha_max).sqrt();
            ManeuverProfile {
                t_accel: t,
                t_coast: 0.0,
                t_decel: t,
                alpha,
            }
        }
    }

    /// Signed percentage of stored momentum for a body rate of `omega`.
    pub fn saturation_for(&self, omega: f64) -> f64 {
        100.0 * omega / self.omega_max
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Track the wheel momentum implied by the current body rate.
    pub fn update_saturation(&mut self, omega: f64) -> f64 {
        self.saturation = self.saturation_for(omega);
        self.saturation
    }
}

// ---------------------------------------------------------------------------
// Reaction wheel builder
// ---------------------------------------------------------------------------

pub struct ReactionWheelBuilder {
    max_torque: f64,
    max_momentum: f64,
}

impl ReactionWheelBuilder {
    pub fn new() -> Self {
        Self {
            max_torque: DEFAULT_MAX_TORQUE,
            max_momentum: DEFAULT_MAX_MOMENTUM,
        }
    }

    pub fn max_torque(mut self, v: f64) -> Self { self.max_torque = v; self }
    pub fn max_momentum(mut self, v: f64) -> Self { self.max_momentum = v; self }

    pub fn build(self, inertia: f64) -> ReactionWheel {
        ReactionWheel::new(inertia, self.max_torque, self.max_momentum)
    }
}

impl Default for ReactionWheelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    fn cube_wheel() -> ReactionWheel {
        // 16 kg, 0.2 m cube
        ReactionWheel::with_inertia(16.0 * 0.2 * 0.2 / 6.0)
    }

    #[test]
    fn derived_limits() {
        let w = cube_wheel();
        assert_relative_eq!(w.t_sat, 2.5);
        assert_relative_eq!(w.alpha_max, 0.1125, epsilon = 1e-12);
        assert_relative_eq!(w.omega_max, 0.28125, epsilon = 1e-12);
        assert_relative_eq!(w.theta_sat, 0.3515625, epsilon = 1e-12);
    }

    #[test]
    fn zero_angle_is_no_maneuver() {
        let p = cube_wheel().compute_maneuver(0.0);
        assert_eq!(p.t_accel, 0.0);
        assert_eq!(p.t_coast, 0.0);
        assert_eq!(p.t_decel, 0.0);
        assert_eq!(p.duration(), 0.0);
    }

    #[test]
    fn accel_and_decel_are_symmetric() {
        let w = cube_wheel();
        for angle in [-PI, -1.0, -0.2, 1e-4, 0.3, FRAC_PI_4, 2.0, PI] {
            let p = w.compute_maneuver(angle);
            assert_eq!(p.t_accel, p.t_decel, "angle {angle}");
            if angle.abs() > 2.0 * w.theta_sat {
                assert!(p.t_coast > 0.0, "angle {angle} should coast");
            } else {
                assert_eq!(p.t_coast, 0.0, "angle {angle} should not coast");
            }
        }
    }

    #[test]
    fn acceleration_sign_follows_angle() {
        let w = cube_wheel();
        assert!(w.compute_maneuver(-0.5).alpha < 0.0);
        assert!(w.compute_maneuver(0.5).alpha > 0.0);
        assert_relative_eq!(w.compute_maneuver(-0.5).alpha.abs(), w.alpha_max);
    }

    #[test]
    fn profile_boundary_is_continuous() {
        let w = cube_wheel();
        let boundary = 2.0 * w.theta_sat;
        let at = w.compute_maneuver(boundary);
        assert_eq!(at.t_coast, 0.0);
        assert_relative_eq!(at.t_accel, w.t_sat, epsilon = 1e-12);

        let above = w.compute_maneuver(boundary + 1e-9);
        assert!(above.t_coast >= 0.0 && above.t_coast < 1e-6);
        assert_relative_eq!(above.t_accel, at.t_accel, epsilon = 1e-9);
    }

    #[test]
    fn profile_sweeps_commanded_angle() {
        let w = cube_wheel();
        for angle in [0.1, -0.6, 2.5, -PI] {
            let p = w.compute_maneuver(angle);
            assert_relative_eq!(p.final_displacement(), angle, epsilon = 1e-9);
        }
    }

    #[test]
    fn saturation_scales_with_rate() {
        let mut w = cube_wheel();
        assert_relative_eq!(w.update_saturation(w.omega_max), 100.0);
        assert_relative_eq!(w.update_saturation(-0.5 * w.omega_max), -50.0);
        assert_relative_eq!(w.saturation(), -50.0);
    }

    #[test]
    fn builder_overrides_limits() {
        let w = ReactionWheelBuilder::new().max_torque(0.02).max_momentum(0.1).build(1.0);
        assert_relative_eq!(w.t_sat, 5.0);
        assert_relative_eq!(w.alpha_max, 0.02);
        assert_relative_eq!(w.omega_max, 0.1);
    }
}
