use std::fmt;

// ---------------------------------------------------------------------------
// Maneuver profile: bang-coast-bang angular motion on one axis
// ---------------------------------------------------------------------------

/// Actuator-limited rest-to-rest motion plan for a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverProfile {
    pub t_accel: f64,   // s
    pub t_coast: f64,   // s
    pub t_decel: f64,   // s
    pub alpha: f64,     // rad/s^2, signed; 0 when there is nothing to do
}

/// Phases of a ticked maneuver, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Startup,
    Accelerating,
    Coasting,
    Decelerating,
    Complete,
}

impl Phase {
    /// Status suffix shown after "Executing <axis> Maneuver:".
    pub fn status(self) -> &'static str {
        match self {
            Phase::Startup => "",
            Phase::Accelerating => "Accelerating...",
            Phase::Coasting => "Coasting...",
            Phase::Decelerating => "Decelerating...",
            Phase::Complete => "Complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Startup => "Startup",
            Phase::Accelerating => "Accelerating",
            Phase::Coasting => "Coasting",
            Phase::Decelerating => "Decelerating",
            Phase::Complete => "Complete",
        };
        f.write_str(name)
    }
}

/// Profile state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    pub phase: Phase,
    /// Angle swept since the maneuver started moving, rad (signed).
    pub displacement: f64,
    /// Body rate, rad/s (signed).
    pub omega: f64,
}

impl ManeuverProfile {
    /// Profile for a zero-angle command.
    pub fn idle() -> Self {
        Self {
            t_accel: 0.0,
            t_coast: 0.0,
            t_decel: 0.0,
            alpha: 0.0,
        }
    }

    /// Moving time (accel + coast + decel), s.
    pub fn duration(&self) -> f64 {
        self.t_accel + self.t_coast + self.t_decel
    }

    /// Wall time for the whole ticked maneuver: a startup hold, the moving
    /// time, and a completion hold.
    pub fn total_time(&self, hold: f64) -> f64 {
        self.duration() + 2.0 * hold
    }

    /// Angle swept at the end of the maneuver.
    pub fn final_displacement(&self) -> f64 {
        let (a, ta, tc, td) = (self.alpha, self.t_accel, self.t_coast, self.t_decel);
        0.5 * a * ta * ta + a * ta * tc + (a * ta * td - 0.5 * a * td * td)
    }

    /// Evaluate the profile `elapsed` seconds after the maneuver started.
    ///
    /// The first `hold` seconds are the startup announcement; motion starts
    /// afterwards. Anything past the moving time is `Complete`, with the
    /// final values latched. Pure function of its inputs, so any elapsed
    /// time can be sampled directly.
    pub fn sample(&self, elapsed: f64, hold: f64) -> ProfileSample {
        let (a, ta, tc, td) = (self.alpha, self.t_accel, self.t_coast, self.t_decel);

        if elapsed < hold {
            return ProfileSample {
                phase: Phase::Startup,
                displacement: 0.0,
                omega: 0.0,
            };
        }

        let t = elapsed - hold;
        if t < ta {
            ProfileSample {
                phase: Phase::Accelerating,
                displacement: 0.5 * a * t * t,
                omega: a * t,
            }
        } else if t < ta + tc {
            let tp = t - ta;
            let omega = a * ta;
            ProfileSample {
                phase: Phase::Coasting,
                displacement: 0.5 * a * ta * ta + omega * tp,
                omega,
            }
        } else if t < ta + tc + td {
            let tp = t - ta - tc;
            ProfileSample {
                phase: Phase::Decelerating,
                displacement: 0.5 * a * ta * ta + a * ta * tc + (a * ta * tp - 0.5 * a * tp * tp),
                omega: a * ta - a * tp,
            }
        } else {
            // t_accel == t_decel by construction, so this rate is exactly 0
            ProfileSample {
                phase: Phase::Complete,
                displacement: self.final_displacement(),
                omega: a * ta - a * td,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::ReactionWheel;
    use approx::assert_relative_eq;

    fn wheel() -> ReactionWheel {
        ReactionWheel::with_inertia(16.0 * 0.2 * 0.2 / 6.0)
    }

    #[test]
    fn phases_follow_schedule() {
        let p = wheel().compute_maneuver(2.0); // coasting profile
        let hold = 1.0;
        assert_eq!(p.sample(0.0, hold).phase, Phase::Startup);
        assert_eq!(p.sample(hold + 0.5 * p.t_accel, hold).phase, Phase::Accelerating);
        assert_eq!(p.sample(hold + p.t_accel + 0.5 * p.t_coast, hold).phase, Phase::Coasting);
        assert_eq!(
            p.sample(hold + p.t_accel + p.t_coast + 0.5 * p.t_decel, hold).phase,
            Phase::Decelerating
        );
        assert_eq!(p.sample(p.total_time(hold), hold).phase, Phase::Complete);
        assert_eq!(p.sample(1.0e6, hold).phase, Phase::Complete);
    }

    #[test]
    fn startup_has_no_motion() {
        let p = wheel().compute_maneuver(-0.4);
        let s = p.sample(0.3, 1.0);
        assert_eq!(s.displacement, 0.0);
        assert_eq!(s.omega, 0.0);
    }

    #[test]
    fn residual_rate_is_zero() {
        for angle in [0.05, -0.7, 3.0] {
            let p = wheel().compute_maneuver(angle);
            let s = p.sample(p.total_time(1.0) + 0.25, 1.0);
            assert_eq!(s.omega, 0.0);
            assert_relative_eq!(s.displacement, angle, epsilon = 1e-9);
        }
    }

    #[test]
    fn displacement_is_continuous_across_phases() {
        let p = wheel().compute_maneuver(2.0);
        let hold = 0.0;
        let eps = 1e-9;
        for edge in [p.t_accel, p.t_accel + p.t_coast, p.duration()] {
            let before = p.sample(edge - eps, hold);
            let after = p.sample(edge + eps, hold);
            assert_relative_eq!(before.displacement, after.displacement, epsilon = 1e-6);
            assert_relative_eq!(before.omega, after.omega, epsilon = 1e-6);
        }
    }

    #[test]
    fn rate_never_exceeds_saturation() {
        let w = wheel();
        for angle in [0.1, -0.7, 1.2, -3.1] {
            let p = w.compute_maneuver(angle);
            let steps = 2000;
            for i in 0..=steps {
                let t = p.total_time(1.0) * i as f64 / steps as f64;
                let s = p.sample(t, 1.0);
                let sat = w.saturation_for(s.omega);
                assert!(
                    (-100.0 - 1e-9..=100.0 + 1e-9).contains(&sat),
                    "saturation {sat} out of range at t={t} for angle {angle}"
                );
            }
        }
    }

    #[test]
    fn idle_profile_completes_immediately() {
        let p = ManeuverProfile::idle();
        let s = p.sample(1.0, 1.0);
        assert_eq!(s.phase, Phase::Complete);
        assert_eq!(s.displacement, 0.0);
        assert_eq!(s.omega, 0.0);
        assert_eq!(p.total_time(1.0), 2.0);
    }

    #[test]
    fn status_strings() {
        assert_eq!(Phase::Coasting.status(), "Coasting...");
        assert_eq!(Phase::Complete.to_string(), "Complete");
    }
}
