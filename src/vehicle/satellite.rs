use crate::frame::Axis;
use super::reaction_wheel::{ReactionWheel, ReactionWheelBuilder};

// ---------------------------------------------------------------------------
// Cube satellite body
// ---------------------------------------------------------------------------

/// Uniform-density cube with one identical reaction wheel per axis.
///
/// The camera zooms along local +z at a constant rate, starting and
/// stopping instantly, with no range limit.
#[derive(Debug, Clone)]
pub struct CubeSat {
    pub name: String,
    pub mass: f64,               // kg
    pub size: f64,               // m, edge length
    pub roll_wheel: ReactionWheel,
    pub pitch_wheel: ReactionWheel,
    pub yaw_wheel: ReactionWheel,
}

impl CubeSat {
    /// Principal moment of a solid cube, kg·m^2 (same about every axis).
    pub fn inertia(&self) -> f64 {
        cube_inertia(self.mass, self.size)
    }

    pub fn wheel(&self, axis: Axis) -> &ReactionWheel {
        match axis {
            Axis::Roll => &self.roll_wheel,
            Axis::Pitch => &self.pitch_wheel,
            Axis::Yaw => &self.yaw_wheel,
        }
    }

    pub fn wheel_mut(&mut self, axis: Axis) -> &mut ReactionWheel {
        match axis {
            Axis::Roll => &mut self.roll_wheel,
            Axis::Pitch => &mut self.pitch_wheel,
            Axis::Yaw => &mut self.yaw_wheel,
        }
    }
}

/// I = m·s²/6
pub fn cube_inertia(mass: f64, size: f64) -> f64 {
    mass * size * size / 6.0
}

// ---------------------------------------------------------------------------
// CubeSat builder
// ---------------------------------------------------------------------------

pub struct CubeSatBuilder {
    name: String,
    mass: f64,
    size: f64,
    wheel: ReactionWheelBuilder,
}

impl CubeSatBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: 16.0,
            size: 0.2,
            wheel: ReactionWheelBuilder::new(),
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn size(mut self, v: f64) -> Self { self.size = v; self }
    pub fn max_torque(mut self, v: f64) -> Self { self.wheel = self.wheel.max_torque(v); self }
    pub fn max_momentum(mut self, v: f64) -> Self { self.wheel = self.wheel.max_momentum(v); self }

    pub fn build(self) -> CubeSat {
        let inertia = cube_inertia(self.mass, self.size);
        let wheel = self.wheel.build(inertia);
        CubeSat {
            name: self.name,
            mass: self.mass,
            size: self.size,
            roll_wheel: wheel.clone(),
            pitch_wheel: wheel.clone(),
            yaw_wheel: wheel,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 16 kg, 20 cm cube with 12 mN·m / 30 mN·m·s wheels.
    pub fn ideal_cube() -> CubeSat {
        CubeSatBuilder::new("Ideal-Cube")
            .mass(16.0)
            .size(0.2)
            .max_torque(0.012)
            .max_momentum(0.03)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn preset_inertia() {
        let sat = presets::ideal_cube();
        assert_relative_eq!(sat.inertia(), 16.0 * 0.04 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn wheels_are_identical() {
        let sat = presets::ideal_cube();
        for axis in Axis::ALL {
            assert_relative_eq!(sat.wheel(axis).omega_max, sat.roll_wheel.omega_max);
            assert_eq!(sat.wheel(axis).saturation(), 0.0);
        }
    }

    #[test]
    fn wheel_mut_targets_one_axis() {
        let mut sat = presets::ideal_cube();
        let w = sat.wheel(Axis::Yaw).omega_max;
        sat.wheel_mut(Axis::Yaw).update_saturation(w);
        assert_relative_eq!(sat.yaw_wheel.saturation(), 100.0);
        assert_eq!(sat.pitch_wheel.saturation(), 0.0);
    }

    #[test]
    fn heavier_body_turns_slower() {
        let light = presets::ideal_cube();
        let heavy = CubeSatBuilder::new("Heavy").mass(64.0).build();
        assert!(heavy.roll_wheel.alpha_max < light.roll_wheel.alpha_max);
    }
}
