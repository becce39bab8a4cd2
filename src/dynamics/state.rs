use nalgebra::{Matrix3, Vector3};

use crate::error::{AttitudeError, Result};
use crate::frame::{to_spherical, Axis, Octant, Orientation, Spherical, SphericalCoord};
use crate::gnc::Phase;

// ---------------------------------------------------------------------------
// Tracked point (global + local frames)
// ---------------------------------------------------------------------------

pub const MIN_RANGE: f64 = 1e-9;   // distance units
pub const MAX_RANGE: f64 = 1e9;    // distance units

/// A 3-D position tracked in both the global and the satellite-local frame.
///
/// Local cartesian and local spherical always describe the same point;
/// every mutator rederives one from the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    global: Vector3<f64>,        // global cartesian
    local: Vector3<f64>,         // local cartesian
    spherical: Spherical,        // local spherical
}

impl Point {
    /// New point from global cartesian coordinates. Before any rotation is
    /// known the local frame is taken equal to the global one.
    pub fn from_global(global: Vector3<f64>) -> Result<Self> {
        let (x, y, z) = (global.x, global.y, global.z);
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(AttitudeError::NonFiniteTarget { x, y, z });
        }
        if x == 0.0 && y == 0.0 && z == 0.0 {
            return Err(AttitudeError::DegenerateTarget { x, y, z });
        }
        // norm() under/overflows long before the components do
        let spherical = to_spherical(&global);
        if !(MIN_RANGE..=MAX_RANGE).contains(&spherical.rho) {
            return Err(AttitudeError::RangeOutOfBounds {
                rho: spherical.rho,
                min: MIN_RANGE,
                max: MAX_RANGE,
            });
        }
        Ok(Self {
            global,
            local: global,
            spherical,
        })
    }

    /// Point on global +z at range `rho` (> 0), frames coincident.
    pub fn on_z_axis(rho: f64) -> Self {
        let global = Vector3::new(0.0, 0.0, rho);
        Self {
            global,
            local: global,
            spherical: Spherical::new(rho, 0.0, 0.0),
        }
    }

    pub fn global(&self) -> &Vector3<f64> {
        &self.global
    }

    pub fn local(&self) -> &Vector3<f64> {
        &self.local
    }

    pub fn spherical(&self) -> &Spherical {
        &self.spherical
    }

    /// local = R · global
    pub fn project(&mut self, orientation: &Orientation) {
        self.local = orientation.to_local(&self.global);
        self.spherical = to_spherical(&self.local);
    }

    /// global = Rᵗ · local
    pub fn reconstruct_global(&mut self, orientation: &Orientation) {
        self.global = orientation.to_global(&self.local);
    }

    /// Edit one local spherical component and rederive local cartesian.
    pub fn set_spherical(&mut self, coord: SphericalCoord, value: f64) {
        self.spherical.set(coord, value);
        self.local = self.spherical.to_cartesian();
    }

    /// After a completed roll + tilt sequence the point sits on the local
    /// boresight: x = y = 0, z = ρ. Globals are not touched.
    pub fn snap_to_boresight(&mut self) {
        self.local = Vector3::new(0.0, 0.0, self.spherical.rho);
        self.spherical = to_spherical(&self.local);
    }
}

// ---------------------------------------------------------------------------
// Per-axis values
// ---------------------------------------------------------------------------

/// One scalar per body axis (angular rate, wheel saturation, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRates {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl AxisRates {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Roll => self.roll,
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Roll => self.roll = value,
            Axis::Pitch => self.pitch = value,
            Axis::Yaw => self.yaw = value,
        }
    }
}

// ---------------------------------------------------------------------------
// Reorientation stages
// ---------------------------------------------------------------------------

/// Where the orchestrator is within one reorientation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ProjectTarget,
    Maneuver(Axis),
    ZoomAdjust,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Idle => "Idle",
            Stage::ProjectTarget => "ProjectTarget",
            Stage::Maneuver(Axis::Roll) => "RollManeuver",
            Stage::Maneuver(Axis::Pitch) => "PitchManeuver",
            Stage::Maneuver(Axis::Yaw) => "YawManeuver",
            Stage::ZoomAdjust => "ZoomAdjust",
        }
    }
}

// ---------------------------------------------------------------------------
// Telemetry snapshot
// ---------------------------------------------------------------------------

/// Read-only copy of the full satellite state, emitted once per tick.
///
/// Angular rates are rad/s and saturations are signed percentages; any unit
/// conversion for display is up to the consumer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,                  // s since simulator start
    pub stage: Stage,
    pub phase: Option<Phase>,       // set while a maneuver profile is running
    pub target: Point,
    pub current: Point,
    pub rotation: Matrix3<f64>,     // global → local
    pub rotation_t: Matrix3<f64>,   // local → global
    pub omega: AxisRates,           // rad/s
    pub saturation: AxisRates,      // %, [-100, 100]
    pub zoom: f64,                  // current local radius
    pub octant: Option<Octant>,     // octant holding the current point
    pub message: String,
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub refresh_rate: f64,   // Hz, tick cadence
    pub zoom_rate: f64,      // distance units / s
    pub hold: f64,           // s, announce and completion ticks around each maneuver
}

impl SimConfig {
    /// Nominal time between ticks, s.
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.refresh_rate
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 60.0,
            zoom_rate: 1.5,
            hold: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{rotation, Axis};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_vector_rejected() {
        let err = Point::from_global(Vector3::zeros()).unwrap_err();
        assert!(matches!(err, AttitudeError::DegenerateTarget { .. }));
    }

    #[test]
    fn non_finite_rejected() {
        let err = Point::from_global(Vector3::new(f64::NAN, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, AttitudeError::NonFiniteTarget { .. }));
        assert!(Point::from_global(Vector3::new(0.0, f64::INFINITY, 1.0)).is_err());
    }

    #[test]
    fn out_of_range_targets_rejected() {
        for v in [
            Vector3::new(1e-200, 0.0, 0.0),
            Vector3::new(0.0, -1e-10, 0.0),
            Vector3::new(1e200, 0.0, 0.0),
            Vector3::new(8e8, 8e8, 0.0),
        ] {
            let err = Point::from_global(v).unwrap_err();
            assert!(matches!(err, AttitudeError::RangeOutOfBounds { .. }), "{v:?}: {err}");
        }
        let near = Point::from_global(Vector3::new(0.0, 0.0, 2e-9)).unwrap();
        assert_relative_eq!(near.spherical().theta, 0.0);
        let far = Point::from_global(Vector3::new(-1e9, 0.0, 0.0)).unwrap();
        assert!(far.spherical().theta.is_finite());
    }

    #[test]
    fn new_point_local_equals_global() {
        let p = Point::from_global(Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(p.local(), p.global());
        assert_relative_eq!(p.spherical().rho, 1.0);
        assert_relative_eq!(p.spherical().theta, 0.0);
    }

    #[test]
    fn project_then_reconstruct_is_identity() {
        let mut o = Orientation::identity();
        o.commit(&rotation(Axis::Roll, 0.9));
        o.commit(&rotation(Axis::Yaw, -0.4));
        let g = Vector3::new(3.0, -1.0, 2.0);
        let mut p = Point::from_global(g).unwrap();
        p.project(&o);
        assert_relative_eq!(p.spherical().to_cartesian(), *p.local(), epsilon = 1e-12);
        p.reconstruct_global(&o);
        assert_relative_eq!(*p.global(), g, epsilon = 1e-12);
    }

    #[test]
    fn spherical_edit_keeps_cartesian_consistent() {
        let mut p = Point::from_global(Vector3::new(0.0, 0.0, 2.0)).unwrap();
        p.set_spherical(SphericalCoord::Azimuth, FRAC_PI_2);
        p.set_spherical(SphericalCoord::Polar, FRAC_PI_2);
        assert_relative_eq!(*p.local(), Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        p.set_spherical(SphericalCoord::Radius, 5.0);
        assert_relative_eq!(p.local().norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn snap_puts_point_on_boresight() {
        let mut p = Point::from_global(Vector3::new(1.0, 2.0, -2.0)).unwrap();
        p.snap_to_boresight();
        assert_relative_eq!(*p.local(), Vector3::new(0.0, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(p.spherical().theta, 0.0);
        // global untouched
        assert_eq!(*p.global(), Vector3::new(1.0, 2.0, -2.0));
    }

    #[test]
    fn axis_rates_index_by_axis() {
        let mut r = AxisRates::default();
        r.set(Axis::Pitch, -3.0);
        assert_eq!(r.get(Axis::Pitch), -3.0);
        assert_eq!(r.get(Axis::Roll), 0.0);
        assert_eq!(r.yaw, 0.0);
    }

    #[test]
    fn default_config_is_sixty_hz() {
        let c = SimConfig::default();
        assert_relative_eq!(c.tick_interval(), 1.0 / 60.0);
    }
}
