use log::{debug, info, warn};
use nalgebra::{Matrix3, Vector3};

use crate::dynamics::{AxisRates, Point, SimConfig, Snapshot, Stage};
use crate::error::Result;
use crate::frame::{rotation, Axis, Octant, Orientation, Spherical, SphericalCoord};
use crate::gnc::{plan_roll, ManeuverProfile, Phase, RollPlan};
use crate::vehicle::CubeSat;
use super::clock::{Clock, WallClock};
use super::event::{default_detectors, EventDetector, SimEvent};
use super::telemetry::Telemetry;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of one ticked maneuver.
#[derive(Debug, Clone)]
pub struct ManeuverReport {
    pub axis: Axis,
    pub sign: f64,
    /// Commanded angle handed to the wheel, rad.
    pub angle: f64,
    pub profile: ManeuverProfile,
    /// Largest |saturation| seen on any tick, %.
    pub peak_saturation: f64,
    pub ticks: usize,
}

/// Outcome of one full reorientation request.
#[derive(Debug, Clone)]
pub struct ReorientReport {
    pub target_global: Vector3<f64>,
    /// Target in the pre-maneuver local frame.
    pub target_local: Spherical,
    pub plan: RollPlan,
    pub roll: ManeuverReport,
    pub secondary: ManeuverReport,
    /// Current point's local spherical coordinates when ticking ended,
    /// before the boresight snap.
    pub reached: Spherical,
    pub zoom_from: f64,
    pub zoom_to: f64,
    pub zoom_time: f64,
    pub started: f64,
    pub finished: f64,
    /// Cumulative global → local rotation after the commit.
    pub rotation: Matrix3<f64>,
    pub events: Vec<SimEvent>,
}

// ---------------------------------------------------------------------------
// Attitude simulator
// ---------------------------------------------------------------------------

/// Owns the whole satellite state and runs reorientation requests one at a
/// time, start to finish.
pub struct AttitudeSimulator<C: Clock = WallClock> {
    config: SimConfig,
    sat: CubeSat,
    clock: C,
    origin: f64,
    orientation: Orientation,
    current: Point,
    target: Point,
    omega: AxisRates,
    stage: Stage,
    phase: Option<Phase>,
    detectors: Vec<Box<dyn EventDetector>>,
    last: Option<Snapshot>,
    events: Vec<SimEvent>,
}

impl AttitudeSimulator<WallClock> {
    /// Real-time simulator paced by the wall clock.
    pub fn new(sat: CubeSat, config: SimConfig) -> Self {
        Self::with_clock(sat, config, WallClock::new())
    }
}

impl<C: Clock> AttitudeSimulator<C> {
    pub fn with_clock(sat: CubeSat, config: SimConfig, clock: C) -> Self {
        let origin = clock.now();
        // Boresight starts on global +z at unit range.
        let current = Point::on_z_axis(1.0);
        let target = current.clone();
        Self {
            config,
            sat,
            clock,
            origin,
            orientation: Orientation::identity(),
            current,
            target,
            omega: AxisRates::default(),
            stage: Stage::Idle,
            phase: None,
            detectors: default_detectors(),
            last: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn satellite(&self) -> &CubeSat {
        &self.sat
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn current(&self) -> &Point {
        &self.current
    }

    pub fn target(&self) -> &Point {
        &self.target
    }

    pub fn omega(&self) -> AxisRates {
        self.omega
    }

    pub fn saturation(&self) -> AxisRates {
        AxisRates {
            roll: self.sat.roll_wheel.saturation(),
            pitch: self.sat.pitch_wheel.saturation(),
            yaw: self.sat.yaw_wheel.saturation(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Seconds since the simulator was created.
    pub fn time(&self) -> f64 {
        self.clock.now() - self.origin
    }

    pub fn snapshot(&self, message: impl Into<String>) -> Snapshot {
        Snapshot {
            time: self.time(),
            stage: self.stage,
            phase: self.phase,
            target: self.target.clone(),
            current: self.current.clone(),
            rotation: *self.orientation.matrix(),
            rotation_t: *self.orientation.transpose(),
            omega: self.omega,
            saturation: self.saturation(),
            zoom: self.current.spherical().rho,
            octant: Octant::classify(self.current.global()),
            message: message.into(),
        }
    }

    /// Emit a single snapshot with `message` (welcome / idle screens).
    /// Idle screens belong to no request, so no events are recorded.
    pub fn announce(&mut self, message: &str, sink: &mut dyn Telemetry) {
        let snap = self.snapshot(message);
        sink.emit(&snap);
        self.last = Some(snap);
    }

    /// Reorient onto a new target given in global cartesian coordinates.
    ///
    /// Runs roll, the planned pitch or yaw, then the zoom ramp, emitting a
    /// snapshot every tick. Target validation and planning happen before
    /// any state changes, so an `Err` leaves the simulator untouched.
    pub fn reorient(&mut self, target_global: Vector3<f64>, sink: &mut dyn Telemetry) -> Result<ReorientReport> {
        let mut target = Point::from_global(target_global)?;
        target.project(&self.orientation);
        let target_local = *target.spherical();
        let plan = plan_roll(target_local.phi)?;

        let started = self.time();
        self.stage = Stage::ProjectTarget;
        self.target = target;
        info!(
            "Target ({:.3}, {:.3}, {:.3}) -> local rho={:.3} theta={:.4} phi={:.4}",
            target_global.x, target_global.y, target_global.z,
            target_local.rho, target_local.theta, target_local.phi,
        );
        debug!(
            "Roll plan: roll={:.4} rad, offset={:.4} rad, then {:?} (sign {:+})",
            plan.roll, plan.offset, plan.next, plan.next_sign,
        );

        // --- Roll: sweep azimuth onto the target's ---
        let roll_profile = self.sat.roll_wheel.compute_maneuver(plan.roll);
        let roll = self.execute_maneuver(
            Axis::Roll, 1.0, SphericalCoord::Azimuth, plan.roll, plan.offset, roll_profile, sink,
        );

        // --- Pitch or yaw: sweep polar angle from the boresight ---
        let axis = plan.next.axis();
        let theta = target_local.theta;
        let tilt_profile = self.sat.wheel(axis).compute_maneuver(theta);
        let secondary = self.execute_maneuver(
            axis, plan.next_sign, SphericalCoord::Polar, theta, 0.0, tilt_profile, sink,
        );

        let reached = *self.current.spherical();

        // --- Commit both rotations, then snap onto the boresight ---
        self.orientation.commit(&rotation(Axis::Roll, plan.roll));
        self.orientation.commit(&rotation(axis, plan.next_sign * theta));
        self.current.snap_to_boresight();
        self.target.snap_to_boresight();
        self.current.reconstruct_global(&self.orientation);
        self.target.reconstruct_global(&self.orientation);
        debug!("Committed orientation: {:?}", self.orientation.matrix());

        // --- Zoom ---
        let zoom_from = self.current.spherical().rho;
        let zoom_to = self.target.spherical().rho;
        let zoom_time = self.adjust_zoom(sink);

        self.stage = Stage::Idle;
        self.phase = None;
        let finished = self.time();
        info!(
            "Reorientation complete in {:.2} s (roll {:.2} deg, {} {:.2} deg)",
            finished - started,
            plan.roll.to_degrees(),
            axis,
            (plan.next_sign * theta).to_degrees(),
        );

        Ok(ReorientReport {
            target_global,
            target_local,
            plan,
            roll,
            secondary,
            reached,
            zoom_from,
            zoom_to,
            zoom_time,
            started,
            finished,
            rotation: *self.orientation.matrix(),
            events: std::mem::take(&mut self.events),
        })
    }

    /// Tick one maneuver profile through startup, motion, and completion.
    ///
    /// Phase and in-phase time come from elapsed clock time, never a tick
    /// count, so a slow tick skips ahead instead of falling behind.
    #[allow(clippy::too_many_arguments)]
    fn execute_maneuver(
        &mut self,
        axis: Axis,
        sign: f64,
        coord: SphericalCoord,
        angle: f64,
        offset: f64,
        profile: ManeuverProfile,
        sink: &mut dyn Telemetry,
    ) -> ManeuverReport {
        let hold = self.config.hold;
        let total = profile.total_time(hold);
        let interval = self.config.tick_interval();
        debug!(
            "{axis} profile: accel {:.3} s, coast {:.3} s, decel {:.3} s, alpha {:+.4} rad/s^2",
            profile.t_accel, profile.t_coast, profile.t_decel, profile.alpha,
        );

        self.stage = Stage::Maneuver(axis);
        let start = self.clock.now();
        let mut peak_saturation = 0.0_f64;
        let mut ticks = 0;
        let mut prev_elapsed = 0.0;
        let mut overran = false;

        loop {
            let elapsed = self.clock.now() - start;
            if !overran && elapsed - prev_elapsed > 2.0 * interval {
                warn!(
                    "{axis} maneuver tick overran: {:.3} s since last tick (interval {:.3} s), skipping ahead",
                    elapsed - prev_elapsed, interval,
                );
                overran = true;
            }
            prev_elapsed = elapsed;
            let sample = profile.sample(elapsed, hold);
            self.phase = Some(sample.phase);

            if sample.phase != Phase::Startup {
                self.current.set_spherical(coord, offset + sample.displacement);
                self.current.reconstruct_global(&self.orientation);

                let omega = sample.omega * sign;
                self.omega.set(axis, omega);
                let sat = self.sat.wheel_mut(axis).update_saturation(omega);
                peak_saturation = peak_saturation.max(sat.abs());
            }

            let message = match sample.phase {
                Phase::Startup => format!("Executing {axis} Maneuver:"),
                phase => format!("Executing {axis} Maneuver: {}", phase.status()),
            };
            let snap = self.snapshot(message);
            self.publish(snap, sink);
            ticks += 1;

            if elapsed >= total {
                break;
            }
            self.clock.sleep(interval);
        }

        ManeuverReport {
            axis,
            sign,
            angle,
            profile,
            peak_saturation,
            ticks,
        }
    }

    /// Ramp the current range to the target's at the configured zoom rate,
    /// then hold. Returns the ramp duration.
    fn adjust_zoom(&mut self, sink: &mut dyn Telemetry) -> f64 {
        self.stage = Stage::ZoomAdjust;
        self.phase = None;

        let r_start = self.current.spherical().rho;
        let r_end = self.target.spherical().rho;
        let dr = r_end - r_start;
        let t_zoom = dr.abs() / self.config.zoom_rate;
        let interval = self.config.tick_interval();
        debug!("Zoom {r_start:.3} -> {r_end:.3} over {t_zoom:.3} s");

        let start = self.clock.now();
        loop {
            let elapsed = self.clock.now() - start;
            let (rho, message) = if elapsed < t_zoom {
                (r_start + dr * elapsed / t_zoom, "Adjusting Optical Zoom...")
            } else {
                (r_end, "Optical Zoom Complete")
            };
            self.current.set_spherical(SphericalCoord::Radius, rho);
            self.current.reconstruct_global(&self.orientation);

            let snap = self.snapshot(message);
            self.publish(snap, sink);

            if elapsed >= t_zoom + self.config.hold {
                break;
            }
            self.clock.sleep(interval);
        }
        t_zoom
    }

    fn publish(&mut self, snap: Snapshot, sink: &mut dyn Telemetry) {
        if let Some(prev) = &self.last {
            for d in self.detectors.iter_mut() {
                if let Some(kind) = d.check(prev, &snap) {
                    debug!("t={:.3}s event: {:?}", snap.time, kind);
                    self.events.push(SimEvent { time: snap.time, kind });
                }
            }
        }
        sink.emit(&snap);
        self.last = Some(snap);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
