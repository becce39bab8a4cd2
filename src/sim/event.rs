use crate::dynamics::{Snapshot, Stage};
use crate::frame::{Axis, Octant};
use crate::gnc::Phase;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    StageEntered(Stage),
    PhaseEntered { axis: Axis, phase: Phase },
    OctantChanged { from: Option<Octant>, to: Option<Octant> },
    WheelSaturated { axis: Axis, percent: f64 },
}

/// A discrete event observed between two consecutive snapshots.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive snapshots and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind>;
}

/// Detects the orchestrator moving to a new stage.
pub struct StageDetector;

impl EventDetector for StageDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        (prev.stage != current.stage).then_some(EventKind::StageEntered(current.stage))
    }
}

/// Detects maneuver phase changes (including a new maneuver starting).
pub struct PhaseDetector;

impl EventDetector for PhaseDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        let Stage::Maneuver(axis) = current.stage else {
            return None;
        };
        let phase = current.phase?;
        if prev.stage != current.stage || prev.phase != current.phase {
            Some(EventKind::PhaseEntered { axis, phase })
        } else {
            None
        }
    }
}

/// Detects the current point moving into a different octant.
pub struct OctantDetector;

impl EventDetector for OctantDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        (prev.octant != current.octant).then_some(EventKind::OctantChanged {
            from: prev.octant,
            to: current.octant,
        })
    }
}

/// Detects a wheel's |saturation| rising through a threshold. Re-arms once
/// the wheel drops back below it.
pub struct SaturationDetector {
    pub axis: Axis,
    pub percent: f64,
    armed: bool,
}

impl SaturationDetector {
    pub fn new(axis: Axis, percent: f64) -> Self {
        Self { axis, percent, armed: true }
    }
}

impl EventDetector for SaturationDetector {
    fn check(&mut self, _prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        let level = current.saturation.get(self.axis).abs();
        if level < self.percent {
            self.armed = true;
            return None;
        }
        if !self.armed {
            return None;
        }
        self.armed = false;
        Some(EventKind::WheelSaturated {
            axis: self.axis,
            percent: self.percent,
        })
    }
}

/// The detectors the simulator runs on its own tick stream.
pub fn default_detectors() -> Vec<Box<dyn EventDetector>> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(StageDetector),
        Box::new(PhaseDetector),
        Box::new(OctantDetector),
    ];
    for axis in Axis::ALL {
        detectors.push(Box::new(SaturationDetector::new(axis, 100.0)));
    }
    detectors
}
