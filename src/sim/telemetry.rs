use crate::dynamics::Snapshot;

/// Consumer of per-tick state snapshots (console, recorder, plotter, ...).
pub trait Telemetry {
    fn emit(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> Telemetry for F {
    fn emit(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    pub snapshots: Vec<Snapshot>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Telemetry for Recorder {
    fn emit(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Telemetry for Discard {
    fn emit(&mut self, _snapshot: &Snapshot) {}
}
