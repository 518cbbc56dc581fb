use std::ops::ControlFlow;

use crate::dynamics::{Body, Vec3};

// ---------------------------------------------------------------------------
// Step observers
// ---------------------------------------------------------------------------

/// Passive hook called after every completed integrator step.
/// Returning `ControlFlow::Break` interrupts the run.
pub trait StepObserver {
    fn observe(&mut self, step: u64, time: f64, bodies: &[Body]) -> ControlFlow<()>;
}

/// Observer that never interrupts and records nothing.
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn observe(&mut self, _step: u64, _time: f64, _bodies: &[Body]) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// One sampled point of a body's path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSample {
    pub time: f64, // s since epoch
    pub pos: Vec3, // m
    pub vel: Vec3, // m/s
}

/// Records positions of every body each `every` steps.
pub struct TrajectoryRecorder {
    every: u64,
    names: Vec<String>,
    paths: Vec<Vec<PathSample>>,
}

impl TrajectoryRecorder {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1), names: Vec::new(), paths: Vec::new() }
    }

    /// Seed with the initial state so paths start at step zero.
    pub fn record_initial(&mut self, time: f64, bodies: &[Body]) {
        self.push(time, bodies);
    }

    fn push(&mut self, time: f64, bodies: &[Body]) {
        if self.paths.len() != bodies.len() {
            self.names = bodies.iter().map(|b| b.name.clone()).collect();
            self.paths = vec![Vec::new(); bodies.len()];
        }
        for (path, b) in self.paths.iter_mut().zip(bodies) {
            path.push(PathSample { time, pos: b.pos, vel: b.vel });
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn paths(&self) -> &[Vec<PathSample>] {
        &self.paths
    }

    /// (name, samples) pairs, consuming the recorder.
    pub fn into_paths(self) -> Vec<(String, Vec<PathSample>)> {
        self.names.into_iter().zip(self.paths).collect()
    }
}

impl StepObserver for TrajectoryRecorder {
    fn observe(&mut self, step: u64, time: f64, bodies: &[Body]) -> ControlFlow<()> {
        if step % self.every == 0 {
            self.push(time, bodies);
        }
        ControlFlow::Continue(())
    }
}

/// Stops the run after a fixed number of observed steps.
pub struct StepLimit {
    pub limit: u64,
}

impl StepObserver for StepLimit {
    fn observe(&mut self, step: u64, _time: f64, _bodies: &[Body]) -> ControlFlow<()> {
        if step >= self.limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
