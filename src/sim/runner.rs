use tracing::{debug, info};

use crate::dynamics::Body;
use crate::error::{Error, Result};
use crate::physics::constants::DAY;
use crate::physics::gravity::find_coincident;
use super::integrator::step_bodies;
use super::observer::{NoopObserver, StepObserver};

// ---------------------------------------------------------------------------
// Integrator configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IntegratorConfig {
    pub dt: f64,                // step size, s (magnitude; direction follows duration)
    pub duration: f64,          // elapsed time to cover, s (negative = backward)
    pub max_steps: Option<u64>, // hard cap on the step count
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            dt: DAY / 4.0, // 6 hours
            duration: 0.0,
            max_steps: None,
        }
    }
}

impl IntegratorConfig {
    pub fn new(dt: f64, duration: f64) -> Self {
        Self { dt, duration, max_steps: None }
    }

    /// Signed step: |dt| in the direction of `duration`.
    pub fn signed_dt(&self) -> f64 {
        if self.duration < 0.0 {
            -self.dt.abs()
        } else {
            self.dt.abs()
        }
    }

    /// round(|duration| / |dt|); the remainder is dropped.
    pub fn step_count(&self) -> u64 {
        let steps = (self.duration.abs() / self.dt.abs()).round() as u64;
        match self.max_steps {
            Some(cap) => steps.min(cap),
            None => steps,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt != 0.0) {
            return Err(Error::InvalidArgument(format!(
                "time step must be finite and non-zero, got {}",
                self.dt
            )));
        }
        if !self.duration.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "duration must be finite, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// N-body integrator: Uninitialized → Stepping → Done
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Stepping,
    Done,
}

pub struct NBodyIntegrator {
    config: IntegratorConfig,
    bodies: Vec<Body>,
    phase: Phase,
    steps_total: u64,
    steps_done: u64,
    time: f64, // s since load
}

impl NBodyIntegrator {
    pub fn new(config: IntegratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            steps_total: config.step_count(),
            config,
            bodies: Vec::new(),
            phase: Phase::Uninitialized,
            steps_done: 0,
            time: 0.0,
        })
    }

    /// Take ownership of the initial body set.
    /// Rejects non-positive masses and coincident bodies.
    pub fn load(&mut self, bodies: Vec<Body>) -> Result<()> {
        for b in &bodies {
            b.validate()?;
        }
        if let Some((i, j)) = find_coincident(&bodies) {
            return Err(Error::DegenerateGeometry {
                first: bodies[i].name.clone(),
                second: bodies[j].name.clone(),
            });
        }

        info!(
            bodies = bodies.len(),
            steps = self.steps_total,
            dt = self.config.signed_dt(),
            "n-body integration loaded"
        );

        self.bodies = bodies;
        self.steps_done = 0;
        self.time = 0.0;
        self.phase = if self.steps_total == 0 { Phase::Done } else { Phase::Stepping };
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    pub fn steps_done(&self) -> u64 {
        self.steps_done
    }

    pub fn steps_total(&self) -> u64 {
        self.steps_total
    }

    /// Elapsed integration time, s.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance one step. Returns `false` once the run is complete.
    pub fn step(&mut self) -> Result<bool> {
        match self.phase {
            Phase::Uninitialized => {
                return Err(Error::InvalidArgument("integrator stepped before load".into()))
            }
            Phase::Done => return Ok(false),
            Phase::Stepping => {}
        }

        let dt = self.config.signed_dt();
        self.bodies = step_bodies(&self.bodies, dt);
        self.steps_done += 1;
        self.time = self.steps_done as f64 * dt;

        if self.steps_done >= self.steps_total {
            self.phase = Phase::Done;
            debug!(steps = self.steps_done, "n-body integration done");
        }
        Ok(self.phase == Phase::Stepping)
    }

    /// Run to completion.
    pub fn run(&mut self) -> Result<&[Body]> {
        self.run_with(&mut NoopObserver)
    }

    /// Run until done or until the observer breaks. An interrupted run
    /// stays in `Stepping` and can be resumed.
    pub fn run_with(&mut self, observer: &mut dyn StepObserver) -> Result<&[Body]> {
        if self.phase == Phase::Uninitialized {
            return Err(Error::InvalidArgument("integrator run before load".into()));
        }

        while self.phase == Phase::Stepping {
            self.step()?;
            if observer
                .observe(self.steps_done, self.time, &self.bodies)
                .is_break()
            {
                debug!(steps = self.steps_done, "n-body integration interrupted");
                break;
            }
        }

        Ok(&self.bodies)
    }
}

/// Integrate `bodies` under `config` and return the final states.
pub fn propagate(bodies: Vec<Body>, config: IntegratorConfig) -> Result<Vec<Body>> {
    let mut integrator = NBodyIntegrator::new(config)?;
    integrator.load(bodies)?;
    integrator.run()?;
    Ok(integrator.into_bodies())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
