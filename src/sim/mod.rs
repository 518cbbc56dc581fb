pub mod integrator;
pub mod model;
pub mod observer;
pub mod runner;

pub use integrator::{rk4_body_step, step_bodies};
pub use model::{run_model, Model, ModelKind, ModelRun, Seed};
pub use observer::{NoopObserver, PathSample, StepLimit, StepObserver, TrajectoryRecorder};
pub use runner::{propagate, IntegratorConfig, NBodyIntegrator, Phase};
