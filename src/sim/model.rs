//! Strategies for obtaining every planet's state at a target date
//!
//! - `Keplerian`: one-body approximation for every planet.
//! - `NBody`: all planets plus the Sun integrated from the epoch.
//! - `Hybrid`: inner planets Keplerian, outer planets plus the Sun
//!   integrated (the Jovian bodies are the ones whose mutual pull matters).

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::dynamics::{find_body, Body};
use crate::error::{Error, Result};
use crate::io::planets::PlanetSet;
use crate::io::solutions::{epoch_key, Solutions};
use crate::orbital::kepler::{keplerian_approx, state_at};
use crate::orbital::OrbitalElements;
use crate::physics::constants::DAY;
use super::observer::{PathSample, TrajectoryRecorder};
use super::runner::{IntegratorConfig, NBodyIntegrator};

/// Default N-body step for a full-system run.
pub const NBODY_DT: f64 = DAY / 4.0;
/// Default N-body step for the outer planets in a hybrid run.
pub const HYBRID_DT: f64 = 7.0 * DAY;
/// First outer planet (Jupiter) in the built-in table.
pub const DEFAULT_DIVIDE: usize = 4;
/// Points per drawn Keplerian orbit.
const ORBIT_SAMPLES: usize = 720;
/// Upper bound on recorded points per N-body path.
const MAX_PATH_SAMPLES: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model {
    Keplerian,
    NBody { dt: f64 },
    Hybrid { divide: usize, dt: f64 },
}

impl Default for Model {
    fn default() -> Self {
        Model::Hybrid { divide: DEFAULT_DIVIDE, dt: HYBRID_DT }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Keplerian => write!(f, "keplerian"),
            Model::NBody { dt } => write!(f, "n-body (dt = {:.2} h)", dt / 3600.0),
            Model::Hybrid { divide, dt } => {
                write!(f, "hybrid (keplerian < {}, n-body dt = {:.2} h)", divide, dt / 3600.0)
            }
        }
    }
}

/// Model kind without parameters, for argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Keplerian,
    NBody,
    Hybrid,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "keplerian" | "kepler" => Ok(ModelKind::Keplerian),
            "nbody" | "n-body" => Ok(ModelKind::NBody),
            "hybrid" => Ok(ModelKind::Hybrid),
            other => Err(Error::InvalidArgument(format!("unknown model '{}'", other))),
        }
    }
}

impl ModelKind {
    /// Full model with `dt` (s) or the kind's default step.
    pub fn with(self, dt: Option<f64>, divide: usize) -> Model {
        match self {
            ModelKind::Keplerian => Model::Keplerian,
            ModelKind::NBody => Model::NBody { dt: dt.unwrap_or(NBODY_DT) },
            ModelKind::Hybrid => Model::Hybrid { divide, dt: dt.unwrap_or(HYBRID_DT) },
        }
    }
}

/// Outcome of a model run.
#[derive(Debug, Clone)]
pub struct ModelRun {
    /// Planets in input order, Sun last.
    pub bodies: Vec<Body>,
    /// Sampled paths per body, for drawing.
    pub paths: Vec<(String, Vec<PathSample>)>,
    /// Integrator steps taken (0 for a pure Keplerian run).
    pub steps: u64,
}

/// Where N-body initial states come from.
#[derive(Debug, Clone, Copy)]
pub enum Seed<'a> {
    /// Keplerian solver at t = 0.
    Keplerian,
    /// Reference ephemeris at the epoch.
    Reference(&'a Solutions),
}

/// Evaluate `model` for `planets` at `days` since the epoch.
pub fn run_model(model: Model, planets: &PlanetSet, days: f64, seed: Seed<'_>) -> Result<ModelRun> {
    let t = days * DAY;
    info!(%model, days, bodies = planets.len(), "running model");

    match model {
        Model::Keplerian => {
            let mut bodies = planets.bodies.clone();
            keplerian_approx(&planets.elements, &mut bodies, t)?;
            let paths = kepler_paths(planets, t)?;
            bodies.push(Body::sun());
            Ok(ModelRun { bodies, paths, steps: 0 })
        }
        Model::NBody { dt } => {
            let (bodies, paths, steps) = integrate(planets, t, dt, seed)?;
            Ok(ModelRun { bodies, paths, steps })
        }
        Model::Hybrid { divide, dt } => {
            let (inner, outer) = planets.split_off(divide);

            let mut bodies = inner.bodies.clone();
            keplerian_approx(&inner.elements, &mut bodies, t)?;
            let mut paths = kepler_paths(&inner, t)?;

            let (outer_bodies, outer_paths, steps) = integrate(&outer, t, dt, seed)?;
            bodies.extend(outer_bodies);
            paths.extend(outer_paths);
            Ok(ModelRun { bodies, paths, steps })
        }
    }
}

/// Integrate `planets` plus the Sun over `t` seconds. Sun is last.
fn integrate(
    planets: &PlanetSet,
    t: f64,
    dt: f64,
    seed: Seed<'_>,
) -> Result<(Vec<Body>, Vec<(String, Vec<PathSample>)>, u64)> {
    let mut initial = initial_states(planets, seed)?;
    initial.push(Body::sun());

    let config = IntegratorConfig::new(dt, t);
    let every = (config.step_count() / MAX_PATH_SAMPLES).max(1);

    let mut integrator = NBodyIntegrator::new(config)?;
    integrator.load(initial)?;

    let mut recorder = TrajectoryRecorder::new(every);
    recorder.record_initial(0.0, integrator.bodies());
    integrator.run_with(&mut recorder)?;

    let steps = integrator.steps_done();
    Ok((integrator.into_bodies(), recorder.into_paths(), steps))
}

fn initial_states(planets: &PlanetSet, seed: Seed<'_>) -> Result<Vec<Body>> {
    match seed {
        Seed::Keplerian => {
            let mut bodies = planets.bodies.clone();
            keplerian_approx(&planets.elements, &mut bodies, 0.0)?;
            Ok(bodies)
        }
        Seed::Reference(solutions) => {
            let reference = solutions.at(0.0)?;
            planets
                .bodies
                .iter()
                .map(|b| {
                    find_body(&reference, &b.name)
                        .map(|idx| Body { mass: b.mass, ..reference[idx].clone() })
                        .ok_or_else(|| {
                            Error::MissingEpoch(format!("{} at {}", b.name, epoch_key(0.0)))
                        })
                })
                .collect()
        }
    }
}

fn kepler_paths(planets: &PlanetSet, t: f64) -> Result<Vec<(String, Vec<PathSample>)>> {
    planets
        .elements
        .iter()
        .zip(&planets.bodies)
        .map(|(el, b)| Ok((b.name.clone(), kepler_path(el, b.mass, t)?)))
        .collect()
}

/// One full orbit sampled from the Keplerian solver, starting at `t`.
pub fn kepler_path(elements: &OrbitalElements, mass: f64, t: f64) -> Result<Vec<PathSample>> {
    let period = elements.period_for(mass);
    (0..ORBIT_SAMPLES)
        .map(|k| {
            let time = t + period * k as f64 / ORBIT_SAMPLES as f64;
            let (pos, vel) = state_at(elements, mass, time)?;
            Ok(PathSample { time, pos, vel })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::AU;

    #[test]
    fn keplerian_model_appends_sun() {
        let planets = PlanetSet::builtin().unwrap();
        let run = run_model(Model::Keplerian, &planets, 100.0, Seed::Keplerian).unwrap();
        assert_eq!(run.bodies.len(), 9);
        assert!(run.bodies[8].is_sun());
        assert_eq!(run.steps, 0);
        assert_eq!(run.paths.len(), 8);
        assert_eq!(run.paths[0].1.len(), ORBIT_SAMPLES);
    }

    #[test]
    fn hybrid_splits_at_divide() {
        let planets = PlanetSet::builtin().unwrap();
        let model = Model::Hybrid { divide: 4, dt: HYBRID_DT };
        let run = run_model(model, &planets, 70.0, Seed::Keplerian).unwrap();
        assert_eq!(run.steps, 10);
        let names: Vec<&str> = run.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune", "sun"]
        );

        // Inner planets identical to the pure Keplerian answer
        let kep = run_model(Model::Keplerian, &planets, 70.0, Seed::Keplerian).unwrap();
        assert_eq!(run.bodies[..4], kep.bodies[..4]);
        // Outer planets close to it after ten weeks
        for i in 4..8 {
            let d = run.bodies[i].distance_to(&kep.bodies[i]);
            assert!(d / AU < 0.05, "{} differs by {:.4} AU", names[i], d / AU);
        }
    }

    #[test]
    fn nbody_at_epoch_is_keplerian_seed() {
        let planets = PlanetSet::builtin().unwrap();
        let run = run_model(Model::NBody { dt: NBODY_DT }, &planets, 0.0, Seed::Keplerian).unwrap();
        let kep = run_model(Model::Keplerian, &planets, 0.0, Seed::Keplerian).unwrap();
        assert_eq!(run.steps, 0);
        assert_eq!(run.bodies, kep.bodies);
    }

    #[test]
    fn reference_seed_needs_every_planet() {
        let planets = PlanetSet::builtin().unwrap();
        let solutions = Solutions::from_json_str(
            r#"{"JD2451544.5": [{"name": "earth", "pos_km": [1.0e8, 0, 0],
                "vel_km_s": [0, 30, 0], "mass_kg": 5.97e24}]}"#,
        )
        .unwrap();
        let err = run_model(Model::NBody { dt: NBODY_DT }, &planets, 1.0, Seed::Reference(&solutions));
        assert!(matches!(err, Err(Error::MissingEpoch(_))));
    }

    #[test]
    fn model_names_parse() {
        assert_eq!("Kepler".parse::<ModelKind>().unwrap(), ModelKind::Keplerian);
        assert_eq!("n-body".parse::<ModelKind>().unwrap(), ModelKind::NBody);
        assert!("ptolemaic".parse::<ModelKind>().is_err());
        assert_eq!(ModelKind::NBody.with(None, 4), Model::NBody { dt: NBODY_DT });
    }
}
