//! Orbital-elements loader
//!
//! Reads the planets file: a JSON array of per-body element records in
//! table units (AU, degrees, kg, days), converted to SI and radians on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dynamics::Body;
use crate::error::{io_err, Result};
use crate::orbital::OrbitalElements;
use crate::physics::constants::{AU, DAY};

/// J2000 elements of the eight planets, shipped with the crate.
const BUILTIN_PLANETS: &str = include_str!("../../data/planets.json");

/// Relative mismatch between a supplied period and Kepler's third law that
/// is worth a warning.
const PERIOD_MISMATCH_WARN: f64 = 0.01;

/// One body as written in the planets file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub perihelion_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mass_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_days: Option<f64>,
}

impl PlanetRecord {
    pub fn to_elements(&self) -> OrbitalElements {
        let el = OrbitalElements::from_au_deg(
            self.semi_major_axis_au,
            self.eccentricity,
            self.inclination_deg,
            self.ascending_node_deg,
            self.perihelion_deg,
            self.mean_anomaly_deg,
        );
        match self.period_days {
            Some(days) => el.with_period(days * DAY),
            None => el,
        }
    }
}

/// Elements and bodies as parallel vectors: `elements[i]` belongs to
/// `bodies[i]`. Bodies carry name and mass; their state is filled in by
/// one of the solvers.
#[derive(Debug, Clone, Default)]
pub struct PlanetSet {
    pub elements: Vec<OrbitalElements>,
    pub bodies: Vec<Body>,
}

impl PlanetSet {
    pub fn from_records(records: &[PlanetRecord]) -> Result<Self> {
        let mut set = PlanetSet::default();
        for rec in records {
            let el = rec.to_elements();
            el.validate()?;
            let body = Body::at_rest(rec.name.clone(), rec.mass_kg);
            body.validate()?;

            if let Some(p) = el.period {
                let kepler = el.kepler_period(rec.mass_kg);
                let mismatch = (p - kepler).abs() / kepler;
                if mismatch > PERIOD_MISMATCH_WARN {
                    warn!(
                        body = %rec.name,
                        supplied_days = p / DAY,
                        kepler_days = kepler / DAY,
                        "supplied period disagrees with Kepler's third law; using supplied"
                    );
                }
            } else {
                debug!(body = %rec.name, "period derived from Kepler's third law");
            }

            set.elements.push(el);
            set.bodies.push(body);
        }
        Ok(set)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<PlanetRecord> = serde_json::from_str(json)?;
        Self::from_records(&records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let set = Self::from_json_str(&text)?;
        info!("Loaded {} bodies from {:?}", set.len(), path);
        Ok(set)
    }

    /// Built-in J2000 planet table.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PLANETS)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Planets from index `at` onward, as a separate set.
    pub fn split_off(&self, at: usize) -> (PlanetSet, PlanetSet) {
        let at = at.min(self.len());
        (
            PlanetSet {
                elements: self.elements[..at].to_vec(),
                bodies: self.bodies[..at].to_vec(),
            },
            PlanetSet {
                elements: self.elements[at..].to_vec(),
                bodies: self.bodies[at..].to_vec(),
            },
        )
    }

    /// Size of the system in whole AU: ceil of the largest semi-major axis.
    /// Assumes low eccentricities.
    pub fn approx_system_size(&self) -> usize {
        approx_system_size(&self.elements)
    }
}

/// ceil(max a / AU).
pub fn approx_system_size(elements: &[OrbitalElements]) -> usize {
    let largest = elements.iter().map(|e| e.sma).fold(0.0_f64, f64::max);
    (largest / AU).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TWO_PLANETS: &str = r#"[
        {"name": "mercury", "semi_major_axis_au": 0.387, "eccentricity": 0.2056,
         "inclination_deg": 7.0, "ascending_node_deg": 48.33, "perihelion_deg": 77.46,
         "mean_anomaly_deg": 174.8, "mass_kg": 3.3011e23},
        {"name": "mars", "semi_major_axis_au": 1.524, "eccentricity": 0.0934,
         "inclination_deg": 1.85, "ascending_node_deg": 49.56, "perihelion_deg": 336.06,
         "mean_anomaly_deg": 19.39, "mass_kg": 6.4171e23, "period_days": 686.98}
    ]"#;

    #[test]
    fn parses_and_converts_units() {
        let set = PlanetSet::from_json_str(TWO_PLANETS).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.bodies[0].name, "mercury");
        assert!((set.elements[0].sma - 0.387 * AU).abs() < 1.0);
        assert!((set.elements[0].inc - 7.0_f64.to_radians()).abs() < 1e-12);
        assert_eq!(set.elements[0].period, None);
        assert_eq!(set.elements[1].period, Some(686.98 * DAY));
        assert_eq!(set.bodies[1].mass, 6.4171e23);
    }

    #[test]
    fn builtin_has_eight_planets() {
        let set = PlanetSet::builtin().unwrap();
        assert_eq!(set.len(), 8);
        assert_eq!(set.bodies[2].name, "earth");
        assert_eq!(set.approx_system_size(), 31);
    }

    #[test]
    fn split_keeps_pairs_aligned() {
        let set = PlanetSet::builtin().unwrap();
        let (inner, outer) = set.split_off(4);
        assert_eq!(inner.len(), 4);
        assert_eq!(outer.bodies[0].name, "jupiter");
        assert_eq!(outer.elements[0], set.elements[4]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(PlanetSet::from_json_str("[{\"name\": 3}]"), Err(Error::Json(_))));
    }

    #[test]
    fn unbound_orbit_rejected() {
        let json = TWO_PLANETS.replace("0.2056", "1.2");
        assert!(matches!(PlanetSet::from_json_str(&json), Err(Error::InvalidElements(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        match PlanetSet::load("/nonexistent/planets.json") {
            Err(Error::File { path, .. }) => assert!(path.ends_with("planets.json")),
            other => panic!("expected file error, got {:?}", other.map(|s| s.len())),
        }
    }
}
