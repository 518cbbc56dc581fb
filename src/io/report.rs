//! Console tables of the computed states, and the comparison against
//! reference ephemeris data.

use std::io::Write;

use serde::Serialize;

use crate::dynamics::{find_body, Body, Vec3};
use crate::error::Result;
use crate::physics::constants::{AU, KM};

/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub name: String,
    pub sun_distance_au: f64,
    pub earth_distance_au: Option<f64>,
    pub speed_km_s: f64,
}

/// Heliocentric distance, distance from Earth and speed of each body.
/// The Sun itself is skipped; Earth distance is `None` without an Earth.
pub fn summarize(bodies: &[Body]) -> Vec<BodyReport> {
    let sun_pos = find_body(bodies, "sun").map_or(Vec3::zeros(), |i| bodies[i].pos);
    let earth = find_body(bodies, "earth").map(|i| &bodies[i]);

    bodies
        .iter()
        .filter(|b| !b.is_sun())
        .map(|b| BodyReport {
            name: b.name.clone(),
            sun_distance_au: (b.pos - sun_pos).norm() / AU,
            earth_distance_au: earth.map(|e| b.distance_to(e) / AU),
            speed_km_s: b.speed() / KM,
        })
        .collect()
}

pub fn print_results<W: Write>(out: &mut W, bodies: &[Body]) -> Result<()> {
    writeln!(out, "  {:<10} {:>14} {:>14} {:>12}", "body", "sun (AU)", "earth (AU)", "v (km/s)")?;
    writeln!(out, "  {}", "─".repeat(54))?;
    for r in summarize(bodies) {
        let earth = match r.earth_distance_au {
            Some(d) => format!("{:>14.6}", d),
            None => format!("{:>14}", "-"),
        };
        writeln!(
            out,
            "  {:<10} {:>14.6} {} {:>12.4}",
            r.name, r.sun_distance_au, earth, r.speed_km_s
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Comparison against reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyError {
    pub name: String,
    pub position_pct: f64,
    pub velocity_pct: f64,
}

/// Percentage errors of heliocentric distance and speed, per body
/// present in both sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorReport {
    pub bodies: Vec<BodyError>,
    pub unmatched: Vec<String>,
}

fn percent(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        if value == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (value - reference).abs() / reference * 100.0
    }
}

impl ErrorReport {
    /// Computed distances are taken from the computed Sun (the origin if
    /// absent); reference data is heliocentric.
    pub fn compare(computed: &[Body], reference: &[Body]) -> Self {
        let sun_pos = find_body(computed, "sun").map_or(Vec3::zeros(), |i| computed[i].pos);
        let mut report = ErrorReport::default();
        for b in computed.iter().filter(|b| !b.is_sun()) {
            match find_body(reference, &b.name) {
                Some(i) => {
                    let r = &reference[i];
                    report.bodies.push(BodyError {
                        name: b.name.clone(),
                        position_pct: percent((b.pos - sun_pos).norm(), r.pos.norm()),
                        velocity_pct: percent(b.speed(), r.speed()),
                    });
                }
                None => report.unmatched.push(b.name.clone()),
            }
        }
        report
    }

    pub fn worst_position(&self) -> Option<&BodyError> {
        self.bodies.iter().max_by(|a, b| a.position_pct.total_cmp(&b.position_pct))
    }

    pub fn print<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "  {:<10} {:>12} {:>12}", "body", "pos err %", "vel err %")?;
        writeln!(out, "  {}", "─".repeat(36))?;
        for e in &self.bodies {
            writeln!(out, "  {:<10} {:>12.4} {:>12.4}", e.name, e.position_pct, e.velocity_pct)?;
        }
        if !self.unmatched.is_empty() {
            writeln!(out, "  no reference for: {}", self.unmatched.join(", "))?;
        }
        Ok(())
    }
}
