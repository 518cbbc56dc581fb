use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::dynamics::Body;
use crate::error::{io_err, Result};
use crate::io::report::{summarize, BodyReport, ErrorReport};
use crate::physics::constants::EPOCH_JD;
use crate::sim::ModelRun;

#[derive(Debug, Clone, Serialize)]
pub struct BodyState {
    pub name: String,
    pub mass_kg: f64,
    pub pos_m: [f64; 3],
    pub vel_m_s: [f64; 3],
}

impl From<&Body> for BodyState {
    fn from(b: &Body) -> Self {
        Self {
            name: b.name.clone(),
            mass_kg: b.mass,
            pos_m: [b.pos.x, b.pos.y, b.pos.z],
            vel_m_s: [b.vel.x, b.vel.y, b.vel.z],
        }
    }
}

/// Everything a run produced, for machine consumption.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub model: String,
    pub days_since_epoch: f64,
    pub julian_day: f64,
    pub steps: u64,
    pub bodies: Vec<BodyState>,
    pub report: Vec<BodyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorReport>,
}

impl RunSummary {
    pub fn new(model: impl ToString, days: f64, run: &ModelRun, errors: Option<ErrorReport>) -> Self {
        Self {
            model: model.to_string(),
            days_since_epoch: days,
            julian_day: days + EPOCH_JD,
            steps: run.steps,
            bodies: run.bodies.iter().map(BodyState::from).collect(),
            report: summarize(&run.bodies),
            errors,
        }
    }
}

/// Pretty-printed JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    let mut writer = BufWriter::new(file);
    write_summary(&mut writer, summary)?;
    writer.flush().map_err(|e| io_err(path, e))
}
