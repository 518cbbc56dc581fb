use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dynamics::{Body, Vec3};
use crate::error::{io_err, Error, Result};
use crate::physics::constants::{EPOCH_JD, KM};

/// Reference state of one body, as exported from an ephemeris service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: String,
    pub pos_km: [f64; 3],
    pub vel_km_s: [f64; 3],
    pub mass_kg: f64,
}

impl ReferenceRecord {
    pub fn to_body(&self) -> Body {
        let [x, y, z] = self.pos_km;
        let [vx, vy, vz] = self.vel_km_s;
        Body::new(
            self.name.clone(),
            Vec3::new(x, y, z) * KM,
            Vec3::new(vx, vy, vz) * KM,
            self.mass_kg,
        )
    }
}

/// Reference ephemeris keyed by Julian day (`"JD2451544.5"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solutions {
    epochs: BTreeMap<String, Vec<ReferenceRecord>>,
}

/// Key for `days` since the epoch: one decimal on half days, none otherwise.
pub fn epoch_key(days: f64) -> String {
    let jd = days + EPOCH_JD;
    if jd - jd.trunc() == 0.5 {
        format!("JD{:.1}", jd)
    } else {
        format!("JD{:.0}", jd)
    }
}

impl Solutions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let solutions = Self::from_json_str(&text)?;
        info!("Loaded reference data for {} epochs from {:?}", solutions.epochs.len(), path);
        Ok(solutions)
    }

    /// Reference bodies at `days` since the epoch.
    pub fn at(&self, days: f64) -> Result<Vec<Body>> {
        let key = epoch_key(days);
        self.epochs
            .get(&key)
            .map(|records| records.iter().map(ReferenceRecord::to_body).collect())
            .ok_or(Error::MissingEpoch(key))
    }

    pub fn epochs(&self) -> impl Iterator<Item = &str> {
        self.epochs.keys().map(String::as_str)
    }
}
