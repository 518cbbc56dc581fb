use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::physics::constants::{mu_sun, AU, DAY};

/// Heliocentric Keplerian elements at the J2000 epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub sma: f64,            // semi-major axis a, m
    pub ecc: f64,            // eccentricity e (0 = circular)
    pub inc: f64,            // inclination i, rad
    pub lan: f64,            // longitude of ascending node Ω, rad
    pub lon_peri: f64,       // longitude of perihelion ϖ, rad
    pub mean_anom: f64,      // mean anomaly M₀ at epoch, rad
    pub period: Option<f64>, // orbital period, s (from data, if given)
}

impl OrbitalElements {
    /// Elements from the conventional table units: AU and degrees.
    pub fn from_au_deg(
        sma_au: f64,
        ecc: f64,
        inc_deg: f64,
        lan_deg: f64,
        lon_peri_deg: f64,
        mean_anom_deg: f64,
    ) -> Self {
        OrbitalElements {
            sma: sma_au * AU,
            ecc,
            inc: inc_deg.to_radians(),
            lan: lan_deg.to_radians(),
            lon_peri: lon_peri_deg.to_radians(),
            mean_anom: mean_anom_deg.to_radians(),
            period: None,
        }
    }

    pub fn with_period(mut self, period: f64) -> Self {
        self.period = Some(period);
        self
    }

    /// Kepler's third law period for a body of `mass` around the Sun, s.
    pub fn kepler_period(&self, mass: f64) -> f64 {
        2.0 * PI * (self.sma.powi(3) / mu_sun(mass)).sqrt()
    }

    /// Period used for mean motion: the supplied one, else Kepler's third law.
    pub fn period_for(&self, mass: f64) -> f64 {
        self.period.unwrap_or_else(|| self.kepler_period(mass))
    }

    /// Perihelion distance a(1 − e), m.
    pub fn perihelion(&self) -> f64 {
        self.sma * (1.0 - self.ecc)
    }

    /// Aphelion distance a(1 + e), m.
    pub fn aphelion(&self) -> f64 {
        self.sma * (1.0 + self.ecc)
    }

    /// Elliptical, finite elements only.
    pub fn validate(&self) -> Result<()> {
        let angles = [self.inc, self.lan, self.lon_peri, self.mean_anom];
        if !(self.sma.is_finite() && self.sma > 0.0) {
            return Err(Error::InvalidElements(format!(
                "semi-major axis must be positive, got {}",
                self.sma
            )));
        }
        if !(0.0..1.0).contains(&self.ecc) {
            return Err(Error::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {}",
                self.ecc
            )));
        }
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(Error::InvalidElements("non-finite angle".into()));
        }
        if let Some(p) = self.period {
            if !(p.is_finite() && p > 0.0) {
                return Err(Error::InvalidElements(format!(
                    "period must be positive, got {} days",
                    p / DAY
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::YEAR;

    fn earth() -> OrbitalElements {
        OrbitalElements::from_au_deg(1.000_002_61, 0.016_711_23, 0.0, 0.0, 102.937_681_93, 357.529_1)
    }

    #[test]
    fn earth_period_is_one_year() {
        let p = earth().kepler_period(5.9724e24);
        assert!(
            (p / YEAR - 1.0).abs() < 0.002,
            "Earth period should be ~1 yr, got {:.2} days",
            p / DAY
        );
    }

    #[test]
    fn supplied_period_wins() {
        let e = earth().with_period(400.0 * DAY);
        assert_eq!(e.period_for(5.9724e24), 400.0 * DAY);
    }

    #[test]
    fn table_units_converted() {
        let e = earth();
        assert!((e.sma - AU).abs() / AU < 1e-5);
        assert!((e.lon_peri - 102.937_681_93_f64.to_radians()).abs() < 1e-12);
        assert!(e.perihelion() < e.sma && e.sma < e.aphelion());
    }

    #[test]
    fn hyperbolic_rejected() {
        let mut e = earth();
        e.ecc = 1.2;
        assert!(matches!(e.validate(), Err(Error::InvalidElements(_))));
        e.ecc = 0.5;
        e.sma = -1.0;
        assert!(e.validate().is_err());
    }
}
