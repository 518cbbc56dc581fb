//! Keplerian state solver
//!
//! Maps orbital elements plus elapsed time since the epoch to a
//! heliocentric position and velocity. One body at a time, Sun-relative,
//! no coupling between planets. Every function here is pure.

use std::f64::consts::TAU;

use crate::dynamics::{Body, Vec3};
use crate::error::{Error, Result};
use crate::orbital::elements::OrbitalElements;
use crate::physics::constants::mu_sun;

/// Newton-Raphson stops once |ΔE| drops below this, rad.
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Iteration budget for Kepler's equation.
pub const KEPLER_MAX_ITER: usize = 20;

/// Mean anomaly advanced by `t` seconds, wrapped to [0, 2π).
/// At `t == 0` the epoch value is returned untouched.
pub fn mean_anomaly_at(mean_anom: f64, period: f64, t: f64) -> f64 {
    if t == 0.0 {
        return mean_anom;
    }
    let mean_motion = TAU / period; // rad/s
    let m = (mean_anom + mean_motion * t).rem_euclid(TAU);
    // rem_euclid of a tiny negative rounds up to exactly 2π
    if m >= TAU { 0.0 } else { m }
}

/// Solve Kepler's equation E − e·sin(E) = M for the eccentric anomaly.
pub fn eccentric_anomaly(ecc: f64, mean_anom: f64) -> Result<f64> {
    let e = ecc;
    let m = mean_anom;

    let mut ea = if e < 0.8 {
        m
    } else {
        m + e * m.sin() * (1.0 + e * m.cos())
    };

    let mut delta = f64::INFINITY;
    for _ in 0..KEPLER_MAX_ITER {
        delta = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(ea);
        }
    }

    Err(Error::Convergence {
        eccentricity: e,
        mean_anomaly: m,
        iterations: KEPLER_MAX_ITER,
        last_delta: delta,
    })
}

/// Heliocentric (position, velocity) of a body of `mass` at `t` seconds
/// after the epoch.
pub fn state_at(elements: &OrbitalElements, mass: f64, t: f64) -> Result<(Vec3, Vec3)> {
    elements.validate()?;

    let a = elements.sma;
    let e = elements.ecc;
    let i = elements.inc;
    let o = elements.lan;
    let p = elements.lon_peri;

    let m = mean_anomaly_at(elements.mean_anom, elements.period_for(mass), t);
    let ea = eccentric_anomaly(e, m)?;

    // Position in the orbital plane, x toward perihelion
    let xv = a * (ea.cos() - e);
    let yv = a * ((1.0 - e * e).sqrt() * ea.sin());

    let true_anom = yv.atan2(xv);
    let r = (xv * xv + yv * yv).sqrt();

    // Direction cosines of the radius vector (3-1-3 rotation by Ω, i, u)
    let u = true_anom + p - o;
    let (sin_o, cos_o) = o.sin_cos();
    let (sin_u, cos_u) = u.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();

    let xh = cos_o * cos_u - sin_o * sin_u * cos_i;
    let yh = sin_o * cos_u + cos_o * sin_u * cos_i;
    let zh = sin_u * sin_i;

    let pos = Vec3::new(r * xh, r * yh, r * zh);

    // Vis-viva speed, directed counterclockwise in the orbital plane
    let speed = (mu_sun(mass) * (2.0 / r - 1.0 / a)).sqrt();
    let vel = Vec3::new(-speed * yh, speed * xh, speed * zh);

    Ok((pos, vel))
}

/// `Body` named `name` at `t` seconds after the epoch.
pub fn body_at(name: &str, elements: &OrbitalElements, mass: f64, t: f64) -> Result<Body> {
    let (pos, vel) = state_at(elements, mass, t)?;
    Ok(Body::new(name, pos, vel, mass))
}

/// One-body approximation for each (elements, body) pair, in place.
/// Bodies keep their name and mass; only position and velocity change.
pub fn keplerian_approx(elements: &[OrbitalElements], bodies: &mut [Body], t: f64) -> Result<()> {
    for (el, body) in elements.iter().zip(bodies.iter_mut()) {
        let (pos, vel) = state_at(el, body.mass, t)?;
        body.pos = pos;
        body.vel = vel;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::{AU, DAY, KM};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const EARTH_MASS: f64 = 5.9724e24;

    fn earth_like() -> OrbitalElements {
        OrbitalElements {
            sma: AU,
            ecc: 0.0167,
            inc: 0.0,
            lan: 0.0,
            lon_peri: 102.94_f64.to_radians(),
            mean_anom: PI / 2.0,
            period: None,
        }
    }

    fn mercury() -> OrbitalElements {
        OrbitalElements {
            sma: 5.7909e10,
            ecc: 0.2056,
            inc: 7.00_f64.to_radians(),
            lan: 48.33_f64.to_radians(),
            lon_peri: 77.46_f64.to_radians(),
            mean_anom: 174.80_f64.to_radians(),
            period: None,
        }
    }

    #[test]
    fn kepler_equation_residual() {
        for ei in 0..=16 {
            let e = ei as f64 * 0.05;
            for mi in 0..72 {
                let m = mi as f64 * 5.0_f64.to_radians();
                let ea = eccentric_anomaly(e, m)
                    .unwrap_or_else(|err| panic!("e={} M={} did not converge: {}", e, m, err));
                let residual = (ea - e * ea.sin() - m).abs();
                assert!(residual < 1e-6, "e={} M={} residual {:e}", e, m, residual);
            }
        }
    }

    #[test]
    fn circular_orbit_anomalies_coincide() {
        let ea = eccentric_anomaly(0.0, 1.234).unwrap();
        assert_eq!(ea, 1.234);
    }

    #[test]
    fn high_eccentricity_guess_converges() {
        let ea = eccentric_anomaly(0.85, 0.3).unwrap();
        assert!((ea - 0.85 * ea.sin() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn non_convergence_is_an_error() {
        match eccentric_anomaly(0.5, f64::NAN) {
            Err(Error::Convergence { iterations, .. }) => assert_eq!(iterations, KEPLER_MAX_ITER),
            other => panic!("expected convergence failure, got {:?}", other),
        }
    }

    #[test]
    fn near_parabolic_never_returns_garbage() {
        // Near-flat derivative at M = 0
        let result = eccentric_anomaly(0.999_999_999, 1e-9);
        match result {
            Err(Error::Convergence { iterations, .. }) => assert_eq!(iterations, KEPLER_MAX_ITER),
            Ok(ea) => {
                // Accepting a converged answer is fine, garbage is not
                assert!((ea - 0.999_999_999 * ea.sin() - 1e-9).abs() < 1e-6);
            }
            Err(other) => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn mean_anomaly_wraps() {
        let period = 100.0;
        assert_eq!(mean_anomaly_at(1.0, period, 0.0), 1.0);
        let m = mean_anomaly_at(1.0, period, period * 3.0);
        assert_relative_eq!(m, 1.0, epsilon = 1e-9);
        let back = mean_anomaly_at(0.5, period, -period / 2.0);
        assert_relative_eq!(back, 0.5 + PI, epsilon = 1e-9);
        assert!((0.0..TAU).contains(&back));
        let tiny = mean_anomaly_at(0.0, period, -1e-16);
        assert!((0.0..TAU).contains(&tiny), "wrapped to {}", tiny);
    }

    #[test]
    fn earth_like_at_epoch() {
        let (pos, vel) = state_at(&earth_like(), EARTH_MASS, 0.0).unwrap();
        assert_relative_eq!(pos.norm(), AU, max_relative = 0.01);
        assert_relative_eq!(vel.norm(), 29.78 * KM, max_relative = 0.01);
        // Counterclockwise seen from +z
        assert!(pos.cross(&vel).z > 0.0);
    }

    #[test]
    fn idempotent() {
        let el = mercury();
        let first = state_at(&el, 3.3011e23, 123.0 * DAY).unwrap();
        let second = state_at(&el, 3.3011e23, 123.0 * DAY).unwrap();
        assert_eq!(first, second);
        assert_eq!(el, mercury());
    }

    #[test]
    fn mercury_matches_ephemeris() {
        let (pos, _) = state_at(&mercury(), 3.3011e23, 0.0).unwrap();
        let reference = Vec3::new(-2.1e10, -6.6e10, -3.5e9);
        let err = (pos - reference).norm() / reference.norm();
        assert!(err < 0.05, "Mercury off by {:.2}%: {:?}", err * 100.0, pos);
        assert!(pos.z < 0.0, "Mercury is below the ecliptic at J2000");
    }

    #[test]
    fn full_period_returns_to_start() {
        let el = mercury();
        let mass = 3.3011e23;
        let period = el.kepler_period(mass);
        let (p0, _) = state_at(&el, mass, 0.0).unwrap();
        let (p1, _) = state_at(&el, mass, period).unwrap();
        assert!((p1 - p0).norm() / p0.norm() < 1e-6);
    }

    #[test]
    fn distance_bounded_by_apsides() {
        let el = mercury();
        for k in 0..50 {
            let (pos, _) = state_at(&el, 3.3011e23, k as f64 * 2.0 * DAY).unwrap();
            let r = pos.norm();
            assert!(r >= el.perihelion() * (1.0 - 1e-9) && r <= el.aphelion() * (1.0 + 1e-9));
        }
    }

    #[test]
    fn invalid_elements_rejected() {
        let mut el = earth_like();
        el.ecc = 1.5;
        assert!(matches!(state_at(&el, EARTH_MASS, 0.0), Err(Error::InvalidElements(_))));
    }

    #[test]
    fn body_at_wraps_state() {
        let body = body_at("mercury", &mercury(), 3.3011e23, 5.0 * DAY).unwrap();
        let (pos, vel) = state_at(&mercury(), 3.3011e23, 5.0 * DAY).unwrap();
        assert_eq!(body.name, "mercury");
        assert_eq!(body.mass, 3.3011e23);
        assert_eq!((body.pos, body.vel), (pos, vel));
    }

    #[test]
    fn batch_keeps_names_and_masses() {
        let elements = vec![earth_like(), mercury()];
        let mut bodies = vec![Body::at_rest("earth", EARTH_MASS), Body::at_rest("mercury", 3.3011e23)];
        keplerian_approx(&elements, &mut bodies, 10.0 * DAY).unwrap();
        assert_eq!(bodies[0].name, "earth");
        assert_eq!(bodies[1].mass, 3.3011e23);
        assert!(bodies.iter().all(|b| b.pos.norm() > 0.0));
    }
}
