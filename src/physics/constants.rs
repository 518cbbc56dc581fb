// ---------------------------------------------------------------------------
// Unit and physical constants (SI). The only constant set in the crate.
// ---------------------------------------------------------------------------

pub const AU: f64 = 149_597_870_691.0; // astronomical unit, m
pub const KM: f64 = 1_000.0; // m
pub const DAY: f64 = 86_400.0; // s
pub const YEAR: f64 = 31_556_952.0; // mean Gregorian year, s

pub const G: f64 = 6.674_30e-11; // gravitational constant, m^3 kg^-1 s^-2
pub const SOLAR_MASS: f64 = 1.9891e30; // kg

/// Julian day of 2000-01-01 00:00 UT, day zero of the epoch offset.
pub const EPOCH_JD: f64 = 2_451_544.5;

/// Standard gravitational parameter of the Sun plus an orbiting body.
pub fn mu_sun(mass: f64) -> f64 {
    G * (SOLAR_MASS + mass)
}
