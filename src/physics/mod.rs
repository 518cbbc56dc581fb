pub mod constants;
pub mod gravity;

pub use constants::{mu_sun, AU, DAY, G, KM, SOLAR_MASS, YEAR};
