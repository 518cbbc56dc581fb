pub mod elements;
pub mod kepler;

pub use elements::OrbitalElements;
pub use kepler::{body_at, eccentric_anomaly, keplerian_approx, mean_anomaly_at, state_at};
