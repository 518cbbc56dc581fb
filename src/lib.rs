pub mod physics;
pub mod dynamics;
pub mod orbital;
pub mod sim;
pub mod io;
pub mod date;
pub mod render;
pub mod error;

pub use error::{Error, Result};

// Common types in one place for binaries and demos
pub mod prelude {
    pub use crate::date::CalendarDate;
    pub use crate::dynamics::{find_body, Body, Vec3, VectorExt};
    pub use crate::io::{PlanetSet, Solutions};
    pub use crate::orbital::{state_at, OrbitalElements};
    pub use crate::physics::constants::{AU, DAY, KM, YEAR};
    pub use crate::sim::{run_model, IntegratorConfig, Model, ModelRun, NBodyIntegrator, Seed};
}
