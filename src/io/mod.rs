pub mod console;
pub mod csv;
pub mod json;
pub mod planets;
pub mod report;
pub mod solutions;

pub use planets::{PlanetRecord, PlanetSet};
pub use report::{print_results, ErrorReport};
pub use solutions::Solutions;
