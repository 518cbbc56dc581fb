pub mod body;
pub mod vector;

pub use body::{find_body, Body};
pub use vector::{Vec3, VectorExt};
