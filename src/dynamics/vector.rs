use std::fmt;

use nalgebra::Vector3;

/// Heliocentric Cartesian triple (m, m/s, or m/s^2 depending on use).
pub type Vec3 = Vector3<f64>;

/// Helpers nalgebra does not name the way the solver uses them.
///
/// Add, subtract, and scale are plain nalgebra operators; elementwise
/// multiply/divide are `component_mul` / `component_div`.
pub trait VectorExt {
    /// |self - other|^2
    fn distance_squared(&self, other: &Vec3) -> f64;

    /// Fixed-width `X: .. Y: .. Z: ..` form for console output.
    fn display(&self) -> VectorDisplay<'_>;
}

impl VectorExt for Vec3 {
    fn distance_squared(&self, other: &Vec3) -> f64 {
        (other - self).norm_squared()
    }

    fn display(&self) -> VectorDisplay<'_> {
        VectorDisplay(self)
    }
}

pub struct VectorDisplay<'a>(&'a Vec3);

impl fmt::Display for VectorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {:<14.5}Y: {:<14.5}Z: {:<14.5}",
            self.0.x, self.0.y, self.0.z
        )
    }
}
