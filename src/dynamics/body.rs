use crate::dynamics::vector::{Vec3, VectorExt};
use crate::error::{Error, Result};
use crate::physics::constants::SOLAR_MASS;

// ---------------------------------------------------------------------------
// Body: mutable simulation state
// ---------------------------------------------------------------------------

/// Cartesian state of one body. Frame: heliocentric ecliptic, origin at the
/// Sun's nominal position.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub pos: Vec3,  // m
    pub vel: Vec3,  // m/s
    pub mass: f64,  // kg
}

impl Body {
    pub fn new(name: impl Into<String>, pos: Vec3, vel: Vec3, mass: f64) -> Self {
        Self { name: name.into(), pos, vel, mass }
    }

    /// Body with state still to be computed.
    pub fn at_rest(name: impl Into<String>, mass: f64) -> Self {
        Self::new(name, Vec3::zeros(), Vec3::zeros(), mass)
    }

    /// The Sun at the origin, at rest.
    pub fn sun() -> Self {
        Self::at_rest("sun", SOLAR_MASS)
    }

    pub fn is_sun(&self) -> bool {
        self.name.eq_ignore_ascii_case("sun")
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Distance to another body, m.
    pub fn distance_to(&self, other: &Body) -> f64 {
        self.pos.distance_squared(&other.pos).sqrt()
    }

    /// Mass must be finite and positive, state must be finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(Error::InvalidBody {
                name: self.name.clone(),
                reason: format!("mass must be positive, got {}", self.mass),
            });
        }
        if !self.pos.iter().chain(self.vel.iter()).all(|c| c.is_finite()) {
            return Err(Error::InvalidBody {
                name: self.name.clone(),
                reason: "non-finite position or velocity".into(),
            });
        }
        Ok(())
    }
}

/// Index of a body by case-insensitive name.
pub fn find_body(bodies: &[Body], name: &str) -> Option<usize> {
    bodies.iter().position(|b| b.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_is_massive_and_at_origin() {
        let sun = Body::sun();
        assert!(sun.is_sun());
        assert_eq!(sun.pos, Vec3::zeros());
        assert_eq!(sun.speed(), 0.0);
        assert!(sun.validate().is_ok());
    }

    #[test]
    fn zero_mass_rejected() {
        let b = Body::at_rest("dust", 0.0);
        assert!(matches!(b.validate(), Err(Error::InvalidBody { .. })));
    }

    #[test]
    fn nan_state_rejected() {
        let b = Body::new("ghost", Vec3::new(f64::NAN, 0.0, 0.0), Vec3::zeros(), 1.0);
        assert!(b.validate().is_err());
    }

    #[test]
    fn lookup_by_name() {
        let bodies = vec![Body::at_rest("Mercury", 1.0), Body::at_rest("Earth", 1.0)];
        assert_eq!(find_body(&bodies, "earth"), Some(1));
        assert_eq!(find_body(&bodies, "pluto"), None);
    }
}
