use crate::dynamics::{Body, Vec3};
use crate::physics::gravity::{acceleration_on, pairwise_accelerations};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta over a body set
// ---------------------------------------------------------------------------
//
// Known approximation: while the k-stages of body i are built, every other
// body stays at its step-start state. The coupled system is not
// re-evaluated at intermediate times.

/// Single RK4 step of body `index` against the frozen `snapshot`.
/// `a_start` is the body's acceleration at the step start.
pub fn rk4_body_step(index: usize, snapshot: &[Body], a_start: Vec3, dt: f64) -> Body {
    let body = &snapshot[index];
    let accel = |pos: &Vec3| acceleration_on(index, pos, snapshot);

    let k1v = a_start * dt;
    let k1r = body.vel * dt;

    let k2v = accel(&(body.pos + k1r * 0.5)) * dt;
    let k2r = (body.vel + k1v * 0.5) * dt;

    let k3v = accel(&(body.pos + k2r * 0.5)) * dt;
    let k3r = (body.vel + k2v * 0.5) * dt;

    let k4v = accel(&(body.pos + k3r)) * dt;
    let k4r = (body.vel + k3v) * dt;

    Body {
        name: body.name.clone(),
        pos: body.pos + (k1r + 2.0 * k2r + 2.0 * k3r + k4r) / 6.0,
        vel: body.vel + (k1v + 2.0 * k2v + 2.0 * k3v + k4v) / 6.0,
        mass: body.mass,
    }
}

/// Advance every body by `dt`. Reads only from `bodies`; the result is a
/// new set that replaces the old one as a whole.
pub fn step_bodies(bodies: &[Body], dt: f64) -> Vec<Body> {
    let a_start = pairwise_accelerations(bodies);
    bodies
        .iter()
        .enumerate()
        .map(|(i, _)| rk4_body_step(i, bodies, a_start[i], dt))
        .collect()
}
