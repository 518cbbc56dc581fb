use crate::dynamics::{Body, Vec3};
use crate::physics::constants::G;

// ---------------------------------------------------------------------------
// Newtonian point-mass gravity between bodies (heliocentric frame)
// ---------------------------------------------------------------------------

/// Acceleration at `pos` due to a point mass `source_mass` at `source_pos`.
/// Coincident positions contribute nothing.
pub fn pointmass_accel(pos: &Vec3, source_pos: &Vec3, source_mass: f64) -> Vec3 {
    let r = source_pos - pos;
    let dist_sq = r.norm_squared();
    let denom = dist_sq * dist_sq.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Vec3::zeros();
    }
    r * (G * source_mass / denom)
}

/// Net acceleration on body `index` placed at `pos`, with every other body
/// taken from `snapshot` as-is.
pub fn acceleration_on(index: usize, pos: &Vec3, snapshot: &[Body]) -> Vec3 {
    snapshot
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .fold(Vec3::zeros(), |acc, (_, other)| {
            acc + pointmass_accel(pos, &other.pos, other.mass)
        })
}

/// Accelerations of all bodies at their current positions.
///
/// Each unordered pair is visited once and applied with opposite signs.
/// The accumulation buffer is local to the call.
pub fn pairwise_accelerations(bodies: &[Body]) -> Vec<Vec3> {
    let n = bodies.len();
    let mut acc = vec![Vec3::zeros(); n];

    for i in 0..n {
        let bi = &bodies[i];
        for j in (i + 1)..n {
            let bj = &bodies[j];
            let r = bj.pos - bi.pos;
            let dist_sq = r.norm_squared();
            let denom = dist_sq * dist_sq.sqrt();
            if denom == 0.0 || !denom.is_finite() {
                continue;
            }
            let inv = G / denom;
            acc[i] += r * (inv * bj.mass);
            acc[j] -= r * (inv * bi.mass);
        }
    }

    acc
}

/// First pair of bodies sharing a position, if any.
pub fn find_coincident(bodies: &[Body]) -> Option<(usize, usize)> {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if bodies[i].pos == bodies[j].pos {
                return Some((i, j));
            }
        }
    }
    None
}
