use orrery::dynamics::VectorExt;
use orrery::io::PlanetSet;
use orrery::orbital::kepler::{eccentric_anomaly, mean_anomaly_at};
use orrery::orbital::{body_at, state_at};
use orrery::physics::constants::{AU, DAY, KM};

fn main() -> orrery::Result<()> {
    println!("=== Mercury at J2000 ===\n");

    let planets = PlanetSet::builtin()?;
    let el = planets.elements[0];
    let mass = planets.bodies[0].mass;

    println!("a = {:.6} AU, e = {:.6}, i = {:.3} deg", el.sma / AU, el.ecc, el.inc.to_degrees());
    println!("Period: {:.2} days", el.period_for(mass) / DAY);
    println!();

    let mercury = body_at(&planets.bodies[0].name, &el, mass, 0.0)?;
    let (pos, vel) = (mercury.pos, mercury.vel);
    println!("Position [m]:   {}", pos.display());
    println!("Velocity [m/s]: {}", vel.display());
    println!("r = {:.6} AU, v = {:.3} km/s", pos.norm() / AU, vel.norm() / KM);
    println!();

    // One quarter period at a time
    println!("=== Quarter-period samples ===\n");
    let period = el.period_for(mass);
    for k in 0..=4 {
        let t = period * k as f64 / 4.0;
        let m = mean_anomaly_at(el.mean_anom, period, t);
        let ea = eccentric_anomaly(el.ecc, m)?;
        let (p, _) = state_at(&el, mass, t)?;
        println!(
            "  t={:>7.2} d   M={:>7.2} deg   E={:>7.2} deg   r={:.4} AU",
            t / DAY,
            m.to_degrees(),
            ea.to_degrees(),
            p.norm() / AU,
        );
    }
    Ok(())
}
