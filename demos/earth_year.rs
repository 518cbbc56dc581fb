use orrery::dynamics::{Body, Vec3};
use orrery::physics::constants::{mu_sun, AU, DAY};
use orrery::sim::{IntegratorConfig, NBodyIntegrator, TrajectoryRecorder};

fn main() -> orrery::Result<()> {
    println!("=== Sun + Earth, one year of RK4 ===\n");

    let m = 5.9724e24;
    let v = (mu_sun(m) / AU).sqrt();
    let bodies = vec![
        Body::new("earth", Vec3::new(AU, 0.0, 0.0), Vec3::new(0.0, v, 0.0), m),
        Body::sun(),
    ];

    let config = IntegratorConfig::new(600.0, 365.25 * DAY);
    let mut integrator = NBodyIntegrator::new(config)?;
    integrator.load(bodies)?;

    // One sample per ~30 days
    let mut recorder = TrajectoryRecorder::new(4320);
    recorder.record_initial(0.0, integrator.bodies());
    integrator.run_with(&mut recorder)?;

    for s in &recorder.paths()[0] {
        println!("  day {:>6.1}   r = {:.9} AU", s.time / DAY, s.pos.norm() / AU);
    }

    let earth = &integrator.bodies()[0];
    let sun = &integrator.bodies()[1];
    println!();
    println!("Steps: {}", integrator.steps_done());
    println!("Final Earth-Sun distance: {:.9} AU", earth.distance_to(sun) / AU);
    Ok(())
}
