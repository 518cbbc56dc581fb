use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use orrery::io::report::{summarize, BodyReport};
use orrery::io::PlanetSet;
use orrery::physics::constants::AU;
use orrery::sim::{run_model, Model, ModelRun, Seed};

/// One Jupiter period of integration by default
const DEFAULT_DAYS: f64 = 4332.6;

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let days = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_DAYS);

    let run = match PlanetSet::builtin().and_then(|p| run_model(Model::default(), &p, days, Seed::Keplerian)) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("orrery-viz: {}", e);
            std::process::exit(1);
        }
    };
    let rows = summarize(&run.bodies);

    let app = OrreryViz { run, rows, days };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Orrery", options, Box::new(|_| Ok(Box::new(app))))
}

struct OrreryViz {
    run: ModelRun,
    rows: Vec<BodyReport>,
    days: f64,
}

impl eframe::App for OrreryViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Solar system at J2000 {:+.1} d", self.days));
            ui.label(format!(
                "Model: {}  |  Steps: {}  |  Bodies: {}",
                Model::default(),
                self.run.steps,
                self.run.bodies.len(),
            ));
        });

        egui::SidePanel::right("table").show(ctx, |ui| {
            egui::Grid::new("bodies").striped(true).show(ui, |ui| {
                ui.label("body");
                ui.label("sun (AU)");
                ui.label("v (km/s)");
                ui.end_row();
                for r in &self.rows {
                    ui.label(r.name.as_str());
                    ui.label(format!("{:.4}", r.sun_distance_au));
                    ui.label(format!("{:.3}", r.speed_km_s));
                    ui.end_row();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Ecliptic plane, AU
            Plot::new("orbits")
                .data_aspect(1.0)
                .x_axis_label("x (AU)")
                .y_axis_label("y (AU)")
                .show(ui, |plot_ui| {
                    for (name, samples) in &self.run.paths {
                        let step = (samples.len() / 2000).max(1);
                        let points: PlotPoints = samples
                            .iter()
                            .step_by(step)
                            .map(|s| [s.pos.x / AU, s.pos.y / AU])
                            .collect();
                        plot_ui.line(Line::new(name.clone(), points));
                    }
                    let finals: PlotPoints = self
                        .run
                        .bodies
                        .iter()
                        .map(|b| [b.pos.x / AU, b.pos.y / AU])
                        .collect();
                    plot_ui.points(Points::new("positions", finals).radius(4.0));
                });
        });
    }
}
