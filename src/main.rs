use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use orrery::date::CalendarDate;
use orrery::io::console::prompt_date;
use orrery::io::{csv, json, report, PlanetSet, Solutions};
use orrery::physics::constants::EPOCH_JD;
use orrery::render::render_system;
use orrery::sim::model::{ModelKind, DEFAULT_DIVIDE};
use orrery::sim::{run_model, Seed};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Planet positions at a date, Keplerian or N-body")]
struct Cli {
    /// Target date, MM/DD/YYYY (prompted for when neither --date nor --days is given)
    #[arg(short, long, conflicts_with = "days")]
    date: Option<CalendarDate>,

    /// Target as days since 2000-01-01 0h UT
    #[arg(long, allow_negative_numbers = true)]
    days: Option<f64>,

    /// Planets file (JSON); built-in J2000 table when omitted
    #[arg(short, long)]
    planets: Option<PathBuf>,

    /// keplerian, nbody or hybrid
    #[arg(short, long, default_value = "hybrid")]
    model: ModelKind,

    /// First planet integrated in the hybrid model
    #[arg(long, default_value_t = DEFAULT_DIVIDE)]
    divide: usize,

    /// N-body step in hours (model default when omitted)
    #[arg(long)]
    dt_hours: Option<f64>,

    /// Reference solutions (JSON) for the error report and N-body seeding
    #[arg(short, long)]
    solutions: Option<PathBuf>,

    /// Seed N-body runs from the reference solutions instead of Kepler
    #[arg(long, requires = "solutions")]
    seed_from_solutions: bool,

    /// PNG output
    #[arg(long, default_value = "result.png")]
    image: PathBuf,

    /// Skip writing the image
    #[arg(long)]
    no_image: bool,

    /// Image side before upscaling, px
    #[arg(long, default_value_t = 500)]
    size: u32,

    /// Nearest-neighbour upscale factor
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Path samples as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------
    let days = match (cli.days, cli.date) {
        (Some(days), _) => days,
        (None, Some(date)) => date.days_since_epoch(),
        (None, None) => {
            let stdin = io::stdin();
            prompt_date(&mut stdin.lock(), &mut io::stdout())?.days_since_epoch()
        }
    };
    if !days.is_finite() {
        bail!("days must be finite, got {}", days);
    }

    let planets = match &cli.planets {
        Some(path) => PlanetSet::load(path)?,
        None => PlanetSet::builtin().context("built-in planet table")?,
    };
    if planets.is_empty() {
        bail!("no planets to compute");
    }

    let solutions = cli.solutions.as_ref().map(Solutions::load).transpose()?;
    let seed = match (&solutions, cli.seed_from_solutions) {
        (Some(s), true) => Seed::Reference(s),
        _ => Seed::Keplerian,
    };

    let dt = cli.dt_hours.map(|h| h * 3600.0);
    let model = cli.model.with(dt, cli.divide);

    // -----------------------------------------------------------------------
    // Run
    // -----------------------------------------------------------------------
    let run = run_model(model, &planets, days, seed)?;
    info!(steps = run.steps, "model finished");

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    writeln!(out, "====================================================================")?;
    writeln!(out, "  PLANET POSITIONS  JD {:.1}  ({:+.1} days from J2000)", days + EPOCH_JD, days)?;
    writeln!(out, "====================================================================")?;
    writeln!(out)?;
    writeln!(out, "  Model: {}   integrator steps: {}", model, run.steps)?;
    writeln!(out)?;
    report::print_results(&mut out, &run.bodies)?;
    writeln!(out)?;

    let errors = match &solutions {
        Some(s) => match s.at(days) {
            Ok(reference) => {
                let errors = report::ErrorReport::compare(&run.bodies, &reference);
                writeln!(out, "  Error vs. reference")?;
                errors.print(&mut out)?;
                writeln!(out)?;
                Some(errors)
            }
            Err(e) => {
                writeln!(out, "  {}", e)?;
                None
            }
        },
        None => None,
    };
    writeln!(out, "====================================================================")?;
    drop(out);

    // -----------------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------------
    if !cli.no_image {
        let system_size = planets.approx_system_size().max(1) as f64;
        let mut canvas = render_system(&run.bodies, &run.paths, cli.size, system_size)?;
        canvas.upscale(cli.scale)?;
        canvas.save(&cli.image)?;
    }
    if let Some(path) = &cli.csv {
        csv::write_paths_file(path, &run.paths)?;
    }
    if let Some(path) = &cli.summary {
        let summary = json::RunSummary::new(model, days, &run, errors);
        json::write_summary_file(path, &summary)?;
    }

    Ok(())
}
