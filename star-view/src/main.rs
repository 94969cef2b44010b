//! Application entry point for the star attractor viewer.
//!
//! This binary parses the command line, sets up logging and the
//! [`StarController`], then hands control to eframe. All UI state and
//! rendering are handled by [`Viewer`].

mod surface;
mod viewer;

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use star_core::{config::Config, controller::StarController};
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Attractor gliding between the points of a star", long_about = None)]
struct Cli {
    /// Number of star points.
    #[arg(short, long)]
    points: Option<usize>,
    /// Initial speed, within the configured speed range.
    #[arg(short, long)]
    speed: Option<u32>,
    /// Start in dark mode.
    #[arg(long)]
    dark: bool,
    /// Do not highlight the vertex the attractor is heading to.
    #[arg(long)]
    no_highlight: bool,
    /// JSON file overriding the default configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    let controller = match build_controller(&cli, config) {
        Ok(controller) => controller,
        Err(err) => {
            error!("cannot start: {err}");
            std::process::exit(1);
        }
    };

    eframe::run_native(
        "Star Attractor",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Viewer::new(cc.egui_ctx.clone(), controller)))),
    )
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Loads the config file if one was given, falling back to defaults on error.
fn load_config(path: Option<&std::path::Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };

    match Config::load(path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(err) => {
            error!("failed to load {}: {err}; using defaults", path.display());
            Config::default()
        }
    }
}

/// Applies the command-line overrides on top of the config defaults.
fn build_controller(
    cli: &Cli,
    config: Config,
) -> star_core::Result<StarController<rand::rngs::ThreadRng>> {
    let mut controller = StarController::new(config, rand::rng())?;

    if let Some(points) = cli.points {
        match controller.on_point_count_change(points) {
            Ok(applied) if applied != points => {
                warn!("--points {points} is out of range, using {applied}")
            }
            Ok(_) => {}
            Err(err) => warn!("--points ignored: {err}"),
        }
    }
    if let Some(speed) = cli.speed {
        let applied = controller.on_speed_change(speed);
        if applied != speed {
            warn!("--speed {speed} is out of range, using {applied}");
        }
    }
    controller.set_theme(cli.dark);
    controller.set_highlight_enabled(!cli.no_highlight);

    Ok(controller)
}
