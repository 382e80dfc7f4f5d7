//! Desktop host for the dualhunt session.
//!
//! Single-threaded fixed-rate loop: prepare the driver, deliver its button
//! events, then tick the hunt with the driver's pose and targeting sample.
//! Presentation output goes to the log.

mod autopilot;
mod driver;
mod presentation;
mod script;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dualhunt_core::{Hunt, HuntConfig};

use crate::driver::LoopConfig;
use crate::presentation::LogPresentation;

#[derive(Parser)]
#[command(name = "dualhunt")]
#[command(about = "Run a dual-reality scavenger hunt session on the desktop", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Number of collectible items
    #[arg(long, global = true)]
    items: Option<usize>,

    /// Fade-out and fade-in duration in seconds
    #[arg(long, global = true)]
    fade: Option<f32>,

    /// Fully-faded hold in seconds
    #[arg(long, global = true)]
    hold: Option<f32>,

    /// Hand-to-head distance that fires the gesture, in metres
    #[arg(long, global = true)]
    threshold: Option<f32>,

    /// Simulation tick rate (1 to 1000)
    #[arg(long, global = true, default_value = "60")]
    fps: f32,

    /// Give up after this many ticks
    #[arg(long, global = true, default_value = "100000")]
    max_ticks: u64,

    /// Sleep between ticks to run at wall-clock rate
    #[arg(long, global = true)]
    realtime: bool,

    /// Simulate a presentation layer without a fade overlay
    #[arg(long, global = true)]
    no_overlay: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the built-in player complete the hunt
    Autoplay {
        /// Number of play-throughs, restarting in between
        #[arg(long, default_value = "1")]
        rounds: u32,
    },
    /// Play an input script (`-` reads stdin)
    Script {
        /// Script file path
        input: PathBuf,
    },
}

impl Cli {
    fn hunt_config(&self) -> HuntConfig {
        let defaults = HuntConfig::default();
        HuntConfig {
            item_count: self.items.unwrap_or(defaults.item_count),
            fade_seconds: self.fade.unwrap_or(defaults.fade_seconds),
            hold_seconds: self.hold.unwrap_or(defaults.hold_seconds),
            gesture_threshold: self.threshold.unwrap_or(defaults.gesture_threshold),
            ..defaults
        }
    }

    fn pacing(&self) -> LoopConfig {
        LoopConfig {
            fps: self.fps,
            max_ticks: self.max_ticks,
            realtime: self.realtime,
        }
    }
}

fn read_script(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read script {}", input.display()))
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut hunt = Hunt::new(cli.hunt_config(), LogPresentation::new(!cli.no_overlay))
        .context("invalid hunt configuration")?;
    log::info!("dualhunt: {} item(s)", hunt.item_count());

    let ticks = match &cli.command {
        Commands::Autoplay { rounds } => {
            let mut pilot = autopilot::Autopilot::new(*rounds);
            driver::run(&mut hunt, &mut pilot, cli.pacing())?
        }
        Commands::Script { input } => {
            let text = read_script(input)?;
            let mut script = script::ScriptInput::from_text(&text)
                .with_context(|| format!("invalid script {}", input.display()))?;
            driver::run(&mut hunt, &mut script, cli.pacing())?
        }
    };

    if !cli.quiet {
        let stats = hunt.presenter().stats();
        eprintln!(
            "Success: {:?} after {ticks} ticks ({:.1}s simulated), {} item(s) collected, {} completion(s)",
            hunt.lifecycle(),
            ticks as f32 / cli.fps,
            stats.collected,
            stats.completions
        );
        eprintln!(
            "         {} view change(s), {} feedback message(s), {} prompt(s)",
            stats.view_changes, stats.feedback_messages, stats.prompts
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
