// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gothic - run the Gothic mesh operators on scene snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gothic_mesh::Scene;
use gothic_tools::{
    invoke, AddDivineFlyingButtress, AddEdgeLoopToCone, AddFlyingButtress, ApexBisectParams,
    ConvertFanToLancet, ConvertInsetToLancetWindow, DivineButtressParams, FanToLancetParams,
    FlyingButtressParams, LancetParams, Operator,
};

mod config;
mod demo;

use config::Config;
use demo::DemoKind;

#[derive(Parser)]
#[command(name = "gothic")]
#[command(about = "Gothic architecture mesh operators", long_about = None)]
struct Cli {
    /// Scene snapshot to load (a demo scene is used when omitted)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,
    /// Where to write the resulting scene
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fixture scene
    Demo {
        #[arg(value_enum)]
        kind: DemoKind,
    },
    /// Add an edge loop around the apex of a cone
    ApexBisect {
        /// Position of the loop along each apex edge, from the apex
        #[arg(long, default_value_t = 0.5)]
        fraction: f64,
        /// Use the selected vertex as apex instead of the highest one
        #[arg(long)]
        manual: bool,
    },
    /// Rebuild the fan around the selected vertex into a lancet
    FanToLancet {
        #[arg(long, default_value_t = 0.5)]
        fraction: f64,
    },
    /// Convert the selected inset faces into a lancet window
    LancetWindow {
        #[arg(long, default_value_t = 0)]
        curve_segments: usize,
        #[arg(long, default_value_t = 0.6)]
        start_fraction: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        sharpness_in: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        sharpness_out: f64,
    },
    /// Add a wireframe flying buttress object
    FlyingButtress {
        #[arg(long, default_value_t = 3.0)]
        height: f64,
        #[arg(long, default_value_t = 0.5)]
        width: f64,
        #[arg(long, default_value_t = 1.0)]
        depth: f64,
        #[arg(long, default_value_t = 0.3)]
        curvature: f64,
    },
    /// Add a pier with a pointed arch rib
    DivineButtress {
        #[arg(long, default_value_t = 1.0)]
        pier_width: f64,
        #[arg(long, default_value_t = 1.0)]
        pier_depth: f64,
        #[arg(long, default_value_t = 5.0)]
        pier_height: f64,
        #[arg(long, default_value_t = 4.0)]
        arch_span: f64,
        #[arg(long, default_value_t = 3.0)]
        arch_height: f64,
        #[arg(long, default_value_t = 0.5)]
        arch_thickness: f64,
        #[arg(long, default_value_t = 12)]
        arch_segments: usize,
    },
}

fn main() -> Result<()> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(config.log.as_str())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let input = cli.input.as_deref();

    let scene = match cli.command {
        Commands::Demo { kind } => {
            let scene = demo::scene(kind)?;
            let json = scene.to_json(config.pretty)?;
            match &cli.output {
                Some(path) => write(path, &json)?,
                None => println!("{json}"),
            }
            return Ok(());
        }
        Commands::ApexBisect { fraction, manual } => {
            let mut scene = load(input, DemoKind::Cone)?;
            let op = AddEdgeLoopToCone::new(ApexBisectParams {
                fraction,
                auto_detect: !manual,
            });
            run(&op, &mut scene)?;
            scene
        }
        Commands::FanToLancet { fraction } => {
            let mut scene = load(input, DemoKind::Fan)?;
            run(&ConvertFanToLancet::new(FanToLancetParams { fraction }), &mut scene)?;
            scene
        }
        Commands::LancetWindow {
            curve_segments,
            start_fraction,
            sharpness_in,
            sharpness_out,
        } => {
            let mut scene = load(input, DemoKind::Window)?;
            let op = ConvertInsetToLancetWindow::new(LancetParams {
                curve_segments,
                start_fraction,
                sharpness_in,
                sharpness_out,
                ..Default::default()
            });
            run(&op, &mut scene)?;
            scene
        }
        Commands::FlyingButtress {
            height,
            width,
            depth,
            curvature,
        } => {
            let mut scene = load_or_empty(input)?;
            let op = AddFlyingButtress::new(FlyingButtressParams {
                height,
                width,
                depth,
                curvature,
            });
            run(&op, &mut scene)?;
            scene
        }
        Commands::DivineButtress {
            pier_width,
            pier_depth,
            pier_height,
            arch_span,
            arch_height,
            arch_thickness,
            arch_segments,
        } => {
            let mut scene = load_or_empty(input)?;
            let op = AddDivineFlyingButtress::new(DivineButtressParams {
                pier_width,
                pier_depth,
                pier_height,
                arch_span,
                arch_height,
                arch_thickness,
                arch_segments,
            });
            run(&op, &mut scene)?;
            scene
        }
    };

    if let Some(path) = &cli.output {
        write(path, &scene.to_json(config.pretty)?)?;
    }
    Ok(())
}

/// Runs one operator and prints its reports. A cancelled run is an error.
fn run<O: Operator>(op: &O, scene: &mut Scene) -> Result<()> {
    tracing::debug!(operator = O::ID, "invoking");
    let outcome = invoke(op, scene);
    for report in &outcome.reports {
        println!("{report}");
    }
    if !outcome.is_finished() {
        bail!("{} cancelled", O::LABEL);
    }
    Ok(())
}

fn load(input: Option<&Path>, fallback: DemoKind) -> Result<Scene> {
    match input {
        Some(path) => read(path),
        None => demo::scene(fallback),
    }
}

fn load_or_empty(input: Option<&Path>) -> Result<Scene> {
    match input {
        Some(path) => read(path),
        None => Ok(Scene::new()),
    }
}

fn read(path: &Path) -> Result<Scene> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let scene = Scene::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), objects = scene.len(), "loaded scene");
    Ok(scene)
}

fn write(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote scene");
    Ok(())
}
