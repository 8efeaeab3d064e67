mod viewer;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use graph_relax::FitMode;
use graph_relax::source::load_config;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, help = "JSON graph definition, the built-in sample graph when omitted")]
    graph: Option<PathBuf>,
    #[arg(long, help = "JSON engine config, missing fields keep their defaults")]
    config: Option<PathBuf>,
    #[arg(long, help = "Simulation ticks per second of wall time")]
    tick_rate: Option<f64>,
    #[arg(long, help = "cover or contain")]
    fit_mode: Option<FitMode>,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 820.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref()).context("failed to load engine config")?;
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate_hz = tick_rate;
    }
    if let Some(fit_mode) = args.fit_mode {
        config.fit_mode = fit_mode;
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "graph-relax",
        options,
        Box::new(move |cc| {
            Ok(Box::new(viewer::GraphViewerApp::new(
                cc,
                args.graph.clone(),
                config.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
