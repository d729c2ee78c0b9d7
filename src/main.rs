use clap::Parser;
use log::{error, info};
use soft_rasterizer::app::{run_cli, run_gui};
use soft_rasterizer::io::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

/// CPU software rasterizer.
#[derive(Parser, Debug)]
#[command(name = "soft-rasterizer", version)]
#[command(about = "CPU triangle rasterizer with normal mapping and Lambert/Phong shading")]
struct Cli {
    /// Scene/render configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render a single frame to disk without opening a window
    #[arg(long)]
    headless: bool,

    /// Output image path; overrides `render.output`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {:?}", path);
            match Config::load(path) {
                Ok(c) => c,
                Err(e) => {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            info!("No config given, using defaults.");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.render.output = output.display().to_string();
    }

    let result = if cli.headless {
        run_cli(&config, &PathBuf::from(&config.render.output))
    } else {
        run_gui(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
