// src/main.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use beamcal::config::AppConfig;
use beamcal::logging::CsvTrialLogger;
use beamcal::objective::CalibrationObjective;
use beamcal::params::PARAMS_PER_REGION;
use beamcal::runner::McstasSimulator;
use beamcal::scan::grid_scan;
use beamcal::search::{simplex_search, SearchSettings};

#[derive(Parser)]
#[command(name = "beamcal")]
#[command(about = "Calibrate SANS instrument simulation parameters against measured count rates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simplex search calibration
    Calibrate {
        /// Output directory for simulation runs and logs
        output_dir: PathBuf,

        /// Max number of iterations of the optimization scheme
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        max_iterations: u64,
    },
    /// Scan parameter space on a per-region scaling grid
    Scan {
        /// Output directory for simulation runs and logs
        output_dir: PathBuf,

        /// Number of samples along each scaling axis
        #[arg(long, default_value_t = 10)]
        samples: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::gp_sans();
    let simulator = McstasSimulator::default();

    match cli.command {
        Commands::Calibrate { output_dir, max_iterations } => {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
            let logger =
                CsvTrialLogger::create(&output_dir, config.initial_params.num_regions())?;

            let objective = CalibrationObjective {
                sample_count: config.sample_count,
                configs: &config.configs,
                reference: &config.reference,
                simulator: &simulator,
                logger: &logger,
                output_root: &output_dir,
            };
            let settings = SearchSettings {
                penalty_scale: config.penalty_scale,
                sd_tolerance: config.sd_tolerance,
                max_iterations,
            };

            let optimal =
                simplex_search(&config.initial_params, &config.bounds, &settings, objective)
                    .context("calibration run failed")?;

            println!("optimal params:");
            for i in 0..optimal.num_regions() {
                let row: Vec<f64> = (0..PARAMS_PER_REGION).map(|j| optimal.value(i, j)).collect();
                println!("  region {}: {:?}", i + 1, row);
            }
        }
        Commands::Scan { output_dir, samples } => {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
            let logger =
                CsvTrialLogger::create(&output_dir, config.initial_params.num_regions())?;

            grid_scan(
                &config.initial_params,
                &config.scan_configs,
                samples,
                config.sample_count,
                &simulator,
                &logger,
                &output_dir,
            )
            .context("parameter-space scan failed")?;
        }
    }

    Ok(())
}
