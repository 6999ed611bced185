use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use fitbit2garmin::{convert, ConvertConfig};

#[derive(Parser)]
#[command(name = "fitbit2garmin")]
#[command(version, about = "Convert a Fitbit data export into a Garmin Connect activities CSV", long_about = None)]
struct Cli {
    /// Folder with the Fitbit export JSON files (steps-*.json, calories-*.json, distance-*.json)
    source_dir: PathBuf,

    /// CSV file to create or overwrite
    output: PathBuf,
}

impl From<Cli> for ConvertConfig {
    fn from(cli: Cli) -> Self {
        ConvertConfig {
            source_dir: cli.source_dir,
            output: cli.output,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: ConvertConfig = Cli::parse().into();

    match convert(&config) {
        Ok(report) => {
            let skipped = report.skipped_files().count();
            if skipped > 0 {
                info!("{} source files could not be parsed and were skipped", skipped);
            }
            println!(
                "Garmin CSV saved to: {} ({} days)",
                report.output.display(),
                report.rows_written
            );
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
