use std::path::Path;

use clap::{Parser, Subcommand};
use config::{Config, File};

use super::{run, AppError, RunConfig};

/// Command line tool for turning checkpoint OD person-trip tables into
/// vehicle-trip tables by category
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AforoApp {
    #[command(subcommand)]
    pub op: AforoOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AforoOperation {
    /// route the OD tables and write one vehicle table per input file
    Process {
        /// configuration file defining the network, zonification, and
        /// capacity inputs.
        #[arg(short, long)]
        configuration_file: String,

        /// OD CSV files to process. checkpoint files carry their checkpoint
        /// id in the filename; other files are general queries.
        #[arg(short, long, required = true, num_args = 1..)]
        od_files: Vec<String>,

        /// location on disk to write output files. if not provided,
        /// use the current working directory.
        #[arg(short = 'u', long)]
        output_directory: Option<String>,
    },
}

impl AforoOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            AforoOperation::Process {
                configuration_file,
                od_files,
                output_directory,
            } => {
                let filepath = Path::new(configuration_file);
                let config = Config::builder()
                    .add_source(File::from(filepath))
                    .build()
                    .map_err(|e| {
                        let msg = format!("file '{configuration_file}' produced error: {e}");
                        AppError::InvalidUserInput(msg)
                    })?;
                let run_config = config.try_deserialize::<RunConfig>().map_err(|e| {
                    let msg = format!("error reading run config '{configuration_file}': {e}");
                    AppError::InvalidUserInput(msg)
                })?;
                let outdir = match output_directory {
                    Some(out) => Path::new(out),
                    None => Path::new(""),
                };
                run::run(&run_config, od_files, outdir)
            }
        }
    }
}
