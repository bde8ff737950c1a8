use std::error::Error;
use std::io::Write;

use chrono::Local;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::LevelFilter;

use commands::{
    build::{self, BuildArgs},
    setup_env::{self, SetupEnvArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "hplc-seq",
    about = "Autosampler sequence writer for HPLC sample manifests"
)]
struct Cli {
    /// Log debug detail (per-tray placement, omitted samples).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the sequence table, loading protocol and summary for a manifest folder.
    Build(BuildArgs),
    /// Create a template manifest folder.
    SetupEnv(SetupEnvArgs),
    /// Print the tool version.
    Version(VersionArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Build(args) => build::run(&args),
        Command::SetupEnv(args) => setup_env::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
