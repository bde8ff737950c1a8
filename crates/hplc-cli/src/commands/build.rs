use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hplc_core::{load_config, RunConfig, TrayLabel};
use hplc_io::{generate, GenerateRequest};
use log::{info, warn};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Manifest folder holding `vials.csv` and a `plates/` folder.
    #[arg(long)]
    pub folder: PathBuf,
    /// YAML run configuration; flags below override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Instrument method for every injection (plates only when a vial method is set).
    #[arg(long)]
    pub instrument_method: Option<String>,
    /// Instrument method for vial injections.
    #[arg(long)]
    pub vial_instrument_method: Option<String>,
    /// Injection volume in microlitres.
    #[arg(long)]
    pub injection_volume: Option<f64>,
    /// Number of leading trays reserved for 96-well plates.
    #[arg(long)]
    pub plate_tray_number: Option<usize>,
    /// Total number of times the standards block is run.
    #[arg(long)]
    pub standard_repeats: Option<usize>,
    /// Tray colour codes available in the autosampler, in order.
    #[arg(long, num_args = 1..)]
    pub trays: Vec<String>,
    /// Injections per non-standard sample.
    #[arg(long)]
    pub technical_replicates: Option<usize>,
    /// Output folder (defaults to `<folder>_output`).
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Write into an existing output folder.
    #[arg(long)]
    pub force: bool,
}

impl BuildArgs {
    fn run_config(&self) -> Result<RunConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RunConfig::default(),
        };
        if let Some(method) = &self.instrument_method {
            config.instrument_method = method.clone();
        }
        if let Some(method) = &self.vial_instrument_method {
            config.vial_instrument_method = Some(method.clone());
        }
        if let Some(volume) = self.injection_volume {
            config.injection_volume = volume;
        }
        if let Some(count) = self.plate_tray_number {
            config.plate_tray_number = count;
        }
        if let Some(repeats) = self.standard_repeats {
            config.standard_repeats = repeats;
        }
        if !self.trays.is_empty() {
            config.trays = self.trays.iter().map(|t| TrayLabel::new(t.as_str())).collect();
        }
        if let Some(replicates) = self.technical_replicates {
            config.technical_replicates = replicates;
        }
        Ok(config)
    }
}

pub fn run(args: &BuildArgs) -> Result<(), Box<dyn Error>> {
    let config = args.run_config()?;
    let request = GenerateRequest {
        folder: args.folder.clone(),
        output: args.output.clone(),
        force: args.force,
    };
    let artefacts = generate(&request, &config)?;
    for skipped in &artefacts.summary.skipped_plates {
        warn!("plate table {} was not used", skipped.path.display());
    }
    info!("sequence table: {}", artefacts.sequence.display());
    info!("loading protocol: {}", artefacts.protocol.display());
    info!("run summary: {}", artefacts.summary_path.display());
    println!("{}", artefacts.output_dir.display());
    Ok(())
}
