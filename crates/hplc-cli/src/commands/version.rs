use std::error::Error;

use clap::Args;
use hplc_core::SchemaVersion;
use hplc_io::serde::to_canonical_json_bytes;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit the summary schema version alongside the tool version as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    summary_schema: SchemaVersion,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        summary_schema: SchemaVersion::default(),
    };
    let json = to_canonical_json_bytes(&info)?;
    print!("{}", String::from_utf8(json)?);
    Ok(())
}
