use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hplc_io::{write_template, DEFAULT_TEMPLATE_FOLDER};

#[derive(Args, Debug)]
pub struct SetupEnvArgs {
    /// Folder to create.
    #[arg(long, default_value = DEFAULT_TEMPLATE_FOLDER)]
    pub folder: PathBuf,
    /// Overwrite the template files of an existing folder.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &SetupEnvArgs) -> Result<(), Box<dyn Error>> {
    write_template(&args.folder, args.force)?;
    println!(
        "Created template manifest folder environment at location: {}",
        args.folder.display()
    );
    Ok(())
}
