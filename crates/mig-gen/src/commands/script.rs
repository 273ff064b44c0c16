use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use mig_batch::{build_submit_script, SUBMIT_SCRIPT_NAME};

use crate::commands::generate::load_config;
use crate::overrides::VariantArgs;

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// YAML job configuration; cluster production defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for the script.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    #[command(flatten)]
    pub variants: VariantArgs,
}

pub fn run(args: &ScriptArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;

    fs::create_dir_all(&args.out)?;
    let workdir = args.out.canonicalize()?;

    let script = build_submit_script(&config, &args.variants.toggles(), &workdir)?;
    script.write(&args.out.join(SUBMIT_SCRIPT_NAME))?;

    println!(
        "wrote {} with {} stages to {}",
        SUBMIT_SCRIPT_NAME,
        script.stages().len(),
        args.out.display()
    );
    Ok(())
}
