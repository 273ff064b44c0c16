use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use mig_batch::{
    build_submit_script, generate_decks, sha256_hex, GenerationManifest, ScriptRecord,
    SubmitConfig, MANIFEST_NAME, SUBMIT_SCRIPT_NAME,
};
use mig_deck::ParamStore;

use crate::overrides::{apply_config_overrides, OverrideArgs, VariantArgs};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML job configuration; cluster production defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for the decks, the script, and the manifest.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    #[command(flatten)]
    pub variants: VariantArgs,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let toggles = args.variants.toggles();

    fs::create_dir_all(&args.out)?;
    // The scheduler needs an absolute working directory in the preamble.
    let workdir = args.out.canonicalize()?;

    let mut store = ParamStore::with_defaults();
    apply_config_overrides(&mut store, &config.overrides)?;
    args.overrides.apply(&mut store)?;

    // Assemble the script before writing anything: a staging directory
    // collision aborts the run with no files on disk.
    let script = build_submit_script(&config, &toggles, &workdir)?;
    let records = generate_decks(&mut store, &toggles, &args.out)?;

    script.write(&args.out.join(SUBMIT_SCRIPT_NAME))?;
    let script_record = ScriptRecord {
        filename: SUBMIT_SCRIPT_NAME.to_string(),
        sha256: sha256_hex(script.render().as_bytes()),
    };

    let manifest = GenerationManifest::new(toggles, records, Some(script_record));
    manifest.write(&args.out.join(MANIFEST_NAME))?;

    println!(
        "wrote {} decks and {} to {}",
        manifest.decks.len(),
        SUBMIT_SCRIPT_NAME,
        args.out.display()
    );
    Ok(())
}

/// Loads and validates the job configuration, falling back to the built-in
/// production defaults when no file is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SubmitConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => SubmitConfig::load(path)?,
        None => SubmitConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
