use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mig_batch::{generate_decks, GenerationManifest, MANIFEST_NAME};
use mig_deck::ParamStore;

use crate::commands::generate::load_config;
use crate::overrides::{apply_config_overrides, OverrideArgs, VariantArgs};

#[derive(Args, Debug)]
pub struct DecksArgs {
    /// YAML job configuration; only its overrides table matters here.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for the decks and the manifest.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    #[command(flatten)]
    pub variants: VariantArgs,
}

pub fn run(args: &DecksArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let toggles = args.variants.toggles();

    let mut store = ParamStore::with_defaults();
    apply_config_overrides(&mut store, &config.overrides)?;
    args.overrides.apply(&mut store)?;

    let records = generate_decks(&mut store, &toggles, &args.out)?;
    let manifest = GenerationManifest::new(toggles, records, None);
    manifest.write(&args.out.join(MANIFEST_NAME))?;

    println!("wrote {} decks to {}", manifest.decks.len(), args.out.display());
    Ok(())
}
