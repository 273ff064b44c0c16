use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use mig_batch::{expand_variants, ModeDefinition, RunMode};
use mig_deck::{render_deck, OverrideSpec, ParamStore, SectionId};

use crate::commands::generate::load_config;
use crate::overrides::{apply_config_overrides, OverrideArgs, VariantArgs};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Engine mode tag to render.
    #[arg(long, default_value_t = 2)]
    pub mode: i64,
    /// YAML job configuration; only its overrides table matters here.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub overrides: OverrideArgs,
    #[command(flatten)]
    pub variants: VariantArgs,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let Some(mode) = RunMode::from_engine_id(args.mode) else {
        return Err(format!(
            "unknown engine mode {}; expected 2, 3, 4, 13, or 14",
            args.mode
        )
        .into());
    };

    let config = load_config(args.config.as_deref())?;
    let mut store = ParamStore::with_defaults();
    apply_config_overrides(&mut store, &config.overrides)?;
    args.overrides.apply(&mut store)?;

    // The expansion lists the base variant first and the variant with every
    // enabled applicable axis last; show renders the latter.
    let definition = ModeDefinition::for_mode(mode);
    let Some(descriptor) = expand_variants(&definition, &args.variants.toggles())?.pop() else {
        return Err("variant expansion produced no descriptors".into());
    };

    let mode_override = [OverrideSpec::new(
        SectionId::Control,
        "mode",
        mode.engine_id(),
    )];
    let mut mode_scope = store.scoped(&mode_override);
    let variant_scope = mode_scope.scoped(&descriptor.overrides);
    print!("{}", render_deck(&variant_scope));
    Ok(())
}
