//! Variant expansion, deck generation, and cluster submit script assembly
//! for the MUSIC pipeline.

mod axes;
mod config;
mod decks;
mod expand;
mod hash;
mod manifest;
mod modes;
mod script;

pub use axes::{declared_axes, suffix_for, AxisId, AxisToggles, VariantAxis, NAMING_ORDER};
pub use config::SubmitConfig;
pub use decks::{generate_decks, DeckRecord};
pub use expand::{expand_variants, VariantDescriptor};
pub use hash::sha256_hex;
pub use manifest::{GenerationManifest, ScriptRecord, MANIFEST_NAME};
pub use modes::{deck_filename, mode_table, ModeDefinition, RunMode, DECK_PREFIX};
pub use script::{
    build_submit_script, stage_directory, PipelineStage, SubmitScript, SPECTRA_DIR_BASE,
    SUBMIT_SCRIPT_NAME,
};
