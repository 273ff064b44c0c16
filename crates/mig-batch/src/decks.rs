//! Deck generation: one serialized input file per (mode, variant) pair.

use std::fs;
use std::path::Path;

use mig_core::{ErrorInfo, MigError};
use mig_deck::{render_deck, OverrideSpec, ParamStore, SectionId};
use serde::{Deserialize, Serialize};

use crate::axes::AxisToggles;
use crate::expand::expand_variants;
use crate::hash::sha256_hex;
use crate::modes::{deck_filename, mode_table};

/// Record of one deck written during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    /// Engine mode tag the deck targets.
    pub mode: i64,
    /// Variant suffix; empty for the base deck.
    pub suffix: String,
    /// Filename relative to the output directory.
    pub filename: String,
    /// Hex SHA-256 of the deck bytes.
    pub sha256: String,
}

/// Writes every (mode, variant) deck into `out_dir` and returns the records
/// in generation order.
///
/// Each deck renders under layered scopes: the mode tag wraps a whole mode,
/// the variant overrides wrap a single write. Both unwind on exit, including
/// error exits, so the store leaves this function exactly as it entered.
pub fn generate_decks(
    store: &mut ParamStore,
    toggles: &AxisToggles,
    out_dir: &Path,
) -> Result<Vec<DeckRecord>, MigError> {
    fs::create_dir_all(out_dir).map_err(|err| {
        MigError::Io(
            ErrorInfo::new("deck-outdir", err.to_string())
                .with_context("path", out_dir.display().to_string()),
        )
    })?;

    let mut records = Vec::new();
    for definition in mode_table() {
        let mode_override = [OverrideSpec::new(
            SectionId::Control,
            "mode",
            definition.mode.engine_id(),
        )];
        let mut mode_scope = store.scoped(&mode_override);

        for descriptor in expand_variants(&definition, toggles)? {
            let variant_scope = mode_scope.scoped(&descriptor.overrides);
            let filename = deck_filename(definition.mode, &descriptor.suffix);
            let deck = render_deck(&variant_scope);

            let path = out_dir.join(&filename);
            fs::write(&path, &deck).map_err(|err| {
                MigError::Io(
                    ErrorInfo::new("deck-write", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?;

            records.push(DeckRecord {
                mode: definition.mode.engine_id(),
                suffix: descriptor.suffix.clone(),
                filename,
                sha256: sha256_hex(deck.as_bytes()),
            });
        }
    }
    Ok(records)
}
