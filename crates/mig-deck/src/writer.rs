use std::fs;
use std::path::Path;

use mig_core::{ErrorInfo, MigError};

use crate::store::ParamStore;

/// Terminator line that ends every deck; the engine stops reading here.
pub const END_OF_DATA: &str = "EndOfData";

/// Renders the store to the engine's flat keyword format.
///
/// One `"<key>  <value>"` line per entry in [`ParamStore::snapshot`] order,
/// then the terminator. Equal store states render to identical bytes on
/// every platform.
pub fn render_deck(store: &ParamStore) -> String {
    let mut out = String::new();
    for (_, key, value) in store.snapshot() {
        out.push_str(key);
        out.push_str("  ");
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out.push_str(END_OF_DATA);
    out.push('\n');
    out
}

/// Writes the rendered deck to `path`, creating or truncating the file.
pub fn write_deck(store: &ParamStore, path: &Path) -> Result<(), MigError> {
    fs::write(path, render_deck(store)).map_err(|err| {
        MigError::Io(
            ErrorInfo::new("deck-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Parses deck text back into raw (key, value) string pairs.
///
/// Reads up to the terminator. A missing terminator, a key without a value,
/// or non-blank content after the terminator is an error. Values keep their
/// textual form; the caller decides how to interpret them.
pub fn parse_deck(text: &str) -> Result<Vec<(String, String)>, MigError> {
    let mut entries = Vec::new();
    let mut lines = text.lines();
    for line in lines.by_ref() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line == END_OF_DATA {
            for rest in lines.by_ref() {
                if !rest.trim().is_empty() {
                    return Err(MigError::Serde(
                        ErrorInfo::new("deck-trailing-content", "content after the EndOfData terminator")
                            .with_context("line", rest.trim()),
                    ));
                }
            }
            return Ok(entries);
        }
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        let value: Vec<&str> = tokens.collect();
        if value.is_empty() {
            return Err(MigError::Serde(
                ErrorInfo::new("deck-missing-value", "deck line has a key but no value")
                    .with_context("key", key),
            ));
        }
        entries.push((key.to_string(), value.join(" ")));
    }
    Err(MigError::Serde(ErrorInfo::new(
        "deck-missing-terminator",
        "deck ended without the EndOfData terminator",
    )))
}
