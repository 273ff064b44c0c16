use std::fmt::{self, Display};

use indexmap::IndexMap;
use mig_core::{ErrorInfo, MigError, ParamValue};

/// Identifier for one of the five fixed configuration sections.
///
/// The variant order is the composition order: decks always serialize
/// control first and collect last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    /// Engine control switches (running mode, reload flags, echo level).
    Control,
    /// Initial condition profile selection and normalization.
    Initial,
    /// Hydrodynamic grid, evolution, and transport parameters.
    Hydro,
    /// Freeze-out surface and Cooper-Frye sampling parameters.
    Freeze,
    /// Spectra collection windows and binning.
    Collect,
}

impl SectionId {
    /// All sections in the fixed composition order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Control,
        SectionId::Initial,
        SectionId::Hydro,
        SectionId::Freeze,
        SectionId::Collect,
    ];

    /// Returns the section name used in override specs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Control => "control",
            SectionId::Initial => "initial",
            SectionId::Hydro => "hydro",
            SectionId::Freeze => "freeze",
            SectionId::Collect => "collect",
        }
    }

    /// Parses a section name, rejecting anything outside the fixed list.
    pub fn parse(name: &str) -> Result<Self, MigError> {
        match name {
            "control" => Ok(SectionId::Control),
            "initial" => Ok(SectionId::Initial),
            "hydro" => Ok(SectionId::Hydro),
            "freeze" => Ok(SectionId::Freeze),
            "collect" => Ok(SectionId::Collect),
            other => Err(MigError::Config(
                ErrorInfo::new("section-unknown", "section name is not in the fixed section list")
                    .with_context("section", other)
                    .with_hint("valid sections are control, initial, hydro, freeze, collect"),
            )),
        }
    }
}

impl Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named group of configuration entries, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSection {
    id: SectionId,
    entries: IndexMap<String, ParamValue>,
}

impl ParamSection {
    pub(crate) fn new(id: SectionId) -> Self {
        Self {
            id,
            entries: IndexMap::new(),
        }
    }

    /// Section identifier.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Inserts or updates an entry, returning the previous value if any.
    /// Updating keeps the key at its original position.
    pub(crate) fn set(&mut self, key: String, value: ParamValue) -> Option<ParamValue> {
        self.entries.insert(key, value)
    }

    /// Updates an entry only if the key already exists.
    pub(crate) fn replace(&mut self, key: &str, value: ParamValue) -> Option<ParamValue> {
        let slot = self.entries.get_mut(key)?;
        Some(std::mem::replace(slot, value))
    }

    /// Removes an entry, preserving the order of the remaining keys.
    pub(crate) fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.shift_remove(key)
    }
}
