use std::ops::{Deref, DerefMut};

use mig_core::{ErrorInfo, MigError, ParamValue};

use crate::section::{ParamSection, SectionId};

/// Value a key held before an override was applied.
///
/// Restoring with [`Prior::Absent`] removes the key entirely, so a section
/// returns to its exact pre-override shape rather than accumulating keys
/// that were only ever meaningful inside one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Prior {
    /// The key existed and held this value.
    Present(ParamValue),
    /// The key did not exist before the override.
    Absent,
}

/// One (section, key, value) override to apply and later revert.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideSpec {
    /// Target section.
    pub section: SectionId,
    /// Target key inside the section.
    pub key: String,
    /// Value the key holds while the override is active.
    pub value: ParamValue,
}

impl OverrideSpec {
    /// Creates an override spec.
    pub fn new(section: SectionId, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            section,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The five fixed configuration sections of one generation run.
///
/// A single store is shared across an entire run and mutated in place.
/// Callers layer temporary overrides on top of the base state and revert
/// them in reverse application order, either manually through
/// [`ParamStore::apply`] and [`ParamStore::restore`] or, preferably, through
/// the RAII guard returned by [`ParamStore::scoped`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamStore {
    sections: [ParamSection; 5],
}

impl ParamStore {
    /// Creates a store with all five sections empty.
    pub(crate) fn empty() -> Self {
        Self {
            sections: SectionId::ALL.map(ParamSection::new),
        }
    }

    /// Returns the section with the given identifier.
    pub fn section(&self, id: SectionId) -> &ParamSection {
        &self.sections[id as usize]
    }

    fn section_mut(&mut self, id: SectionId) -> &mut ParamSection {
        &mut self.sections[id as usize]
    }

    /// Sets `key` in `section` and reports what the key held before.
    ///
    /// The returned [`Prior`] is the receipt for the matching
    /// [`ParamStore::restore`] call. Keys absent from the section are
    /// permitted; they are appended and the receipt records the absence.
    pub fn apply(&mut self, section: SectionId, key: &str, value: ParamValue) -> Prior {
        match self.section_mut(section).set(key.to_string(), value) {
            Some(previous) => Prior::Present(previous),
            None => Prior::Absent,
        }
    }

    /// Returns `key` in `section` to its recorded prior state.
    ///
    /// A [`Prior::Absent`] receipt removes the key; the surrounding entries
    /// keep their order either way.
    pub fn restore(&mut self, section: SectionId, key: &str, prior: Prior) {
        let section = self.section_mut(section);
        match prior {
            Prior::Present(value) => {
                section.set(key.to_string(), value);
            }
            Prior::Absent => {
                section.remove(key);
            }
        }
    }

    /// Permanently overrides a key that must already exist in the section.
    ///
    /// Returns the replaced value. Keys outside the default tables are
    /// rejected before any mutation, so a misspelled override cannot invent
    /// a parameter the engine never reads.
    pub fn override_existing(
        &mut self,
        section: SectionId,
        key: &str,
        value: ParamValue,
    ) -> Result<ParamValue, MigError> {
        match self.section_mut(section).replace(key, value) {
            Some(previous) => Ok(previous),
            None => Err(MigError::Config(
                ErrorInfo::new("store-unknown-key", "override key is not part of the section defaults")
                    .with_context("section", section.as_str())
                    .with_context("key", key),
            )),
        }
    }

    /// Applies a list of overrides and returns a guard that reverts them in
    /// reverse order when dropped.
    ///
    /// The guard dereferences to the store, so generation code reads through
    /// it and opens nested scopes on it; the borrow checker then forces inner
    /// scopes to close before outer ones, which keeps reversion strictly
    /// last-in first-out.
    pub fn scoped(&mut self, overrides: &[OverrideSpec]) -> Scope<'_> {
        let mut applied = Vec::with_capacity(overrides.len());
        for spec in overrides {
            let prior = self.apply(spec.section, &spec.key, spec.value.clone());
            applied.push((spec.section, spec.key.clone(), prior));
        }
        Scope {
            store: self,
            applied,
        }
    }

    /// Ordered traversal of every entry: fixed section order first, key
    /// insertion order within each section.
    pub fn snapshot(&self) -> Vec<(SectionId, &str, &ParamValue)> {
        let mut entries = Vec::new();
        for section in &self.sections {
            for (key, value) in section.iter() {
                entries.push((section.id(), key, value));
            }
        }
        entries
    }
}

/// RAII guard over a batch of applied overrides.
///
/// Dropping the guard restores every override in reverse application order,
/// on every exit path including early returns and panics.
#[derive(Debug)]
pub struct Scope<'a> {
    store: &'a mut ParamStore,
    applied: Vec<(SectionId, String, Prior)>,
}

impl Deref for Scope<'_> {
    type Target = ParamStore;

    fn deref(&self) -> &ParamStore {
        self.store
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut ParamStore {
        self.store
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        while let Some((section, key, prior)) = self.applied.pop() {
            self.store.restore(section, &key, prior);
        }
    }
}
