//! The fixed table of engine running modes a full generation materializes.

use crate::axes::AxisId;

/// Deck filename prefix shared by every mode.
pub const DECK_PREFIX: &str = "music_input";

/// Engine running modes covered by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Hydrodynamic evolution only (engine mode 2).
    Evolution,
    /// Thermal particle spectra from a freeze-out surface (mode 3).
    ThermalSpectra,
    /// Resonance decay feed-down (mode 4).
    ResonanceDecays,
    /// Observables from thermal spectra (mode 13).
    ThermalObservables,
    /// Observables from post-decay spectra (mode 14).
    DecayedObservables,
}

impl RunMode {
    /// Integer tag the engine recognizes in `control.mode`.
    pub fn engine_id(self) -> i64 {
        match self {
            RunMode::Evolution => 2,
            RunMode::ThermalSpectra => 3,
            RunMode::ResonanceDecays => 4,
            RunMode::ThermalObservables => 13,
            RunMode::DecayedObservables => 14,
        }
    }

    /// Looks up a mode by its engine tag.
    pub fn from_engine_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(RunMode::Evolution),
            3 => Some(RunMode::ThermalSpectra),
            4 => Some(RunMode::ResonanceDecays),
            13 => Some(RunMode::ThermalObservables),
            14 => Some(RunMode::DecayedObservables),
            _ => None,
        }
    }
}

/// Static description of one mode's deck requirements.
#[derive(Debug, Clone, Copy)]
pub struct ModeDefinition {
    /// The mode this row describes.
    pub mode: RunMode,
    /// Variant axes that change this mode's decks.
    pub axes: &'static [AxisId],
    /// Whether the mode collects spectra into observables. The rapidity
    /// axis additionally swaps the collection windows for these modes.
    pub collects_observables: bool,
}

impl ModeDefinition {
    /// True when `axis` changes this mode's decks.
    pub fn applies(&self, axis: AxisId) -> bool {
        self.axes.contains(&axis)
    }

    /// Returns the definition for `mode`.
    pub fn for_mode(mode: RunMode) -> ModeDefinition {
        match mode {
            RunMode::Evolution => ModeDefinition {
                mode,
                axes: &[],
                collects_observables: false,
            },
            RunMode::ThermalSpectra => ModeDefinition {
                mode,
                axes: &[AxisId::Nodeltaf, AxisId::Rapidity],
                collects_observables: false,
            },
            RunMode::ResonanceDecays => ModeDefinition {
                mode,
                axes: &[AxisId::Rapidity],
                collects_observables: false,
            },
            RunMode::ThermalObservables => ModeDefinition {
                mode,
                axes: &[AxisId::Rapidity],
                collects_observables: true,
            },
            RunMode::DecayedObservables => ModeDefinition {
                mode,
                axes: &[AxisId::Rapidity],
                collects_observables: true,
            },
        }
    }
}

/// The modes in generation order.
pub fn mode_table() -> [ModeDefinition; 5] {
    [
        RunMode::Evolution,
        RunMode::ThermalSpectra,
        RunMode::ResonanceDecays,
        RunMode::ThermalObservables,
        RunMode::DecayedObservables,
    ]
    .map(ModeDefinition::for_mode)
}

/// Deck filename for a mode plus variant suffix.
pub fn deck_filename(mode: RunMode, suffix: &str) -> String {
    format!("{DECK_PREFIX}_{}{suffix}", mode.engine_id())
}
