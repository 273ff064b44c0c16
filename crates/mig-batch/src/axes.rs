//! The two boolean feature axes that derive named deck variants.

use mig_deck::{OverrideSpec, SectionId};
use serde::{Deserialize, Serialize};

/// Identifier for a variant axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisId {
    /// Drop the delta-f viscous correction from the Cooper-Frye pass.
    Nodeltaf,
    /// Bin spectra in rapidity instead of pseudorapidity.
    Rapidity,
}

impl AxisId {
    /// Short label used in diagnostics and stage titles.
    pub fn label(self) -> &'static str {
        match self {
            AxisId::Nodeltaf => "nodeltaf",
            AxisId::Rapidity => "y",
        }
    }

    /// Suffix appended to deck and directory names while the axis is active.
    pub fn suffix(self) -> &'static str {
        match self {
            AxisId::Nodeltaf => "_nodeltaf",
            AxisId::Rapidity => "_y",
        }
    }
}

/// Suffix concatenation order for combined variants. It intentionally
/// differs from the declared enumeration order: the rapidity suffix binds
/// closest to the base name (`music_input_3_y_nodeltaf`).
pub const NAMING_ORDER: [AxisId; 2] = [AxisId::Rapidity, AxisId::Nodeltaf];

/// A feature axis: the store overrides it layers while active.
#[derive(Debug, Clone)]
pub struct VariantAxis {
    /// Axis identifier.
    pub id: AxisId,
    /// Overrides applied for every mode the axis touches.
    pub overrides: Vec<OverrideSpec>,
    /// Extra overrides applied only for observable-collecting modes, where
    /// the rapidity and pseudorapidity collection windows trade places.
    pub window_overrides: Vec<OverrideSpec>,
}

/// The axes in declared (enumeration) order.
pub fn declared_axes() -> Vec<VariantAxis> {
    vec![
        VariantAxis {
            id: AxisId::Nodeltaf,
            overrides: vec![OverrideSpec::new(
                SectionId::Freeze,
                "Include_deltaf_qmu",
                0,
            )],
            window_overrides: Vec::new(),
        },
        VariantAxis {
            id: AxisId::Rapidity,
            overrides: vec![OverrideSpec::new(SectionId::Freeze, "pseudofreeze", 0)],
            window_overrides: vec![
                OverrideSpec::new(SectionId::Collect, "dNdy_y_min", -5.0),
                OverrideSpec::new(SectionId::Collect, "dNdy_y_max", 5.0),
                OverrideSpec::new(SectionId::Collect, "dNdy_eta_min", -0.5),
                OverrideSpec::new(SectionId::Collect, "dNdy_eta_max", 0.5),
            ],
        },
    ]
}

/// Concatenates the suffixes of the active axes in naming order.
pub fn suffix_for(active: &[AxisId]) -> String {
    let mut suffix = String::new();
    for axis in NAMING_ORDER {
        if active.contains(&axis) {
            suffix.push_str(axis.suffix());
        }
    }
    suffix
}

/// CLI-driven enable flags for the variant axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisToggles {
    /// Generate the `_nodeltaf` variants.
    #[serde(default)]
    pub nodeltaf: bool,
    /// Generate the `_y` variants.
    #[serde(default)]
    pub rapidity: bool,
}

impl AxisToggles {
    /// True when the given axis is enabled.
    pub fn enabled(&self, id: AxisId) -> bool {
        match id {
            AxisId::Nodeltaf => self.nodeltaf,
            AxisId::Rapidity => self.rapidity,
        }
    }
}
