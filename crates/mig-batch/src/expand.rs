//! Expansion of the enabled axis toggles into ordered variant descriptors.

use std::collections::BTreeSet;

use mig_core::{ErrorInfo, MigError};
use mig_deck::OverrideSpec;

use crate::axes::{declared_axes, suffix_for, AxisId, AxisToggles, VariantAxis};
use crate::modes::ModeDefinition;

/// One materialized variant of a mode: the active axes, the name suffix,
/// and the overrides to layer around the deck write.
#[derive(Debug, Clone)]
pub struct VariantDescriptor {
    /// Active axes, in declared order.
    pub axes: Vec<AxisId>,
    /// Concatenated name suffix; empty for the base variant.
    pub suffix: String,
    /// Ordered override list for the scoped application.
    pub overrides: Vec<OverrideSpec>,
}

impl VariantDescriptor {
    /// True for the base (no axis) variant.
    pub fn is_base(&self) -> bool {
        self.axes.is_empty()
    }

    /// Parenthesized axis list for stage labels; empty for the base variant.
    pub fn label(&self) -> String {
        if self.axes.is_empty() {
            return String::new();
        }
        let labels: Vec<&str> = self.axes.iter().map(|axis| axis.label()).collect();
        format!(" ({})", labels.join("+"))
    }
}

/// Enumerates the variants of `mode` under the enabled toggles.
///
/// The order is fixed: the base variant first, single-axis variants in
/// declared axis order, the combined variant last. Enabled axes that do not
/// apply to the mode are skipped; the base variant is always present.
///
/// Every descriptor must resolve to a distinct suffix. With the current
/// fixed axis set that always holds, so a duplicate means the axis tables
/// themselves are broken and expansion refuses to continue.
pub fn expand_variants(
    mode: &ModeDefinition,
    toggles: &AxisToggles,
) -> Result<Vec<VariantDescriptor>, MigError> {
    let axes: Vec<VariantAxis> = declared_axes()
        .into_iter()
        .filter(|axis| toggles.enabled(axis.id) && mode.applies(axis.id))
        .collect();

    let mut subsets: Vec<u32> = (0..(1u32 << axes.len())).collect();
    subsets.sort_by_key(|mask| (mask.count_ones(), *mask));

    let mut descriptors = Vec::with_capacity(subsets.len());
    for mask in subsets {
        let active: Vec<&VariantAxis> = axes
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, axis)| axis)
            .collect();

        let ids: Vec<AxisId> = active.iter().map(|axis| axis.id).collect();
        let mut overrides = Vec::new();
        for axis in &active {
            overrides.extend(axis.overrides.iter().cloned());
            if mode.collects_observables {
                overrides.extend(axis.window_overrides.iter().cloned());
            }
        }

        descriptors.push(VariantDescriptor {
            suffix: suffix_for(&ids),
            axes: ids,
            overrides,
        });
    }

    ensure_distinct_suffixes(&descriptors)?;
    Ok(descriptors)
}

fn ensure_distinct_suffixes(descriptors: &[VariantDescriptor]) -> Result<(), MigError> {
    let mut seen = BTreeSet::new();
    for descriptor in descriptors {
        if !seen.insert(descriptor.suffix.as_str()) {
            return Err(MigError::Variant(
                ErrorInfo::new(
                    "variant-suffix-alias",
                    "two variant descriptors resolve to the same name suffix",
                )
                .with_context("suffix", descriptor.suffix.clone()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::RunMode;

    fn both_toggles() -> AxisToggles {
        AxisToggles {
            nodeltaf: true,
            rapidity: true,
        }
    }

    #[test]
    fn spectra_mode_expands_base_singles_combined() {
        let mode = ModeDefinition::for_mode(RunMode::ThermalSpectra);
        let variants = expand_variants(&mode, &both_toggles()).unwrap();
        let suffixes: Vec<&str> = variants.iter().map(|v| v.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["", "_nodeltaf", "_y", "_y_nodeltaf"]);
        assert!(variants[0].is_base());
        assert!(variants[0].overrides.is_empty());
    }

    #[test]
    fn inapplicable_axes_are_skipped() {
        let mode = ModeDefinition::for_mode(RunMode::ResonanceDecays);
        let variants = expand_variants(&mode, &both_toggles()).unwrap();
        let suffixes: Vec<&str> = variants.iter().map(|v| v.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["", "_y"]);
    }

    #[test]
    fn window_overrides_apply_only_to_collecting_modes() {
        let spectra = ModeDefinition::for_mode(RunMode::ThermalSpectra);
        let spectra_variants = expand_variants(&spectra, &both_toggles()).unwrap();
        let rapidity_spectra = &spectra_variants[2];
        assert_eq!(rapidity_spectra.suffix, "_y");
        assert_eq!(rapidity_spectra.overrides.len(), 1);

        let observables = ModeDefinition::for_mode(RunMode::ThermalObservables);
        let observable_variants = expand_variants(&observables, &both_toggles()).unwrap();
        let rapidity_observables = &observable_variants[1];
        assert_eq!(rapidity_observables.suffix, "_y");
        // pseudofreeze plus the four collection window swaps
        assert_eq!(rapidity_observables.overrides.len(), 5);
    }

    #[test]
    fn disabled_toggles_leave_only_the_base_variant() {
        let mode = ModeDefinition::for_mode(RunMode::ThermalSpectra);
        let variants = expand_variants(&mode, &AxisToggles::default()).unwrap();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].is_base());
    }
}
