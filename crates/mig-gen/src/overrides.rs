//! Permanent store overrides sourced from command line flags and the
//! configuration file, applied before any deck is rendered.

use std::collections::BTreeMap;

use clap::Args;
use mig_batch::AxisToggles;
use mig_core::{ErrorInfo, MigError, ParamValue};
use mig_deck::{ParamStore, SectionId};

/// Shorthand flags for the parameters that change between production runs.
///
/// Each flag rewrites a key that is part of the engine default tables, so a
/// misspelling in this mapping fails loudly instead of appending a parameter
/// the engine never reads.
#[derive(Args, Debug)]
pub struct OverrideArgs {
    /// Centrality tag; reads the averaged profile initial/sdAvg_order_2_C<CEN>.dat.
    #[arg(long)]
    pub cen: Option<String>,
    /// Event index; reads the single-event profile epsilon-u-Hydro<IEV>.dat.
    #[arg(long)]
    pub iev: Option<i64>,
    /// Shear viscosity to entropy density ratio.
    #[arg(long)]
    pub shear_vis: Option<f64>,
    /// Equation of state selector passed to the engine.
    #[arg(long)]
    pub eos: Option<i64>,
    /// Evolution data output switch.
    #[arg(long)]
    pub evo: Option<i64>,
    /// Hydro starting proper time in fm/c.
    #[arg(long)]
    pub tau0: Option<f64>,
    /// Extra override applied after the shorthand flags. Repeatable.
    #[arg(long = "set", value_name = "SECTION.KEY=VALUE")]
    pub set: Vec<String>,
}

impl OverrideArgs {
    /// Applies the shorthand flags, then every `--set` pair, to the store.
    pub fn apply(&self, store: &mut ParamStore) -> Result<(), MigError> {
        if self.cen.is_some() && self.iev.is_some() {
            return Err(MigError::Config(ErrorInfo::new(
                "cli-profile-conflict",
                "--cen and --iev both select the initial profile; pass one",
            )));
        }
        if let Some(cen) = &self.cen {
            let profile = format!("initial/sdAvg_order_2_C{cen}.dat");
            store.override_existing(
                SectionId::Initial,
                "Initial_Distribution_Filename",
                ParamValue::Text(profile),
            )?;
        }
        if let Some(iev) = self.iev {
            let profile = format!("epsilon-u-Hydro{iev}.dat");
            store.override_existing(
                SectionId::Initial,
                "Initial_Distribution_Filename",
                ParamValue::Text(profile),
            )?;
        }
        if let Some(ratio) = self.shear_vis {
            store.override_existing(SectionId::Hydro, "Shear_to_S_ratio", ParamValue::Float(ratio))?;
        }
        if let Some(eos) = self.eos {
            store.override_existing(SectionId::Hydro, "EOS_to_use", ParamValue::Int(eos))?;
        }
        if let Some(evo) = self.evo {
            store.override_existing(SectionId::Hydro, "output_evolution_data", ParamValue::Int(evo))?;
        }
        if let Some(tau0) = self.tau0 {
            store.override_existing(SectionId::Hydro, "Initial_time_tau_0", ParamValue::Float(tau0))?;
        }
        for pair in &self.set {
            apply_set_pair(store, pair)?;
        }
        Ok(())
    }
}

/// Flags enabling the optional deck variants.
#[derive(Args, Debug)]
pub struct VariantArgs {
    /// Also generate the _nodeltaf variants (delta-f correction off).
    #[arg(long)]
    pub include_nodeltaf: bool,
    /// Also generate the _y variants (rapidity-binned spectra).
    #[arg(long)]
    pub include_y: bool,
}

impl VariantArgs {
    pub fn toggles(&self) -> AxisToggles {
        AxisToggles {
            nodeltaf: self.include_nodeltaf,
            rapidity: self.include_y,
        }
    }
}

fn apply_set_pair(store: &mut ParamStore, pair: &str) -> Result<(), MigError> {
    let format_error = || {
        MigError::Config(
            ErrorInfo::new("cli-set-format", "--set takes SECTION.KEY=VALUE")
                .with_context("argument", pair)
                .with_hint("sections are control, initial, hydro, freeze, collect"),
        )
    };
    let Some((target, raw_value)) = pair.split_once('=') else {
        return Err(format_error());
    };
    let Some((section_name, key)) = target.split_once('.') else {
        return Err(format_error());
    };
    let section = SectionId::parse(section_name)?;
    store.override_existing(section, key, parse_value(raw_value))?;
    Ok(())
}

/// Applies the `overrides` table of a configuration file to the store.
///
/// Runs before the command line flags, so flags win when both name the
/// same key.
pub fn apply_config_overrides(
    store: &mut ParamStore,
    overrides: &BTreeMap<String, ParamValue>,
) -> Result<(), MigError> {
    for (target, value) in overrides {
        let Some((section_name, key)) = target.split_once('.') else {
            return Err(MigError::Config(
                ErrorInfo::new("config-override-format", "override keys take the form section.key")
                    .with_context("key", target.clone()),
            ));
        };
        let section = SectionId::parse(section_name)?;
        store.override_existing(section, key, value.clone())?;
    }
    Ok(())
}

/// Types a raw override value the way the default tables do: integer when
/// it parses as one, then float, then verbatim text.
fn parse_value(raw: &str) -> ParamValue {
    if let Ok(int) = raw.parse::<i64>() {
        return ParamValue::Int(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return ParamValue::Float(float);
    }
    ParamValue::Text(raw.to_string())
}
