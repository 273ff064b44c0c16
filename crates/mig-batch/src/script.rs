//! Structured assembly and rendering of the cluster submit script.
//!
//! The script is modeled before it is text: a preamble of scheduler
//! directives plus one [`PipelineStage`] per engine invocation. Staging
//! directory names are checked for collisions before anything renders.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use mig_core::{ErrorInfo, MigError};
use serde::Serialize;

use crate::axes::{suffix_for, AxisId, AxisToggles};
use crate::config::SubmitConfig;
use crate::expand::{expand_variants, VariantDescriptor};
use crate::modes::{deck_filename, ModeDefinition, RunMode};

/// Base name of the per-variant spectra staging directories.
pub const SPECTRA_DIR_BASE: &str = "spvn";

/// Filename of the generated submit script.
pub const SUBMIT_SCRIPT_NAME: &str = "submit_full_job.pbs";

/// One pipeline stage: staging commands, an engine invocation, and the
/// post-processing that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStage {
    /// Stage title rendered as a comment line above the block.
    pub label: String,
    /// Commands run before the engine invocation.
    pub pre: Vec<String>,
    /// The engine invocation itself.
    pub command: String,
    /// Commands run after the engine invocation.
    pub post: Vec<String>,
}

/// A fully assembled submit script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitScript {
    preamble: Vec<String>,
    stages: Vec<PipelineStage>,
}

impl SubmitScript {
    /// Stages in emission order: evolution first, then one spectra stage per
    /// (decoupling energy, variant) pair.
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Renders the script text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for stage in &self.stages {
            out.push('\n');
            out.push_str("# ");
            out.push_str(&stage.label);
            out.push('\n');
            for line in &stage.pre {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&stage.command);
            out.push('\n');
            for line in &stage.post {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Writes the rendered script to `path`.
    pub fn write(&self, path: &Path) -> Result<(), MigError> {
        fs::write(path, self.render()).map_err(|err| {
            MigError::Io(
                ErrorInfo::new("script-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Staging directory for one (variant, energy) spectra block.
pub fn stage_directory(suffix: &str, energy: &str) -> String {
    format!("{SPECTRA_DIR_BASE}{suffix}_eps_{energy}")
}

/// Assembles the full pipeline script for the enabled variants.
///
/// `workdir` is the absolute directory the scheduler starts the job in.
/// Two blocks resolving to the same staging directory is fatal; the check
/// runs over the complete (energy, variant) grid before any text exists.
pub fn build_submit_script(
    config: &SubmitConfig,
    toggles: &AxisToggles,
    workdir: &Path,
) -> Result<SubmitScript, MigError> {
    config.validate()?;
    let spectra_mode = ModeDefinition::for_mode(RunMode::ThermalSpectra);
    let variants = expand_variants(&spectra_mode, toggles)?;

    let mut stages = vec![evolution_stage(config)];
    let mut directories = BTreeSet::new();
    for energy in &config.decoupling_energies {
        for variant in &variants {
            let directory = stage_directory(&variant.suffix, energy);
            if !directories.insert(directory.clone()) {
                return Err(MigError::Artifact(
                    ErrorInfo::new(
                        "script-dir-collision",
                        "two spectra blocks resolve to the same staging directory",
                    )
                    .with_context("directory", directory)
                    .with_context("energy", energy.clone()),
                ));
            }
            stages.push(spectra_stage(config, energy, variant, &directory));
        }
    }

    Ok(SubmitScript {
        preamble: preamble(config, workdir),
        stages,
    })
}

fn preamble(config: &SubmitConfig, workdir: &Path) -> Vec<String> {
    let job_name = match &config.job_name {
        Some(name) => name.clone(),
        None => default_job_name(workdir),
    };
    let mut lines = vec![
        "#!/usr/bin/env bash".to_string(),
        format!("#PBS -N {job_name}"),
        format!("#PBS -l walltime={}", config.walltime),
        format!("#PBS -l nodes=1:ppn={}", config.ppn),
        "#PBS -S /bin/bash".to_string(),
        "#PBS -e test.err".to_string(),
        "#PBS -o test.log".to_string(),
        format!("#PBS -A {}", config.account),
        format!("#PBS -q {}", config.queue),
        format!("#PBS -d {}", workdir.display()),
        String::new(),
    ];
    for module in &config.modules {
        lines.push(format!("module add {module}"));
    }
    if !config.modules.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("results_folder={}", config.results_folder));
    lines.push(format!("spectra_folder={}", config.spectra_folder));
    lines
}

fn default_job_name(workdir: &Path) -> String {
    workdir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("music_run")
        .to_string()
}

fn engine_command(config: &SubmitConfig, deck: &str, log_stem: &str) -> String {
    format!(
        "mpirun -np {} ./{} {deck} 1>{log_stem}.log 2>{log_stem}.err",
        config.ppn, config.executable
    )
}

fn evolution_stage(config: &SubmitConfig) -> PipelineStage {
    let deck = deck_filename(RunMode::Evolution, "");
    PipelineStage {
        label: "hydro evolution".to_string(),
        pre: Vec::new(),
        command: engine_command(config, &deck, "mode_2"),
        post: vec!["./sweeper.sh $results_folder".to_string()],
    }
}

fn spectra_stage(
    config: &SubmitConfig,
    energy: &str,
    variant: &VariantDescriptor,
    directory: &str,
) -> PipelineStage {
    let deck = deck_filename(RunMode::ThermalSpectra, &variant.suffix);
    let log_stem = format!("mode_3{}", variant.suffix);

    let mut post = vec![
        "rm -fr yptphiSpectra?.dat yptphiSpectra??.dat".to_string(),
        format!("thermal_folder={directory}"),
        "mkdir $thermal_folder".to_string(),
        "mv particleInformation.dat $thermal_folder".to_string(),
        "mv yptphiSpectra.dat $thermal_folder".to_string(),
        format!("cp {} $thermal_folder", config.executable),
    ];
    for mode in [
        RunMode::ResonanceDecays,
        RunMode::ThermalObservables,
        RunMode::DecayedObservables,
    ] {
        post.push(format!(
            "cp {} $thermal_folder",
            downstream_deck(mode, &variant.axes)
        ));
    }
    post.push(format!("cp {} $thermal_folder", config.nuclei_table));
    post.push(format!("cp -r {} $thermal_folder", config.eos_dir));
    post.push(format!("{} $thermal_folder", config.decay_job_generator));
    post.push("cd $thermal_folder".to_string());
    // Inline submission: the decay job starts queueing as soon as the script
    // reaches this line, with no scheduler dependency on the moves above.
    post.push(format!("qsub -A {} {}", config.account, config.decay_job_file));
    post.push("cd ..".to_string());

    PipelineStage {
        label: format!("thermal spectra eps={energy}{}", variant.label()),
        pre: vec![format!(
            "cp {}/surface_eps_{energy}.dat ./surface.dat",
            config.results_folder
        )],
        command: engine_command(config, &deck, &log_stem),
        post,
    }
}

/// Deck filename for a downstream mode, restricted to the axes that mode
/// recognizes. A `_y_nodeltaf` spectra block therefore ships the plain `_y`
/// decks for modes 4, 13, and 14.
fn downstream_deck(mode: RunMode, active: &[AxisId]) -> String {
    let definition = ModeDefinition::for_mode(mode);
    let applicable: Vec<AxisId> = active
        .iter()
        .copied()
        .filter(|axis| definition.applies(*axis))
        .collect();
    deck_filename(mode, &suffix_for(&applicable))
}
