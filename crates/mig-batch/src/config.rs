//! YAML-configurable batch job settings with cluster production defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mig_core::{ErrorInfo, MigError, ParamValue};
use serde::{Deserialize, Serialize};

/// Batch job parameters consumed by the submit script builder.
///
/// Every field has a production default, so an empty YAML document (or no
/// configuration file at all) describes a complete job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Scheduler job name; defaults to the working directory basename.
    #[serde(default)]
    pub job_name: Option<String>,
    /// Scheduler walltime request, `HH:MM:SS`.
    #[serde(default = "default_walltime")]
    pub walltime: String,
    /// Processes per node, also handed to the parallel launcher.
    #[serde(default = "default_ppn")]
    pub ppn: usize,
    /// Scheduler queue.
    #[serde(default = "default_queue")]
    pub queue: String,
    /// Allocation account charged for the job and its chained sub-jobs.
    #[serde(default = "default_account")]
    pub account: String,
    /// Environment modules loaded before the pipeline starts.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
    /// Engine executable invoked under the parallel launcher.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Directory the evolution stage sweeps its surface files into.
    #[serde(default = "default_results_folder")]
    pub results_folder: String,
    /// Shell variable naming the collected spectra directory.
    #[serde(default = "default_spectra_folder")]
    pub spectra_folder: String,
    /// Decoupling energy densities (GeV/fm^3). Kept as strings: each value
    /// only ever names a surface file and a result directory, and the text
    /// must match the evolution output byte for byte.
    #[serde(default = "default_energies")]
    pub decoupling_energies: Vec<String>,
    /// Particle table copied next to each spectra run.
    #[serde(default = "default_nuclei_table")]
    pub nuclei_table: String,
    /// Equation-of-state directory copied next to each spectra run.
    #[serde(default = "default_eos_dir")]
    pub eos_dir: String,
    /// Generator invoked to stage the chained resonance-decay job.
    #[serde(default = "default_decay_generator")]
    pub decay_job_generator: String,
    /// Job file that generator leaves behind for submission.
    #[serde(default = "default_decay_job_file")]
    pub decay_job_file: String,
    /// Permanent store overrides applied before generation,
    /// `section.key` to value.
    #[serde(default)]
    pub overrides: BTreeMap<String, ParamValue>,
}

fn default_walltime() -> String {
    "12:00:00".to_string()
}

fn default_ppn() -> usize {
    16
}

fn default_queue() -> String {
    "sw".to_string()
}

fn default_account() -> String {
    "cqn-654-ad".to_string()
}

fn default_modules() -> Vec<String> {
    vec!["ifort_icc/14.0.4".to_string()]
}

fn default_executable() -> String {
    "mpihydro".to_string()
}

fn default_results_folder() -> String {
    "results".to_string()
}

fn default_spectra_folder() -> String {
    "particle_spectra".to_string()
}

fn default_energies() -> Vec<String> {
    vec!["0.1".to_string()]
}

fn default_nuclei_table() -> String {
    "known_nuclei.dat".to_string()
}

fn default_eos_dir() -> String {
    "EOS".to_string()
}

fn default_decay_generator() -> String {
    "./generate_resonance_decay_job.py".to_string()
}

fn default_decay_job_file() -> String {
    "submit_resonance_job.pbs".to_string()
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            job_name: None,
            walltime: default_walltime(),
            ppn: default_ppn(),
            queue: default_queue(),
            account: default_account(),
            modules: default_modules(),
            executable: default_executable(),
            results_folder: default_results_folder(),
            spectra_folder: default_spectra_folder(),
            decoupling_energies: default_energies(),
            nuclei_table: default_nuclei_table(),
            eos_dir: default_eos_dir(),
            decay_job_generator: default_decay_generator(),
            decay_job_file: default_decay_job_file(),
            overrides: BTreeMap::new(),
        }
    }
}

impl SubmitConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, MigError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MigError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_yaml::from_str(&contents).map_err(|err| {
            MigError::Serde(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Validates the job settings before any artifact is produced.
    pub fn validate(&self) -> Result<(), MigError> {
        if self.ppn == 0 {
            return Err(MigError::Config(ErrorInfo::new(
                "config-ppn",
                "ppn must be at least 1",
            )));
        }
        let walltime_ok = self.walltime.split(':').count() == 3
            && self
                .walltime
                .split(':')
                .all(|field| !field.is_empty() && field.chars().all(|c| c.is_ascii_digit()));
        if !walltime_ok {
            return Err(MigError::Config(
                ErrorInfo::new("config-walltime", "walltime must be HH:MM:SS")
                    .with_context("walltime", self.walltime.clone()),
            ));
        }
        if self.executable.is_empty() {
            return Err(MigError::Config(ErrorInfo::new(
                "config-executable",
                "executable must not be empty",
            )));
        }
        if self.queue.is_empty() {
            return Err(MigError::Config(ErrorInfo::new(
                "config-queue",
                "queue must not be empty",
            )));
        }
        if self.account.is_empty() {
            return Err(MigError::Config(ErrorInfo::new(
                "config-account",
                "account must not be empty",
            )));
        }
        if self.decoupling_energies.is_empty() {
            return Err(MigError::Config(ErrorInfo::new(
                "config-energies",
                "at least one decoupling energy is required",
            )));
        }
        for energy in &self.decoupling_energies {
            let clean = !energy.is_empty()
                && !energy.contains(char::is_whitespace)
                && !energy.contains('/');
            if !clean {
                return Err(MigError::Config(
                    ErrorInfo::new(
                        "config-energies",
                        "decoupling energies must be bare tokens usable in file names",
                    )
                    .with_context("energy", energy.clone()),
                ));
            }
        }
        Ok(())
    }
}
