//! Engine default tables: the parameter state every generation run starts
//! from. Values follow the tuned event-by-event viscous setup (file based
//! initial profile, bulk viscosity on, wide pseudorapidity coverage).

use mig_core::ParamValue::{self, Float, Int};

use crate::section::SectionId;
use crate::store::ParamStore;

impl ParamStore {
    /// Creates a store seeded with the engine default tables.
    pub fn with_defaults() -> Self {
        let mut store = ParamStore::empty();
        for (section, entries) in [
            (SectionId::Control, control_entries()),
            (SectionId::Initial, initial_entries()),
            (SectionId::Hydro, hydro_entries()),
            (SectionId::Freeze, freeze_entries()),
            (SectionId::Collect, collect_entries()),
        ] {
            for (key, value) in entries {
                store.apply(section, key, value);
            }
        }
        store
    }
}

fn text(value: &str) -> ParamValue {
    ParamValue::Text(value.to_string())
}

fn control_entries() -> Vec<(&'static str, ParamValue)> {
    vec![
        // running mode: 2 evolution, 3 thermal spectra, 4 resonance decays,
        // 13/14 observables from thermal/post-decay spectra
        ("mode", Int(2)),
        ("echo_level", Int(1)),
    ]
}

fn initial_entries() -> Vec<(&'static str, ParamValue)> {
    vec![
        ("Initial_profile", Int(9)),
        ("initialize_with_entropy", Int(0)),
        ("Initial_Distribution_Filename", text("initial/new_u_field_0.dat")),
        ("s_factor", Float(1.0)),
        // Glauber model parameters, unused with file based profiles but the
        // engine still reads them
        ("binary_collision_scaling_fraction", Float(0.0)),
        ("Maximum_energy_density", Float(54.0)),
        ("SigmaNN", Float(42.1)),
        ("Impact_parameter", Float(3.0)),
        ("bmin", Float(9.0)),
        ("bmax", Float(9.0)),
        ("sigma_0", Float(0.4)),
        ("Target", text("Au")),
        ("Projectile", text("Au")),
        ("Lexus_Imax", Int(100)),
        // envelope in the eta_s direction
        ("Eta_plateau_size", Float(40.0)),
        ("Eta_fall_off", Float(0.2)),
    ]
}

fn hydro_entries() -> Vec<(&'static str, ParamValue)> {
    vec![
        ("Initial_time_tau_0", Float(0.4)),
        ("Total_evolution_time_tau", Float(30.0)),
        ("Delta_Tau", Float(0.02)),
        ("Eta_grid_size", Float(20.0)),
        ("Grid_size_in_eta", Int(4)),
        ("X_grid_size_in_fm", Float(34.0)),
        ("Y_grid_size_in_fm", Float(34.0)),
        ("Grid_size_in_y", Int(256)),
        ("Grid_size_in_x", Int(256)),
        ("EOS_to_use", Int(2)),
        ("Minmod_Theta", Float(1.8)),
        ("Runge_Kutta_order", Int(2)),
        ("reconst_type", Int(1)),
        ("boost_invariant", Int(1)),
        ("Viscosity_Flag_Yes_1_No_0", Int(1)),
        ("Include_Shear_Visc_Yes_1_No_0", Int(1)),
        ("Shear_to_S_ratio", Float(0.08)),
        ("T_dependent_Shear_to_S_ratio", Int(0)),
        ("Include_Bulk_Visc_Yes_1_No_0", Int(1)),
        ("Bulk_to_S_ratio", Float(0.1)),
        ("Include_second_order_terms", Int(1)),
        ("QuestRevert_rho_shear_max", Float(0.1)),
        ("QuestRevert_rho_bulk_max", Float(0.1)),
        ("Maximum_Local_Rapidity", Float(20.0)),
        ("output_hydro_debug_info", Int(0)),
        ("output_evolution_data", Int(0)),
        ("output_hydro_params_header", Int(1)),
        ("outputBinaryEvolution", Int(1)),
        ("output_evolution_every_N_timesteps", Int(1)),
        ("output_evolution_every_N_x", Int(2)),
        ("output_evolution_every_N_y", Int(2)),
        ("output_evolution_every_N_eta", Int(1)),
    ]
}

fn freeze_entries() -> Vec<(&'static str, ParamValue)> {
    vec![
        ("Do_FreezeOut_Yes_1_No_0", Int(1)),
        ("freeze_out_method", Int(2)),
        ("average_surface_over_this_many_time_steps", Int(5)),
        // freeze-out criterion: energy density in GeV/fm^3
        ("epsilon_freeze", Float(0.18)),
        ("use_eps_for_freeze_out", Int(1)),
        ("T_freeze", Float(0.135)),
        ("number_of_particles_to_include", Int(320)),
        ("particle_spectrum_to_compute", Int(0)),
        ("pseudofreeze", Int(1)),
        ("max_pseudorapidity", Float(5.0)),
        ("pseudo_steps", Int(47)),
        ("phi_steps", Int(40)),
        ("min_pt", Float(0.01)),
        ("max_pt", Float(3.0)),
        ("pt_steps", Int(15)),
        ("Include_deltaf", Int(0)),
        // key is misspelled upstream; the engine looks it up verbatim
        ("Inlucde_deltaf_bulk", Int(0)),
    ]
}

fn collect_entries() -> Vec<(&'static str, ParamValue)> {
    vec![
        ("dNdy_y_min", Float(-0.5)),
        ("dNdy_y_max", Float(0.5)),
        ("dNdy_eta_min", Float(-5.0)),
        ("dNdy_eta_max", Float(5.0)),
        ("dNdy_nrap", Int(51)),
        ("dNdyptdpt_y_min", Float(-0.5)),
        ("dNdyptdpt_y_max", Float(0.5)),
        ("dNdyptdpt_eta_min", Float(-0.5)),
        ("dNdyptdpt_eta_max", Float(0.5)),
    ]
}
