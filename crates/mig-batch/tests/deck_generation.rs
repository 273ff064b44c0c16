use std::fs;

use mig_batch::{generate_decks, sha256_hex, AxisToggles};
use mig_deck::{parse_deck, render_deck, ParamStore};

fn both() -> AxisToggles {
    AxisToggles {
        nodeltaf: true,
        rapidity: true,
    }
}

#[test]
fn full_toggle_run_writes_eleven_decks() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    let records = generate_decks(&mut store, &both(), dir.path()).unwrap();

    let filenames: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(
        filenames,
        vec![
            "music_input_2",
            "music_input_3",
            "music_input_3_nodeltaf",
            "music_input_3_y",
            "music_input_3_y_nodeltaf",
            "music_input_4",
            "music_input_4_y",
            "music_input_13",
            "music_input_13_y",
            "music_input_14",
            "music_input_14_y",
        ]
    );
    for record in &records {
        assert!(dir.path().join(&record.filename).is_file());
    }
}

#[test]
fn base_run_writes_one_deck_per_mode() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    let records = generate_decks(&mut store, &AxisToggles::default(), dir.path()).unwrap();

    let filenames: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(
        filenames,
        vec![
            "music_input_2",
            "music_input_3",
            "music_input_4",
            "music_input_13",
            "music_input_14",
        ]
    );
}

#[test]
fn generation_leaves_the_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    let before = store.clone();

    generate_decks(&mut store, &both(), dir.path()).unwrap();

    assert_eq!(store, before);
    assert_eq!(render_deck(&store), render_deck(&before));
}

#[test]
fn mode_tag_is_the_only_difference_between_plain_mode_decks() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    generate_decks(&mut store, &AxisToggles::default(), dir.path()).unwrap();

    let deck_2 = fs::read_to_string(dir.path().join("music_input_2")).unwrap();
    let deck_13 = fs::read_to_string(dir.path().join("music_input_13")).unwrap();
    assert!(deck_2.contains("mode  2\n"));
    assert!(deck_13.contains("mode  13\n"));
    assert_eq!(deck_2.replace("mode  2", "mode  13"), deck_13);
}

#[test]
fn nodeltaf_deck_adds_exactly_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    generate_decks(&mut store, &both(), dir.path()).unwrap();

    let base = fs::read_to_string(dir.path().join("music_input_3")).unwrap();
    let nodeltaf = fs::read_to_string(dir.path().join("music_input_3_nodeltaf")).unwrap();

    assert!(!base.contains("Include_deltaf_qmu"));
    assert!(nodeltaf.contains("Include_deltaf_qmu  0\n"));

    let base_lines: Vec<&str> = base.lines().collect();
    let nodeltaf_lines: Vec<&str> = nodeltaf.lines().collect();
    assert_eq!(nodeltaf_lines.len(), base_lines.len() + 1);
}

#[test]
fn rapidity_decks_swap_windows_only_for_observable_modes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    generate_decks(&mut store, &both(), dir.path()).unwrap();

    let observables_y = fs::read_to_string(dir.path().join("music_input_13_y")).unwrap();
    assert!(observables_y.contains("pseudofreeze  0\n"));
    assert!(observables_y.contains("dNdy_y_min  -5.0\n"));
    assert!(observables_y.contains("dNdy_eta_min  -0.5\n"));

    let observables_base = fs::read_to_string(dir.path().join("music_input_13")).unwrap();
    assert!(observables_base.contains("pseudofreeze  1\n"));
    assert!(observables_base.contains("dNdy_y_min  -0.5\n"));
    assert!(observables_base.contains("dNdy_eta_min  -5.0\n"));

    let spectra_y = fs::read_to_string(dir.path().join("music_input_3_y")).unwrap();
    assert!(spectra_y.contains("pseudofreeze  0\n"));
    assert!(spectra_y.contains("dNdy_y_min  -0.5\n"));
}

#[test]
fn every_generated_deck_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    let records = generate_decks(&mut store, &both(), dir.path()).unwrap();

    for record in &records {
        let text = fs::read_to_string(dir.path().join(&record.filename)).unwrap();
        let parsed = parse_deck(&text).unwrap();
        // nodeltaf decks carry one extra key on top of the 76 defaults
        let expected = if record.suffix.contains("nodeltaf") { 77 } else { 76 };
        assert_eq!(parsed.len(), expected, "deck {}", record.filename);
    }
}

#[test]
fn record_hashes_match_the_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParamStore::with_defaults();
    let records = generate_decks(&mut store, &both(), dir.path()).unwrap();

    for record in &records {
        let bytes = fs::read(dir.path().join(&record.filename)).unwrap();
        assert_eq!(record.sha256, sha256_hex(&bytes));
        assert_eq!(record.sha256.len(), 64);
    }
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let mut store_a = ParamStore::with_defaults();
    let mut store_b = ParamStore::with_defaults();

    let records_a = generate_decks(&mut store_a, &both(), dir_a.path()).unwrap();
    let records_b = generate_decks(&mut store_b, &both(), dir_b.path()).unwrap();

    assert_eq!(records_a, records_b);
    for record in &records_a {
        let bytes_a = fs::read(dir_a.path().join(&record.filename)).unwrap();
        let bytes_b = fs::read(dir_b.path().join(&record.filename)).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }
}
