use mig_core::ParamValue;
use mig_deck::{render_deck, OverrideSpec, ParamStore, Prior, SectionId};
use proptest::prelude::*;

#[test]
fn apply_reports_prior_value_and_restore_reverts() {
    let mut store = ParamStore::with_defaults();
    let prior = store.apply(SectionId::Control, "mode", ParamValue::Int(3));
    assert_eq!(prior, Prior::Present(ParamValue::Int(2)));
    assert_eq!(
        store.section(SectionId::Control).get("mode"),
        Some(&ParamValue::Int(3))
    );

    store.restore(SectionId::Control, "mode", prior);
    assert_eq!(
        store.section(SectionId::Control).get("mode"),
        Some(&ParamValue::Int(2))
    );
}

#[test]
fn absent_key_is_appended_and_removed_on_restore() {
    let mut store = ParamStore::with_defaults();
    assert!(store.section(SectionId::Freeze).get("Include_deltaf_qmu").is_none());

    let prior = store.apply(SectionId::Freeze, "Include_deltaf_qmu", ParamValue::Int(0));
    assert_eq!(prior, Prior::Absent);
    assert_eq!(
        store.section(SectionId::Freeze).get("Include_deltaf_qmu"),
        Some(&ParamValue::Int(0))
    );

    store.restore(SectionId::Freeze, "Include_deltaf_qmu", prior);
    assert!(store.section(SectionId::Freeze).get("Include_deltaf_qmu").is_none());
}

#[test]
fn out_of_order_manual_restore_keeps_remaining_key_order() {
    // The manual API does not police ordering; removal must still leave the
    // untouched keys in their original positions.
    let mut store = ParamStore::with_defaults();
    let before: Vec<String> = store
        .section(SectionId::Freeze)
        .iter()
        .map(|(key, _)| key.to_string())
        .collect();

    let first = store.apply(SectionId::Freeze, "scratch_one", ParamValue::Int(1));
    let second = store.apply(SectionId::Freeze, "scratch_two", ParamValue::Int(2));
    store.restore(SectionId::Freeze, "scratch_one", first);
    store.restore(SectionId::Freeze, "scratch_two", second);

    let after: Vec<String> = store
        .section(SectionId::Freeze)
        .iter()
        .map(|(key, _)| key.to_string())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn scope_reverts_on_drop() {
    let mut store = ParamStore::with_defaults();
    let before = store.clone();
    {
        let scope = store.scoped(&[
            OverrideSpec::new(SectionId::Freeze, "pseudofreeze", 0),
            OverrideSpec::new(SectionId::Collect, "dNdy_y_min", -5.0),
        ]);
        assert_eq!(
            scope.section(SectionId::Freeze).get("pseudofreeze"),
            Some(&ParamValue::Int(0))
        );
        assert_eq!(
            scope.section(SectionId::Collect).get("dNdy_y_min"),
            Some(&ParamValue::Float(-5.0))
        );
    }
    assert_eq!(store, before);
}

#[test]
fn scope_unwinds_stacked_writes_to_the_same_key() {
    let mut store = ParamStore::with_defaults();
    {
        let scope = store.scoped(&[
            OverrideSpec::new(SectionId::Control, "mode", 3),
            OverrideSpec::new(SectionId::Control, "mode", 14),
        ]);
        assert_eq!(
            scope.section(SectionId::Control).get("mode"),
            Some(&ParamValue::Int(14))
        );
    }
    assert_eq!(
        store.section(SectionId::Control).get("mode"),
        Some(&ParamValue::Int(2))
    );
}

#[test]
fn nested_scopes_compose_and_unwind_inner_first() {
    let mut store = ParamStore::with_defaults();
    {
        let mut outer = store.scoped(&[OverrideSpec::new(SectionId::Control, "mode", 3)]);
        {
            let inner = outer.scoped(&[
                OverrideSpec::new(SectionId::Freeze, "pseudofreeze", 0),
                OverrideSpec::new(SectionId::Freeze, "Include_deltaf_qmu", 0),
            ]);
            assert_eq!(
                inner.section(SectionId::Control).get("mode"),
                Some(&ParamValue::Int(3))
            );
            assert_eq!(
                inner.section(SectionId::Freeze).get("pseudofreeze"),
                Some(&ParamValue::Int(0))
            );
        }
        assert_eq!(
            outer.section(SectionId::Freeze).get("pseudofreeze"),
            Some(&ParamValue::Int(1))
        );
        assert!(outer.section(SectionId::Freeze).get("Include_deltaf_qmu").is_none());
        assert_eq!(
            outer.section(SectionId::Control).get("mode"),
            Some(&ParamValue::Int(3))
        );
    }
    assert_eq!(
        store.section(SectionId::Control).get("mode"),
        Some(&ParamValue::Int(2))
    );
}

#[test]
fn scoped_override_swaps_the_rendered_line_and_back() {
    let mut store = ParamStore::with_defaults();
    assert!(render_deck(&store).contains("EOS_to_use  2\n"));
    {
        let scope = store.scoped(&[OverrideSpec::new(SectionId::Hydro, "EOS_to_use", 7)]);
        let deck = render_deck(&scope);
        assert!(deck.contains("EOS_to_use  7\n"));
        assert!(!deck.contains("EOS_to_use  2\n"));
    }
    assert!(render_deck(&store).contains("EOS_to_use  2\n"));
}

#[test]
fn override_existing_returns_replaced_value() {
    let mut store = ParamStore::with_defaults();
    let replaced = store
        .override_existing(SectionId::Hydro, "Shear_to_S_ratio", ParamValue::Float(0.16))
        .unwrap();
    assert_eq!(replaced, ParamValue::Float(0.08));
    assert_eq!(
        store.section(SectionId::Hydro).get("Shear_to_S_ratio"),
        Some(&ParamValue::Float(0.16))
    );
}

#[test]
fn override_existing_rejects_unknown_keys_without_mutating() {
    let mut store = ParamStore::with_defaults();
    let err = store
        .override_existing(SectionId::Hydro, "Shear_to_S_ration", ParamValue::Float(0.2))
        .unwrap_err();
    assert_eq!(err.info().code, "store-unknown-key");
    assert_eq!(err.info().context.get("key").unwrap(), "Shear_to_S_ration");
    assert!(store.section(SectionId::Hydro).get("Shear_to_S_ration").is_none());
}

#[test]
fn section_parse_accepts_fixed_names_only() {
    assert_eq!(SectionId::parse("collect").unwrap(), SectionId::Collect);
    let err = SectionId::parse("hdyro").unwrap_err();
    assert_eq!(err.info().code, "section-unknown");
}

#[test]
fn snapshot_walks_sections_in_composition_order() {
    let store = ParamStore::with_defaults();
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 76);
    assert_eq!(snapshot[0].0, SectionId::Control);
    assert_eq!(snapshot[0].1, "mode");
    assert_eq!(snapshot.last().unwrap().1, "dNdyptdpt_eta_max");

    let order: Vec<SectionId> = snapshot.iter().map(|(section, _, _)| *section).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

fn override_strategy() -> impl Strategy<Value = OverrideSpec> {
    let sections = prop_oneof![
        Just(SectionId::Control),
        Just(SectionId::Initial),
        Just(SectionId::Hydro),
        Just(SectionId::Freeze),
        Just(SectionId::Collect),
    ];
    let keys = prop_oneof![
        Just("mode"),
        Just("echo_level"),
        Just("Shear_to_S_ratio"),
        Just("pseudofreeze"),
        Just("dNdy_nrap"),
        Just("scratch_a"),
        Just("scratch_b"),
    ];
    let values = prop_oneof![
        any::<i64>().prop_map(ParamValue::Int),
        (-1.0e6f64..1.0e6).prop_map(ParamValue::Float),
        "[a-z]{1,8}".prop_map(ParamValue::Text),
    ];
    (sections, keys, values).prop_map(|(section, key, value)| OverrideSpec {
        section,
        key: key.to_string(),
        value,
    })
}

proptest! {
    #[test]
    fn random_scoped_overrides_always_revert(specs in proptest::collection::vec(override_strategy(), 0..12)) {
        let mut store = ParamStore::with_defaults();
        let before = store.clone();
        {
            let scope = store.scoped(&specs);
            let _ = render_deck(&scope);
        }
        prop_assert_eq!(&store, &before);
        prop_assert_eq!(render_deck(&store), render_deck(&before));
    }
}
