//! Merge rules for bundle configs.

use proptest::prelude::*;
use serde_json::{json, Value};
use swa_config::{merge_values, BundleConfig, BundleTransform};

fn config(value: Value) -> BundleConfig {
    BundleConfig::from_value(value).unwrap()
}

#[test]
fn keys_only_in_base_are_retained() {
    let base = config(json!({ "platform": "node", "output": { "sourcemap": true } }));
    let overlay = config(json!({ "output": { "dir": "out" } }));

    let merged = base.merge(&overlay);
    assert_eq!(merged.get("platform"), Some(&json!("node")));
    assert_eq!(merged.output_str("dir"), Some("out"));
    assert_eq!(merged.output().and_then(|o| o.get("sourcemap")), Some(&json!(true)));
}

#[test]
fn nested_plugin_lists_concatenate() {
    let base = config(json!({ "plugins": [{ "name": "sourcemaps" }] }));
    let overlay = config(json!({ "plugins": [{ "name": "alias" }, { "name": "json" }] }));

    let merged = base.merge(&overlay);
    let names: Vec<_> = merged
        .plugins()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names, ["sourcemaps", "alias", "json"]);
}

#[test]
fn scalar_overlay_replaces_object() {
    let mut target = json!({ "input": { "index": "a.js" } });
    merge_values(&mut target, &json!({ "input": "b.js" }));
    assert_eq!(target, json!({ "input": "b.js" }));
}

#[test]
fn merging_empty_overlay_is_identity() {
    let base = config(json!({ "external": ["a"], "output": { "format": "es" } }));
    assert_eq!(base.clone().merge(&BundleConfig::new()), base);
}

#[test]
fn transform_sees_recomputed_externals() {
    let transform = BundleTransform::new(|merged| {
        assert_eq!(merged.external(), vec!["fsevents", "sharp"]);
        None
    });

    let resolved = BundleConfig::resolve(
        config(json!({ "external": ["fsevents"] })),
        &BundleConfig::new(),
        &["sharp".to_string()],
        Some(&transform),
    );
    assert_eq!(resolved.external(), vec!["fsevents", "sharp"]);
}

fn list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn list_merge_is_concatenation(base in list(), overlay in list()) {
        let merged = config(json!({ "external": base.clone() }))
            .merge(&config(json!({ "external": overlay.clone() })));

        let mut expected = base;
        expected.extend(overlay);
        prop_assert_eq!(merged.external(), expected);
    }

    #[test]
    fn disjoint_keys_are_all_retained(
        base in prop::collection::btree_map("[a-m]{1,4}", any::<i64>(), 0..5),
        overlay in prop::collection::btree_map("[n-z]{1,4}", any::<i64>(), 0..5),
    ) {
        let merged = config(json!(base.clone())).merge(&config(json!(overlay.clone())));

        for (key, value) in base.iter().chain(overlay.iter()) {
            prop_assert_eq!(merged.get(key), Some(&json!(value)));
        }
        prop_assert_eq!(merged.as_map().len(), base.len() + overlay.len());
    }

    #[test]
    fn scalar_overlay_always_wins(base in any::<i64>(), overlay in "[a-z]{0,8}") {
        let mut target = json!({ "target": base });
        merge_values(&mut target, &json!({ "target": overlay.clone() }));
        prop_assert_eq!(&target["target"], &json!(overlay));
    }
}
