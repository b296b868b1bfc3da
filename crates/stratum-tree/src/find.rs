use serde_json::Value;

use crate::location::{Location, Segment};

/// Find every mapping in `root` that carries `key` as an immediate key.
///
/// The search descends recursively through every mapping entry and sequence
/// element, not only matches, so same-named fields at different depths are
/// all found. For each match the recorded location addresses the mapping
/// itself, or the keyed value when `include_terminal` is true.
///
/// Results come back in preorder: a match is recorded before any match
/// inside it, mappings are visited in key order, sequences in index order.
/// The same tree always yields the same location sequence.
pub fn find_key(root: &Value, key: &str, include_terminal: bool) -> Vec<Location> {
    let mut found = Vec::new();
    descend(root, key, include_terminal, &mut Vec::new(), &mut found);
    found
}

fn descend(
    node: &Value,
    key: &str,
    include_terminal: bool,
    path: &mut Vec<Segment>,
    found: &mut Vec<Location>,
) {
    match node {
        Value::Object(map) => {
            if map.contains_key(key) {
                let mut segments = path.clone();
                if include_terminal {
                    segments.push(Segment::key(key));
                }
                found.push(Location::from(segments));
            }
            for (name, child) in map {
                path.push(Segment::key(name.as_str()));
                descend(child, key, include_terminal, path, found);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                descend(child, key, include_terminal, path, found);
                path.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{get, set};
    use serde_json::json;

    #[test]
    fn finds_key_at_multiple_depths() {
        let tree = json!({
            "data": 1,
            "nested": {"data": 2, "other": {"data": 3}},
            "list": [{"data": 4}, {"unrelated": 5}],
        });
        let locations = find_key(&tree, "data", true);
        assert_eq!(locations.len(), 4);

        let values: Vec<_> = locations.iter().map(|loc| get(&tree, loc).unwrap()).collect();
        assert_eq!(values, vec![&json!(1), &json!(4), &json!(2), &json!(3)]);
    }

    #[test]
    fn terminal_toggle_changes_addressed_value() {
        let tree = json!({"outer": {"data": 42}});

        let with = find_key(&tree, "data", true);
        assert_eq!(with.len(), 1);
        assert_eq!(get(&tree, &with[0]), Some(&json!(42)));

        let without = find_key(&tree, "data", false);
        assert_eq!(without.len(), 1);
        // Addresses the mapping carrying the key, not the keyed value.
        assert_eq!(get(&tree, &without[0]), Some(&json!({"data": 42})));
    }

    #[test]
    fn recurses_into_matching_mappings() {
        let tree = json!({"data": {"data": {"data": 1}}});
        let locations = find_key(&tree, "data", true);
        assert_eq!(locations.len(), 3);
        // Preorder: outer match first, then matches inside it.
        assert_eq!(locations[0].to_string(), "data");
        assert_eq!(locations[1].to_string(), "data.data");
        assert_eq!(locations[2].to_string(), "data.data.data");
    }

    #[test]
    fn no_match_yields_empty() {
        let tree = json!({"a": [1, 2], "b": {"c": null}});
        assert!(find_key(&tree, "missing", true).is_empty());
        assert!(find_key(&json!(17), "a", true).is_empty());
    }

    #[test]
    fn order_is_reproducible() {
        let tree = json!({
            "z": {"t": 1},
            "a": {"t": 2},
            "m": [{"t": 3}, {"t": 4}],
        });
        let first = find_key(&tree, "t", true);
        let second = find_key(&tree, "t", true);
        assert_eq!(first, second);
        // Mappings iterate in key order.
        assert_eq!(first[0].to_string(), "a.t");
        assert_eq!(first[1].to_string(), "m[0].t");
        assert_eq!(first[2].to_string(), "m[1].t");
        assert_eq!(first[3].to_string(), "z.t");
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_tree() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-z]{0,4}".prop_map(Value::String),
            ];
            leaf.prop_recursive(4, 32, 5, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::btree_map("(target|[a-d])", inner, 0..4)
                        .prop_map(|map| Value::Object(map.into_iter().collect())),
                ]
            })
        }

        proptest! {
            /// Every found location resolves, and overwriting it sticks.
            #[test]
            fn found_locations_resolve_and_accept_writes(tree in arb_tree()) {
                let mut tree = tree;
                let locations = find_key(&tree, "target", true);
                for location in &locations {
                    prop_assert!(get(&tree, location).is_some());
                }
                // Deepest-first so overwriting a parent cannot orphan a child.
                for location in locations.iter().rev() {
                    prop_assert!(set(&mut tree, location, json!("marker")).is_ok());
                    prop_assert_eq!(get(&tree, location), Some(&json!("marker")));
                }
            }

            /// Search never mutates and is deterministic.
            #[test]
            fn search_is_pure(tree in arb_tree()) {
                let before = tree.clone();
                let first = find_key(&tree, "target", false);
                let second = find_key(&tree, "target", false);
                prop_assert_eq!(&tree, &before);
                prop_assert_eq!(first, second);
            }
        }
    }
}
