use proptest::prelude::*;

use crate::{Delta, QuadTree};

const SIDE: u64 = 16;
const MAX_DEPTH: usize = 4;

type Edit<V> = (u64, u64, usize, V);

fn edit() -> impl Strategy<Value = Edit<u64>> {
    // few distinct values so that regions merge often
    (0..SIDE, 0..SIDE, 0..=MAX_DEPTH, 0..3_u64)
}
fn delta_edit() -> impl Strategy<Value = Edit<Option<u64>>> {
    (0..SIDE, 0..SIDE, 0..=MAX_DEPTH, prop::option::of(0..3_u64))
}

fn build<V: Clone + PartialEq>(base: V, edits: Vec<Edit<V>>) -> QuadTree<V> {
    let mut tree = QuadTree::new(base);
    for (x, y, depth, value) in edits {
        tree.set(x, y, depth, value);
    }
    tree
}

fn cells(tree: &QuadTree<u64>) -> Vec<u64> {
    let mut cells = Vec::new();
    for y in 0..SIDE {
        for x in 0..SIDE {
            cells.push(*tree.value_at(x, y));
        }
    }
    cells
}

proptest! {
    #[test]
    fn set_then_get(edits in prop::collection::vec(edit(), 0..32), (x, y, depth, value) in edit()) {
        let mut tree = build(0, edits);
        let path = tree.set(x, y, depth, value);
        prop_assert_eq!(tree.get(x, y, depth).value(), &value);
        prop_assert!(path.depth() <= depth);

        let leaf = tree.node_at(&path).unwrap();
        prop_assert!(!leaf.is_divided());
        prop_assert_eq!(leaf.value(), &value);
        prop_assert_eq!(tree.identity_path(leaf).unwrap(), path);
    }

    #[test]
    fn edits_stay_canonical(
        edits in prop::collection::vec(edit(), 0..32),
        deltas in prop::collection::vec(prop::collection::vec(delta_edit(), 0..8), 0..4),
    ) {
        let mut tree = build(0, edits);
        prop_assert!(tree.is_canonical());
        for edits in deltas {
            tree = tree.apply(&build(None, edits));
            prop_assert!(tree.is_canonical());
        }
    }

    #[test]
    fn trace_undoes(
        edits in prop::collection::vec(edit(), 0..32),
        delta in prop::collection::vec(delta_edit(), 0..8),
    ) {
        let tree = build(0, edits);
        let delta = build(None, delta);
        let undo = tree.trace(&delta);
        prop_assert_eq!(&tree.apply(&undo), &tree);

        let edited = tree.apply(&delta);
        let restored = edited.apply(&undo);
        prop_assert!(restored.is_canonical());
        prop_assert_eq!(cells(&restored), cells(&tree));
    }

    #[test]
    fn json_round_trip(
        edits in prop::collection::vec(edit(), 0..32),
        delta in prop::collection::vec(delta_edit(), 0..8),
    ) {
        let tree = build(0, edits);
        let src = tree.to_json_string().unwrap();
        prop_assert_eq!(QuadTree::<u64>::from_json_str(&src).unwrap(), tree);

        let delta = build(None, delta);
        let src = delta.to_json_string().unwrap();
        prop_assert_eq!(Delta::<u64>::from_json_str(&src).unwrap(), delta);
    }
}
