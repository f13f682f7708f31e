use order_stat_tree::{Tree, TreeError};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::{init_tracing, Op};

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                assert_eq!(tree.insert(k).is_ok(), set.insert(k));
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(&k).ok(), set.take(&k));
            }
        }
        assert_eq!(tree.validate(), Ok(()));
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_tracing();
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.iter().eq(set.iter()) && set.iter().all(|key| tree.contains(key))
}

#[quickcheck]
fn rank_matches_in_order_count(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    probes
        .iter()
        .all(|probe| tree.rank(probe) == tree.iter().filter(|key| *key < probe).count())
}

#[quickcheck]
fn range_matches_filter(xs: Vec<i8>, lo: i8, hi: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let expected = xs
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|&&key| lo <= key && key <= hi)
        .count();

    if lo > hi {
        tree.range(&lo, &hi) == Err(TreeError::InvalidRange)
    } else {
        tree.range(&lo, &hi) == Ok(expected)
    }
}

#[quickcheck]
fn keys_in_matches_btreeset_range(xs: Vec<i8>, lo: i8, hi: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    match tree.keys_in(&lo, &hi) {
        Err(err) => lo > hi && err == TreeError::InvalidRange,
        Ok(keys) => lo <= hi && keys.eq(set.range(lo..=hi)),
    }
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        let _ = tree.remove(delete);
    }

    let still_present: HashSet<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();

    tree.validate().is_ok()
        && deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.contains(x))
        && tree.len() == still_present.len()
}

#[quickcheck]
fn removing_absent_keys_is_a_no_op(xs: Vec<i8>, absent: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != absent).collect();
    let before = format!("{tree:?}");

    tree.remove(&absent) == Err(TreeError::NotFound) && format!("{tree:?}") == before
}

#[quickcheck]
fn insert_then_remove_keeps_key_set(xs: Vec<i8>, key: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != key).collect();
    let before: Vec<_> = tree.iter().copied().collect();

    tree.insert(key).is_ok()
        && tree.remove(&key) == Ok(key)
        && tree.validate().is_ok()
        && tree.iter().copied().collect::<Vec<_>>() == before
}

#[test]
fn ascending_inserts_stay_balanced() {
    init_tracing();
    let mut tree = Tree::new();
    for key in 1..=1024 {
        tree.insert(key).unwrap();
        assert_eq!(tree.validate(), Ok(()));
    }

    for key in (1..=1024).step_by(3) {
        assert_eq!(tree.remove(&key), Ok(key));
        assert_eq!(tree.validate(), Ok(()));
    }
    assert_eq!(tree.range(&1, &1024), Ok(tree.len()));
}
