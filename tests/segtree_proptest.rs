//! Property-based tests: the lazy tree against the brute-force model.

use proptest::prelude::*;
use proptest::sample::Index;
use proptest::test_runner::TestCaseError;

use lazyseg::ops::{FnOps, MaxAdd, MinAdd, MinAssign, Neutral, RangeOps, SumAdd, SumAssign};
use lazyseg::RangeSegmentTree;
use naive::NaiveArray;

// =============================================================================
// Test helpers
// =============================================================================

/// A random tree operation. Indices are resolved against the sequence
/// length when the operation runs.
#[derive(Clone, Debug)]
enum Op {
    Query(Index, Index),
    Update(Index, Index, i64, i64),
    Set(Index, i64),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<Index>(), any::<Index>()).prop_map(|(a, b)| Op::Query(a, b)),
        (any::<Index>(), any::<Index>(), -1000i64..1000, -1000i64..1000)
            .prop_map(|(a, b, x, y)| Op::Update(a, b, x, y)),
        (any::<Index>(), -1000i64..1000).prop_map(|(i, v)| Op::Set(i, v)),
    ]
}

fn arbitrary_values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..1000, 1..500)
}

fn arbitrary_script() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 1..500)
}

fn bounds(a: &Index, b: &Index, len: usize) -> (usize, usize) {
    let (a, b) = (a.index(len), b.index(len));
    (a.min(b), a.max(b))
}

/// Replays `script` against `tree` and a naive model, comparing every
/// query and, at the end, every element.
fn run_script<O, F>(
    mut tree: RangeSegmentTree<O>,
    ops: &O,
    query_neutral: i64,
    initial: Vec<i64>,
    script: &[Op],
    normalize: fn(i64) -> i64,
    to_update: F,
) -> Result<(), TestCaseError>
where
    O: RangeOps<Value = i64>,
    F: Fn(i64, i64) -> O::Update,
{
    let mut model = NaiveArray::new(initial);
    let len = model.len();

    for op in script {
        match op {
            Op::Query(a, b) => {
                let (l, r) = bounds(a, b, len);
                let expected = model.fold(l, r, query_neutral, |x, y| ops.combine(x, y));
                prop_assert_eq!(tree.query(l, r).unwrap(), expected, "query {}..={}", l, r);
            }
            Op::Update(a, b, x, y) => {
                let (l, r) = bounds(a, b, len);
                let update = to_update(*x, *y);
                tree.range_update(l, r, update.clone()).unwrap();
                model.update_range(l, r, |value| ops.apply(value, &update, 1));
            }
            Op::Set(i, v) => {
                let i = i.index(len);
                let v = normalize(*v);
                tree.point_update(i, v).unwrap();
                model.set(i, v);
            }
        }
    }

    let expected_total = model.fold(0, len - 1, query_neutral, |x, y| ops.combine(x, y));
    prop_assert_eq!(tree.total(), expected_total);
    prop_assert_eq!(tree.to_vec(), model.values().to_vec());
    Ok(())
}

fn run_preset<O, F>(ops: O, initial: Vec<i64>, script: &[Op], to_update: F) -> Result<(), TestCaseError>
where
    O: Neutral<Value = i64> + Clone,
    F: Fn(i64, i64) -> O::Update,
{
    let tree = RangeSegmentTree::from_preset(&initial, ops.clone()).unwrap();
    let query_neutral = ops.query_neutral();
    run_script(tree, &ops, query_neutral, initial, script, |v| v, to_update)
}

const P: i64 = 998_244_353;

/// Sum modulo `P` under affine updates `x -> a * x + b`. Composition is
/// not commutative, so this catches tags pushed in the wrong order.
fn affine_ops() -> impl RangeOps<Value = i64, Update = (i64, i64)> {
    FnOps::new(
        |a: &i64, b: &i64| (a + b) % P,
        |sum: &i64, f: &(i64, i64), len: usize| (f.0 * sum + f.1 * (len as i64 % P)) % P,
        |pending: &(i64, i64), incoming: &(i64, i64)| {
            (incoming.0 * pending.0 % P, (incoming.0 * pending.1 + incoming.1) % P)
        },
    )
}

// =============================================================================
// Brute-force equivalence
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sum_add_matches_model(initial in arbitrary_values(), script in arbitrary_script()) {
        run_preset(SumAdd, initial, &script, |x, _| x)?;
    }

    #[test]
    fn min_add_matches_model(initial in arbitrary_values(), script in arbitrary_script()) {
        run_preset(MinAdd, initial, &script, |x, _| x)?;
    }

    #[test]
    fn max_add_matches_model(initial in arbitrary_values(), script in arbitrary_script()) {
        run_preset(MaxAdd, initial, &script, |x, _| x)?;
    }

    #[test]
    fn sum_assign_matches_model(initial in arbitrary_values(), script in arbitrary_script()) {
        run_preset(SumAssign, initial, &script, |x, _| Some(x))?;
    }

    #[test]
    fn min_assign_matches_model(initial in arbitrary_values(), script in arbitrary_script()) {
        run_preset(MinAssign, initial, &script, |x, _| Some(x))?;
    }

    #[test]
    fn affine_closures_match_model(initial in arbitrary_values(), script in arbitrary_script()) {
        let normalize: fn(i64) -> i64 = |v| v.rem_euclid(P);
        let initial: Vec<i64> = initial.into_iter().map(normalize).collect();
        let tree = RangeSegmentTree::build(&initial, affine_ops(), 0, (1, 0)).unwrap();
        let ops = affine_ops();
        run_script(tree, &ops, 0, initial, &script, normalize, |a, b| {
            (a.rem_euclid(P), b.rem_euclid(P))
        })?;
    }
}

// =============================================================================
// Algebraic properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Two queries in a row see the same value.
    #[test]
    fn query_is_idempotent(
        initial in arbitrary_values(),
        script in prop::collection::vec(arbitrary_op(), 0..100),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let mut tree = RangeSegmentTree::from_preset(&initial, SumAdd).unwrap();
        let len = initial.len();
        for op in &script {
            if let Op::Update(x, y, v, _) = op {
                let (l, r) = bounds(x, y, len);
                tree.range_update(l, r, *v).unwrap();
            }
        }
        let (l, r) = bounds(&a, &b, len);
        let first = tree.query(l, r).unwrap();
        let second = tree.query(l, r).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Right after construction every single-element query is the input.
    #[test]
    fn leaves_hold_initial_values(initial in arbitrary_values()) {
        let mut tree = RangeSegmentTree::from_preset(&initial, MinAdd).unwrap();
        for (i, value) in initial.iter().enumerate() {
            prop_assert_eq!(tree.query(i, i).unwrap(), *value);
        }
    }

    /// Updating everything equals applying the update to the whole fold.
    #[test]
    fn full_range_update_matches_fold(initial in arbitrary_values(), v in -1000i64..1000) {
        let n = initial.len();

        let mut sum = RangeSegmentTree::from_preset(&initial, SumAdd).unwrap();
        let before = sum.query(0, n - 1).unwrap();
        sum.range_update(0, n - 1, v).unwrap();
        prop_assert_eq!(sum.query(0, n - 1).unwrap(), SumAdd.apply(&before, &v, n));

        let mut min = RangeSegmentTree::from_preset(&initial, MinAdd).unwrap();
        let before = min.query(0, n - 1).unwrap();
        min.range_update(0, n - 1, v).unwrap();
        prop_assert_eq!(min.query(0, n - 1).unwrap(), MinAdd.apply(&before, &v, n));

        let mut max = RangeSegmentTree::from_preset(&initial, MaxAdd).unwrap();
        let before = max.query(0, n - 1).unwrap();
        max.range_update(0, n - 1, v).unwrap();
        prop_assert_eq!(max.query(0, n - 1).unwrap(), MaxAdd.apply(&before, &v, n));
    }

    /// An overwrite is exact no matter which range updates touched the index.
    #[test]
    fn point_update_overwrites(
        initial in arbitrary_values(),
        script in prop::collection::vec(arbitrary_op(), 0..100),
        i in any::<Index>(),
        v in -1000i64..1000,
    ) {
        let mut tree = RangeSegmentTree::from_preset(&initial, SumAssign).unwrap();
        let len = initial.len();
        for op in &script {
            if let Op::Update(x, y, u, _) = op {
                let (l, r) = bounds(x, y, len);
                tree.range_update(l, r, Some(*u)).unwrap();
            }
        }
        let i = i.index(len);
        tree.point_update(i, v).unwrap();
        prop_assert_eq!(tree.query(i, i).unwrap(), v);
    }
}
