use crate::*;
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f", "g", "h"]).prop_map(str::to_string)
}

fn element_set() -> impl Strategy<Value = ElementSet> {
    prop::collection::vec(label(), 0..8).prop_map(|v| v.into_iter().collect())
}

fn named_sets(n: usize) -> impl Strategy<Value = NamedSets> {
    prop::collection::vec(element_set(), n).prop_map(|v| NamedSets::from_sets(v).unwrap())
}

fn count_and_sets() -> impl Strategy<Value = (SetCount, NamedSets)> {
    prop_oneof![
        named_sets(2).prop_map(|s| (SetCount::Two, s)),
        named_sets(3).prop_map(|s| (SetCount::Three, s)),
    ]
}

proptest! {
    #[test]
    fn regions_partition_the_union((count, sets) in count_and_sets()) {
        let map = partition(&sets, count);
        let union = sets.union_all();

        prop_assert_eq!(map.total_len(), union.len());
        for label in union.iter() {
            let hits = map.iter().filter(|(_, r)| r.contains(label)).count();
            prop_assert_eq!(hits, 1, "label {} appears in {} regions", label, hits);
        }
    }

    #[test]
    fn region_membership_is_exact((count, sets) in count_and_sets()) {
        let map = partition(&sets, count);
        for (key, region) in map.iter() {
            for label in region.iter() {
                for (i, set) in sets.iter().enumerate() {
                    prop_assert_eq!(set.labels.contains(label), key.includes(i));
                }
            }
        }
    }

    #[test]
    fn binary_operations_never_depend_on_c(
        sets in named_sets(2),
        c1 in element_set(),
        c2 in element_set(),
    ) {
        let with = |c: ElementSet| {
            let mut all: Vec<ElementSet> = sets.iter().map(|s| s.labels.clone()).collect();
            all.push(c);
            NamedSets::from_sets(all).unwrap()
        };
        let first = with(c1);
        let second = with(c2);
        for op in [Operation::Difference, Operation::SymmetricDifference] {
            prop_assert_eq!(
                evaluate(&first, SetCount::Three, op),
                evaluate(&second, SetCount::Three, op)
            );
        }
    }

    #[test]
    fn adding_a_third_set_grows_union_and_shrinks_intersection(
        sets in named_sets(2),
        c in element_set(),
    ) {
        let mut all: Vec<ElementSet> = sets.iter().map(|s| s.labels.clone()).collect();
        all.push(c);
        let three = NamedSets::from_sets(all).unwrap();

        let union2 = evaluate(&sets, SetCount::Two, Operation::Union);
        let union3 = evaluate(&three, SetCount::Three, Operation::Union);
        prop_assert!(union2.iter().all(|l| union3.contains(l)));

        let inter2 = evaluate(&sets, SetCount::Two, Operation::Intersection);
        let inter3 = evaluate(&three, SetCount::Three, Operation::Intersection);
        prop_assert!(inter3.iter().all(|l| inter2.contains(l)));
    }

    #[test]
    fn recomputation_is_idempotent((count, sets) in count_and_sets()) {
        for op in Operation::ALL {
            let a = compute_sets(sets.clone(), count, op);
            let b = compute_sets(sets.clone(), count, op);
            prop_assert_eq!(a, b);
        }
    }
}
