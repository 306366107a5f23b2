use quickcheck_macros::quickcheck;
use std::{collections::BTreeMap, prelude::v1::*};

use super::*;
use crate::OrderBy;

#[test]
fn smoke() {
    let mut set = RbMultiSet::new();
    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.pop_first(), None);
    assert_eq!(set.pop_last(), None);
    assert_eq!(set.remove(&1), None);

    set.extend([3, 1, 2, 3]);
    assert_eq!(set.len(), 4);
    assert!(set.contains(&3));
    assert!(!set.contains(&4));
    assert_eq!(set.count(&3), 2);
    assert_eq!(set.count(&0), 0);
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&3));
    assert_eq!(format!("{:?}", set), "{1, 2, 3, 3}");

    assert_eq!(set.remove(&3), Some(3));
    assert_eq!(set.count(&3), 1);
    set.as_tree().validate().unwrap();

    set.clear();
    assert!(set.is_empty());
}

#[test]
fn pops_respect_insertion_order_among_equals() {
    let mut set = RbMultiSet::with_order(OrderBy(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0)));
    set.extend([(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
    assert_eq!(set.pop_first(), Some((0, 'b')));
    assert_eq!(set.pop_last(), Some((1, 'c')));
    assert_eq!(set.pop_first(), Some((0, 'd')));
    assert_eq!(set.pop_first(), Some((1, 'a')));
    assert!(set.is_empty());
}

#[test]
fn iterate_by_reference() {
    let set: RbMultiSet<_> = "multiset".chars().collect();
    let mut out = String::new();
    for &c in &set {
        out.push(c);
    }
    assert_eq!(out, "eilmsttu");
}

#[quickcheck]
fn qc_matches_counting_map(cmds: Vec<(bool, u8)>) {
    let mut set = RbMultiSet::new();
    let mut model = BTreeMap::<u8, usize>::new();

    for (insert, key) in cmds {
        let key = key % 16;
        if insert {
            set.insert(key);
            *model.entry(key).or_insert(0) += 1;
        } else {
            let expected = match model.get_mut(&key) {
                Some(count) => {
                    *count -= 1;
                    if *count == 0 {
                        model.remove(&key);
                    }
                    Some(key)
                }
                None => None,
            };
            assert_eq!(set.remove(&key), expected);
        }

        set.as_tree().validate().unwrap();
        assert_eq!(set.len(), model.values().sum::<usize>());
        for key in 0..16 {
            assert_eq!(set.count(&key), model.get(&key).copied().unwrap_or(0));
        }
    }
}
