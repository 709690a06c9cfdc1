use indexmap::IndexSet;

use super::TypeId;
use super::transitive_closure;

fn edges(lists: &[&[usize]]) -> Vec<IndexSet<TypeId>> {
    lists
        .iter()
        .map(|list| list.iter().map(|&i| TypeId::new(i)).collect())
        .collect()
}

fn indices(set: &IndexSet<TypeId>) -> Vec<usize> {
    set.iter().map(|id| id.index()).collect()
}

#[test]
fn chain_is_transitive() {
    // 2 -> 1 -> 0
    let reach = transitive_closure(&edges(&[&[], &[0], &[1]])).unwrap();

    assert_eq!(indices(&reach[0]), Vec::<usize>::new());
    assert_eq!(indices(&reach[1]), vec![0]);
    assert_eq!(indices(&reach[2]), vec![1, 0]);
}

#[test]
fn diamond_lists_each_node_once() {
    // 3 -> {1, 2}, 1 -> 0, 2 -> 0
    let reach = transitive_closure(&edges(&[&[], &[0], &[0], &[1, 2]])).unwrap();
    assert_eq!(indices(&reach[3]), vec![1, 2, 0]);
}

#[test]
fn nearest_come_first() {
    // 0 -> {2, 1}, 2 -> 3
    let reach = transitive_closure(&edges(&[&[2, 1], &[], &[3], &[]])).unwrap();
    assert_eq!(indices(&reach[0]), vec![2, 1, 3]);
}

#[test]
fn cycle_is_reported() {
    let err = transitive_closure(&edges(&[&[1], &[2], &[0]])).unwrap_err();
    assert_eq!(err, TypeId::new(0));
}

#[test]
fn self_loop_is_a_cycle() {
    let err = transitive_closure(&edges(&[&[], &[1]])).unwrap_err();
    assert_eq!(err, TypeId::new(1));
}
