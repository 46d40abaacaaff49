//! Long-running consistency checks: insert everything, delete everything in a
//! different order, and make sure lookups and successor indices agree with the
//! keys at every step.

use fixed_rbtree::{
    CheckingPolicy, Color, CompactNode, ContiguousStorage, FixedRedBlackTree, NaturalOrder,
    NodeStorage, PanicChecking, PlainNode, PoolStorage, RedBlackNode, NULL_INDEX,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

type Dense<const CAPACITY: usize> =
    FixedRedBlackTree<ContiguousStorage<CompactNode<i32, i32>, CAPACITY>, NaturalOrder, PanicChecking>;
type DensePlain<const CAPACITY: usize> =
    FixedRedBlackTree<ContiguousStorage<PlainNode<i32, i32>, CAPACITY>, NaturalOrder, PanicChecking>;
type Pool<const CAPACITY: usize> =
    FixedRedBlackTree<PoolStorage<CompactNode<i32, i32>, CAPACITY>, NaturalOrder, PanicChecking>;

fn contains_all<S, P>(tree: &FixedRedBlackTree<S, NaturalOrder, P>, keys: &[i32]) -> bool
where
    S: NodeStorage,
    S::Node: RedBlackNode<Key = i32, Value = i32>,
    P: CheckingPolicy,
{
    keys.iter().all(|key| tree.contains_key(key))
}

fn max_height(size: usize) -> usize {
    2 * ((size + 1) as f64).log2().floor() as usize
}

/// Fill the tree, drain it through `delete_at_and_return_successor`, then mix
/// insertions and deletions on half the keys. The tree is reused as-is by the
/// caller, so leftovers from a previous round would show up here.
fn run_consistency_round<S, P>(
    tree: &mut FixedRedBlackTree<S, NaturalOrder, P>,
    insertion_order: &[i32],
    deletion_order: &[i32],
) where
    S: NodeStorage,
    S::Node: RedBlackNode<Key = i32, Value = i32>,
    P: CheckingPolicy,
{
    let capacity = insertion_order.len();
    let half = capacity / 2;
    let quarter = capacity / 4;

    for i in 0..capacity {
        assert!(contains_all(tree, &insertion_order[..i]));
        tree.insert(insertion_order[i], insertion_order[i]);
        assert!(tree.validate().is_ok(), "{}", tree.dump_nodes());
    }
    assert!(contains_all(tree, insertion_order));

    for i in 0..capacity {
        assert!(contains_all(tree, &deletion_order[i..]));
        let doomed = deletion_order[i];

        let expected = {
            let greater = tree.index_of_node_greater_than(&doomed);
            tree.contains_at(greater).then(|| *tree.node_at(greater).value())
        };

        let index = tree.index_of_node_or_null(&doomed);
        let successor = tree.delete_at_and_return_successor(index);
        let actual = tree.contains_at(successor).then(|| *tree.node_at(successor).value());

        assert_eq!(expected.is_none(), successor == NULL_INDEX);
        assert_eq!(expected, actual, "successor of {}", doomed);
        assert_eq!(tree.index_of_node_or_null(&doomed), NULL_INDEX);
        assert!(tree.validate().is_ok(), "{}", tree.dump_nodes());
    }
    assert!(tree.empty());
    assert_eq!(tree.root_index(), NULL_INDEX);

    for i in 0..half {
        assert!(contains_all(tree, &insertion_order[..i]));
        tree.insert(insertion_order[i], insertion_order[i]);
    }
    for i in 0..quarter {
        assert!(contains_all(tree, &insertion_order[quarter..quarter + i]));
        assert!(tree.delete_node(&insertion_order[i]));
    }
    assert!(contains_all(tree, &insertion_order[quarter..half]));
    for i in 0..quarter {
        assert!(contains_all(tree, &insertion_order[..i]));
        assert!(contains_all(tree, &insertion_order[quarter..half]));
        tree.insert(insertion_order[i], insertion_order[i]);
    }
    assert!(contains_all(tree, &insertion_order[..half]));
    for i in 0..half {
        assert!(contains_all(tree, &insertion_order[i..half]));
        assert!(tree.delete_node(&insertion_order[i]));
        assert!(tree.validate().is_ok());
    }
    assert!(tree.is_empty());
}

#[test]
fn consistency_regression() {
    let insertion_order = [2, 4, 3, 6, 1, 5, 0, 7];
    let deletion_order = [3, 4, 1, 2, 6, 0, 5, 7];

    let mut dense: Dense<8> = Dense::new();
    run_consistency_round(&mut dense, &insertion_order, &deletion_order);

    let mut plain: DensePlain<8> = DensePlain::new();
    run_consistency_round(&mut plain, &insertion_order, &deletion_order);

    let mut pool: Pool<8> = Pool::new();
    run_consistency_round(&mut pool, &insertion_order, &deletion_order);
}

#[test]
fn randomized_consistency() {
    const CAPACITY: usize = 8;
    const ITERATIONS: usize = 20;

    let mut rng = StdRng::seed_from_u64(42);
    let mut insertion_order: Vec<i32> = (0..CAPACITY as i32).collect();
    let mut deletion_order = insertion_order.clone();

    let mut dense: Dense<CAPACITY> = Dense::new();
    let mut pool: Pool<CAPACITY> = Pool::new();
    for _ in 0..ITERATIONS {
        insertion_order.shuffle(&mut rng);
        deletion_order.shuffle(&mut rng);
        run_consistency_round(&mut dense, &insertion_order, &deletion_order);
        run_consistency_round(&mut pool, &insertion_order, &deletion_order);
    }
}

#[test]
fn randomized_consistency_larger_tree() {
    const CAPACITY: usize = 64;

    let mut rng = StdRng::seed_from_u64(7);
    let mut insertion_order: Vec<i32> = (0..CAPACITY as i32).map(|k| k * 3).collect();
    let mut deletion_order = insertion_order.clone();

    let mut dense: Dense<CAPACITY> = Dense::new();
    for _ in 0..5 {
        insertion_order.shuffle(&mut rng);
        deletion_order.shuffle(&mut rng);
        run_consistency_round(&mut dense, &insertion_order, &deletion_order);
    }
}

#[test]
fn height_stays_within_red_black_bound() {
    const CAPACITY: usize = 512;
    let mut tree: Dense<CAPACITY> = Dense::new();
    let mut order: Vec<i32> = (0..CAPACITY as i32).collect();

    for &key in &order {
        tree.insert(key, key);
        assert!(tree.height() <= max_height(tree.size()));
    }

    order.reverse();
    for &key in &order {
        tree.insert(key, key);
        assert!(tree.height() <= max_height(tree.size()));
    }

    let mut rng = StdRng::seed_from_u64(512);
    for _ in 0..10 {
        order.shuffle(&mut rng);
        for &key in &order {
            tree.insert(key, key);
            assert!(tree.height() <= max_height(tree.size()));
        }
    }
    assert!(tree.full());
    assert!(tree.check_invariants());
}

#[test]
fn height_bound_holds_while_shrinking() {
    const CAPACITY: usize = 256;
    let mut tree: Pool<CAPACITY> = Pool::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mut order: Vec<i32> = (0..CAPACITY as i32).collect();
    order.shuffle(&mut rng);
    tree.extend(order.iter().map(|&k| (k, -k)));

    order.shuffle(&mut rng);
    for &key in &order {
        assert_eq!(tree.remove(&key), Some(-key));
        assert!(tree.height() <= max_height(tree.size()));
        assert!(tree.check_invariants());
    }
    assert_eq!(tree.root_index(), NULL_INDEX);
}

#[test]
fn eight_key_insertion_shape() {
    let mut tree: Dense<8> = Dense::new();
    for key in [8, 5, 15, 12, 19, 9, 13, 23] {
        tree.insert(key, key);
    }
    assert_eq!(tree.size(), 8);
    assert_eq!(tree.height(), 3);

    let root = tree.node_at(tree.root_index());
    assert_eq!((*root.key(), root.color()), (8, Color::Black));
    let left = tree.node_at(root.left_index());
    let right = tree.node_at(root.right_index());
    assert_eq!((*left.key(), left.color()), (5, Color::Black));
    assert_eq!((*right.key(), right.color()), (15, Color::Red));
}

#[test]
fn deleting_red_leaf_of_three() {
    let mut tree: Pool<4> = Pool::new();
    for key in [5, 9, 13] {
        tree.insert(key, key);
    }
    let root = tree.node_at(tree.root_index());
    assert_eq!(*root.key(), 9);
    assert!(tree.node_at(root.left_index()).is_red());
    assert!(tree.node_at(root.right_index()).is_red());

    assert!(tree.delete_node(&5));
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.height(), 1);
    let root = tree.node_at(tree.root_index());
    assert_eq!(*root.key(), 9);
    assert!(root.is_black());
    assert_eq!(root.left_index(), NULL_INDEX);
    let right = tree.node_at(root.right_index());
    assert_eq!(*right.key(), 13);
    assert!(right.is_red());
}

#[test]
fn deleting_interior_slot_keeps_storage_dense() {
    let mut tree: Dense<20> = Dense::new();
    for key in [3, 1, 5, 7, 6, 8, 9, 10] {
        tree.insert(key, key * 10);
    }
    assert!(tree.delete_node(&9));

    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 6, 7, 8, 10]);
    assert!(tree.check_invariants());
    for index in 0..tree.len() as u32 {
        assert!(tree.contains_at(index));
    }
    for index in tree.len() as u32..20 {
        assert!(!tree.contains_at(index));
    }
}

#[test]
fn inserted_then_deleted_keys_are_gone() {
    let mut tree: Dense<32> = Dense::new();
    let mut rng = StdRng::seed_from_u64(11);
    let mut keys: Vec<i32> = (0..32).collect();
    keys.shuffle(&mut rng);
    for &key in &keys {
        tree.insert(key, key);
    }
    keys.shuffle(&mut rng);
    for &key in &keys {
        let before = tree.size();
        assert!(tree.delete_node(&key));
        assert_eq!(tree.size(), before - 1);
        assert_eq!(tree.index_of_node_or_null(&key), NULL_INDEX);
        let in_order: Vec<i32> = tree.keys().copied().collect();
        assert!(in_order.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
