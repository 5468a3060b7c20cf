use bst_slab::{
	generic::{
		node::{Balance, Color, Position},
		Policy,
	},
	Error, TreeMap, Violation,
};
use rstest::rstest;

type Map = TreeMap<i32, i32>;

fn key_at(map: &Map, p: Position) -> Option<i32> {
	map.tree().item(p).unwrap().map(|item| *item.key())
}

fn root_key(map: &Map) -> Option<i32> {
	key_at(map, map.tree().root()?)
}

fn filled(policy: Policy, keys: &[i32]) -> Map {
	let mut map = Map::with_policy(policy);
	for key in keys {
		map.insert(*key, key * 10);
		map.validate();
	}
	map
}

#[rstest]
fn avl_keeps_insertion_shape() {
	let map = filled(Policy::Avl, &[5, 3, 8, 1, 4, 7, 9]);
	let keys: Vec<_> = map.keys().copied().collect();
	assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
	assert_eq!(root_key(&map), Some(5));

	let root = map.tree().root().unwrap();
	assert_eq!(map.tree().balance(root), Ok(Balance::Height(3)));
}

#[rstest]
#[case(&[1, 2, 3], 2)]
#[case(&[3, 2, 1], 2)]
#[case(&[1, 3, 2], 2)]
#[case(&[1, 2, 3, 4, 5, 6, 7], 4)]
fn avl_rotations(#[case] keys: &[i32], #[case] expected_root: i32) {
	let map = filled(Policy::Avl, keys);
	assert_eq!(root_key(&map), Some(expected_root));
}

#[rstest]
fn red_black_ascending_inserts() {
	let map = filled(Policy::RedBlack, &[10, 20, 30]);
	let tree = map.tree();
	let root = tree.root().unwrap();
	assert_eq!(key_at(&map, root), Some(20));
	assert_eq!(tree.balance(root), Ok(Balance::Color(Color::Black)));

	for child in tree.children(root).unwrap() {
		assert_eq!(tree.balance(child), Ok(Balance::Color(Color::Red)));
		assert_eq!(tree.num_children(child), Ok(2));
		for sentinel in tree.children(child).unwrap() {
			assert_eq!(tree.balance(sentinel), Ok(Balance::Color(Color::Black)));
		}
	}
}

#[rstest]
fn red_black_recoloring_propagates() {
	// 40 recolors 10 and 30 black, then 50 restructures 30 and 40.
	let mut map = filled(Policy::RedBlack, &[10, 20, 30, 40, 50]);
	assert_eq!(root_key(&map), Some(20));

	map.remove(&20);
	map.validate();
	assert_eq!(map.len(), 4);
}

#[rstest]
fn splay_recency() {
	let mut map = filled(Policy::Splay, &[1, 2, 3]);
	assert_eq!(root_key(&map), Some(3));

	assert_eq!(map.get(&1), Some(&10));
	assert_eq!(root_key(&map), Some(1));
	map.validate();
}

#[rstest]
fn splay_delete_moves_parent_up() {
	let mut map = filled(Policy::Splay, &[1, 2, 3, 4]);
	map.get(&1);
	assert_eq!(root_key(&map), Some(1));

	// 1 -> 4 -> 2 -> 3: removing 2 promotes 3 under 4, which is splayed.
	map.remove(&2);
	map.validate();
	assert_eq!(root_key(&map), Some(4));
	assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 4]);
}

#[rstest]
#[case(Policy::Plain)]
#[case(Policy::Avl)]
#[case(Policy::RedBlack)]
#[case(Policy::Splay)]
fn idempotent_overwrite(#[case] policy: Policy) {
	let mut map = filled(policy, &[4, 2, 6]);
	assert_eq!(map.insert(2, 1), Some(20));
	assert_eq!(map.insert(2, 2), Some(1));
	assert_eq!(map.len(), 3);
	assert_eq!(map.get(&2), Some(&2));
	map.validate();
}

#[rstest]
fn remove_with_two_internal_children() {
	let mut map = filled(Policy::Plain, &[4, 2, 6, 1, 3, 5, 7]);
	let root = map.tree().root().unwrap();

	assert_eq!(map.remove(&4), Some(40));
	assert_eq!(map.len(), 6);

	// the successor entry moved into the node of the removed key.
	assert_eq!(map.tree().root(), Some(root));
	assert_eq!(key_at(&map, root), Some(5));
	assert_eq!(map.peek(&5), Some(&50));
	assert_eq!(map.tree().node_count(), 13);
	map.validate();
}

#[rstest]
#[case(Policy::Plain)]
#[case(Policy::Avl)]
#[case(Policy::RedBlack)]
#[case(Policy::Splay)]
fn absent_keys(#[case] policy: Policy) {
	let mut map = filled(policy, &[2, 4, 6]);
	assert_eq!(map.get(&3), None);
	assert!(!map.contains_key(&5));
	assert_eq!(map.remove(&7), None);
	assert_eq!(map.len(), 3);
	map.validate();
}

#[rstest]
fn stale_position_is_rejected() {
	let mut map = filled(Policy::Plain, &[2, 1, 3]);
	let tree = map.tree();
	let right = tree.right(tree.root().unwrap()).unwrap().unwrap();
	assert_eq!(key_at(&map, right), Some(3));

	map.remove(&3);
	assert_eq!(map.tree().parent(right), Err(Error::InvalidPosition(right)));
	assert!(!map.tree().contains(right));
}

#[rstest]
fn positions_of_another_tree_are_rejected() {
	let a = filled(Policy::Plain, &[1]);
	let b = filled(Policy::Plain, &[1]);
	let p = b.tree().root().unwrap();
	assert_eq!(a.tree().item(p).err(), Some(Error::InvalidPosition(p)));
}

#[rstest]
fn low_level_contract_violations() {
	use bst_slab::generic::{node::Node, SentinelTree};

	let mut tree: SentinelTree<i32, (), slab::Slab<Node<i32, ()>>> = SentinelTree::new();
	let root = tree.add_root(Some((2, ()))).unwrap();
	let left = tree.add_left(root, 1, ()).unwrap();
	tree.add_right(root, 3, ()).unwrap();

	assert_eq!(
		tree.add_root(None),
		Err(Error::StructuralPrecondition {
			position: root,
			violation: Violation::RootExists
		})
	);
	assert_eq!(
		tree.remove(root),
		Err(Error::StructuralPrecondition {
			position: root,
			violation: Violation::TwoInternalChildren
		})
	);

	let sentinel = tree.left(left).unwrap().unwrap();
	assert_eq!(
		tree.set(sentinel, ()),
		Err(Error::StructuralPrecondition {
			position: sentinel,
			violation: Violation::Sentinel
		})
	);
	assert_eq!(
		tree.expand(left, 0, ()),
		Err(Error::StructuralPrecondition {
			position: left,
			violation: Violation::NotSentinel
		})
	);

	tree.validate();
	assert_eq!(tree.item_count(), 3);
}

#[rstest]
#[case(Policy::Plain)]
#[case(Policy::Avl)]
#[case(Policy::RedBlack)]
#[case(Policy::Splay)]
fn misses_on_a_fresh_map_allocate_nothing(#[case] policy: Policy) {
	let mut map = Map::with_policy(policy);
	assert_eq!(map.remove(&0), None);
	assert_eq!(map.get(&0), None);
	assert!(!map.contains_key(&1));
	assert!(map.tree().is_empty());
	assert_eq!(map.tree().node_count(), 0);
	map.validate();

	map.insert(0, 0);
	map.remove(&0);
	assert_eq!(map.tree().node_count(), 1);
	map.validate();
}
