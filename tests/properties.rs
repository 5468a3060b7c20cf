use bst_slab::{generic::Policy, TreeMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug)]
enum Op {
	Insert(u16, u32),
	Remove(u16),
	Get(u16),
}

fn policy() -> impl Strategy<Value = Policy> {
	prop_oneof![
		Just(Policy::Plain),
		Just(Policy::Avl),
		Just(Policy::RedBlack),
		Just(Policy::Splay),
	]
}

/// Small key space so that removals and overwrites hit existing keys.
fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (0u16..64, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
		2 => (0u16..64).prop_map(Op::Remove),
		1 => (0u16..64).prop_map(Op::Get),
	]
}

fn root_key(map: &TreeMap<u16, u32>) -> Option<u16> {
	let tree = map.tree();
	tree.item(tree.root()?).ok()?.map(|item| *item.key())
}

proptest! {
	#[test]
	fn behaves_like_a_btree_map(policy in policy(), ops in prop::collection::vec(op(), 0..300)) {
		let mut map = TreeMap::with_policy(policy);
		let mut model = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) => prop_assert_eq!(map.insert(k, v), model.insert(k, v)),
				Op::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(&k)),
				Op::Get(k) => prop_assert_eq!(map.get(&k), model.get(&k)),
			}

			map.validate();
			prop_assert_eq!(map.len(), model.len());
			if map.tree().is_empty() {
				prop_assert_eq!(map.tree().node_count(), 0);
				prop_assert!(map.is_empty());
			} else {
				prop_assert_eq!(map.tree().node_count(), 2 * map.len() + 1);
			}
		}

		let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
		let expected: Vec<_> = model.into_iter().collect();
		prop_assert_eq!(entries, expected);
	}

	#[test]
	fn splay_moves_accessed_key_to_root(
		keys in prop::collection::btree_set(any::<u16>(), 1..100),
		pick in any::<prop::sample::Index>()
	) {
		let keys: Vec<_> = keys.into_iter().collect();
		let mut map = TreeMap::splay();
		for k in &keys {
			map.insert(*k, 0);
			prop_assert_eq!(root_key(&map), Some(*k));
		}

		let k = *pick.get(&keys);
		prop_assert!(map.contains_key(&k));
		prop_assert_eq!(root_key(&map), Some(k));
		map.validate();
	}

	#[test]
	fn balanced_trees_survive_deep_deletes(
		policy in prop_oneof![Just(Policy::Avl), Just(Policy::RedBlack)],
		len in 1usize..200,
		step in 1usize..7
	) {
		let mut map = TreeMap::with_policy(policy);
		for k in 0..len {
			map.insert(k, k);
		}

		for k in (0..len).step_by(step) {
			prop_assert_eq!(map.remove(&k), Some(k));
			map.validate();
		}

		for k in (0..len).rev() {
			map.remove(&k);
			map.validate();
		}

		prop_assert!(map.is_empty());
	}
}
