use bst_slab::{generic::Policy, TreeMap};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use rstest::rstest;

const SEED: u64 = 0x7465_7374_7365_6564;

/// Distinct keys in random order, with random values.
fn items() -> Vec<(usize, usize)> {
	let mut rng = SmallRng::seed_from_u64(SEED);
	let mut items: Vec<_> = (0..100)
		.map(|i| (i * 97 % 10007, rng.gen_range(0..10000)))
		.collect();
	items.shuffle(&mut rng);
	items
}

#[rstest]
pub fn insert(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let mut map: TreeMap<usize, usize> = TreeMap::with_policy(policy);

	for (key, value) in items() {
		if map.insert(key, value).is_some() {
			panic!("duplicate: {}", key);
		}
		map.validate();
	}

	assert_eq!(map.len(), 100);
	assert_eq!(map.tree().node_count(), 201);

	let mut expected = items();
	expected.sort_unstable();
	let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(entries, expected);
}

#[rstest]
pub fn remove(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let mut map: TreeMap<usize, usize> = TreeMap::with_policy(policy);

	let mut items = items();
	for (key, value) in &items {
		map.insert(*key, *value);
	}

	let mut rng = SmallRng::seed_from_u64(SEED + 1);
	items.shuffle(&mut rng);

	for (i, (key, value)) in items.iter().enumerate() {
		assert_eq!(map.remove(key), Some(*value));
		assert_eq!(map.remove(key), None);
		assert_eq!(map.len(), items.len() - i - 1);
		map.validate();
	}

	assert!(map.is_empty());
	assert_eq!(map.tree().node_count(), 1)
}

#[rstest]
pub fn overwrite(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let mut map: TreeMap<usize, usize> = TreeMap::with_policy(policy);

	for (key, value) in items() {
		map.insert(key, value);
	}

	for (key, value) in items() {
		assert_eq!(map.insert(key, value + 1), Some(value));
		assert_eq!(map.len(), 100);
		assert_eq!(map.get(&key), Some(&(value + 1)));
		map.validate();
	}
}

#[rstest]
pub fn update(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let mut map: TreeMap<usize, usize> = TreeMap::with_policy(policy);

	for (key, value) in items() {
		if key % 2 == 0 {
			map.insert(key, value);
		}
	}

	for (key, value) in items() {
		let current = map.get_mut(&key).map(|current| *current);
		match current {
			Some(current) if current % 2 == 0 => {
				map.remove(&key);
			}
			Some(_) => {
				if let Some(current) = map.get_mut(&key) {
					*current = 10000 - value
				}
			}
			None => {
				map.insert(key, value);
			}
		}

		map.validate();
	}

	for (key, value) in items() {
		let should_be_present = key % 2 == 1 || value % 2 == 1;

		match map.peek(&key) {
			Some(current) => {
				if !should_be_present {
					panic!("binding {}:{} should not be present", key, value);
				}

				if key % 2 == 0 {
					assert_eq!(*current, 10000 - value)
				} else {
					assert_eq!(*current, value)
				}
			}
			None => {
				if should_be_present {
					panic!("binding {}:{} should be present", key, value);
				}
			}
		}
	}
}

#[rstest]
pub fn positions(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let mut map: TreeMap<usize, usize> = TreeMap::with_policy(policy);
	for (key, value) in items() {
		map.insert(key, value);
	}

	let tree = map.tree();
	let in_order = tree.in_order();
	assert_eq!(in_order.len(), tree.node_count());

	// sentinels and internal nodes alternate.
	for (i, p) in in_order.iter().enumerate() {
		assert_eq!(tree.is_leaf(*p), Ok(i % 2 == 0));
	}

	for p in in_order {
		match tree.parent(p).unwrap() {
			Some(parent) => {
				let children = tree.children(parent).unwrap();
				assert!(children.contains(&p));
				assert_eq!(tree.num_children(parent), Ok(2));

				let sibling = tree.sibling(p).unwrap().unwrap();
				assert_ne!(sibling, p);
				assert_eq!(tree.parent(sibling), Ok(Some(parent)));
			}
			None => assert_eq!(tree.root(), Some(p)),
		}
	}

	assert_eq!(tree.pre_order().len(), tree.node_count());
	assert_eq!(tree.post_order().len(), tree.node_count());
	assert_eq!(tree.level_order().first().copied(), tree.root());
}
