use bst_slab::{generic::Policy, TreeMap, TreeSet};
use rstest::rstest;
use std::{cell::Cell, rc::Rc};

#[rstest]
pub fn iter(#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy) {
	let mut map = TreeMap::with_policy(policy);
	for i in (0..10).rev() {
		map.insert(i, i);
	}

	let mut i = 0;
	for (key, value) in &map {
		assert_eq!(*key, i);
		assert_eq!(*value, i);
		i += 1;
	}

	assert_eq!(i, 10);

	let mut back = map.iter().rev();
	assert_eq!(back.next(), Some((&9, &9)));
	assert_eq!(back.len(), 9);
}

#[rstest]
pub fn iter_both_ends() {
	let map: TreeMap<u32, ()> = (0..7).map(|i| (i, ())).collect();
	let mut it = map.keys();

	let mut front = Vec::new();
	let mut back = Vec::new();
	loop {
		match it.next() {
			Some(k) => front.push(*k),
			None => break,
		}

		match it.next_back() {
			Some(k) => back.push(*k),
			None => break,
		}
	}

	assert_eq!(front, [0, 1, 2, 3]);
	assert_eq!(back, [6, 5, 4]);
}

#[rstest]
pub fn values_mut() {
	let mut map = TreeMap::avl();
	for i in 0..20 {
		map.insert(i, i);
	}

	for value in map.values_mut() {
		*value *= 2;
	}

	for (key, value) in &mut map {
		assert_eq!(*value, key * 2);
		*value += 1;
	}

	assert!(map.values().copied().eq((0..20).map(|i| i * 2 + 1)));
	map.validate();
}

struct Element {
	/// Drop counter.
	counter: Rc<Cell<usize>>,
	value: i32,
}

impl Element {
	pub fn new(counter: &Rc<Cell<usize>>, value: i32) -> Self {
		Element {
			counter: counter.clone(),
			value,
		}
	}

	pub fn inner(&self) -> i32 {
		self.value
	}
}

impl Drop for Element {
	fn drop(&mut self) {
		let c = self.counter.get();
		self.counter.set(c + 1);
	}
}

#[rstest]
pub fn into_iter(
	#[values(Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay)] policy: Policy,
) {
	let counter = Rc::new(Cell::new(0));
	let mut map = TreeMap::with_policy(policy);
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	let mut expected = 0;
	for (key, value) in map {
		assert_eq!(key, value.inner());
		assert_eq!(key, expected);
		expected += 1;
	}

	assert_eq!(counter.get(), 100);
}

#[rstest]
pub fn into_iter_partial_drop() {
	let counter = Rc::new(Cell::new(0));
	let mut map = TreeMap::red_black();
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	let mut it = map.into_iter();
	assert_eq!(it.next().map(|(k, _)| k), Some(0));
	assert_eq!(it.next_back().map(|(k, _)| k), Some(99));
	assert_eq!(counter.get(), 2);

	std::mem::drop(it);
	assert_eq!(counter.get(), 100);
}

#[rstest]
pub fn removed_values_are_dropped_once() {
	let counter = Rc::new(Cell::new(0));
	let mut map = TreeMap::splay();
	for i in 0..10 {
		map.insert(i, Element::new(&counter, i));
	}

	for i in 0..5 {
		map.remove(&i);
	}
	assert_eq!(counter.get(), 5);

	map.clear();
	assert_eq!(counter.get(), 10);
	assert!(map.is_empty());
}

#[rstest]
pub fn set_iter() {
	let set: TreeSet<char> = "splay tree".chars().collect();
	let items: String = set.iter().collect();
	assert_eq!(items, " aelprsty");

	let owned: Vec<char> = set.into_iter().rev().collect();
	assert_eq!(owned, ['y', 't', 's', 'r', 'p', 'l', 'e', 'a', ' ']);
}
