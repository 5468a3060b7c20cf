use crate::{
	compare::{Compare, Natural},
	generic::{
		node::{Item, Node},
		policy::{Policy, Rebalance},
		SentinelTree,
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	cmp::Ordering,
	fmt,
	iter::FromIterator,
	ops::Index,
};

mod iter;

pub use iter::*;

/// An ordered map based on a binary search tree.
///
/// Entries are stored in the internal nodes of a [`SentinelTree`], whose nodes are allocated
/// in a slab container `C`.
/// After every lookup, insertion and removal, the map hands the affected node to its
/// balancing [`Policy`]:
///   - [`Policy::Plain`] never rebalances the tree,
///   - [`Policy::Avl`] keeps the heights of sibling subtrees within one of each other,
///   - [`Policy::RedBlack`] maintains a red-black coloring,
///   - [`Policy::Splay`] moves every accessed node to the root.
///
/// Keys are ordered by the comparator `O`, [`Natural`] by default.
///
/// # Basic usage
///
/// ```
/// use bst_slab::TreeMap;
///
/// let mut scores = TreeMap::red_black();
///
/// scores.insert("carol", 12);
/// scores.insert("alice", 7);
/// scores.insert("bob", 3);
///
/// // overwriting returns the previous value.
/// assert_eq!(scores.insert("bob", 4), Some(3));
/// assert_eq!(scores.len(), 3);
///
/// // lookups may restructure the tree, hence take `&mut self`.
/// assert_eq!(scores.get(&"alice"), Some(&7));
///
/// // `peek` and indexing never touch the tree.
/// assert_eq!(scores.peek(&"carol"), Some(&12));
/// assert_eq!(scores[&"bob"], 4);
///
/// let names: Vec<_> = scores.keys().copied().collect();
/// assert_eq!(names, ["alice", "bob", "carol"]);
/// ```
///
/// # Splay maps
///
/// ```
/// use bst_slab::TreeMap;
///
/// let mut map = TreeMap::splay();
/// map.insert(1, 'a');
/// map.insert(2, 'b');
/// map.insert(3, 'c');
///
/// map.get(&1);
/// let root = map.tree().root().unwrap();
/// assert_eq!(map.tree().item(root).unwrap().map(|item| *item.key()), Some(1));
/// ```
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the comparator, changes while it is in the map.
#[derive(Clone)]
pub struct TreeMap<K, V, C, O = Natural> {
	/// Underlying tree.
	tree: SentinelTree<K, V, C>,

	policy: Policy,

	comparator: O,
}

impl<K, V, C> TreeMap<K, V, C> {
	/// Create a new empty map without rebalancing.
	#[inline]
	pub fn new() -> TreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_policy(Policy::Plain)
	}

	/// Create a new empty AVL map.
	#[inline]
	pub fn avl() -> TreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_policy(Policy::Avl)
	}

	/// Create a new empty red-black map.
	#[inline]
	pub fn red_black() -> TreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_policy(Policy::RedBlack)
	}

	/// Create a new empty splay map.
	#[inline]
	pub fn splay() -> TreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_policy(Policy::Splay)
	}

	/// Create a new empty map with the given balancing policy.
	#[inline]
	pub fn with_policy(policy: Policy) -> TreeMap<K, V, C>
	where
		C: Default,
	{
		Self::with_comparator(policy, Natural)
	}
}

impl<K, V, C, O> TreeMap<K, V, C, O> {
	/// Create a new empty map with the given balancing policy and key order.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::{generic::Policy, Reverse, TreeMap};
	///
	/// let mut map: TreeMap<i32, (), Reverse> = TreeMap::with_comparator(Policy::Avl, Reverse);
	/// map.extend((0..5).map(|i| (i, ())));
	///
	/// let keys: Vec<_> = map.keys().copied().collect();
	/// assert_eq!(keys, [4, 3, 2, 1, 0]);
	/// ```
	#[inline]
	pub fn with_comparator(policy: Policy, comparator: O) -> TreeMap<K, V, C, O>
	where
		C: Default,
	{
		TreeMap {
			tree: SentinelTree::with_balance(policy.initial_balance()),
			policy,
			comparator,
		}
	}

	/// Returns `true` if the map contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of elements in the map.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut a = TreeMap::new();
	/// assert_eq!(a.len(), 0);
	/// a.insert(1, "a");
	/// assert_eq!(a.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.tree.item_count()
	}

	#[inline]
	pub fn policy(&self) -> Policy {
		self.policy
	}

	#[inline]
	pub fn comparator(&self) -> &O {
		&self.comparator
	}

	/// Underlying sentinel tree, for inspection.
	#[inline]
	pub fn tree(&self) -> &SentinelTree<K, V, C> {
		&self.tree
	}
}

impl<K, V, C: Slab<Node<K, V>>, O> TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn item_at(&self, id: usize) -> Option<&Item<K, V>> {
		self.tree.node(id).item()
	}

	/// Returns the first key-value pair in the map.
	/// The key in this pair is the minimum key in the map.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut map = TreeMap::avl();
	/// assert_eq!(map.first_key_value(), None);
	/// map.insert(1, "b");
	/// map.insert(2, "a");
	/// assert_eq!(map.first_key_value(), Some((&1, &"b")));
	/// ```
	#[inline]
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		let id = self.tree.subtree_min(self.tree.root_id()?)?;
		self.item_at(id).map(Item::as_pair)
	}

	/// Returns the last key-value pair in the map.
	/// The key in this pair is the maximum key in the map.
	#[inline]
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		let id = self.tree.subtree_max(self.tree.root_id()?)?;
		self.item_at(id).map(Item::as_pair)
	}

	/// Gets an iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut map = TreeMap::splay();
	/// map.insert(3, "c");
	/// map.insert(2, "b");
	/// map.insert(1, "a");
	///
	/// for (key, value) in map.iter() {
	///     println!("{}: {}", key, value);
	/// }
	///
	/// let (first_key, first_value) = map.iter().next().unwrap();
	/// assert_eq!((*first_key, *first_value), (1, "a"));
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<'_, K, V, C> {
		Iter::new(&self.tree)
	}

	/// Gets an iterator over the keys of the map, in sorted order.
	#[inline]
	pub fn keys(&self) -> Keys<'_, K, V, C> {
		Keys { inner: self.iter() }
	}

	/// Gets an iterator over the values of the map, in order by key.
	#[inline]
	pub fn values(&self) -> Values<'_, K, V, C> {
		Values { inner: self.iter() }
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		self.tree.dot_write(f)
	}
}

impl<K, V, C: Slab<Node<K, V>>, O: Compare<K>> TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	/// Node holding `key`, or the sentinel where it would be inserted.
	#[inline]
	fn lookup(&self, key: &K) -> Option<usize> {
		let comparator = &self.comparator;
		self.tree.lookup_by(|k| comparator.compare(key, k))
	}

	/// Returns a reference to the value corresponding to the key,
	/// without notifying the balancing policy.
	///
	/// The tree is left untouched, even for splay maps.
	#[inline]
	pub fn peek(&self, key: &K) -> Option<&V> {
		self.peek_key_value(key).map(|(_, v)| v)
	}

	/// Returns the key-value pair corresponding to the supplied key,
	/// without notifying the balancing policy.
	#[inline]
	pub fn peek_key_value(&self, key: &K) -> Option<(&K, &V)> {
		let id = self.lookup(key)?;
		self.item_at(id).map(Item::as_pair)
	}

	/// Validate the map.
	///
	/// Checks the tree structure, that keys are in strictly increasing order and the
	/// invariant of the balancing policy.
	/// Panics if one of them does not hold.
	pub fn validate(&self) {
		self.tree.validate();

		let mut previous: Option<&K> = None;
		for key in self.keys() {
			if let Some(previous) = previous {
				if self.comparator.compare(previous, key) != Ordering::Less {
					panic!("keys are not in strictly increasing order")
				}
			}

			previous = Some(key)
		}

		self.policy.check(&self.tree)
	}
}

impl<K, V, C: SlabMut<Node<K, V>>, O: Compare<K>> TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Find `key`, then let the policy know which node was accessed.
	///
	/// Returns the id of the node holding `key`, if any.
	#[inline]
	fn access(&mut self, key: &K) -> Option<usize> {
		let id = self.lookup(key)?;
		let position = self.tree.position_of(id);
		self.policy.on_access(&mut self.tree, position);

		if self.tree.is_internal_id(id) {
			Some(id)
		} else {
			None
		}
	}

	/// Returns a reference to the value corresponding to the key.
	///
	/// This is an access: splay maps move the node found
	/// (or the last node visited if the key is absent) to the root.
	/// Use [`peek`](TreeMap::peek) to leave the tree untouched.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut map = TreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get(&mut self, key: &K) -> Option<&V> {
		let id = self.access(key)?;
		self.item_at(id).map(Item::value)
	}

	/// Returns a mutable reference to the value corresponding to the key.
	///
	/// This is an access, like [`get`](TreeMap::get).
	#[inline]
	pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
		let id = self.access(key)?;
		self.tree.node_mut(id).item_mut().map(Item::value_mut)
	}

	/// Returns `true` if the map contains a value for the specified key.
	///
	/// This is an access, like [`get`](TreeMap::get).
	#[inline]
	pub fn contains_key(&mut self, key: &K) -> bool {
		self.access(key).is_some()
	}

	/// Insert a key-value pair into the map.
	///
	/// If the map did not have this key present, `None` is returned.
	///
	/// If the map did have this key present, the value is updated, and the old
	/// value is returned. The key is not updated.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut map = TreeMap::avl();
	/// assert_eq!(map.insert(37, "a"), None);
	/// assert_eq!(map.is_empty(), false);
	///
	/// map.insert(37, "b");
	/// assert_eq!(map.insert(37, "c"), Some("b"));
	/// assert_eq!(map[&37], "c");
	/// ```
	pub fn insert(&mut self, key: K, value: V) -> Option<V> {
		self.tree.ensure_root();
		let id = match self.lookup(&key) {
			Some(id) => id,
			None => panic!("rootless tree after root allocation"),
		};
		let position = self.tree.position_of(id);

		match self.tree.node_mut(id).item_mut() {
			Some(item) => {
				let old_value = item.set_value(value);
				self.policy.on_access(&mut self.tree, position);
				Some(old_value)
			}
			None => {
				self.tree.expand_at(id, Item::new(key, value));
				self.policy.on_insert(&mut self.tree, position);
				None
			}
		}
	}

	/// Removes a key from the map, returning the value at the key if the key
	/// was previously in the map.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut map = TreeMap::red_black();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove(&1), Some("a"));
	/// assert_eq!(map.remove(&1), None);
	/// ```
	#[inline]
	pub fn remove(&mut self, key: &K) -> Option<V> {
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes a key from the map, returning the stored key and value if the key
	/// was previously in the map.
	///
	/// A node with two internal children is not unlinked itself:
	/// it receives the entry of its in-order successor, whose node is unlinked instead.
	pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
		let id = self.lookup(key)?;

		let [left, right] = match self.tree.node(id).children() {
			Some(children) => children,
			None => {
				let position = self.tree.position_of(id);
				self.policy.on_access(&mut self.tree, position);
				return None;
			}
		};

		let (item, promoted) = if self.tree.is_internal_id(left) && self.tree.is_internal_id(right) {
			let successor = match self.tree.subtree_min(right) {
				Some(successor) => successor,
				None => panic!("internal node @{} has no successor", right),
			};

			let (successor_item, promoted) = self.tree.remove_at(successor);
			(self.tree.replace_item_at(id, successor_item), promoted)
		} else {
			self.tree.remove_at(id)
		};

		let position = self.tree.position_of(promoted);
		self.policy.on_delete(&mut self.tree, position);
		Some(item.into_pair())
	}
}

impl<K, V, C: SlabMut<Node<K, V>>, O> TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Gets a mutable iterator over the entries of the map, sorted by key.
	#[inline]
	pub fn iter_mut(&mut self) -> IterMut<'_, K, V, C> {
		IterMut::new(&mut self.tree)
	}

	/// Gets a mutable iterator over the values of the map, in order by key.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeMap;
	///
	/// let mut a = TreeMap::new();
	/// a.insert(1, String::from("hello"));
	/// a.insert(2, String::from("goodbye"));
	///
	/// for value in a.values_mut() {
	///     value.push_str("!");
	/// }
	///
	/// let values: Vec<String> = a.values().cloned().collect();
	/// assert_eq!(values, [String::from("hello!"),
	///                     String::from("goodbye!")]);
	/// ```
	#[inline]
	pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, C> {
		ValuesMut {
			inner: self.iter_mut(),
		}
	}

	/// Clears the map, removing all elements.
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.tree.clear()
	}
}

impl<K, V, C: Slab<Node<K, V>>, O: Compare<K>> Index<&K> for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// Indexing is not an access: the tree is never restructured.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the `TreeMap`.
	#[inline]
	fn index(&self, key: &K) -> &V {
		self.peek(key).expect("no entry found for key")
	}
}

impl<K, L: PartialEq<K>, V, W: PartialEq<V>, C: Slab<Node<K, V>>, D: Slab<Node<L, W>>, O, P>
	PartialEq<TreeMap<L, W, D, P>> for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	fn eq(&self, other: &TreeMap<L, W, D, P>) -> bool {
		self.len() == other.len()
			&& self
				.iter()
				.zip(other.iter())
				.all(|((k, v), (l, w))| l == k && w == v)
	}
}

impl<K: Eq, V: Eq, C: Slab<Node<K, V>>, O> Eq for TreeMap<K, V, C, O> where C: SimpleCollectionRef {}

impl<K: fmt::Debug, V: fmt::Debug, C: Slab<Node<K, V>>, O> fmt::Debug for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, C: Default, O: Default> Default for TreeMap<K, V, C, O> {
	#[inline]
	fn default() -> Self {
		TreeMap::with_comparator(Policy::default(), O::default())
	}
}

impl<K, V, C: SlabMut<Node<K, V>> + Default, O: Compare<K> + Default> FromIterator<(K, V)>
	for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Collect the entries in a map with the default policy.
	#[inline]
	fn from_iter<T>(iter: T) -> TreeMap<K, V, C, O>
	where
		T: IntoIterator<Item = (K, V)>,
	{
		let mut map = TreeMap::default();
		map.extend(iter);
		map
	}
}

impl<K, V, C: SlabMut<Node<K, V>>, O: Compare<K>> Extend<(K, V)> for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<'a, K: Copy, V: Copy, C: SlabMut<Node<K, V>>, O: Compare<K>> Extend<(&'a K, &'a V)>
	for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (&'a K, &'a V)>,
	{
		self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
	}
}

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize, C: Slab<Node<K, V>>, O> serde::Serialize
	for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		use serde::ser::SerializeMap;
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::Reverse;

	type Map<O = Natural> = TreeMap<i32, char, slab::Slab<Node<i32, char>>, O>;

	fn root_key<O>(map: &Map<O>) -> Option<i32> {
		let root = map.tree().root()?;
		map.tree().item(root).unwrap().map(|item| *item.key())
	}

	#[test]
	fn lazy_root() {
		let mut map = Map::new();
		assert!(map.tree().is_empty());
		assert_eq!(map.get(&1), None);
		assert_eq!(map.remove(&1), None);
		assert!(map.tree().is_empty());

		map.insert(1, 'a');
		assert_eq!(map.tree().node_count(), 3);

		map.remove(&1);
		assert!(map.is_empty());
		assert_eq!(map.tree().node_count(), 1);
		map.validate();
	}

	#[test]
	fn overwrite_keeps_key_and_size() {
		let mut map = Map::avl();
		map.insert(1, 'a');
		map.insert(2, 'b');
		assert_eq!(map.insert(1, 'z'), Some('a'));
		assert_eq!(map.len(), 2);
		assert_eq!(map.peek(&1), Some(&'z'));
		map.validate();
	}

	#[test]
	fn successor_takes_removed_node() {
		//         4
		//       ╱   ╲
		//      2     6
		//     ╱ ╲   ╱ ╲
		//    1   3 5   7
		let mut map: Map = [4, 2, 6, 1, 3, 5, 7]
			.iter()
			.map(|&k| (k, (b'a' + k as u8) as char))
			.collect();
		let root = map.tree().root().unwrap();

		assert_eq!(map.remove(&4), Some('e'));
		assert_eq!(map.len(), 6);
		assert_eq!(map.tree().root(), Some(root));
		assert_eq!(root_key(&map), Some(5));
		assert_eq!(map.peek(&5), Some(&'f'));
		map.validate();
	}

	#[test]
	fn reverse_order() {
		let mut map: Map<Reverse> = TreeMap::with_comparator(Policy::RedBlack, Reverse);
		map.extend((1..=5).map(|k| (k, 'x')));
		assert_eq!(map.first_key_value(), Some((&5, &'x')));
		assert_eq!(map.last_key_value(), Some((&1, &'x')));
		map.validate();
	}

	#[test]
	fn splay_probe_moves_last_visited_node() {
		let mut map = Map::splay();
		map.extend([(10, 'a'), (20, 'b'), (30, 'c')].iter().copied());
		assert_eq!(root_key(&map), Some(30));

		assert_eq!(map.get(&15), None);
		let root = root_key(&map);
		assert!(root == Some(10) || root == Some(20));

		assert!(map.contains_key(&20));
		assert_eq!(root_key(&map), Some(20));
		map.validate();
	}

	#[test]
	fn peek_does_not_splay() {
		let mut map = Map::splay();
		map.extend([(1, 'a'), (2, 'b'), (3, 'c')].iter().copied());
		assert_eq!(map.peek(&1), Some(&'a'));
		assert_eq!(map[&2], 'b');
		assert_eq!(root_key(&map), Some(3));
	}

	#[test]
	fn iterators() {
		let mut map: Map = (0..10).rev().map(|k| (k, 'a')).collect();
		assert_eq!(map.iter().len(), 10);
		assert_eq!(map.keys().rev().next(), Some(&9));

		let mut it = map.keys();
		assert_eq!(it.next(), Some(&0));
		assert_eq!(it.next_back(), Some(&9));
		assert_eq!(it.len(), 8);
		assert_eq!(it.copied().collect::<Vec<_>>(), (1..9).collect::<Vec<_>>());

		for (k, v) in map.iter_mut() {
			*v = (b'a' + *k as u8) as char
		}

		let values: String = map.values().collect();
		assert_eq!(values, "abcdefghij");

		let back: Vec<_> = map.into_iter().rev().take(2).collect();
		assert_eq!(back, [(9, 'j'), (8, 'i')]);
	}

	#[test]
	fn debug_and_eq() {
		let a: Map = [(2, 'b'), (1, 'a')].iter().copied().collect();
		let mut b = Map::splay();
		b.extend([(1, 'a'), (2, 'b')].iter().copied());
		assert_eq!(format!("{:?}", a), "{1: 'a', 2: 'b'}");
		assert_eq!(a, b);

		b.insert(3, 'c');
		assert_ne!(a, b);
	}
}
