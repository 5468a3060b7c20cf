use crate::{
	compare::{Compare, Natural},
	generic::{map, node::Node, Policy, TreeMap},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	fmt,
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
};

/// An ordered set based on a red-black [`TreeMap`] with `()` values.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the comparator, changes while it is in the set.
pub struct TreeSet<T, C, O = Natural> {
	map: TreeMap<T, (), C, O>,
}

impl<T, C> TreeSet<T, C> {
	/// Makes a new, empty `TreeSet`.
	///
	/// # Example
	///
	/// ```
	/// # #![allow(unused_mut)]
	/// use bst_slab::TreeSet;
	///
	/// let mut set: TreeSet<i32> = TreeSet::new();
	/// ```
	#[inline]
	pub fn new() -> Self
	where
		C: Default,
	{
		TreeSet {
			map: TreeMap::red_black(),
		}
	}
}

impl<T, C, O> TreeSet<T, C, O> {
	/// Makes a new, empty `TreeSet` ordered by the given comparator.
	#[inline]
	pub fn with_comparator(comparator: O) -> Self
	where
		C: Default,
	{
		TreeSet {
			map: TreeMap::with_comparator(Policy::RedBlack, comparator),
		}
	}

	/// Returns the number of elements in the set.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeSet;
	///
	/// let mut v = TreeSet::new();
	/// assert_eq!(v.len(), 0);
	/// v.insert(1);
	/// assert_eq!(v.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Returns `true` if the set contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Underlying map.
	#[inline]
	pub fn as_map(&self) -> &TreeMap<T, (), C, O> {
		&self.map
	}
}

impl<T, C: Default, O: Default> Default for TreeSet<T, C, O> {
	#[inline]
	fn default() -> Self {
		TreeSet::with_comparator(O::default())
	}
}

impl<T, C: Slab<Node<T, ()>>, O> TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
{
	/// Gets an iterator that visits the values in the `TreeSet` in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeSet;
	///
	/// let set: TreeSet<usize> = [3, 1, 2].iter().cloned().collect();
	/// let mut set_iter = set.iter();
	/// assert_eq!(set_iter.next(), Some(&1));
	/// assert_eq!(set_iter.next(), Some(&2));
	/// assert_eq!(set_iter.next(), Some(&3));
	/// assert_eq!(set_iter.next(), None);
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<'_, T, C> {
		Iter {
			inner: self.map.keys(),
		}
	}

	/// Returns a reference to the first value in the set, if any.
	/// This value is always the minimum of all values in the set.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.map.first_key_value().map(|(k, _)| k)
	}

	/// Returns a reference to the last value in the set, if any.
	/// This value is always the maximum of all values in the set.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.map.last_key_value().map(|(k, _)| k)
	}
}

impl<T, C: Slab<Node<T, ()>>, O: Compare<T>> TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
{
	/// Validate the underlying red-black tree.
	///
	/// Panics if it is not valid.
	#[inline]
	pub fn validate(&self) {
		self.map.validate()
	}
}

impl<T, C: SlabMut<Node<T, ()>>, O: Compare<T>> TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Returns `true` if the set contains a value.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeSet;
	///
	/// let mut set: TreeSet<_> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.contains(&1), true);
	/// assert_eq!(set.contains(&4), false);
	/// ```
	#[inline]
	pub fn contains(&mut self, value: &T) -> bool {
		self.map.contains_key(value)
	}

	/// Adds a value to the set.
	///
	/// If the set did not have this value present, `true` is returned.
	///
	/// If the set did have this value present, `false` is returned, and the
	/// entry is not updated.
	///
	/// # Example
	///
	/// ```
	/// use bst_slab::TreeSet;
	///
	/// let mut set = TreeSet::new();
	///
	/// assert_eq!(set.insert(2), true);
	/// assert_eq!(set.insert(2), false);
	/// assert_eq!(set.len(), 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, value: T) -> bool {
		self.map.insert(value, ()).is_none()
	}

	/// Removes a value from the set. Returns whether the value was
	/// present in the set.
	#[inline]
	pub fn remove(&mut self, value: &T) -> bool {
		self.map.remove(value).is_some()
	}

	/// Removes and returns the value in the set, if any, that is equal to the given one.
	#[inline]
	pub fn take(&mut self, value: &T) -> Option<T> {
		self.map.remove_entry(value).map(|(t, _)| t)
	}

	/// Clears the set, removing all values.
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.map.clear()
	}
}

impl<T: Clone, C: Clone, O: Clone> Clone for TreeSet<T, C, O> {
	#[inline]
	fn clone(&self) -> Self {
		TreeSet {
			map: self.map.clone(),
		}
	}
}

impl<T: fmt::Debug, C: Slab<Node<T, ()>>, O> fmt::Debug for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<T, C: SlabMut<Node<T, ()>> + Default, O: Compare<T> + Default> FromIterator<T>
	for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut set = TreeSet::default();
		set.extend(iter);
		set
	}
}

impl<T, C: SlabMut<Node<T, ()>>, O: Compare<T>> Extend<T> for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for t in iter {
			self.insert(t);
		}
	}
}

impl<'a, T: 'a + Copy, C: SlabMut<Node<T, ()>>, O: Compare<T>> Extend<&'a T> for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().copied())
	}
}

impl<T, C: SlabMut<Node<T, ()>>, O> IntoIterator for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = T;
	type IntoIter = IntoIter<T, C>;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C> {
		IntoIter {
			inner: self.map.into_iter(),
		}
	}
}

impl<'a, T, C: Slab<Node<T, ()>>, O> IntoIterator for &'a TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;
	type IntoIter = Iter<'a, T, C>;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C> {
		self.iter()
	}
}

impl<T, L: PartialEq<T>, C: Slab<Node<T, ()>>, D: Slab<Node<L, ()>>, O, P> PartialEq<TreeSet<L, D, P>>
	for TreeSet<T, C, O>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	#[inline]
	fn eq(&self, other: &TreeSet<L, D, P>) -> bool {
		self.map.eq(&other.map)
	}
}

impl<T: Eq, C: Slab<Node<T, ()>>, O> Eq for TreeSet<T, C, O> where C: SimpleCollectionRef {}

pub struct Iter<'a, T, C> {
	inner: map::Keys<'a, T, (), C>,
}

impl<'a, T, C: Slab<Node<T, ()>>> Iterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		self.inner.next()
	}
}

impl<'a, T, C: Slab<Node<T, ()>>> DoubleEndedIterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		self.inner.next_back()
	}
}

impl<'a, T, C: Slab<Node<T, ()>>> FusedIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}
impl<'a, T, C: Slab<Node<T, ()>>> ExactSizeIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}

pub struct IntoIter<T, C> {
	inner: map::IntoIter<T, (), C>,
}

impl<T, C: SlabMut<Node<T, ()>>> Iterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		self.inner.next().map(|(t, ())| t)
	}
}

impl<T, C: SlabMut<Node<T, ()>>> DoubleEndedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		self.inner.next_back().map(|(t, ())| t)
	}
}

impl<T, C: SlabMut<Node<T, ()>>> FusedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<T, C: SlabMut<Node<T, ()>>> ExactSizeIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
