use super::TreeMap;
use crate::generic::{
	node::{Item, Node},
	SentinelTree,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use smallvec::SmallVec;
use std::{
	collections::VecDeque,
	iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator},
};

/// Internal nodes whose item is not yet visited, deepest last.
type Stack = SmallVec<[usize; 32]>;

/// Internal nodes of the left (or right) spine of the subtree rooted at `id`.
#[inline]
fn push_spine<K, V, C: Slab<Node<K, V>>>(
	tree: &SentinelTree<K, V, C>,
	stack: &mut Stack,
	mut id: usize,
	right: bool,
) where
	C: SimpleCollectionRef,
{
	while let Some([left, r]) = tree.node(id).children() {
		stack.push(id);
		id = if right { r } else { left }
	}
}

/// In-order walk over the internal node ids, from both ends.
struct Cursor {
	front: Stack,
	back: Stack,

	/// Number of remaining items.
	len: usize,
}

impl Cursor {
	#[inline]
	fn new<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>) -> Cursor
	where
		C: SimpleCollectionRef,
	{
		let mut front = Stack::new();
		let mut back = Stack::new();
		if let Some(root) = tree.root_id() {
			push_spine(tree, &mut front, root, false);
			push_spine(tree, &mut back, root, true);
		}

		Cursor {
			front,
			back,
			len: tree.item_count(),
		}
	}

	#[inline]
	fn next<K, V, C: Slab<Node<K, V>>>(&mut self, tree: &SentinelTree<K, V, C>) -> Option<usize>
	where
		C: SimpleCollectionRef,
	{
		if self.len == 0 {
			return None;
		}

		let id = self.front.pop()?;
		self.len -= 1;
		push_spine(tree, &mut self.front, tree.children_of(id)[1], false);
		Some(id)
	}

	#[inline]
	fn next_back<K, V, C: Slab<Node<K, V>>>(&mut self, tree: &SentinelTree<K, V, C>) -> Option<usize>
	where
		C: SimpleCollectionRef,
	{
		if self.len == 0 {
			return None;
		}

		let id = self.back.pop()?;
		self.len -= 1;
		push_spine(tree, &mut self.back, tree.children_of(id)[0], true);
		Some(id)
	}
}

/// Iterator over the entries of a [`TreeMap`], in key order.
pub struct Iter<'a, K, V, C> {
	tree: &'a SentinelTree<K, V, C>,
	cursor: Cursor,
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	pub(crate) fn new(tree: &'a SentinelTree<K, V, C>) -> Self {
		Iter {
			tree,
			cursor: Cursor::new(tree),
		}
	}

	#[inline]
	fn item(&self, id: usize) -> (&'a K, &'a V) {
		let tree = self.tree;
		match tree.node(id).item() {
			Some(item) => item.as_pair(),
			None => panic!("sentinel @{} in key order", id),
		}
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.cursor.len, Some(self.cursor.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		let id = self.cursor.next(self.tree)?;
		Some(self.item(id))
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Iter<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Iter<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
		let id = self.cursor.next_back(self.tree)?;
		Some(self.item(id))
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>, O> IntoIterator for &'a TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, K, V, C>;
	type Item = (&'a K, &'a V);

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, C> {
		self.iter()
	}
}

/// Iterator over the entries of a [`TreeMap`] with mutable values, in key order.
pub struct IterMut<'a, K, V, C> {
	tree: &'a mut SentinelTree<K, V, C>,
	cursor: Cursor,
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	pub(crate) fn new(tree: &'a mut SentinelTree<K, V, C>) -> Self {
		let cursor = Cursor::new(tree);
		IterMut { tree, cursor }
	}

	#[inline]
	fn item_mut(&mut self, id: usize) -> &'a mut Item<K, V> {
		match self.tree.node_mut(id).item_mut() {
			Some(item) => unsafe { std::mem::transmute(item) }, // this is safe because the cursor visits each node once.
			None => panic!("sentinel @{} in key order", id),
		}
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> Iterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (&'a K, &'a mut V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.cursor.len, Some(self.cursor.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
		let id = self.cursor.next(&*self.tree)?;
		Some(self.item_mut(id).as_pair_mut())
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> FusedIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<'a, K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
		let id = self.cursor.next_back(&*self.tree)?;
		Some(self.item_mut(id).as_pair_mut())
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>, O> IntoIterator for &'a mut TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IterMut<'a, K, V, C>;
	type Item = (&'a K, &'a mut V);

	#[inline]
	fn into_iter(self) -> IterMut<'a, K, V, C> {
		self.iter_mut()
	}
}

pub struct Keys<'a, K, V, C> {
	pub(crate) inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Keys<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Keys<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

pub struct Values<'a, K, V, C> {
	pub(crate) inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Values<'a, K, V, C> where
	C: SimpleCollectionRef
{
}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Values<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

pub struct ValuesMut<'a, K, V, C> {
	pub(crate) inner: IterMut<'a, K, V, C>,
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> FusedIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<'a, K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> Iterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = &'a mut V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a mut V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a mut V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

/// Owning iterator over the entries of a [`TreeMap`], in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V, C> {
	/// The consumed tree.
	tree: SentinelTree<K, V, C>,

	/// Ids of the internal nodes not yet moved out, in key order.
	ids: VecDeque<usize>,
}

impl<K, V, C: SlabMut<Node<K, V>>> IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	pub(crate) fn new(tree: SentinelTree<K, V, C>) -> Self {
		let mut ids = VecDeque::with_capacity(tree.item_count());
		let mut cursor = Cursor::new(&tree);
		while let Some(id) = cursor.next(&tree) {
			ids.push_back(id)
		}

		IntoIter { tree, ids }
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> FusedIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, C: SlabMut<Node<K, V>>> Iterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (K, V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.ids.len(), Some(self.ids.len()))
	}

	#[inline]
	fn next(&mut self) -> Option<(K, V)> {
		let id = self.ids.pop_front()?;
		Some(self.tree.take_item_at(id).into_pair())
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(K, V)> {
		let id = self.ids.pop_back()?;
		Some(self.tree.take_item_at(id).into_pair())
	}
}

impl<K, V, C: SlabMut<Node<K, V>>, O> IntoIterator for TreeMap<K, V, C, O>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IntoIter<K, V, C>;
	type Item = (K, V);

	#[inline]
	fn into_iter(self) -> IntoIter<K, V, C> {
		IntoIter::new(self.tree)
	}
}
