use crate::{
	error::{Error, Violation},
	generic::node::{Balance, Item, Node, Position, Side},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use smallvec::SmallVec;
use std::{fmt, marker::PhantomData};

mod traversal;

/// Children positions of a node: empty for sentinels, left then right otherwise.
pub type Children = SmallVec<[Position; 2]>;

/// Linked binary tree where every absent child is represented by a sentinel node.
///
/// Every node of the tree is either *internal*, holding an [`Item`] and exactly two children,
/// or a *sentinel*, holding nothing and having no children.
/// A tree holding `n` items therefore always has `2n + 1` nodes
/// (or none at all before the root is added).
///
/// Nodes are allocated in a slab container `C` and refer to each other through their slab
/// identifiers: children links are owning, parent links are plain back-references used for
/// navigation.
///
/// ```text
///                   ┌───┐
///                   │ 5 │
///                   └───┘
///                ╱         ╲
///           ┌───┐           ┌───┐
///           │ 3 │           │ 8 │
///           └───┘           └───┘
///          ╱     ╲         ╱     ╲
///        nil     nil     nil     nil
/// ```
///
/// This is the storage and rotation engine of [`TreeMap`](crate::generic::TreeMap).
/// Its public API addresses nodes through [`Position`]s and checks every argument:
/// an unknown or stale position is reported as [`Error::InvalidPosition`],
/// an edit breaking the invariants above as [`Error::StructuralPrecondition`].
///
/// Traversals return the positions in a vector computed at call time.
/// They are not updated by later edits and must be recomputed after any structural change.
#[derive(Clone)]
pub struct SentinelTree<K, V, C> {
	/// Allocated nodes.
	nodes: C,

	/// Root node id.
	root: Option<usize>,

	/// Number of nodes in the tree, sentinels included.
	len: usize,

	/// Balance given to freshly allocated nodes.
	fresh: Balance,

	k: PhantomData<K>,
	v: PhantomData<V>,
}

impl<K, V, C> SentinelTree<K, V, C> {
	/// Create a new tree without any node.
	#[inline]
	pub fn new() -> SentinelTree<K, V, C>
	where
		C: Default,
	{
		Self::with_balance(Balance::Unmarked)
	}

	/// Create a new tree whose nodes are allocated with the given balance.
	#[inline]
	pub fn with_balance(fresh: Balance) -> SentinelTree<K, V, C>
	where
		C: Default,
	{
		SentinelTree {
			nodes: Default::default(),
			root: None,
			len: 0,
			fresh,
			k: PhantomData,
			v: PhantomData,
		}
	}

	/// Returns `true` if the tree has no node at all.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Number of nodes, sentinels included.
	#[inline]
	pub fn node_count(&self) -> usize {
		self.len
	}

	/// Number of items, derived from the node count.
	#[inline]
	pub fn item_count(&self) -> usize {
		if self.len == 0 {
			0
		} else {
			(self.len - 1) / 2
		}
	}

	#[inline]
	pub(crate) fn root_id(&self) -> Option<usize> {
		self.root
	}
}

impl<K, V, C: Slab<Node<K, V>>> SentinelTree<K, V, C>
where
	C: SimpleCollectionRef,
{
	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	pub(crate) fn node(&self, id: usize) -> &Node<K, V> {
		match self.nodes.get(id) {
			Some(node) => C::into_ref(node),
			None => panic!("no node @{}", id),
		}
	}

	#[inline]
	pub(crate) fn position_of(&self, id: usize) -> Position {
		Position::new(id, self.node(id).stamp())
	}

	/// Children ids of an internal node.
	///
	/// Panics if the node is a sentinel.
	#[inline]
	pub(crate) fn children_of(&self, id: usize) -> [usize; 2] {
		match self.node(id).children() {
			Some(children) => children,
			None => panic!("sentinel @{} has no children", id),
		}
	}

	#[inline]
	pub(crate) fn parent_of(&self, id: usize) -> Option<usize> {
		self.node(id).parent()
	}

	/// Child of `id` on the given side, `None` if `id` is a sentinel.
	#[inline]
	pub(crate) fn child_of(&self, id: usize, side: Side) -> Option<usize> {
		self.node(id).child(side)
	}

	/// Side of `id` under its parent, `None` for the root.
	#[inline]
	pub(crate) fn side_of(&self, id: usize) -> Option<Side> {
		self.parent_of(id)
			.and_then(|parent_id| self.node(parent_id).side_of(id))
	}

	#[inline]
	pub(crate) fn sibling_of(&self, id: usize) -> Option<usize> {
		let parent_id = self.parent_of(id)?;
		let side = self.node(parent_id).side_of(id)?;
		self.child_of(parent_id, side.opposite())
	}

	#[inline]
	pub(crate) fn is_internal_id(&self, id: usize) -> bool {
		self.node(id).is_internal()
	}

	#[inline]
	pub(crate) fn is_root_id(&self, id: usize) -> bool {
		self.root == Some(id)
	}

	/// Find the node holding `key`, or the sentinel where it would be inserted.
	///
	/// Returns `None` only if the tree has no root.
	#[inline]
	pub(crate) fn lookup_by<F>(&self, mut cmp: F) -> Option<usize>
	where
		F: FnMut(&K) -> std::cmp::Ordering,
	{
		let mut id = self.root?;
		loop {
			let node = self.node(id);
			match node.item() {
				None => return Some(id),
				Some(item) => match cmp(item.key()) {
					std::cmp::Ordering::Equal => return Some(id),
					std::cmp::Ordering::Less => id = self.children_of(id)[0],
					std::cmp::Ordering::Greater => id = self.children_of(id)[1],
				},
			}
		}
	}

	/// Leftmost internal node of the subtree rooted at `id`.
	#[inline]
	pub(crate) fn subtree_min(&self, mut id: usize) -> Option<usize> {
		let mut min = None;
		while let Some([left, _]) = self.node(id).children() {
			min = Some(id);
			id = left
		}
		min
	}

	/// Rightmost internal node of the subtree rooted at `id`.
	#[inline]
	pub(crate) fn subtree_max(&self, mut id: usize) -> Option<usize> {
		let mut max = None;
		while let Some([_, right]) = self.node(id).children() {
			max = Some(id);
			id = right
		}
		max
	}

	/// Check that `p` designates a live node of this tree.
	#[inline]
	fn check(&self, p: Position) -> Result<&Node<K, V>, Error> {
		match self.nodes.get(p.id) {
			Some(node) => {
				let node = C::into_ref(node);
				if node.stamp() == p.stamp {
					Ok(node)
				} else {
					Err(Error::InvalidPosition(p))
				}
			}
			None => Err(Error::InvalidPosition(p)),
		}
	}

	/// Returns `true` if `p` designates a live node of this tree.
	#[inline]
	pub fn contains(&self, p: Position) -> bool {
		self.check(p).is_ok()
	}

	/// Root position, `None` if the tree has no node.
	#[inline]
	pub fn root(&self) -> Option<Position> {
		self.root.map(|id| self.position_of(id))
	}

	#[inline]
	pub fn parent(&self, p: Position) -> Result<Option<Position>, Error> {
		let node = self.check(p)?;
		Ok(node.parent().map(|id| self.position_of(id)))
	}

	/// Child on the given side, `None` if `p` is a sentinel.
	#[inline]
	pub fn child(&self, p: Position, side: Side) -> Result<Option<Position>, Error> {
		let node = self.check(p)?;
		Ok(node.child(side).map(|id| self.position_of(id)))
	}

	#[inline]
	pub fn left(&self, p: Position) -> Result<Option<Position>, Error> {
		self.child(p, Side::Left)
	}

	#[inline]
	pub fn right(&self, p: Position) -> Result<Option<Position>, Error> {
		self.child(p, Side::Right)
	}

	/// The other child of `p`'s parent, `None` for the root.
	#[inline]
	pub fn sibling(&self, p: Position) -> Result<Option<Position>, Error> {
		self.check(p)?;
		Ok(self.sibling_of(p.id).map(|id| self.position_of(id)))
	}

	#[inline]
	pub fn children(&self, p: Position) -> Result<Children, Error> {
		let node = self.check(p)?;
		Ok(node
			.children()
			.iter()
			.flatten()
			.map(|id| self.position_of(*id))
			.collect())
	}

	/// Either 0 (sentinel) or 2 (internal node).
	#[inline]
	pub fn num_children(&self, p: Position) -> Result<usize, Error> {
		Ok(if self.check(p)?.is_internal() { 2 } else { 0 })
	}

	/// Returns `true` if `p` is a sentinel.
	#[inline]
	pub fn is_leaf(&self, p: Position) -> Result<bool, Error> {
		Ok(self.check(p)?.is_sentinel())
	}

	#[inline]
	pub fn is_internal(&self, p: Position) -> Result<bool, Error> {
		Ok(self.check(p)?.is_internal())
	}

	#[inline]
	pub fn is_root(&self, p: Position) -> Result<bool, Error> {
		self.check(p)?;
		Ok(self.is_root_id(p.id))
	}

	/// Item stored at `p`, `None` for sentinels.
	#[inline]
	pub fn item(&self, p: Position) -> Result<Option<&Item<K, V>>, Error> {
		Ok(self.check(p)?.item())
	}

	#[inline]
	pub fn balance(&self, p: Position) -> Result<Balance, Error> {
		Ok(self.check(p)?.balance())
	}

	/// Validate the tree structure.
	///
	/// Panics if a parent link does not match its child link,
	/// or if the node count is not `2n + 1` for `n` items.
	pub fn validate(&self) {
		let root = match self.root {
			Some(root) => root,
			None => {
				if self.len != 0 {
					panic!("rootless tree with {} nodes", self.len)
				}
				return;
			}
		};

		if self.parent_of(root).is_some() {
			panic!("root @{} has a parent", root)
		}

		let mut count = 0;
		let mut items = 0;
		let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
		stack.push(root);
		while let Some(id) = stack.pop() {
			count += 1;
			if let Some(children) = self.node(id).children() {
				items += 1;
				for child_id in children.iter().rev() {
					if self.parent_of(*child_id) != Some(id) {
						panic!("node @{} is not the parent of its child @{}", id, child_id)
					}
					stack.push(*child_id)
				}
			}
		}

		if count != self.len {
			panic!("{} reachable nodes, expected {}", count, self.len)
		}

		if count != 2 * items + 1 {
			panic!("{} nodes for {} items", count, items)
		}
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
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		if let Some(id) = self.root {
			self.dot_write_node(f, id)?
		}
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [label=\"", name)?;
		node.dot_write_label(f)?;
		writeln!(f, "|({})\"];", id)?;

		for child_id in node.children().iter().flatten() {
			self.dot_write_node(f, *child_id)?;
			let child_name = format!("n{}", child_id);
			writeln!(f, "\t{} -> {}", name, child_name)?;
		}

		Ok(())
	}

	fn fmt_node(&self, f: &mut fmt::Formatter, id: usize, depth: usize) -> fmt::Result
	where
		K: fmt::Display,
		V: fmt::Display,
	{
		let node = self.node(id);
		match node.item() {
			Some(item) => writeln!(f, "{:depth$}{}: {}", "", item.key(), item.value(), depth = depth)?,
			None => writeln!(f, "{:depth$}nil", "", depth = depth)?,
		}

		for child_id in node.children().iter().flatten() {
			self.fmt_node(f, *child_id, depth + 1)?
		}

		Ok(())
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> SentinelTree<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Get the node associated to the given `id` mutably.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	pub(crate) fn node_mut(&mut self, id: usize) -> &mut Node<K, V> {
		match self.nodes.get_mut(id) {
			Some(node) => C::into_mut(node),
			None => panic!("no node @{}", id),
		}
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<K, V>) -> usize {
		self.len += 1;
		self.nodes.insert(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Node<K, V> {
		self.len -= 1;
		match self.nodes.remove(id) {
			Some(node) => node,
			None => panic!("no node @{}", id),
		}
	}

	#[inline]
	fn check_mut(&mut self, p: Position) -> Result<&mut Node<K, V>, Error> {
		self.check(p)?;
		Ok(self.node_mut(p.id))
	}

	/// Remove every node.
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.root = None;
		self.len = 0;
		self.nodes.clear()
	}

	#[inline]
	pub fn item_mut(&mut self, p: Position) -> Result<Option<&mut Item<K, V>>, Error> {
		Ok(self.check_mut(p)?.item_mut())
	}

	#[inline]
	pub fn set_balance(&mut self, p: Position, balance: Balance) -> Result<(), Error> {
		self.check_mut(p)?.set_balance(balance);
		Ok(())
	}

	#[inline]
	pub(crate) fn set_balance_at(&mut self, id: usize, balance: Balance) {
		self.node_mut(id).set_balance(balance)
	}

	/// Allocate the root sentinel.
	#[inline]
	pub(crate) fn ensure_root(&mut self) -> usize {
		match self.root {
			Some(id) => id,
			None => {
				let id = self.allocate_node(Node::sentinel(None, self.fresh));
				self.root = Some(id);
				id
			}
		}
	}

	/// Add the root of the tree.
	///
	/// The root is a lone sentinel if `entry` is `None`,
	/// or an internal node with two sentinel children otherwise.
	/// Fails if the tree already has a root.
	pub fn add_root(&mut self, entry: Option<(K, V)>) -> Result<Position, Error> {
		if let Some(root) = self.root() {
			return Err(Error::structural(root, Violation::RootExists));
		}

		let id = self.ensure_root();
		if let Some(entry) = entry {
			self.expand_at(id, entry.into());
		}

		Ok(self.position_of(id))
	}

	/// Turn the sentinel at `p` into an internal node holding the given entry,
	/// with two fresh sentinel children.
	pub fn expand(&mut self, p: Position, key: K, value: V) -> Result<Position, Error> {
		if self.check(p)?.is_internal() {
			return Err(Error::structural(p, Violation::NotSentinel));
		}

		self.expand_at(p.id, Item::new(key, value));
		Ok(p)
	}

	/// Expand the sentinel child of the internal node `p` on the given side.
	///
	/// Fails if this child is already internal.
	pub fn add_child(&mut self, p: Position, side: Side, key: K, value: V) -> Result<Position, Error> {
		let child_id = match self.check(p)?.child(side) {
			Some(child_id) => child_id,
			None => return Err(Error::structural(p, Violation::Sentinel)),
		};

		if self.is_internal_id(child_id) {
			return Err(Error::structural(p, Violation::ChildOccupied(side)));
		}

		self.expand_at(child_id, Item::new(key, value));
		Ok(self.position_of(child_id))
	}

	#[inline]
	pub fn add_left(&mut self, p: Position, key: K, value: V) -> Result<Position, Error> {
		self.add_child(p, Side::Left, key, value)
	}

	#[inline]
	pub fn add_right(&mut self, p: Position, key: K, value: V) -> Result<Position, Error> {
		self.add_child(p, Side::Right, key, value)
	}

	/// Replace the value stored at `p`, returning the previous one.
	pub fn set(&mut self, p: Position, value: V) -> Result<V, Error> {
		match self.check_mut(p)?.item_mut() {
			Some(item) => Ok(item.set_value(value)),
			None => Err(Error::structural(p, Violation::Sentinel)),
		}
	}

	/// Remove the internal node `p`.
	///
	/// One sentinel child of `p` is released (the left one if both are sentinels)
	/// and the other child is promoted in place of `p`.
	/// Fails if `p` is a sentinel or has two internal children.
	///
	/// Returns the item of `p`.
	pub fn remove(&mut self, p: Position) -> Result<Item<K, V>, Error> {
		let [left, right] = match self.check(p)?.children() {
			Some(children) => children,
			None => return Err(Error::structural(p, Violation::Sentinel)),
		};

		if self.is_internal_id(left) && self.is_internal_id(right) {
			return Err(Error::structural(p, Violation::TwoInternalChildren));
		}

		let (item, _) = self.remove_at(p.id);
		Ok(item)
	}

	/// Rotate `p` above its parent.
	pub fn rotate(&mut self, p: Position) -> Result<(), Error> {
		let node = self.check(p)?;
		if node.is_sentinel() {
			return Err(Error::structural(p, Violation::Sentinel));
		}

		if node.parent().is_none() {
			return Err(Error::structural(p, Violation::NoParent));
		}

		self.rotate_at(p.id);
		Ok(())
	}

	/// Trinode restructuring of `p`, its parent and its grandparent.
	///
	/// Returns the position of the new root of the restructured subtree.
	pub fn restructure(&mut self, p: Position) -> Result<Position, Error> {
		let node = self.check(p)?;
		if node.is_sentinel() {
			return Err(Error::structural(p, Violation::Sentinel));
		}

		match node.parent() {
			Some(parent_id) => {
				if self.parent_of(parent_id).is_none() {
					return Err(Error::structural(p, Violation::NoGrandparent));
				}
			}
			None => return Err(Error::structural(p, Violation::NoParent)),
		}

		let id = self.restructure_at(p.id);
		Ok(self.position_of(id))
	}

	/// Expand the sentinel `id`.
	#[inline]
	pub(crate) fn expand_at(&mut self, id: usize, item: Item<K, V>) {
		let left_id = self.allocate_node(Node::sentinel(Some(id), self.fresh));
		let right_id = self.allocate_node(Node::sentinel(Some(id), self.fresh));
		self.node_mut(id).expand(item, left_id, right_id);
		tracing::trace!(node = id, "expanded sentinel");
	}

	/// Swap the item stored in the internal node `id`.
	#[inline]
	pub(crate) fn replace_item_at(&mut self, id: usize, item: Item<K, V>) -> Item<K, V> {
		self.node_mut(id).replace_item(item)
	}

	/// Remove the internal node `id` which must have at least one sentinel child.
	///
	/// Returns the removed item and the id of the promoted child.
	pub(crate) fn remove_at(&mut self, id: usize) -> (Item<K, V>, usize) {
		let [left, right] = self.children_of(id);
		let (leaf, promoted) = if self.is_internal_id(left) {
			(right, left)
		} else {
			(left, right)
		};

		self.release_node(leaf);

		let parent = self.parent_of(id);
		self.node_mut(promoted).set_parent(parent);
		match parent {
			Some(parent_id) => match self.node(parent_id).side_of(id) {
				Some(side) => self.node_mut(parent_id).set_child(side, promoted),
				None => panic!("node @{} is not a child of its parent @{}", id, parent_id),
			},
			None => self.root = Some(promoted),
		}

		tracing::trace!(node = id, promoted, "removed node");
		match self.release_node(id).into_item() {
			Some(item) => (item, promoted),
			None => panic!("removed sentinel @{}", id),
		}
	}

	/// Move the item out of the internal node `id` and release the node,
	/// leaving every link to it dangling.
	///
	/// Only used while consuming the tree.
	#[inline]
	pub(crate) fn take_item_at(&mut self, id: usize) -> Item<K, V> {
		match self.release_node(id).into_item() {
			Some(item) => item,
			None => panic!("sentinel @{} has no item", id),
		}
	}

	/// Rotate `x` above its parent.
	///
	/// ```text
	///          z                 z
	///          │                 │
	///          y                 x
	///        ╱   ╲      =>     ╱   ╲
	///       x     c           a     y
	///     ╱   ╲                   ╱   ╲
	///    a     t                 t     c
	/// ```
	pub(crate) fn rotate_at(&mut self, x: usize) {
		let y = match self.parent_of(x) {
			Some(y) => y,
			None => panic!("cannot rotate the root @{}", x),
		};
		let z = self.parent_of(y);

		let x_side = match self.node(y).side_of(x) {
			Some(side) => side,
			None => panic!("node @{} is not a child of its parent @{}", x, y),
		};
		let t = self.children_of(x)[x_side.opposite().index()];

		// x replaces y under z.
		match z {
			Some(z) => match self.node(z).side_of(y) {
				Some(y_side) => self.node_mut(z).set_child(y_side, x),
				None => panic!("node @{} is not a child of its parent @{}", y, z),
			},
			None => self.root = Some(x),
		}
		self.node_mut(x).set_parent(z);

		// t changes side.
		self.node_mut(y).set_child(x_side, t);
		self.node_mut(t).set_parent(Some(y));

		self.node_mut(x).set_child(x_side.opposite(), y);
		self.node_mut(y).set_parent(Some(x));

		tracing::trace!(node = x, parent = y, "rotated");
	}

	/// Trinode restructuring around `x`, its parent `y` and grandparent `z`.
	///
	/// When `x` and `y` are children on the same side (zig-zig), `y` is rotated once and
	/// becomes the local root.
	/// Otherwise (zig-zag), `x` is rotated twice and becomes the local root.
	pub(crate) fn restructure_at(&mut self, x: usize) -> usize {
		let y = match self.parent_of(x) {
			Some(y) => y,
			None => panic!("cannot restructure the root @{}", x),
		};

		if self.side_of(x) == self.side_of(y) {
			self.rotate_at(y);
			tracing::trace!(node = x, root = y, "restructured (zig-zig)");
			y
		} else {
			self.rotate_at(x);
			self.rotate_at(x);
			tracing::trace!(node = x, root = x, "restructured (zig-zag)");
			x
		}
	}
}

impl<K, V, C: Default> Default for SentinelTree<K, V, C> {
	#[inline]
	fn default() -> Self {
		SentinelTree::new()
	}
}

/// Indented outline of the tree, one node per line, sentinels written `nil`.
impl<K: fmt::Display, V: fmt::Display, C: Slab<Node<K, V>>> fmt::Display for SentinelTree<K, V, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.root {
			Some(id) => self.fmt_node(f, id, 0),
			None => Ok(()),
		}
	}
}
