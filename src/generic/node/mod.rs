use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod addr;
mod item;

pub(crate) use addr::fresh_stamp;
pub use addr::Position;
pub use item::Item;

/// Side of a child relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	#[inline]
	pub fn index(self) -> usize {
		match self {
			Side::Left => 0,
			Side::Right => 1,
		}
	}

	#[inline]
	pub fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Side::Left => write!(f, "left"),
			Side::Right => write!(f, "right"),
		}
	}
}

/// Red-black node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Color {
	Black,
	Red,
}

/// Balancing state attached to every node.
///
/// Its meaning is owned by the balancing policy of the map:
/// the tree itself never interprets it, it only carries it along rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Balance {
	/// No balancing information (plain and splay trees).
	Unmarked,

	/// Height of the subtree rooted at the node (AVL trees).
	///
	/// Sentinels have height 0.
	Height(usize),

	/// Color of the node (red-black trees).
	Color(Color),
}

impl Balance {
	/// Stored height, or 0 if the node carries no height.
	#[inline]
	pub fn height(&self) -> usize {
		match self {
			Balance::Height(h) => *h,
			_ => 0,
		}
	}

	/// Stored color, or black if the node carries no color.
	#[inline]
	pub fn color(&self) -> Color {
		match self {
			Balance::Color(c) => *c,
			_ => Color::Black,
		}
	}
}

impl Default for Balance {
	#[inline]
	fn default() -> Self {
		Balance::Unmarked
	}
}

/// Entry and children of an internal node.
#[derive(Clone)]
pub(crate) struct Branch<K, V> {
	pub(crate) item: Item<K, V>,

	/// Left and right children ids.
	pub(crate) children: [usize; 2],
}

/// Binary tree node.
///
/// A node is either internal, holding an item and exactly two children,
/// or a sentinel, holding nothing.
#[derive(Clone)]
pub struct Node<K, V> {
	stamp: u64,

	parent: Option<usize>,

	/// `None` for sentinels.
	branch: Option<Branch<K, V>>,

	balance: Balance,
}

impl<K, V> Node<K, V> {
	#[inline]
	pub fn sentinel(parent: Option<usize>, balance: Balance) -> Node<K, V> {
		Node {
			stamp: fresh_stamp(),
			parent,
			branch: None,
			balance,
		}
	}

	#[inline]
	pub fn stamp(&self) -> u64 {
		self.stamp
	}

	#[inline]
	pub fn is_sentinel(&self) -> bool {
		self.branch.is_none()
	}

	#[inline]
	pub fn is_internal(&self) -> bool {
		self.branch.is_some()
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	#[inline]
	pub fn set_parent(&mut self, p: Option<usize>) {
		self.parent = p
	}

	#[inline]
	pub fn balance(&self) -> Balance {
		self.balance
	}

	#[inline]
	pub fn set_balance(&mut self, balance: Balance) {
		self.balance = balance
	}

	#[inline]
	pub fn item(&self) -> Option<&Item<K, V>> {
		self.branch.as_ref().map(|b| &b.item)
	}

	#[inline]
	pub fn item_mut(&mut self) -> Option<&mut Item<K, V>> {
		self.branch.as_mut().map(|b| &mut b.item)
	}

	#[inline]
	pub fn children(&self) -> Option<[usize; 2]> {
		self.branch.as_ref().map(|b| b.children)
	}

	#[inline]
	pub fn child(&self, side: Side) -> Option<usize> {
		self.branch.as_ref().map(|b| b.children[side.index()])
	}

	/// Side of the given child, if `id` is a child of this node.
	#[inline]
	pub fn side_of(&self, id: usize) -> Option<Side> {
		match self.children() {
			Some([left, _]) if left == id => Some(Side::Left),
			Some([_, right]) if right == id => Some(Side::Right),
			_ => None,
		}
	}

	/// Panics if the node is a sentinel.
	#[inline]
	pub fn set_child(&mut self, side: Side, id: usize) {
		match &mut self.branch {
			Some(branch) => branch.children[side.index()] = id,
			None => panic!("sentinel nodes have no children"),
		}
	}

	/// Turn a sentinel into an internal node.
	///
	/// Panics if the node is already internal.
	#[inline]
	pub fn expand(&mut self, item: Item<K, V>, left_id: usize, right_id: usize) {
		if self.branch.is_some() {
			panic!("only sentinels can be expanded")
		}

		self.branch = Some(Branch {
			item,
			children: [left_id, right_id],
		})
	}

	/// Swap the item of an internal node.
	///
	/// Panics if the node is a sentinel.
	#[inline]
	pub fn replace_item(&mut self, item: Item<K, V>) -> Item<K, V> {
		match &mut self.branch {
			Some(branch) => std::mem::replace(&mut branch.item, item),
			None => panic!("sentinel nodes have no item"),
		}
	}

	#[inline]
	pub fn into_item(self) -> Option<Item<K, V>> {
		self.branch.map(|b| b.item)
	}

	/// Write the label of the node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		match self.item() {
			Some(item) => write!(f, "{{{}|{}}}", item.key(), item.value())?,
			None => write!(f, "nil")?,
		}

		match self.balance {
			Balance::Unmarked => Ok(()),
			Balance::Height(h) => write!(f, "|h={}", h),
			Balance::Color(Color::Black) => write!(f, "|black"),
			Balance::Color(Color::Red) => write!(f, "|red"),
		}
	}
}
