use std::{
	fmt,
	sync::atomic::{AtomicU64, Ordering},
};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

/// Produce a stamp never handed out before in this process.
#[inline]
pub(crate) fn fresh_stamp() -> u64 {
	NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Node location in a [`SentinelTree`](crate::generic::SentinelTree).
///
/// Each node of a tree is addressed by the identifier of its slot in the node slab.
/// We write `@id` the position of the node stored in the slot `id`.
///
/// ```text
///                         ┌────────┐
///                         │ @0  5  │
///                         └────────┘
///                        ╱          ╲
///               ┌────────┐          ┌────────┐
///               │ @1  3  │          │ @2 nil │  <- sentinel
///               └────────┘          └────────┘
///              ╱          ╲
///      ┌────────┐        ┌────────┐
///      │ @3 nil │        │ @4 nil │
///      └────────┘        └────────┘
/// ```
///
/// ## Validity
///
/// Slab slots are reused once a node is released, so the identifier alone cannot tell a live
/// node from a dead one.
/// Every allocated node also receives a stamp that is unique across all the trees of the
/// process, and a position carries the stamp of the node it was taken from.
/// A position is *valid* in a given tree if the slot `id` is occupied by a node with the same
/// stamp.
/// A position outliving its node, or taken from another tree, is rejected with
/// [`Error::InvalidPosition`](crate::Error::InvalidPosition).
///
/// Rotations move nodes around without reallocating them:
/// a position keeps designating the same entry (or the same sentinel) after a rotation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	/// Identifier of the node.
	pub(crate) id: usize,

	/// Allocation stamp of the node.
	pub(crate) stamp: u64,
}

impl Position {
	#[inline]
	pub(crate) fn new(id: usize, stamp: u64) -> Position {
		Position { id, stamp }
	}

	/// Identifier of the slab slot holding the node.
	#[inline]
	pub fn id(&self) -> usize {
		self.id
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}", self.id)
	}
}

impl fmt::Debug for Position {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}#{}", self.id, self.stamp)
	}
}
