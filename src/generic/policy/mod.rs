//! Balancing policies.
//!
//! A search tree map calls its policy at three points:
//! after a lookup or an overwrite (`on_access`), after a new entry is inserted
//! (`on_insert`) and after a node is removed (`on_delete`).
//! The policy may then update the [`Balance`] of the nodes and rotate them to restore its
//! invariant.
use crate::generic::{
	node::{Balance, Node, Position},
	SentinelTree,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod avl;
mod red_black;
mod splay;

pub use avl::Avl;
pub use red_black::RedBlack;
pub use splay::Splay;

/// Rebalancing hooks.
///
/// Every hook defaults to doing nothing, which gives a plain binary search tree.
pub trait Rebalance {
	/// Balance of freshly allocated nodes, sentinels included.
	fn initial_balance(&self) -> Balance {
		Balance::Unmarked
	}

	/// Called after a lookup with the node found, or the sentinel reached if the key is
	/// absent, and after the value of an existing entry is replaced.
	fn on_access<K, V, C: SlabMut<Node<K, V>>>(&self, _tree: &mut SentinelTree<K, V, C>, _p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
	}

	/// Called with the node of a newly inserted entry.
	fn on_insert<K, V, C: SlabMut<Node<K, V>>>(&self, _tree: &mut SentinelTree<K, V, C>, _p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
	}

	/// Called with the node promoted in place of a removed node.
	fn on_delete<K, V, C: SlabMut<Node<K, V>>>(&self, _tree: &mut SentinelTree<K, V, C>, _p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
	}

	/// Check the policy invariant.
	///
	/// Panics if the invariant does not hold.
	fn check<K, V, C: Slab<Node<K, V>>>(&self, _tree: &SentinelTree<K, V, C>)
	where
		C: SimpleCollectionRef,
	{
	}
}

/// Plain binary search tree, never rebalanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plain;

impl Rebalance for Plain {}

/// Balancing policy of a map, chosen when the map is created.
///
/// With the `serde` feature a policy can be read from configuration files, written
/// `"plain"`, `"avl"`, `"red-black"` or `"splay"`.
/// The same names (and the `"bst"` and `"rb"` shorthands) are accepted by [`FromStr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Policy {
	/// No rebalancing.
	Plain,

	/// Height-balanced tree.
	Avl,

	/// Red-black colored tree.
	RedBlack,

	/// Self-adjusting tree moving every accessed node to the root.
	Splay,
}

impl Default for Policy {
	#[inline]
	fn default() -> Self {
		Policy::Plain
	}
}

impl Rebalance for Policy {
	#[inline]
	fn initial_balance(&self) -> Balance {
		match self {
			Policy::Plain => Plain.initial_balance(),
			Policy::Avl => Avl.initial_balance(),
			Policy::RedBlack => RedBlack.initial_balance(),
			Policy::Splay => Splay.initial_balance(),
		}
	}

	#[inline]
	fn on_access<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		match self {
			Policy::Plain => Plain.on_access(tree, p),
			Policy::Avl => Avl.on_access(tree, p),
			Policy::RedBlack => RedBlack.on_access(tree, p),
			Policy::Splay => Splay.on_access(tree, p),
		}
	}

	#[inline]
	fn on_insert<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		match self {
			Policy::Plain => Plain.on_insert(tree, p),
			Policy::Avl => Avl.on_insert(tree, p),
			Policy::RedBlack => RedBlack.on_insert(tree, p),
			Policy::Splay => Splay.on_insert(tree, p),
		}
	}

	#[inline]
	fn on_delete<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		match self {
			Policy::Plain => Plain.on_delete(tree, p),
			Policy::Avl => Avl.on_delete(tree, p),
			Policy::RedBlack => RedBlack.on_delete(tree, p),
			Policy::Splay => Splay.on_delete(tree, p),
		}
	}

	#[inline]
	fn check<K, V, C: Slab<Node<K, V>>>(&self, tree: &SentinelTree<K, V, C>)
	where
		C: SimpleCollectionRef,
	{
		match self {
			Policy::Plain => Plain.check(tree),
			Policy::Avl => Avl.check(tree),
			Policy::RedBlack => RedBlack.check(tree),
			Policy::Splay => Splay.check(tree),
		}
	}
}

impl fmt::Display for Policy {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Policy::Plain => write!(f, "plain"),
			Policy::Avl => write!(f, "avl"),
			Policy::RedBlack => write!(f, "red-black"),
			Policy::Splay => write!(f, "splay"),
		}
	}
}

/// Error returned when parsing an unknown policy name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown balancing policy `{0}`")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
	type Err = UnknownPolicy;

	fn from_str(s: &str) -> Result<Policy, UnknownPolicy> {
		match s.to_ascii_lowercase().as_str() {
			"plain" | "bst" => Ok(Policy::Plain),
			"avl" => Ok(Policy::Avl),
			"red-black" | "redblack" | "rb" => Ok(Policy::RedBlack),
			"splay" => Ok(Policy::Splay),
			_ => Err(UnknownPolicy(s.to_string())),
		}
	}
}
