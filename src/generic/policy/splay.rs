use super::Rebalance;
use crate::generic::{
	node::{Node, Position},
	SentinelTree,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};

/// Splay policy.
///
/// Every accessed, inserted or removed position brings the closest internal node up to the
/// root, keeping recently used keys near the top of the tree.
/// There is no invariant to check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Splay;

/// Move the internal node `x` up to the root.
fn splay<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, x: usize)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	let mut steps = 0usize;
	while let Some(parent) = tree.parent_of(x) {
		match tree.parent_of(parent) {
			None => tree.rotate_at(x),
			Some(_) => {
				if tree.side_of(x) == tree.side_of(parent) {
					tree.rotate_at(parent);
					tree.rotate_at(x)
				} else {
					tree.rotate_at(x);
					tree.rotate_at(x)
				}
			}
		}

		steps += 1
	}

	tracing::debug!(node = x, steps, "splayed");
}

impl Rebalance for Splay {
	fn on_access<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		if tree.is_internal_id(p.id) {
			splay(tree, p.id)
		} else if let Some(parent) = tree.parent_of(p.id) {
			splay(tree, parent)
		}
	}

	#[inline]
	fn on_insert<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		splay(tree, p.id)
	}

	fn on_delete<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		if let Some(parent) = tree.parent_of(p.id) {
			splay(tree, parent)
		}
	}
}
