use super::Rebalance;
use crate::generic::{
	node::{Balance, Node, Position, Side},
	SentinelTree,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};

/// AVL policy.
///
/// Every internal node stores its height (sentinels have height 0), and the heights of the
/// two children of any node differ by at most one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Avl;

#[inline]
fn height<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> usize
where
	C: SimpleCollectionRef,
{
	tree.node(id).balance().height()
}

#[inline]
fn is_balanced<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> bool
where
	C: SimpleCollectionRef,
{
	let [left, right] = tree.children_of(id);
	let (hl, hr) = (height(tree, left), height(tree, right));
	hl.max(hr) - hl.min(hr) <= 1
}

fn recompute_height<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, id: usize)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	let [left, right] = tree.children_of(id);
	let h = 1 + height(tree, left).max(height(tree, right));
	tree.set_balance_at(id, Balance::Height(h))
}

/// Child of `id` with the greatest height.
///
/// Ties are broken toward the side `id` itself hangs on (left for the root),
/// so that the following restructuring is a single rotation.
fn taller_child<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> usize
where
	C: SimpleCollectionRef,
{
	let [left, right] = tree.children_of(id);
	let (hl, hr) = (height(tree, left), height(tree, right));
	if hl > hr {
		left
	} else if hl < hr {
		right
	} else {
		match tree.side_of(id) {
			Some(Side::Right) => right,
			_ => left,
		}
	}
}

/// Restore the height balance from `id` up to the root.
///
/// Stops as soon as a node height is left unchanged.
fn rebalance<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, mut id: usize)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	loop {
		let old_height = height(tree, id);
		if !is_balanced(tree, id) {
			let x = taller_child(tree, taller_child(tree, id));
			tracing::debug!(node = id, "height imbalance");
			id = tree.restructure_at(x);
			let [left, right] = tree.children_of(id);
			recompute_height(tree, left);
			recompute_height(tree, right);
		}

		recompute_height(tree, id);
		if height(tree, id) == old_height {
			break;
		}

		match tree.parent_of(id) {
			Some(parent) => id = parent,
			None => break,
		}
	}
}

/// Height of the subtree rooted at `id`, checking every stored height on the way.
fn check_subtree<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> usize
where
	C: SimpleCollectionRef,
{
	match tree.node(id).children() {
		None => {
			if height(tree, id) != 0 {
				panic!("sentinel @{} has a non-zero height", id)
			}
			0
		}
		Some([left, right]) => {
			let (hl, hr) = (check_subtree(tree, left), check_subtree(tree, right));
			if hl.max(hr) - hl.min(hr) > 1 {
				panic!("node @{} is unbalanced ({} vs {})", id, hl, hr)
			}

			let h = 1 + hl.max(hr);
			if height(tree, id) != h {
				panic!(
					"node @{} stores height {}, actual height is {}",
					id,
					height(tree, id),
					h
				)
			}
			h
		}
	}
}

impl Rebalance for Avl {
	#[inline]
	fn initial_balance(&self) -> Balance {
		Balance::Height(0)
	}

	#[inline]
	fn on_insert<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		rebalance(tree, p.id)
	}

	#[inline]
	fn on_delete<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		if let Some(parent) = tree.parent_of(p.id) {
			rebalance(tree, parent)
		}
	}

	fn check<K, V, C: Slab<Node<K, V>>>(&self, tree: &SentinelTree<K, V, C>)
	where
		C: SimpleCollectionRef,
	{
		if let Some(root) = tree.root_id() {
			check_subtree(tree, root);
		}
	}
}
