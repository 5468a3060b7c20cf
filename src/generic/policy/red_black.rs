use super::Rebalance;
use crate::generic::{
	node::{Balance, Color, Node, Position},
	SentinelTree,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};

/// Red-black policy.
///
/// Nodes are colored red or black so that:
///  - the root and every sentinel are black,
///  - the children of a red node are black,
///  - every path from a node down to a sentinel crosses the same number of black nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RedBlack;

#[inline]
fn is_red<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> bool
where
	C: SimpleCollectionRef,
{
	tree.node(id).balance().color() == Color::Red
}

#[inline]
fn paint<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, id: usize, color: Color)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	tree.set_balance_at(id, Balance::Color(color))
}

/// Fix a red node `id` whose parent may be red.
fn resolve_red<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, mut id: usize)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	loop {
		let parent = match tree.parent_of(id) {
			Some(parent) if is_red(tree, parent) => parent,
			_ => break,
		};

		// A red parent is never the root.
		let uncle = match tree.sibling_of(parent) {
			Some(uncle) => uncle,
			None => panic!("red root @{}", parent),
		};

		if is_red(tree, uncle) {
			tracing::debug!(node = id, "double red, recoloring");
			paint(tree, parent, Color::Black);
			paint(tree, uncle, Color::Black);
			match tree.parent_of(parent) {
				Some(grand) if !tree.is_root_id(grand) => {
					paint(tree, grand, Color::Red);
					id = grand
				}
				_ => break,
			}
		} else {
			tracing::debug!(node = id, "double red, restructuring");
			let middle = tree.restructure_at(id);
			let [left, right] = tree.children_of(middle);
			paint(tree, middle, Color::Black);
			paint(tree, left, Color::Red);
			paint(tree, right, Color::Red);
			break;
		}
	}
}

/// Fix the black deficit of the subtree rooted at `id`.
fn remedy_double_black<K, V, C: SlabMut<Node<K, V>>>(tree: &mut SentinelTree<K, V, C>, mut id: usize)
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	loop {
		let (parent, sibling) = match (tree.parent_of(id), tree.sibling_of(id)) {
			(Some(parent), Some(sibling)) => (parent, sibling),
			_ => break,
		};

		if is_red(tree, sibling) {
			tracing::debug!(node = id, "double black, red sibling");
			tree.rotate_at(sibling);
			paint(tree, sibling, Color::Black);
			paint(tree, parent, Color::Red);
			continue;
		}

		let [left, right] = tree.children_of(sibling);
		let red_nephew = if is_red(tree, left) {
			Some(left)
		} else if is_red(tree, right) {
			Some(right)
		} else {
			None
		};

		match red_nephew {
			Some(nephew) => {
				tracing::debug!(node = id, "double black, restructuring");
				let parent_color = tree.node(parent).balance().color();
				let middle = tree.restructure_at(nephew);
				let [left, right] = tree.children_of(middle);
				paint(tree, middle, parent_color);
				paint(tree, left, Color::Black);
				paint(tree, right, Color::Black);
				break;
			}
			None => {
				tracing::debug!(node = id, "double black, recoloring");
				paint(tree, sibling, Color::Red);
				if is_red(tree, parent) {
					paint(tree, parent, Color::Black);
					break;
				} else if tree.is_root_id(parent) {
					break;
				} else {
					id = parent
				}
			}
		}
	}
}

/// Black height of the subtree rooted at `id`, checking the coloring on the way.
fn check_subtree<K, V, C: Slab<Node<K, V>>>(tree: &SentinelTree<K, V, C>, id: usize) -> usize
where
	C: SimpleCollectionRef,
{
	match tree.node(id).children() {
		None => {
			if is_red(tree, id) {
				panic!("red sentinel @{}", id)
			}
			1
		}
		Some([left, right]) => {
			let red = is_red(tree, id);
			if red && (is_red(tree, left) || is_red(tree, right)) {
				panic!("red node @{} has a red child", id)
			}

			let (bl, br) = (check_subtree(tree, left), check_subtree(tree, right));
			if bl != br {
				panic!("node @{} has unequal black heights ({} vs {})", id, bl, br)
			}

			if red {
				bl
			} else {
				bl + 1
			}
		}
	}
}

impl Rebalance for RedBlack {
	#[inline]
	fn initial_balance(&self) -> Balance {
		Balance::Color(Color::Black)
	}

	fn on_insert<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		if !tree.is_root_id(p.id) {
			paint(tree, p.id, Color::Red);
			resolve_red(tree, p.id)
		}
	}

	fn on_delete<K, V, C: SlabMut<Node<K, V>>>(&self, tree: &mut SentinelTree<K, V, C>, p: Position)
	where
		C: SimpleCollectionRef,
		C: SimpleCollectionMut,
	{
		if is_red(tree, p.id) {
			paint(tree, p.id, Color::Black)
		} else if !tree.is_root_id(p.id) {
			if let Some(sibling) = tree.sibling_of(p.id) {
				// The sibling subtree must have a non-zero black height.
				let remedy = match tree.node(sibling).children() {
					Some([left, _]) => !is_red(tree, sibling) || tree.is_internal_id(left),
					None => false,
				};

				if remedy {
					remedy_double_black(tree, p.id)
				}
			}
		}
	}

	fn check<K, V, C: Slab<Node<K, V>>>(&self, tree: &SentinelTree<K, V, C>)
	where
		C: SimpleCollectionRef,
	{
		if let Some(root) = tree.root_id() {
			if is_red(tree, root) {
				panic!("red root @{}", root)
			}

			check_subtree(tree, root);
		}
	}
}
