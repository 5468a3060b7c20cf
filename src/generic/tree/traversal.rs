use super::SentinelTree;
use crate::generic::node::{Node, Position, Side};
use cc_traits::{SimpleCollectionRef, Slab};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Explicit stack used by the depth-first traversals.
///
/// Balanced trees rarely get deeper than this, splay trees may spill on the heap.
type Stack = SmallVec<[usize; 32]>;

impl<K, V, C: Slab<Node<K, V>>> SentinelTree<K, V, C>
where
	C: SimpleCollectionRef,
{
	/// Positions of every node, each node before its children.
	pub fn pre_order(&self) -> Vec<Position> {
		let mut traversal = Vec::with_capacity(self.node_count());
		let mut stack = Stack::new();
		stack.extend(self.root_id());

		while let Some(id) = stack.pop() {
			traversal.push(self.position_of(id));
			if let Some([left, right]) = self.node(id).children() {
				stack.push(right);
				stack.push(left);
			}
		}

		traversal
	}

	/// Positions of every node, each node after its children.
	pub fn post_order(&self) -> Vec<Position> {
		let mut traversal = Vec::with_capacity(self.node_count());
		let mut stack = Stack::new();
		stack.extend(self.root_id());

		// node, right, left reversed.
		while let Some(id) = stack.pop() {
			traversal.push(self.position_of(id));
			if let Some([left, right]) = self.node(id).children() {
				stack.push(left);
				stack.push(right);
			}
		}

		traversal.reverse();
		traversal
	}

	/// Positions of every node, each node between its left and right subtrees.
	///
	/// Internal nodes of a search tree come out in key order.
	pub fn in_order(&self) -> Vec<Position> {
		let mut traversal = Vec::with_capacity(self.node_count());
		let mut stack = Stack::new();
		let mut current = self.root_id();

		loop {
			while let Some(id) = current {
				stack.push(id);
				current = self.child_of(id, Side::Left);
			}

			match stack.pop() {
				Some(id) => {
					traversal.push(self.position_of(id));
					current = self.child_of(id, Side::Right);
				}
				None => break,
			}
		}

		traversal
	}

	/// Positions of every node, by increasing depth then from left to right.
	pub fn level_order(&self) -> Vec<Position> {
		let mut traversal = Vec::with_capacity(self.node_count());
		let mut queue = VecDeque::new();
		queue.extend(self.root_id());

		while let Some(id) = queue.pop_front() {
			traversal.push(self.position_of(id));
			if let Some(children) = self.node(id).children() {
				queue.extend(children.iter().copied());
			}
		}

		traversal
	}
}

#[cfg(test)]
mod tests {
	use crate::generic::{
		node::{Node, Position},
		SentinelTree,
	};

	type Tree = SentinelTree<char, (), slab::Slab<Node<char, ()>>>;

	fn labels(tree: &Tree, traversal: Vec<Position>) -> String {
		traversal
			.into_iter()
			.map(|p| match tree.item(p).unwrap() {
				Some(item) => *item.key(),
				None => '.',
			})
			.collect()
	}

	/// ```text
	///          d
	///        ╱   ╲
	///       b     e
	///     ╱   ╲
	///    a     c
	/// ```
	fn sample() -> Tree {
		let mut tree = Tree::new();
		let d = tree.add_root(Some(('d', ()))).unwrap();
		let b = tree.add_left(d, 'b', ()).unwrap();
		tree.add_right(d, 'e', ()).unwrap();
		tree.add_left(b, 'a', ()).unwrap();
		tree.add_right(b, 'c', ()).unwrap();
		tree
	}

	#[test]
	fn orders() {
		let tree = sample();
		assert_eq!(labels(&tree, tree.pre_order()), "dba..c..e..");
		assert_eq!(labels(&tree, tree.in_order()), ".a.b.c.d.e.");
		assert_eq!(labels(&tree, tree.post_order()), "..a..cb..ed");
		assert_eq!(labels(&tree, tree.level_order()), "dbeac......");
	}

	#[test]
	fn empty() {
		let tree = Tree::new();
		assert!(tree.pre_order().is_empty());
		assert!(tree.in_order().is_empty());
		assert!(tree.post_order().is_empty());
		assert!(tree.level_order().is_empty());
	}
}
