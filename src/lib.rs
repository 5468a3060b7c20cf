//! Ordered maps over a slab-allocated binary search tree.
//!
//! Every entry lives in an internal node of a [`generic::SentinelTree`], where absent children
//! are represented by sentinel nodes.
//! The map can be left unbalanced or kept balanced by one of three policies
//! (AVL, red-black or splay), selected when the map is created:
//!
//! ```
//! use bst_slab::{generic::Policy, TreeMap};
//!
//! let policy: Policy = "avl".parse().unwrap();
//! let mut map = TreeMap::with_policy(policy);
//! for i in 0..100 {
//!     map.insert(i, i * i);
//! }
//!
//! assert_eq!(map.get(&7), Some(&49));
//! map.validate();
//! ```
pub mod compare;
pub mod error;
pub mod generic;

pub use compare::{Compare, Natural, Reverse};
pub use error::{Error, Violation};

/// Tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeMap<K, V, O = Natural> = generic::TreeMap<K, V, slab::Slab<generic::Node<K, V>>, O>;

/// Tree set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeSet<T, O = Natural> = generic::TreeSet<T, slab::Slab<generic::Node<T, ()>>, O>;
