//! Generic binary search tree types.
//!
//! Types defined in this modules are independant of the actual storage type.
pub mod node;
pub use node::Node;

pub mod tree;
pub use tree::SentinelTree;

pub mod policy;
pub use policy::{Policy, Rebalance};

pub mod map;
pub use map::TreeMap;

pub mod set;
pub use set::TreeSet;
