#![cfg(feature = "serde")]
use bst_slab::{generic::Policy, TreeMap};

#[test]
fn policy_from_config() {
	let policies: Vec<Policy> = serde_json::from_str(r#"["plain", "avl", "red-black", "splay"]"#).unwrap();
	assert_eq!(
		policies,
		[Policy::Plain, Policy::Avl, Policy::RedBlack, Policy::Splay]
	);
	assert_eq!(serde_json::to_string(&Policy::RedBlack).unwrap(), r#""red-black""#);
}

#[test]
fn map_as_ordered_object() {
	let mut map = TreeMap::splay();
	map.insert("b", 2);
	map.insert("a", 1);
	map.insert("c", 3);
	map.get(&"b");

	assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"a":1,"b":2,"c":3}"#);
}
