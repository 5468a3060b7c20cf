/// Key-value pair stored in an internal node.
///
/// The key is fixed for as long as the item lives in a tree, the value can be replaced in
/// place.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Item<K, V> {
	key: K,
	value: V,
}

impl<K, V> Item<K, V> {
	#[inline]
	pub fn new(key: K, value: V) -> Item<K, V> {
		Item { key, value }
	}

	#[inline]
	pub fn key(&self) -> &K {
		&self.key
	}

	#[inline]
	pub fn value(&self) -> &V {
		&self.value
	}

	#[inline]
	pub fn value_mut(&mut self) -> &mut V {
		&mut self.value
	}

	/// Replace the value, returning the previous one.
	#[inline]
	pub fn set_value(&mut self, value: V) -> V {
		std::mem::replace(&mut self.value, value)
	}

	#[inline]
	pub fn as_pair(&self) -> (&K, &V) {
		(&self.key, &self.value)
	}

	#[inline]
	pub fn as_pair_mut(&mut self) -> (&K, &mut V) {
		(&self.key, &mut self.value)
	}

	#[inline]
	pub fn into_pair(self) -> (K, V) {
		(self.key, self.value)
	}
}

impl<K, V> From<(K, V)> for Item<K, V> {
	#[inline]
	fn from((key, value): (K, V)) -> Self {
		Item::new(key, value)
	}
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Item<K, V> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:?}: {:?}", self.key, self.value)
	}
}
