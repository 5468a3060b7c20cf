//! Key ordering strategies.
use std::cmp::Ordering;

/// Total order over keys used by a [`TreeMap`](crate::generic::TreeMap).
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator.
///
/// It is a logic error for the order to change while keys are in the map.
pub trait Compare<K: ?Sized> {
	fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Natural ordering of keys, given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		a.cmp(b)
	}
}

/// Reverse of the natural ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		b.cmp(a)
	}
}

impl<K: ?Sized, F> Compare<K> for F
where
	F: Fn(&K, &K) -> Ordering,
{
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		self(a, b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders() {
		assert_eq!(Natural.compare(&1, &2), Ordering::Less);
		assert_eq!(Reverse.compare(&1, &2), Ordering::Greater);

		let by_last_digit = |a: &i32, b: &i32| (a % 10).cmp(&(b % 10));
		assert_eq!(by_last_digit.compare(&19, &21), Ordering::Greater);
	}
}
