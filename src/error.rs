use crate::generic::node::{Position, Side};
use thiserror::Error;

/// Structural rule a low-level tree edit would break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Violation {
	#[error("the tree already has a root")]
	RootExists,

	#[error("the {0} child is already internal")]
	ChildOccupied(Side),

	#[error("the node is not a sentinel")]
	NotSentinel,

	#[error("the node is a sentinel")]
	Sentinel,

	#[error("the node has two internal children")]
	TwoInternalChildren,

	#[error("the node has no parent")]
	NoParent,

	#[error("the node has no grandparent")]
	NoGrandparent,
}

/// Error returned by the low-level [`SentinelTree`](crate::generic::SentinelTree) API.
///
/// Both variants denote a logic error in the caller: nothing is modified when they are
/// returned, and retrying the same call will fail the same way.
/// Looking up an absent key is not an error, map lookups simply return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
	/// The position does not belong to this tree, or its node has been removed.
	#[error("invalid position {0}")]
	InvalidPosition(Position),

	/// The edit would break the sentinel tree invariants.
	#[error("cannot edit node {position}: {violation}")]
	StructuralPrecondition {
		position: Position,
		violation: Violation,
	},
}

impl Error {
	#[inline]
	pub(crate) fn structural(position: Position, violation: Violation) -> Error {
		Error::StructuralPrecondition {
			position,
			violation,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Violation::RootExists, "the tree already has a root")]
	#[case(Violation::ChildOccupied(Side::Left), "the left child is already internal")]
	#[case(Violation::TwoInternalChildren, "the node has two internal children")]
	fn violation_display(#[case] violation: Violation, #[case] expected: &str) {
		assert_eq!(violation.to_string(), expected)
	}

	#[rstest]
	fn error_display() {
		let position = Position::new(3, 12);
		assert_eq!(
			Error::InvalidPosition(position).to_string(),
			"invalid position @3"
		);
		assert_eq!(
			Error::structural(position, Violation::Sentinel).to_string(),
			"cannot edit node @3: the node is a sentinel"
		);

		let _: &dyn std::error::Error = &Error::InvalidPosition(position);
	}
}
