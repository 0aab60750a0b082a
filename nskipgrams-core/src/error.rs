//! Error types for collection operations.
//!
//! Every failure in this crate is a caller-input violation detected before
//! any mutation happens, so a failed call always leaves the collection
//! unchanged. Deserialized data counts as caller input. Absence of a gram
//! is never an error.

use thiserror::Error;

/// Error type for gram collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// A collection was constructed with `max_order == 0`.
	#[error("Invalid argument: max order must be an integer >= 1")]
	ZeroMaxOrder,

	/// An order (`n`) of zero was requested.
	#[error("Invalid argument: n must be an integer >= 1")]
	ZeroOrder,

	/// An order larger than the collection can index was requested.
	#[error("Invalid argument: order {order} is outside of [1, {max_order}]")]
	OrderOutOfRange { order: usize, max_order: usize },

	/// A gram of length zero was passed where a gram of order >= 1 is required.
	#[error("Invalid argument: gram must contain at least one element")]
	EmptyGram,

	/// A count (weight) of zero was passed to an adding operation.
	#[error("Invalid argument: count must be an integer >= 1")]
	ZeroCount,

	/// `combine` was given a source that indexes deeper than the destination.
	#[error("Invalid argument: cannot combine a collection of max order {other} into one of max order {max_order}")]
	IncompatibleMaxOrder { other: usize, max_order: usize },

	/// Adding a count would push a stored count past `usize::MAX`.
	#[error("Invalid argument: count at skip {skip} would overflow")]
	CountOverflow { skip: usize },

	/// Deserialized data does not describe a valid collection.
	#[error("Invalid argument: malformed collection data: {0}")]
	Malformed(&'static str),
}

impl Error {
	/// Whether this error is an invalid-argument error.
	///
	/// The core only ever rejects caller input, so this holds for every
	/// variant. It exists so wrapper layers can map the whole family onto a
	/// single host error kind without matching each variant.
	pub fn is_invalid_argument(&self) -> bool {
		matches!(
			self,
			Error::ZeroMaxOrder
				| Error::ZeroOrder
				| Error::OrderOutOfRange { .. }
				| Error::EmptyGram
				| Error::ZeroCount
				| Error::IncompatibleMaxOrder { .. }
				| Error::CountOverflow { .. }
				| Error::Malformed(_)
		)
	}
}

/// Result type for gram collection operations.
pub type Result<T> = std::result::Result<T, Error>;
