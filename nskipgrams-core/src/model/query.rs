use crate::error::{Error, Result};
use crate::model::Element;

/// Filters for enumerating the grams of a collection.
///
/// `GramQuery` selects which entries an enumeration yields. Every filter is
/// optional; an empty query selects everything.
///
/// # Responsibilities
/// - Restrict results to one order (`order`)
/// - Restrict results to one realized skip (`skip`)
/// - Restrict results to grams starting with `prefix`
///
/// # Notes
/// - The order is checked against the collection's max order when the query
///   is run, not when it is built.
/// - A prefix longer than the requested order matches nothing.
///
/// # Example
/// ```
/// use nskipgrams_core::model::query::GramQuery;
///
/// let query = GramQuery::new().with_order(2).with_skip(0).with_prefix(&['a']);
/// assert_eq!(query.order, Some(2));
/// assert_eq!(query.prefix(), &['a']);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GramQuery<E> {
	/// Only grams of exactly this many elements. `None` means every order.
	pub order: Option<usize>,

	/// Only entries recorded at this realized skip. `None` means every skip.
	pub skip: Option<usize>,

	/// Leading elements every yielded gram must start with.
	prefix: Vec<E>,
}

impl<E: Element> GramQuery<E> {
	/// Creates a query selecting every entry.
	pub fn new() -> Self {
		Self {
			order: None,
			skip: None,
			prefix: Vec::new(),
		}
	}

	/// Restricts the query to grams of order `n`.
	pub fn with_order(mut self, n: usize) -> Self {
		self.order = Some(n);
		self
	}

	/// Restricts the query to entries at realized skip `skip`.
	pub fn with_skip(mut self, skip: usize) -> Self {
		self.skip = Some(skip);
		self
	}

	/// Restricts the query to grams starting with `prefix`.
	///
	/// An empty prefix removes the restriction.
	pub fn with_prefix(mut self, prefix: &[E]) -> Self {
		self.prefix = prefix.to_vec();
		self
	}

	/// Returns the current prefix (empty when unrestricted).
	pub fn prefix(&self) -> &[E] {
		&self.prefix
	}

	/// Checks the order filter against a collection's `max_order`.
	///
	/// # Errors
	/// - `Error::ZeroOrder` if the order is 0.
	/// - `Error::OrderOutOfRange` if the order exceeds `max_order`.
	pub(crate) fn validate(&self, max_order: usize) -> Result<()> {
		match self.order {
			Some(0) => Err(Error::ZeroOrder),
			Some(order) if order > max_order => Err(Error::OrderOutOfRange { order, max_order }),
			_ => Ok(()),
		}
	}
}

impl<E: Element> Default for GramQuery<E> {
	fn default() -> Self {
		Self::new()
	}
}
