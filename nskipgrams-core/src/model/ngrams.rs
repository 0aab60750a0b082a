use serde::{Deserialize, Deserializer, Serialize, de};

use super::query::GramQuery;
use super::skipgrams::Skipgrams;
use super::trie::Nodes;
use crate::error::{Error, Result};
use crate::model::Element;

/// A collection of n-grams.
///
/// N-grams are skip-grams with skip = 0. `Ngrams` wraps a [`Skipgrams`]
/// and pins the skip to 0 for every ingestion and every query, so it only
/// ever holds contiguous grams.
///
/// # Invariants
/// - Every stored entry has realized skip 0
/// - Orders are bounded by `max_order`, as for `Skipgrams`
///
/// Deserialization also rejects entries at a non-zero skip.
///
/// # Example
/// ```
/// use nskipgrams_core::model::ngrams::Ngrams;
///
/// let seq: Vec<char> = "my cats".chars().collect();
/// let mut ngrams = Ngrams::new(2)?;
/// ngrams.add_from_seq(&seq, 2, 1)?;
///
/// assert_eq!(ngrams.count(&['c', 'a']), 1);
/// assert!(!ngrams.contains(&['x', 'y']));
/// # Ok::<(), nskipgrams_core::Error>(())
/// ```
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Ngrams<E> {
	inner: Skipgrams<E>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Element"))]
struct RawNgrams<E> {
	inner: Skipgrams<E>,
}

impl<'de, E> Deserialize<'de> for Ngrams<E>
where
	E: Deserialize<'de> + Element,
{
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let RawNgrams { inner } = RawNgrams::deserialize(deserializer)?;
		if inner.iter().any(|(_, skip, _)| skip != 0) {
			return Err(de::Error::custom(Error::Malformed("n-gram recorded at a non-zero skip")));
		}
		Ok(Self { inner })
	}
}

impl<E: Element> Ngrams<E> {
	/// Creates an empty collection indexing n-grams of order `1..=max_order`.
	///
	/// # Errors
	/// Returns `Error::ZeroMaxOrder` if `max_order == 0`.
	pub fn new(max_order: usize) -> Result<Self> {
		Ok(Self { inner: Skipgrams::new(max_order)? })
	}

	/// Largest order this collection indexes.
	pub fn max_order(&self) -> usize {
		self.inner.max_order()
	}

	/// Whether nothing has been added yet.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Adds `count` occurrences of `ngram`.
	///
	/// # Errors
	/// Same as [`Skipgrams::add`].
	pub fn add(&mut self, ngram: &[E], count: usize) -> Result<()> {
		self.inner.add(ngram, 0, count)
	}

	/// Adds every contiguous n-gram of order `n` in `seq`, each weighted by `count`.
	///
	/// # Errors
	/// Same as [`Skipgrams::add_from_seq`].
	pub fn add_from_seq(&mut self, seq: &[E], n: usize, count: usize) -> Result<()> {
		self.inner.add_from_seq(seq, n, 0, count)
	}

	/// Adds the contiguous n-grams of every order from 1 to
	/// `min(max_order, seq.len())` in `seq`.
	///
	/// # Errors
	/// Returns `Error::ZeroCount` if `count == 0`.
	pub fn add_all_from_seq(&mut self, seq: &[E], count: usize) -> Result<()> {
		self.inner.add_all_from_seq(seq, 0, count)
	}

	/// Count of `ngram`, 0 if never observed.
	pub fn count(&self, ngram: &[E]) -> usize {
		self.inner.count(ngram, 0)
	}

	/// Whether `ngram` exactly matches an n-gram of this collection.
	///
	/// Prefix or suffix matches do not count.
	pub fn contains(&self, ngram: &[E]) -> bool {
		self.inner.contains(ngram)
	}

	/// Lazily yields `(ngram, count)` for the n-grams of order `n`, optionally
	/// restricted to those starting with `prefix`.
	///
	/// # Errors
	/// Returns `Error::ZeroOrder` / `Error::OrderOutOfRange` if `n` is outside
	/// `1..=max_order`.
	pub fn ngrams_with_counts<'a>(
		&'a self,
		n: usize,
		prefix: Option<&[E]>,
	) -> Result<impl Iterator<Item = (Vec<E>, usize)> + use<'a, E>> {
		let query = GramQuery::new()
			.with_order(n)
			.with_skip(0)
			.with_prefix(prefix.unwrap_or_default());
		self.inner.grams_with_counts(query)
	}

	/// Total count of the n-grams of order `n`, or the number of distinct
	/// ones if `unique`.
	///
	/// # Errors
	/// Returns `Error::ZeroOrder` / `Error::OrderOutOfRange` if `n` is outside
	/// `1..=max_order`.
	pub fn total_count(&self, n: usize, unique: bool) -> Result<usize> {
		self.inner.total_count(n, Some(0), unique)
	}

	/// Lazily yields every n-gram of every order with its count.
	pub fn iter(&self) -> NgramCounts<'_, E> {
		NgramCounts { nodes: self.inner.trie().nodes(None, &[]) }
	}

	/// Combines other n-gram collections into this one, in place.
	///
	/// # Errors
	/// Same as [`Skipgrams::combine`].
	pub fn combine(&mut self, others: &[&Self]) -> Result<()> {
		let others: Vec<&Skipgrams<E>> = others.iter().map(|other| &other.inner).collect();
		self.inner.combine(&others)
	}

	/// Views this collection as skip-grams (every entry at skip 0).
	pub fn as_skipgrams(&self) -> &Skipgrams<E> {
		&self.inner
	}

	/// Unwraps the underlying skip-gram collection.
	pub fn into_skipgrams(self) -> Skipgrams<E> {
		self.inner
	}
}

impl<'a, E: Element> IntoIterator for &'a Ngrams<E> {
	type Item = (Vec<E>, usize);
	type IntoIter = NgramCounts<'a, E>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Walk over every n-gram of an [`Ngrams`] collection with its count.
#[derive(Debug)]
pub struct NgramCounts<'a, E> {
	nodes: Nodes<'a, E>,
}

impl<E: Element> Iterator for NgramCounts<'_, E> {
	type Item = (Vec<E>, usize);

	fn next(&mut self) -> Option<Self::Item> {
		self.nodes
			.by_ref()
			.find_map(|(gram, counts)| counts.get(&0).map(|count| (gram, *count)))
	}
}
