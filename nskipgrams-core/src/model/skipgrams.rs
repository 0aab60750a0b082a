use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serialize, de};

use super::combinations::skipgrams_from_seq;
use super::query::GramQuery;
use super::trie::{Entries, GramTrie};
use crate::error::{Error, Result};
use crate::model::Element;

/// A collection of skip-grams.
///
/// `Skipgrams` owns one [`GramTrie`] and indexes grams of order
/// `1..=max_order`, each occurrence labelled with its realized skip
/// (0 for contiguous grams).
///
/// # Responsibilities
/// - Add single grams, or every gram extracted from a sequence
/// - Answer exact counts and membership
/// - Enumerate entries filtered by order, skip and prefix
/// - Combine other collections into this one in place
///
/// # Invariants
/// - No gram longer than `max_order` is ever stored
/// - Counts only grow; nothing is ever removed
/// - A rejected call leaves the collection unchanged
///
/// # Notes
/// Enumerations borrow the collection, so it cannot be mutated while one
/// is being consumed. The collection provides no internal locking; share
/// it across threads behind the caller's own `Mutex`.
///
/// Deserialization rejects a zero `max_order` and grams longer than it.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Skipgrams<E> {
	max_order: usize,
	trie: GramTrie<E>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Element"))]
struct RawSkipgrams<E> {
	max_order: usize,
	trie: GramTrie<E>,
}

impl<'de, E> Deserialize<'de> for Skipgrams<E>
where
	E: Deserialize<'de> + Element,
{
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let RawSkipgrams { max_order, trie } = RawSkipgrams::deserialize(deserializer)?;
		let mut grams = Self::new(max_order).map_err(de::Error::custom)?;
		let longest = trie.longest_gram();
		if longest > max_order {
			return Err(de::Error::custom(Error::OrderOutOfRange { order: longest, max_order }));
		}
		grams.trie = trie;
		Ok(grams)
	}
}

impl<E: Element> Skipgrams<E> {
	/// Creates an empty collection indexing grams of order `1..=max_order`.
	///
	/// # Errors
	/// Returns `Error::ZeroMaxOrder` if `max_order == 0`.
	pub fn new(max_order: usize) -> Result<Self> {
		if max_order == 0 {
			return Err(Error::ZeroMaxOrder);
		}
		Ok(Self { max_order, trie: GramTrie::new() })
	}

	/// Largest order this collection indexes.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Whether nothing has been added yet.
	pub fn is_empty(&self) -> bool {
		self.trie.is_empty()
	}

	/// Read access to the underlying trie.
	pub fn trie(&self) -> &GramTrie<E> {
		&self.trie
	}

	fn check_order(&self, n: usize) -> Result<()> {
		if n == 0 {
			return Err(Error::ZeroOrder);
		}
		if n > self.max_order {
			return Err(Error::OrderOutOfRange { order: n, max_order: self.max_order });
		}
		Ok(())
	}

	/// Adds `count` occurrences of `gram` at realized skip `skip`.
	///
	/// # Errors
	/// - `Error::EmptyGram` if `gram` is empty.
	/// - `Error::OrderOutOfRange` if `gram` is longer than `max_order`.
	/// - `Error::ZeroCount` if `count == 0`.
	/// - `Error::CountOverflow` if the stored count would exceed `usize::MAX`.
	pub fn add(&mut self, gram: &[E], skip: usize, count: usize) -> Result<()> {
		if gram.is_empty() {
			return Err(Error::EmptyGram);
		}
		self.check_order(gram.len())?;
		if count == 0 {
			return Err(Error::ZeroCount);
		}

		trace!("add {:?} skip={} count={}", gram, skip, count);
		self.trie.insert(gram, skip, count)
	}

	/// Adds every skip-gram of order `n` found in `seq` with at most `skip`
	/// skipped positions.
	///
	/// Each occurrence is recorded at its realized skip and weighted by
	/// `count`. A sequence shorter than `n` adds nothing.
	///
	/// # Errors
	/// - `Error::ZeroOrder` / `Error::OrderOutOfRange` if `n` is outside `1..=max_order`.
	/// - `Error::ZeroCount` if `count == 0`.
	/// - `Error::CountOverflow` if a count would exceed `usize::MAX`; nothing
	///   is added then.
	pub fn add_from_seq(&mut self, seq: &[E], n: usize, skip: usize, count: usize) -> Result<()> {
		self.check_order(n)?;
		if count == 0 {
			return Err(Error::ZeroCount);
		}

		let mut staged = GramTrie::new();
		let occurrences = Self::stage(&mut staged, seq, n, skip, count)?;
		self.trie.merge(&staged)?;
		debug!(
			"added {} occurrences of order {} (max skip {}, weight {}) from a sequence of {} elements",
			occurrences,
			n,
			skip,
			count,
			seq.len()
		);
		Ok(())
	}

	/// Adds the skip-grams of every order from 1 to `min(max_order, seq.len())`
	/// found in `seq`, with at most `max_skip` skipped positions.
	///
	/// # Errors
	/// - `Error::ZeroCount` if `count == 0`.
	/// - `Error::CountOverflow` if a count would exceed `usize::MAX`; nothing
	///   is added then.
	pub fn add_all_from_seq(&mut self, seq: &[E], max_skip: usize, count: usize) -> Result<()> {
		if count == 0 {
			return Err(Error::ZeroCount);
		}
		let mut staged = GramTrie::new();
		let mut occurrences = 0;
		for n in 1..=self.max_order.min(seq.len()) {
			occurrences += Self::stage(&mut staged, seq, n, max_skip, count)?;
		}
		self.trie.merge(&staged)?;
		debug!(
			"added {} occurrences of orders 1..={} (max skip {}, weight {}) from a sequence of {} elements",
			occurrences,
			self.max_order.min(seq.len()),
			max_skip,
			count,
			seq.len()
		);
		Ok(())
	}

	/// Collects the order-`n` skip-grams of `seq` into `staged`, returning
	/// how many occurrences were found.
	fn stage(staged: &mut GramTrie<E>, seq: &[E], n: usize, skip: usize, count: usize) -> Result<usize> {
		let mut occurrences = 0;
		for (gram, realized) in skipgrams_from_seq(seq, n, skip)? {
			staged.insert(&gram, realized, count)?;
			occurrences += 1;
		}
		Ok(occurrences)
	}

	/// Count of `gram` at realized skip `skip`.
	///
	/// Returns 0 if the gram was never observed at that skip, including
	/// grams longer than `max_order`.
	pub fn count(&self, gram: &[E], skip: usize) -> usize {
		if gram.len() > self.max_order {
			return 0;
		}
		self.trie.count_of(gram, skip)
	}

	/// Whether `gram` was observed contiguously (at skip 0).
	///
	/// Occurrences recorded only at non-zero skips do not count; see
	/// [`Skipgrams::contains_any_skip`].
	pub fn contains(&self, gram: &[E]) -> bool {
		self.count(gram, 0) > 0
	}

	/// Whether `gram` was observed at any realized skip.
	pub fn contains_any_skip(&self, gram: &[E]) -> bool {
		self.trie.lookup(gram).is_some_and(|counts| !counts.is_empty())
	}

	/// Lazily yields `(gram, skip, count)` for every entry selected by `query`.
	///
	/// Without a skip filter, a gram observed at several skips yields one
	/// entry per skip. Each call starts a fresh traversal.
	///
	/// # Errors
	/// Returns `Error::ZeroOrder` / `Error::OrderOutOfRange` if the query's
	/// order is outside `1..=max_order`.
	///
	/// # Example
	/// ```
	/// use nskipgrams_core::model::query::GramQuery;
	/// use nskipgrams_core::model::skipgrams::Skipgrams;
	///
	/// let seq: Vec<char> = "abc".chars().collect();
	/// let mut grams = Skipgrams::new(2)?;
	/// grams.add_from_seq(&seq, 2, 1, 1)?;
	///
	/// let skipped: Vec<_> = grams
	/// 	.skipgrams_with_counts(GramQuery::new().with_order(2).with_skip(1))?
	/// 	.collect();
	/// assert_eq!(skipped, vec![(vec!['a', 'c'], 1, 1)]);
	/// # Ok::<(), nskipgrams_core::Error>(())
	/// ```
	pub fn skipgrams_with_counts(
		&self,
		query: GramQuery<E>,
	) -> Result<impl Iterator<Item = (Vec<E>, usize, usize)> + '_> {
		query.validate(self.max_order)?;
		let skip = query.skip;
		Ok(self.trie.enumerate(query.order, query.prefix()).filter(move |(_, s, _)| skip.is_none_or(|wanted| *s == wanted)))
	}

	/// Lazily yields `(gram, count)` for every gram selected by `query`.
	///
	/// With a skip filter the count is the one recorded at that skip (grams
	/// absent at that skip are left out). Without one, it is the sum over
	/// every skip recorded for the gram.
	///
	/// # Errors
	/// Returns `Error::ZeroOrder` / `Error::OrderOutOfRange` if the query's
	/// order is outside `1..=max_order`.
	pub fn grams_with_counts(&self, query: GramQuery<E>) -> Result<impl Iterator<Item = (Vec<E>, usize)> + '_> {
		query.validate(self.max_order)?;
		let skip = query.skip;
		Ok(self.trie.nodes(query.order, query.prefix()).filter_map(move |(gram, counts)| {
			let count = match skip {
				Some(skip) => counts.get(&skip).copied()?,
				None => counts.values().sum(),
			};
			Some((gram, count))
		}))
	}

	/// Total count of the grams of order `n`.
	///
	/// - `skip`: restrict to one realized skip, or `None` for all of them.
	/// - `unique`: if `true`, count distinct grams instead of occurrences.
	///
	/// # Errors
	/// Returns `Error::ZeroOrder` / `Error::OrderOutOfRange` if `n` is outside
	/// `1..=max_order`.
	pub fn total_count(&self, n: usize, skip: Option<usize>, unique: bool) -> Result<usize> {
		let mut query = GramQuery::new().with_order(n);
		query.skip = skip;
		let grams = self.grams_with_counts(query)?;
		Ok(if unique { grams.count() } else { grams.map(|(_, count)| count).sum() })
	}

	/// Lazily yields every entry as `(gram, skip, count)`.
	pub fn iter(&self) -> Entries<'_, E> {
		self.trie.enumerate(None, &[])
	}

	/// Combines other collections into this one, in place.
	///
	/// Counts for matching `(gram, skip)` pairs are summed; the sources are
	/// not modified. Every source is checked before anything is merged.
	///
	/// To merge without touching an existing collection, combine into a
	/// fresh one:
	///
	/// ```
	/// use nskipgrams_core::model::skipgrams::Skipgrams;
	///
	/// let mut a = Skipgrams::new(2)?;
	/// a.add(&['x', 'y'], 0, 1)?;
	/// let mut b = Skipgrams::new(2)?;
	/// b.add(&['x', 'y'], 0, 2)?;
	///
	/// let mut merged = Skipgrams::new(2)?;
	/// merged.combine(&[&a, &b])?;
	/// assert_eq!(merged.count(&['x', 'y'], 0), 3);
	/// assert_eq!(a.count(&['x', 'y'], 0), 1);
	/// # Ok::<(), nskipgrams_core::Error>(())
	/// ```
	///
	/// # Errors
	/// - `Error::IncompatibleMaxOrder` if any source has a larger `max_order`
	///   than this collection.
	/// - `Error::CountOverflow` if a summed count would exceed `usize::MAX`.
	pub fn combine(&mut self, others: &[&Self]) -> Result<()> {
		if let Some(other) = others.iter().find(|other| other.max_order > self.max_order) {
			return Err(Error::IncompatibleMaxOrder { other: other.max_order, max_order: self.max_order });
		}

		let tries: Vec<&GramTrie<E>> = others.iter().map(|other| &other.trie).collect();
		self.trie.merge_all(&tries)?;
		debug!("combined {} collection(s) into one of max order {}", others.len(), self.max_order);
		Ok(())
	}
}

impl<'a, E: Element> IntoIterator for &'a Skipgrams<E> {
	type Item = (Vec<E>, usize, usize);
	type IntoIter = Entries<'a, E>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
