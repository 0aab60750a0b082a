use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::model::Element;

/// Lazy producer of `(gram, realized_skip)` pairs extracted from a sequence.
///
/// For every anchor index `i` from `0` to `len - n`, the remaining `n - 1`
/// positions are picked, strictly increasing, from the window
/// `(i, min(len - 1, i + (n - 1) + max_skip)]`. Each selection is emitted once,
/// with `realized_skip = (last_index - i) - (n - 1)`.
///
/// # Ordering
/// Anchors ascend; for a fixed anchor, index combinations come out in
/// lexicographic order. With `max_skip == 0` this is exactly the classic
/// sliding window, left to right.
///
/// # Notes
/// - The producer is single-pass: once consumed it stays exhausted.
/// - A sequence shorter than `n` yields nothing.
#[derive(Debug)]
pub struct SkipgramsFromSeq<'a, E> {
	seq: &'a [E],
	n: usize,
	max_skip: usize,
	/// First index of the current selection.
	anchor: usize,
	/// The other `n - 1` selected indices, strictly increasing.
	tail: Vec<usize>,
	started: bool,
	done: bool,
}

impl<'a, E: Element> SkipgramsFromSeq<'a, E> {
	fn new(seq: &'a [E], n: usize, max_skip: usize) -> Self {
		Self {
			seq,
			n,
			max_skip,
			anchor: 0,
			tail: Vec::with_capacity(n - 1),
			started: false,
			done: seq.len() < n,
		}
	}

	/// Largest index the tail may reach for the current anchor.
	fn upper_bound(&self) -> usize {
		let reach = self.anchor.saturating_add(self.n - 1).saturating_add(self.max_skip);
		(self.seq.len() - 1).min(reach)
	}

	fn reset_tail(&mut self) {
		self.tail.clear();
		self.tail.extend(self.anchor + 1..self.anchor + self.n);
	}

	/// Moves to the next selection. Returns `false` once every anchor is spent.
	fn advance(&mut self) -> bool {
		if !self.started {
			self.started = true;
			self.reset_tail();
			return true;
		}

		let hi = self.upper_bound();
		let m = self.tail.len();
		for j in (0..m).rev() {
			// Position j can move while enough room is left for the positions after it.
			if self.tail[j] < hi - (m - 1 - j) {
				self.tail[j] += 1;
				for k in j + 1..m {
					self.tail[k] = self.tail[k - 1] + 1;
				}
				return true;
			}
		}

		self.anchor += 1;
		if self.anchor + self.n > self.seq.len() {
			return false;
		}
		self.reset_tail();
		true
	}
}

impl<E: Element> Iterator for SkipgramsFromSeq<'_, E> {
	type Item = (Vec<E>, usize);

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		if !self.advance() {
			self.done = true;
			return None;
		}

		let last = self.tail.last().copied().unwrap_or(self.anchor);
		let skip = (last - self.anchor) - (self.n - 1);
		let gram = std::iter::once(self.anchor)
			.chain(self.tail.iter().copied())
			.map(|i| self.seq[i].clone())
			.collect();
		Some((gram, skip))
	}
}

impl<E: Element> FusedIterator for SkipgramsFromSeq<'_, E> {}

/// Extracts skip-grams of order `n` with at most `max_skip` skipped positions.
///
/// # Errors
/// Returns `Error::ZeroOrder` if `n == 0`.
///
/// # Example
/// ```
/// use nskipgrams_core::model::combinations::skipgrams_from_seq;
///
/// let seq: Vec<char> = "abc".chars().collect();
/// let grams: Vec<_> = skipgrams_from_seq(&seq, 2, 1)?.collect();
/// assert_eq!(grams, vec![
/// 	(vec!['a', 'b'], 0),
/// 	(vec!['a', 'c'], 1),
/// 	(vec!['b', 'c'], 0),
/// ]);
/// # Ok::<(), nskipgrams_core::Error>(())
/// ```
pub fn skipgrams_from_seq<E: Element>(seq: &[E], n: usize, max_skip: usize) -> Result<SkipgramsFromSeq<'_, E>> {
	if n == 0 {
		return Err(Error::ZeroOrder);
	}
	Ok(SkipgramsFromSeq::new(seq, n, max_skip))
}

/// Extracts contiguous n-grams of order `n`, left to right.
///
/// Same as `skipgrams_from_seq(seq, n, 0)` with the (always zero) skip dropped.
///
/// # Errors
/// Returns `Error::ZeroOrder` if `n == 0`.
pub fn ngrams_from_seq<E: Element>(seq: &[E], n: usize) -> Result<impl Iterator<Item = Vec<E>> + '_> {
	Ok(skipgrams_from_seq(seq, n, 0)?.map(|(gram, _)| gram))
}
