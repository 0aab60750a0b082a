use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Element, SkipCounts};

/// Represents one gram in the counting trie.
///
/// A `TrieNode` corresponds to the tuple of elements on the path from the
/// root down to it. It stores how often that gram was observed, split by
/// realized skip, and owns the nodes of every gram extending it by one
/// element.
///
/// ## Responsibilities:
/// - Accumulate per-skip occurrence counts
/// - Create children lazily, one per distinct next element
/// - Merge another node (and its whole subtree) into this one
///
/// ## Invariants
/// - Every entry of `counts` is strictly positive
/// - A node with no counts and no children is never kept in the trie
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Ord"))]
pub(crate) struct TrieNode<E> {
	/// Nodes for the grams one element longer, keyed by that element.
	children: BTreeMap<E, TrieNode<E>>,
	/// Occurrences of this gram, indexed by realized skip.
	/// Example: { 0 => 42, 2 => 3 }
	counts: SkipCounts,
}

impl<E: Element> TrieNode<E> {
	/// Creates a new empty node.
	pub(crate) fn new() -> Self {
		Self {
			children: BTreeMap::new(),
			counts: SkipCounts::new(),
		}
	}

	/// Returns the child for `element`, if any.
	pub(crate) fn child(&self, element: &E) -> Option<&TrieNode<E>> {
		self.children.get(element)
	}

	/// Returns the child for `element`, creating it if missing.
	pub(crate) fn child_or_insert(&mut self, element: &E) -> &mut TrieNode<E> {
		self.children.entry(element.clone()).or_insert_with(TrieNode::new)
	}

	/// Children in ascending element order.
	pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = (&E, &TrieNode<E>)> {
		self.children.iter()
	}

	pub(crate) fn counts(&self) -> &SkipCounts {
		&self.counts
	}

	/// Count recorded for `skip`, 0 if absent.
	pub(crate) fn count(&self, skip: usize) -> usize {
		self.counts.get(&skip).copied().unwrap_or(0)
	}

	/// Records `by` more occurrences at `skip`.
	///
	/// - If the skip already has a count, it is increased.
	/// - Otherwise a new entry is created with `by` as its count.
	///
	/// Callers guarantee `by > 0`.
	///
	/// # Errors
	/// Returns `Error::CountOverflow` if the count would exceed `usize::MAX`.
	/// The node is left unchanged in that case.
	pub(crate) fn increment(&mut self, skip: usize, by: usize) -> Result<()> {
		let total = self.count(skip).checked_add(by).ok_or(Error::CountOverflow { skip })?;
		self.counts.insert(skip, total);
		Ok(())
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.counts.is_empty() && self.children.is_empty()
	}

	/// Number of elements in the longest gram below this node.
	pub(crate) fn height(&self) -> usize {
		self.children.values().map(|child| child.height() + 1).max().unwrap_or(0)
	}

	/// Whether every count below this node is positive and no descendant is empty.
	pub(crate) fn is_well_formed(&self) -> bool {
		self.counts.values().all(|count| *count > 0)
			&& self.children.values().all(|child| !child.is_empty() && child.is_well_formed())
	}

	/// Checks that merging every node of `others` into `base` keeps all
	/// counts within `usize`.
	///
	/// `base` is `None` where the path does not exist yet.
	///
	/// # Errors
	/// Returns `Error::CountOverflow` for the first `(gram, skip)` whose sum
	/// would overflow.
	pub(crate) fn check_merge(base: Option<&Self>, others: &[&Self]) -> Result<()> {
		let skips: BTreeSet<usize> = others.iter().copied().flat_map(|other| other.counts.keys().copied()).collect();
		for skip in skips {
			others
				.iter()
				.try_fold(base.map_or(0, |node| node.count(skip)), |total, other| total.checked_add(other.count(skip)))
				.ok_or(Error::CountOverflow { skip })?;
		}

		let elements: BTreeSet<&E> = others.iter().copied().flat_map(|other| other.children.keys()).collect();
		for element in elements {
			let below: Vec<&Self> = others.iter().copied().filter_map(|other| other.child(element)).collect();
			Self::check_merge(base.and_then(|node| node.child(element)), &below)?;
		}
		Ok(())
	}

	/// Merges another node and its subtree into this one.
	///
	/// Paths missing here are created, and per-skip counts are summed.
	/// `other` is left untouched. Since `other` holds no empty nodes,
	/// neither does the result. Sums saturate; callers run
	/// [`TrieNode::check_merge`] first.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (skip, count) in &other.counts {
			let total = self.counts.entry(*skip).or_insert(0);
			*total = total.saturating_add(*count);
		}

		for (element, child) in &other.children {
			if let Some(existing) = self.children.get_mut(element) {
				existing.merge(child);
			} else {
				self.children.insert(element.clone(), child.clone());
			}
		}
	}
}
