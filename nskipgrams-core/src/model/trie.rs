use std::collections::btree_map;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::node::TrieNode;
use crate::error::{Error, Result};
use crate::model::{Element, SkipCounts};

/// Prefix-indexed counting trie.
///
/// Each node stands for the gram spelled by the path from the root to it and
/// stores that gram's counts partitioned by realized skip. The root is the
/// empty gram and never carries counts.
///
/// # Responsibilities
/// - Insert weighted gram occurrences at a given skip
/// - Answer exact lookups in O(order)
/// - Enumerate the grams below a prefix, optionally at a single depth
/// - Merge another trie in place
///
/// # Invariants
/// - Every stored count is >= 1
/// - No node without counts and without children is ever kept
///
/// # Enumeration order
/// Pre-order depth first, siblings in ascending element order, skips in
/// ascending order. The order only depends on the trie's contents, not on
/// the order insertions happened in.
///
/// # Deserialization
/// Loaded tries are checked against the invariants above; a root with
/// counts, a zero count or an empty node is rejected.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GramTrie<E> {
	root: TrieNode<E>,
}

/// Unchecked wire form of a [`GramTrie`].
#[derive(Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Ord"))]
struct RawGramTrie<E> {
	root: TrieNode<E>,
}

impl<'de, E> Deserialize<'de> for GramTrie<E>
where
	E: Deserialize<'de> + Element,
{
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let RawGramTrie { root } = RawGramTrie::deserialize(deserializer)?;
		Self::from_root(root).map_err(de::Error::custom)
	}
}

impl<E: Element> GramTrie<E> {
	/// Creates an empty trie.
	pub fn new() -> Self {
		Self { root: TrieNode::new() }
	}

	fn from_root(root: TrieNode<E>) -> Result<Self> {
		if !root.counts().is_empty() {
			return Err(Error::Malformed("the empty gram carries counts"));
		}
		if !root.is_well_formed() {
			return Err(Error::Malformed("zero count or empty node"));
		}
		Ok(Self { root })
	}

	/// Whether no gram has been recorded yet.
	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}

	/// Number of elements in the longest stored gram.
	pub fn longest_gram(&self) -> usize {
		self.root.height()
	}

	/// Adds `increment_by` occurrences of `gram` at realized skip `skip`.
	///
	/// Missing nodes along the path are created.
	///
	/// # Errors
	/// - `Error::EmptyGram` if `gram` is empty.
	/// - `Error::ZeroCount` if `increment_by == 0`.
	/// - `Error::CountOverflow` if the stored count would exceed `usize::MAX`.
	///   Overflow needs an existing count, so no node is created in that case.
	pub fn insert(&mut self, gram: &[E], skip: usize, increment_by: usize) -> Result<()> {
		if gram.is_empty() {
			return Err(Error::EmptyGram);
		}
		if increment_by == 0 {
			return Err(Error::ZeroCount);
		}

		let mut node = &mut self.root;
		for element in gram {
			node = node.child_or_insert(element);
		}
		node.increment(skip, increment_by)
	}

	/// Descends along `path`. The empty path is the root.
	fn find(&self, path: &[E]) -> Option<&TrieNode<E>> {
		path.iter().try_fold(&self.root, |node, element| node.child(element))
	}

	/// Returns the per-skip counts of `gram`, or `None` if the gram has no node.
	///
	/// A gram that only exists as a prefix of longer grams has a node with no
	/// counts, so `Some` with an empty map is possible.
	pub fn lookup(&self, gram: &[E]) -> Option<&SkipCounts> {
		if gram.is_empty() {
			return None;
		}
		self.find(gram).map(TrieNode::counts)
	}

	/// Count of `gram` at `skip`, 0 if never observed.
	pub fn count_of(&self, gram: &[E], skip: usize) -> usize {
		if gram.is_empty() {
			return 0;
		}
		self.find(gram).map_or(0, |node| node.count(skip))
	}

	/// Lazily walks the grams starting with `prefix` that carry counts.
	///
	/// - With `order = Some(n)`, only grams of exactly `n` elements are yielded
	///   and the walk never goes deeper than `n`.
	/// - With `order = None`, every gram of at least `prefix.len()` elements
	///   (and at least one) is yielded.
	///
	/// An unknown prefix, or a prefix longer than `order`, yields nothing.
	pub fn nodes(&self, order: Option<usize>, prefix: &[E]) -> Nodes<'_, E> {
		let too_long = order.is_some_and(|n| prefix.len() > n);
		let stack = match self.find(prefix) {
			Some(node) if !too_long => vec![(prefix.to_vec(), node)],
			_ => Vec::new(),
		};
		Nodes { order, stack }
	}

	/// Lazily yields `(gram, skip, count)` for every recorded skip of every
	/// gram selected by [`GramTrie::nodes`].
	pub fn enumerate(&self, order: Option<usize>, prefix: &[E]) -> Entries<'_, E> {
		Entries {
			nodes: self.nodes(order, prefix),
			current: None,
		}
	}

	/// Merges another trie into this one.
	///
	/// # Notes
	/// - Missing paths are created, counts for matching `(gram, skip)` are summed.
	/// - `other` is not modified.
	///
	/// # Errors
	/// Returns `Error::CountOverflow` if a summed count would exceed
	/// `usize::MAX`. Nothing is merged in that case.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.merge_all(&[other])
	}

	/// Merges several tries into this one, all or nothing.
	///
	/// # Errors
	/// Same as [`GramTrie::merge`].
	pub fn merge_all(&mut self, others: &[&Self]) -> Result<()> {
		let roots: Vec<&TrieNode<E>> = others.iter().map(|other| &other.root).collect();
		TrieNode::check_merge(Some(&self.root), &roots)?;
		for root in roots {
			self.root.merge(root);
		}
		Ok(())
	}
}

impl<E: Element> Default for GramTrie<E> {
	fn default() -> Self {
		Self::new()
	}
}

/// Depth-first walk over the nodes of a [`GramTrie`].
///
/// Each item is a gram and its per-skip counts. Nodes without counts
/// (pure prefixes) are skipped.
#[derive(Debug)]
pub struct Nodes<'a, E> {
	order: Option<usize>,
	stack: Vec<(Vec<E>, &'a TrieNode<E>)>,
}

impl<'a, E: Element> Iterator for Nodes<'a, E> {
	type Item = (Vec<E>, &'a SkipCounts);

	fn next(&mut self) -> Option<Self::Item> {
		while let Some((gram, node)) = self.stack.pop() {
			let depth = gram.len();

			if self.order.is_none_or(|n| depth < n) {
				// Reversed so the smallest element is popped first.
				for (element, child) in node.children().rev() {
					let mut longer = Vec::with_capacity(depth + 1);
					longer.extend_from_slice(&gram);
					longer.push(element.clone());
					self.stack.push((longer, child));
				}
			}

			let wanted = match self.order {
				Some(n) => depth == n,
				None => depth > 0,
			};
			if wanted && !node.counts().is_empty() {
				return Some((gram, node.counts()));
			}
		}
		None
	}
}

/// Flattened walk over a [`GramTrie`], one `(gram, skip, count)` per entry.
#[derive(Debug)]
pub struct Entries<'a, E> {
	nodes: Nodes<'a, E>,
	current: Option<(Vec<E>, btree_map::Iter<'a, usize, usize>)>,
}

impl<E: Element> Iterator for Entries<'_, E> {
	type Item = (Vec<E>, usize, usize);

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some((gram, counts)) = &mut self.current {
				if let Some((skip, count)) = counts.next() {
					return Some((gram.clone(), *skip, *count));
				}
			}
			let (gram, counts) = self.nodes.next()?;
			self.current = Some((gram, counts.iter()));
		}
	}
}
