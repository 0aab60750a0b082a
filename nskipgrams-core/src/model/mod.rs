//! Top-level module for gram extraction and counting.
//!
//! This module provides:
//! - The combination generator that turns a sequence into gram occurrences
//! - The counting trie (`GramTrie`) and its node type
//! - Skip-gram and n-gram collections (`Skipgrams`, `Ngrams`)
//! - Enumeration filters (`GramQuery`)

use std::fmt::Debug;

/// Lazy extraction of n-grams and skip-grams from a sequence.
///
/// Yields every valid index selection exactly once, together with its
/// realized skip distance.
pub mod combinations;

/// Prefix-indexed counting trie.
///
/// Stores `gram -> {skip -> count}` and supports exact lookup,
/// prefix-scoped enumeration and in-place merging.
pub mod trie;

/// Skip-gram collection bounded by a maximum order.
pub mod skipgrams;

/// N-gram collection, the skip = 0 restriction of `Skipgrams`.
pub mod ngrams;

/// Enumeration filters (order, skip, prefix).
pub mod query;

/// Internal trie node.
///
/// Owns its children and the per-skip counts of the gram it represents.
/// This module is not exposed publicly.
mod node;

/// An element of a gram.
///
/// Anything cloneable and totally ordered qualifies: `char`, `String`,
/// `&str`, token ids, enums. The ordering gives trie children a stable,
/// documented enumeration order (ascending element order).
pub trait Element: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> Element for T {}

/// Counts of one gram, keyed by realized skip.
///
/// Skip keys iterate in ascending order. Every stored count is >= 1.
pub type SkipCounts = std::collections::BTreeMap<usize, usize>;
