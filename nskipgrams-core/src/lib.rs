//! N-gram and skip-gram counting library.
//!
//! This crate provides memory-efficient frequency tables over ordered
//! element tuples extracted from arbitrary sequences, including:
//! - Lazy extraction of contiguous n-grams and gapped skip-grams
//! - A prefix-indexed counting trie keyed by realized skip distance
//! - `Skipgrams` and `Ngrams` collections with lookup, membership,
//!   prefix-scoped enumeration and in-place merging
//!
//! Elements are opaque: characters, tokens, words or any other ordered type.
//! Segmenting raw text into elements is left to the caller.
//!
//! # Example
//!
//! ```
//! use nskipgrams_core::model::skipgrams::Skipgrams;
//!
//! let seq: Vec<char> = "abc".chars().collect();
//! let mut grams = Skipgrams::new(2)?;
//! grams.add_from_seq(&seq, 2, 1, 1)?;
//!
//! assert_eq!(grams.count(&['a', 'b'], 0), 1);
//! assert_eq!(grams.count(&['a', 'c'], 1), 1);
//! assert!(!grams.contains(&['a', 'c']));
//! # Ok::<(), nskipgrams_core::Error>(())
//! ```

/// Gram extraction, the counting trie and the collections built on it.
pub mod model;

/// Error type shared by every fallible operation.
pub mod error;

pub use error::{Error, Result};
pub use model::Element;
