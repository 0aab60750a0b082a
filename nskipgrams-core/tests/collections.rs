//! End-to-end behaviour of the `Skipgrams` and `Ngrams` collections.

use nskipgrams_core::Error;
use nskipgrams_core::model::ngrams::Ngrams;
use nskipgrams_core::model::query::GramQuery;
use nskipgrams_core::model::skipgrams::Skipgrams;

fn chars(s: &str) -> Vec<char> {
	s.chars().collect()
}

// ---------------------------------------------------------------------------
// Documented examples
// ---------------------------------------------------------------------------

#[test]
fn bigram_from_a_short_phrase() {
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add_from_seq(&chars("my cats"), 2, 0, 1).unwrap();
	assert_eq!(grams.count(&['c', 'a'], 0), 1);
}

#[test]
fn combined_collections_add_up() {
	let mut first = Skipgrams::new(2).unwrap();
	first.add_from_seq(&chars("my cat"), 2, 0, 1).unwrap();
	let mut second = Skipgrams::new(2).unwrap();
	second.add_from_seq(&chars("your cats"), 2, 0, 1).unwrap();

	first.combine(&[&second]).unwrap();
	assert_eq!(first.count(&[' ', 'c'], 0), 2);
}

#[test]
fn contiguous_bigrams_come_out_left_to_right() {
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add_from_seq(&chars("abcdef"), 2, 0, 1).unwrap();

	let entries: Vec<_> = grams
		.skipgrams_with_counts(GramQuery::new().with_order(2))
		.unwrap()
		.collect();
	assert_eq!(entries, vec![
		(chars("ab"), 0, 1),
		(chars("bc"), 0, 1),
		(chars("cd"), 0, 1),
		(chars("de"), 0, 1),
		(chars("ef"), 0, 1),
	]);
}

#[test]
fn one_skip_admits_the_gapped_pair() {
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add_from_seq(&chars("abc"), 2, 1, 1).unwrap();

	let entries: Vec<_> = grams.iter().collect();
	assert_eq!(entries, vec![
		(chars("ab"), 0, 1),
		(chars("ac"), 1, 1),
		(chars("bc"), 0, 1),
	]);
}

#[test]
fn empty_collection_has_nothing() {
	let grams: Skipgrams<char> = Skipgrams::new(2).unwrap();
	assert!(!grams.contains(&['x', 'y']));
	assert_eq!(grams.count(&['x', 'y'], 0), 0);
	assert_eq!(grams.iter().count(), 0);

	let ngrams: Ngrams<char> = Ngrams::new(2).unwrap();
	assert!(!ngrams.contains(&['x', 'y']));
	assert_eq!(ngrams.count(&['x', 'y']), 0);
}

// ---------------------------------------------------------------------------
// N-grams as the skip = 0 projection
// ---------------------------------------------------------------------------

#[test]
fn ngrams_match_skipgrams_at_skip_zero() {
	let text = chars("the cat sat on the mat");
	let mut ngrams = Ngrams::new(3).unwrap();
	let mut skipgrams = Skipgrams::new(3).unwrap();
	for n in 1..=3 {
		ngrams.add_from_seq(&text, n, 1).unwrap();
		skipgrams.add_from_seq(&text, n, 0, 1).unwrap();
	}

	for n in 1..=3 {
		let left: Vec<_> = ngrams.ngrams_with_counts(n, None).unwrap().collect();
		let right: Vec<_> = skipgrams
			.grams_with_counts(GramQuery::new().with_order(n))
			.unwrap()
			.collect();
		assert_eq!(left, right, "order {n}");
	}
	assert_eq!(ngrams.as_skipgrams(), &skipgrams);
}

#[test]
fn word_level_grams() {
	let sentence: Vec<&str> = "the rain in Spain falls mainly on the plain".split(' ').collect();
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add_from_seq(&sentence, 2, 1, 1).unwrap();

	assert_eq!(grams.count(&["the", "rain"], 0), 1);
	assert_eq!(grams.count(&["the", "in"], 1), 1);
	assert_eq!(grams.count(&["the", "plain"], 0), 1);
	assert_eq!(grams.total_count(2, None, false).unwrap(), 15);
	assert_eq!(grams.total_count(2, Some(1), false).unwrap(), 7);

	let from_on: Vec<_> = grams
		.grams_with_counts(GramQuery::new().with_order(2).with_prefix(&["on"]))
		.unwrap()
		.collect();
	assert_eq!(from_on, vec![(vec!["on", "plain"], 1), (vec!["on", "the"], 1)]);
}

// ---------------------------------------------------------------------------
// Errors leave collections untouched
// ---------------------------------------------------------------------------

#[test]
fn rejected_calls_do_not_mutate() {
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add_from_seq(&chars("abc"), 2, 0, 1).unwrap();
	let before = grams.clone();

	assert!(grams.add(&chars("abc"), 0, 1).is_err());
	assert!(grams.add(&chars("ab"), 0, 0).is_err());
	assert!(grams.add_from_seq(&chars("abc"), 3, 0, 1).is_err());
	assert!(grams.add_from_seq(&chars("abc"), 1, 0, 0).is_err());
	assert!(grams.add_all_from_seq(&chars("abc"), 0, 0).is_err());

	let mut deeper = Skipgrams::new(3).unwrap();
	deeper.add(&chars("xyz"), 0, 1).unwrap();
	assert_eq!(
		grams.combine(&[&deeper]),
		Err(Error::IncompatibleMaxOrder { other: 3, max_order: 2 })
	);

	assert_eq!(grams, before);
}

#[test]
fn count_overflow_is_rejected_without_mutation() {
	let mut grams = Skipgrams::new(2).unwrap();
	grams.add(&['a'], 0, usize::MAX).unwrap();
	let before = grams.clone();

	assert_eq!(grams.add(&['a'], 0, 1), Err(Error::CountOverflow { skip: 0 }));
	// "b" alone would fit, but the sequence is rejected as a whole.
	assert!(grams.add_from_seq(&chars("ba"), 1, 0, 1).is_err());
	assert!(grams.add_all_from_seq(&chars("ba"), 0, 1).is_err());

	let mut other = Skipgrams::new(1).unwrap();
	other.add(&['a'], 0, 1).unwrap();
	assert_eq!(grams.combine(&[&other]), Err(Error::CountOverflow { skip: 0 }));

	assert_eq!(grams, before);
	assert_eq!(grams.count(&['a'], 0), usize::MAX);
	assert_eq!(grams.count(&['b'], 0), 0);

	let mut ngrams = Ngrams::new(1).unwrap();
	ngrams.add(&['a'], usize::MAX).unwrap();
	assert!(ngrams.add(&['a'], 1).unwrap_err().is_invalid_argument());
}

#[test]
fn errors_are_invalid_arguments() {
	let mut grams: Skipgrams<char> = Skipgrams::new(1).unwrap();
	let err = grams.add(&chars("ab"), 0, 1).unwrap_err();
	assert!(err.is_invalid_argument());
	assert_eq!(err.to_string(), "Invalid argument: order 2 is outside of [1, 1]");
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn collections_serde_roundtrip() {
	let mut grams = Skipgrams::new(3).unwrap();
	grams.add_all_from_seq(&chars("abcabd"), 1, 2).unwrap();

	let json = serde_json::to_string(&grams).unwrap();
	let back: Skipgrams<char> = serde_json::from_str(&json).unwrap();
	assert_eq!(back, grams);

	let mut ngrams = Ngrams::new(2).unwrap();
	ngrams.add_all_from_seq(&chars("abab"), 1).unwrap();
	let json = serde_json::to_string(&ngrams).unwrap();
	let back: Ngrams<char> = serde_json::from_str(&json).unwrap();
	assert_eq!(back.count(&['a', 'b']), 2);
}

#[test]
fn loading_rejects_broken_collections() {
	let skipgrams = |json: &str| serde_json::from_str::<Skipgrams<char>>(json);
	let ngrams = |json: &str| serde_json::from_str::<Ngrams<char>>(json);

	let zero_max_order = r#"{"max_order":0,"trie":{"root":{"children":{},"counts":{}}}}"#;
	assert!(skipgrams(zero_max_order).is_err());

	let ab = r#"{"root":{"children":{"a":{"children":{"b":{"children":{},"counts":{"0":3}}},"counts":{}}},"counts":{}}}"#;
	let too_deep = format!(r#"{{"max_order":1,"trie":{ab}}}"#);
	let err = skipgrams(&too_deep).unwrap_err();
	assert!(err.to_string().contains("order 2 is outside of [1, 1]"));
	let deep_enough = format!(r#"{{"max_order":2,"trie":{ab}}}"#);
	assert_eq!(skipgrams(&deep_enough).unwrap().count(&chars("ab"), 0), 3);

	let zero_count = r#"{"max_order":1,"trie":{"root":{"children":{"a":{"children":{},"counts":{"0":0}}},"counts":{}}}}"#;
	assert!(skipgrams(zero_count).is_err());

	let skipped = r#"{"inner":{"max_order":2,"trie":{"root":{"children":{"a":{"children":{"c":{"children":{},"counts":{"1":5}}},"counts":{}}},"counts":{}}}}}"#;
	let err = ngrams(skipped).unwrap_err();
	assert!(err.to_string().contains("non-zero skip"));
	let contiguous = skipped.replace(r#"{"1":5}"#, r#"{"0":5}"#);
	assert_eq!(ngrams(&contiguous).unwrap().count(&chars("ac")), 5);
}
