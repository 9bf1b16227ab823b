//! String similarity scores in `[0.0, 1.0]`.
//!
//! Inputs are expected to be normalized by [`crate::TextNormalizer`] first.

use std::collections::HashSet;

/// Weight of the whole-string ratio in [`combined_score`].
const RATIO_WEIGHT: f64 = 0.6;

/// Weight of the token overlap in [`combined_score`].
const OVERLAP_WEIGHT: f64 = 0.4;

/// Levenshtein edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized similarity ratio: 1.0 for identical strings, 0.0 for nothing in common.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let longest = a.chars().count().max(b.chars().count()) as f64;
    1.0 - levenshtein(a, b) as f64 / longest
}

/// Jaccard overlap of two token sets.
pub fn token_overlap<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    intersection / union
}

/// Blend of whole-string ratio and token overlap for space-separated phrases.
pub fn combined_score(a: &str, b: &str) -> f64 {
    let tokens_a: Vec<&str> = a.split_whitespace().collect();
    let tokens_b: Vec<&str> = b.split_whitespace().collect();

    RATIO_WEIGHT * ratio(a, b) + OVERLAP_WEIGHT * token_overlap(&tokens_a, &tokens_b)
}

/// Best ratio of `phrase` against any same-length run of words in `words`.
///
/// Lets a multi-word key be compared with the matching stretch of a longer
/// text rather than the whole text.
pub fn best_window_ratio<S: AsRef<str>>(phrase: &str, words: &[S]) -> f64 {
    let width = phrase.split_whitespace().count().max(1);
    if words.is_empty() {
        return 0.0;
    }
    if words.len() <= width {
        let joined: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        return ratio(phrase, &joined.join(" "));
    }

    words
        .windows(width)
        .map(|window| {
            let joined: Vec<&str> = window.iter().map(AsRef::as_ref).collect();
            ratio(phrase, &joined.join(" "))
        })
        .fold(0.0, f64::max)
}
