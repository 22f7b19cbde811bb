// Merkle-style digest of an ordered sequence of values
//
// Values are reduced pairwise, level by level, until one string is left.
// Each pair is hashed with SHA-256 over the concatenated bytes and the
// digest is base64 encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Hash two strings into one base64 digest
pub fn hash_pair(left: &str, right: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Reduce one level: hash adjacent pairs, carry an odd trailing value as is
fn hash_level(level: Vec<String>) -> Vec<String> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    let mut chunks = level.chunks_exact(2);
    for pair in &mut chunks {
        next.push(hash_pair(&pair[0], &pair[1]));
    }
    if let [last] = chunks.remainder() {
        next.push(last.clone());
    }
    next
}

/// Compute the Merkle digest of the display form of each value
///
/// An empty sequence hashes to the empty string. A single value is
/// hashed paired with the empty string. The result depends on order.
pub fn merkle_hash<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut level: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();

    match level.len() {
        0 => String::new(),
        1 => hash_pair(&level[0], ""),
        _ => {
            while level.len() > 1 {
                level = hash_level(level);
            }
            level.pop().unwrap_or_default()
        }
    }
}
