// Merkle hash tests

use cityledger::ledger::{hash_pair, merkle_hash};

#[test]
fn test_empty_input_hashes_to_empty_string() {
    let values: [&str; 0] = [];
    assert_eq!(merkle_hash(values), "");
}

#[test]
fn test_single_value_is_paired_with_empty_string() {
    assert_eq!(merkle_hash(["alone"]), hash_pair("alone", ""));
}

#[test]
fn test_two_values_hash_as_one_pair() {
    assert_eq!(merkle_hash(["a", "b"]), hash_pair("a", "b"));
}

#[test]
fn test_odd_count_carries_last_value() {
    // level 1: [h(a,b), c]; level 2: h(h(a,b), c)
    let expected = hash_pair(&hash_pair("a", "b"), "c");
    assert_eq!(merkle_hash(["a", "b", "c"]), expected);
}

#[test]
fn test_four_values_build_balanced_tree() {
    let expected = hash_pair(&hash_pair("a", "b"), &hash_pair("c", "d"));
    assert_eq!(merkle_hash(["a", "b", "c", "d"]), expected);
}

#[test]
fn test_five_values() {
    // [h(ab), h(cd), e] -> [h(h(ab),h(cd)), e] -> h(.., e)
    let ab = hash_pair("a", "b");
    let cd = hash_pair("c", "d");
    let expected = hash_pair(&hash_pair(&ab, &cd), "e");
    assert_eq!(merkle_hash(["a", "b", "c", "d", "e"]), expected);
}

#[test]
fn test_hash_is_deterministic() {
    let first = merkle_hash(["seed", "1", "master: 100"]);
    let second = merkle_hash(["seed", "1", "master: 100"]);
    assert_eq!(first, second);
}

#[test]
fn test_hash_is_order_sensitive() {
    assert_ne!(merkle_hash(["a", "b"]), merkle_hash(["b", "a"]));
}

#[test]
fn test_values_hashed_by_display_form() {
    assert_eq!(merkle_hash([1, 2]), merkle_hash(["1", "2"]));
}

#[test]
fn test_known_sha256_base64_vector() {
    // SHA-256("abc") in standard base64
    assert_eq!(
        hash_pair("ab", "c"),
        "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
    );
}
