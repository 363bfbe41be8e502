// Host-side tests for URL query parsing.

#![allow(dead_code)]
#[path = "../src/query.rs"]
mod query;

use query::*;

#[test]
fn chapter_is_read_from_search() {
    assert_eq!(chapter_from_search("?chapter=24"), Some(24));
    assert_eq!(chapter_from_search("chapter=1"), Some(1));
    assert_eq!(chapter_from_search("?lang=en&chapter=3&x"), Some(3));
}

#[test]
fn missing_or_malformed_chapter_is_none() {
    assert_eq!(chapter_from_search(""), None);
    assert_eq!(chapter_from_search("?"), None);
    assert_eq!(chapter_from_search("?chapter="), None);
    assert_eq!(chapter_from_search("?chapter=two"), None);
    assert_eq!(chapter_from_search("?chapter=-1"), None);
    assert_eq!(chapter_from_search("?chapters=2"), None);
}

#[test]
fn first_occurrence_wins_and_flags_have_empty_values() {
    assert_eq!(query_param("?a=1&a=2", "a"), Some("1"));
    assert_eq!(query_param("?debug&a=1", "debug"), Some(""));
}
