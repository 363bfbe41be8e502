//! `location.search` parsing.

/// Value of `key` in a query string such as `?chapter=24&x=1`. The leading
/// `?` is optional; the first occurrence wins.
pub fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Chapter requested with `?chapter=N`, if it parses.
pub fn chapter_from_search(search: &str) -> Option<u32> {
    query_param(search, "chapter")?.trim().parse().ok()
}
