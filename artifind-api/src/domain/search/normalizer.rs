//! Canonicalizes raw user input before it reaches the query parser.
//!
//! Coordinate-like input (`com.acme.widget`, `commons-lang3`) is split into
//! space separated tokens, and a trailing wildcard is added so the dominant
//! use case, partial coordinate lookup, is a prefix match.

const SEPARATORS: [char; 4] = ['.', '-', '_', '/'];

/// Normalize a raw user query into a search string.
///
/// ```ignore
/// assert_eq!(normalize_query("com.acme.widget"), "com acme widget*");
/// assert_eq!(normalize_query("log4j"), "log4j*");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let mut query = raw.to_string();

    if query.contains(SEPARATORS) {
        query = query.to_lowercase().replace(SEPARATORS, " ");
        query = strip_lone_wildcards(&query);
    }

    if !query.ends_with('*') && !query.ends_with(' ') {
        query.push('*');
    }

    query
}

/// Remove `*` tokens that separator substitution isolated, e.g. `*.acme`.
fn strip_lone_wildcards(query: &str) -> String {
    let mut result = query.to_string();

    while result.contains(" * ") {
        result = result.replace(" * ", " ");
    }
    if let Some(rest) = result.strip_prefix("* ") {
        result = rest.to_string();
    }
    if let Some(rest) = result.strip_suffix(" *") {
        result = rest.to_string();
    }

    result
}
