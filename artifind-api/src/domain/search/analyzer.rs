//! Tokenization shared by the query parser and the index backends.

/// Split text into lower-cased alphanumeric tokens.
///
/// `org.apache.commons` and `commons-lang3` become `[org, apache, commons]`
/// and `[commons, lang3]`, so both fields are searchable by their parts.
pub fn analyze(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
