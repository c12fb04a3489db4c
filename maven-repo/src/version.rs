//! Ordering of Maven version strings.
//!
//! A simplified take on Maven's `ComparableVersion`: versions are split into
//! numeric and textual items on `.`, `-`, `_` and digit/letter transitions.
//! Numbers compare numerically, well-known qualifiers rank below a release and
//! any other text compares case-insensitively.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Item {
    Number(u64),
    Qualifier(i8),
    Text(String),
}

const RELEASE: i8 = 6;

fn qualifier_rank(text: &str) -> Option<i8> {
    match text {
        "alpha" | "a" => Some(1),
        "beta" | "b" => Some(2),
        "milestone" | "m" => Some(3),
        "rc" | "cr" => Some(4),
        "snapshot" => Some(5),
        "" | "ga" | "final" | "release" => Some(RELEASE),
        "sp" => Some(7),
        _ => None,
    }
}

fn flush(current: &mut String, is_digit: bool, items: &mut Vec<Item>) {
    if current.is_empty() {
        return;
    }
    let item = if is_digit {
        current
            .parse::<u64>()
            .map(Item::Number)
            .unwrap_or_else(|_| Item::Text(current.clone()))
    } else {
        match qualifier_rank(current) {
            Some(rank) => Item::Qualifier(rank),
            None => Item::Text(current.clone()),
        }
    };
    items.push(item);
    current.clear();
}

fn parse_items(version: &str) -> Vec<Item> {
    let lower = version.to_lowercase();
    let mut items = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for c in lower.chars() {
        if matches!(c, '.' | '-' | '_') {
            flush(&mut current, current_is_digit, &mut items);
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            flush(&mut current, current_is_digit, &mut items);
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    flush(&mut current, current_is_digit, &mut items);

    // "1.0.0" == "1" == "1.0"
    while matches!(
        items.last(),
        Some(Item::Number(0)) | Some(Item::Qualifier(RELEASE))
    ) {
        items.pop();
    }

    items
}

fn compare_items(a: Option<&Item>, b: Option<&Item>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(item), None) => compare_against_padding(item),
        (None, Some(item)) => compare_against_padding(item).reverse(),
        (Some(Item::Number(x)), Some(Item::Number(y))) => x.cmp(y),
        (Some(Item::Number(_)), Some(_)) => Ordering::Greater,
        (Some(_), Some(Item::Number(_))) => Ordering::Less,
        (Some(Item::Qualifier(x)), Some(Item::Qualifier(y))) => x.cmp(y),
        (Some(Item::Qualifier(x)), Some(Item::Text(_))) => x.cmp(&RELEASE),
        (Some(Item::Text(_)), Some(Item::Qualifier(y))) => RELEASE.cmp(y),
        (Some(Item::Text(x)), Some(Item::Text(y))) => x.cmp(y),
    }
}

/// How a trailing item compares against the implicit release padding of a
/// shorter version.
fn compare_against_padding(item: &Item) -> Ordering {
    match item {
        Item::Number(n) => n.cmp(&0),
        Item::Qualifier(rank) => rank.cmp(&RELEASE),
        Item::Text(_) => Ordering::Greater,
    }
}

/// Compare two Maven version strings; `Ordering::Greater` means `a` is newer.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = parse_items(a);
    let right = parse_items(b);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| compare_items(left.get(i), right.get(i)))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_compare_numerically() {
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("2.0", "10.0"), Ordering::Less);
    }

    #[test]
    fn trailing_zeros_are_equal() {
        assert_eq!(compare_versions("1", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0-final", "1"), Ordering::Equal);
    }

    #[test]
    fn qualifiers_rank_below_release() {
        assert_eq!(compare_versions("1.0-SNAPSHOT", "1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0-alpha-1", "1.0-beta-1"), Ordering::Less);
        assert_eq!(compare_versions("1.0-rc1", "1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0-M2", "1.0-RC1"), Ordering::Less);
    }

    #[test]
    fn service_packs_rank_above_release() {
        assert_eq!(compare_versions("1.0-sp1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn sorting_newest_first() {
        let mut versions = vec!["1.2", "1.10", "1.2-SNAPSHOT", "1.9.1", "0.9"];
        versions.sort_by(|a, b| compare_versions(b, a));
        assert_eq!(versions, vec!["1.10", "1.9.1", "1.2", "1.2-SNAPSHOT", "0.9"]);
    }
}
