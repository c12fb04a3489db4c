//! Slices grouped hits into a page of [`ArtifactSummary`] values.

use super::traits::{Result, SearchError};
use super::types::{ArtifactGroup, ArtifactSummary, GroupedHits, SearchResultPage, VersionEntry};

/// Number of groups preceding page `page_number` (1-based; 0 and negative
/// numbers are treated as the first page).
pub fn skip_count(page_size: i64, page_number: i64) -> usize {
    if page_number <= 1 {
        return 0;
    }
    let skip = (page_number as u64 - 1).saturating_mul(page_size.max(0) as u64);
    usize::try_from(skip).unwrap_or(usize::MAX)
}

/// Take one page of groups and map them to summaries.
///
/// The reported total is the number of individual matches, not the number of
/// groups. A page past the end is empty rather than an error.
pub fn paginate(hits: GroupedHits, page_size: i64, page_number: i64) -> Result<SearchResultPage> {
    if page_size <= 0 {
        return Err(SearchError::InvalidPagination(page_size));
    }

    let skip = skip_count(page_size, page_number);
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);

    let artifacts = hits
        .groups
        .into_iter()
        .skip(skip)
        .take(take)
        .filter_map(summarize)
        .collect();

    Ok(SearchResultPage {
        artifacts,
        total_result_count: hits.total_individual,
    })
}

/// Base fields come from the group's first (newest) record; every member
/// contributes a version entry.
fn summarize(group: ArtifactGroup) -> Option<ArtifactSummary> {
    let first = group.records.first()?;
    tracing::trace!(key = %group.key, versions = group.records.len(), "Summarizing group");

    let versions = group
        .records
        .iter()
        .map(|record| VersionEntry {
            version: record.version.clone(),
            rel_filepath: record.coordinates().to_relative_path(),
        })
        .collect();

    Some(ArtifactSummary {
        name: first.name.clone(),
        description: first.description.clone(),
        group_id: first.group_id.clone(),
        artifact_id: first.artifact_id.clone(),
        classifier: first.classifier.clone(),
        file_extension: first.extension.clone(),
        versions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::types::ArtifactRecord;

    fn record(group: usize, version: &str) -> ArtifactRecord {
        ArtifactRecord {
            group_id: "com.acme".to_string(),
            artifact_id: format!("widget{group:02}"),
            version: version.to_string(),
            classifier: Some("sources".to_string()),
            extension: "jar".to_string(),
            name: Some(format!("Widget {group}")),
            description: None,
        }
    }

    /// 25 groups with two versions each.
    fn hits() -> GroupedHits {
        GroupedHits::from_records(
            (1..=25).flat_map(|group| vec![record(group, "1.0"), record(group, "2.0")]),
        )
    }

    #[test]
    fn third_page_of_ten_holds_last_five_groups() {
        let page = paginate(hits(), 10, 3).unwrap();

        assert_eq!(page.artifacts.len(), 5);
        assert_eq!(page.artifacts[0].artifact_id, "widget21");
        assert_eq!(page.artifacts[4].artifact_id, "widget25");
        // Individual matches, not groups
        assert_eq!(page.total_result_count, 50);
    }

    #[test]
    fn page_zero_equals_page_one() {
        assert_eq!(paginate(hits(), 10, 0).unwrap(), paginate(hits(), 10, 1).unwrap());
        assert_eq!(skip_count(10, -3), 0);
    }

    #[test]
    fn page_length_never_exceeds_page_size() {
        for page_size in 1..=30 {
            for page_number in 0..=30 {
                let page = paginate(hits(), page_size, page_number).unwrap();
                assert!(page.artifacts.len() <= page_size as usize);

                let skip = skip_count(page_size, page_number);
                if let Some(first) = page.artifacts.first() {
                    assert_eq!(first.artifact_id, format!("widget{:02}", skip + 1));
                }
            }
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(hits(), 10, 4).unwrap();
        assert!(page.artifacts.is_empty());
        assert_eq!(page.total_result_count, 50);

        let page = paginate(hits(), i64::MAX, i64::MAX).unwrap();
        assert!(page.artifacts.is_empty());
    }

    #[test]
    fn non_positive_page_size_is_rejected() {
        assert!(matches!(
            paginate(hits(), 0, 1),
            Err(SearchError::InvalidPagination(0))
        ));
        assert!(matches!(
            paginate(hits(), -5, 1),
            Err(SearchError::InvalidPagination(-5))
        ));
    }

    #[test]
    fn summary_lists_every_version_with_its_path() {
        let page = paginate(hits(), 1, 1).unwrap();
        let summary = &page.artifacts[0];

        assert_eq!(summary.name.as_deref(), Some("Widget 1"));
        assert_eq!(summary.classifier.as_deref(), Some("sources"));
        assert_eq!(
            summary.versions,
            vec![
                VersionEntry {
                    version: "2.0".to_string(),
                    rel_filepath: "com/acme/widget01/2.0/widget01-2.0-sources.jar".to_string(),
                },
                VersionEntry {
                    version: "1.0".to_string(),
                    rel_filepath: "com/acme/widget01/1.0/widget01-1.0-sources.jar".to_string(),
                },
            ]
        );
    }
}
