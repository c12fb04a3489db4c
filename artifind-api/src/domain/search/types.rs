//! Core types for the search domain.

use std::collections::BTreeMap;

use maven_repo::{compare_versions, Coordinates};
use serde::{Deserialize, Serialize};

/// One indexed artifact file, as produced by the artifact index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(alias = "fileExtension")]
    pub extension: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ArtifactRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            self.version.clone(),
            self.classifier.clone(),
            self.extension.clone(),
        )
    }

    /// Grouping key: `groupId:artifactId`.
    pub fn group_key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// A single version of an [`ArtifactSummary`] and where its file lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: String,
    pub rel_filepath: String,
}

/// One logical artifact grouped across its versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub file_extension: String,
    pub versions: Vec<VersionEntry>,
}

/// A page of grouped search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    pub artifacts: Vec<ArtifactSummary>,
    /// Number of individual artifacts matched, regardless of paging
    pub total_result_count: usize,
}

/// Result of a flat (ungrouped) index search.
#[derive(Debug, Clone, Default)]
pub struct FlatHits {
    pub records: Vec<ArtifactRecord>,
    pub total_hits: usize,
}

/// All records of one `groupId:artifactId`, newest version first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactGroup {
    pub key: String,
    pub records: Vec<ArtifactRecord>,
}

/// Result of a grouped index search. Groups are ordered by key.
#[derive(Debug, Clone, Default)]
pub struct GroupedHits {
    pub groups: Vec<ArtifactGroup>,
    pub total_groups: usize,
    pub total_individual: usize,
}

impl GroupedHits {
    /// Group matching records by `groupId:artifactId`.
    pub fn from_records(records: impl IntoIterator<Item = ArtifactRecord>) -> Self {
        let mut by_key: BTreeMap<String, Vec<ArtifactRecord>> = BTreeMap::new();
        let mut total_individual = 0;

        for record in records {
            total_individual += 1;
            by_key.entry(record.group_key()).or_default().push(record);
        }

        let groups: Vec<ArtifactGroup> = by_key
            .into_iter()
            .map(|(key, mut records)| {
                records.sort_by(|a, b| compare_versions(&b.version, &a.version));
                ArtifactGroup { key, records }
            })
            .collect();

        Self {
            total_groups: groups.len(),
            groups,
            total_individual,
        }
    }
}
