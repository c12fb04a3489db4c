//! In-memory artifact index loaded from a JSON-lines snapshot.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::search::analyzer::analyze;
use crate::domain::search::query::{Field, Occur, StructuredQuery};
use crate::domain::search::traits::{ArtifactIndex, Result, SearchError};
use crate::domain::search::types::{ArtifactRecord, FlatHits, GroupedHits};

/// A record with its analyzed fields.
#[derive(Debug, Clone)]
struct IndexedRecord {
    record: ArtifactRecord,
    group_tokens: Vec<String>,
    artifact_tokens: Vec<String>,
}

impl IndexedRecord {
    fn new(record: ArtifactRecord) -> Self {
        Self {
            group_tokens: analyze(&record.group_id),
            artifact_tokens: analyze(&record.artifact_id),
            record,
        }
    }

    fn tokens(&self, field: Field) -> &[String] {
        match field {
            Field::GroupId => &self.group_tokens,
            Field::ArtifactId => &self.artifact_tokens,
            Field::Classifier => &[],
        }
    }

    /// Relevance of this record for `query`, or `None` when it does not match.
    /// A phrase counts once per term so exact sequences rank above
    /// scattered term hits.
    fn score(&self, query: &StructuredQuery) -> Option<u32> {
        match query {
            StructuredQuery::MatchNone => None,
            StructuredQuery::Term(term) if term.field == Field::Classifier => {
                let classifier = self.record.classifier.as_deref()?;
                let matched = if term.prefix {
                    classifier.starts_with(term.text.as_str())
                } else {
                    classifier == term.text
                };
                matched.then_some(1)
            }
            StructuredQuery::Term(term) => {
                let tokens = self.tokens(term.field);
                let matched = if term.prefix {
                    tokens.iter().any(|t| t.starts_with(term.text.as_str()))
                } else {
                    tokens.iter().any(|t| *t == term.text)
                };
                matched.then_some(1)
            }
            StructuredQuery::Phrase(phrase) => {
                let tokens = self.tokens(phrase.field);
                let matched = !phrase.terms.is_empty()
                    && tokens
                        .windows(phrase.terms.len())
                        .any(|window| window == phrase.terms.as_slice());
                matched.then_some(phrase.terms.len() as u32)
            }
            StructuredQuery::Bool(clauses) => {
                let mut score = 0;
                let mut has_must = false;
                let mut matched_should = false;

                for clause in clauses {
                    match (clause.occur, self.score(&clause.query)) {
                        (Occur::Must, Some(s)) => {
                            has_must = true;
                            score += s;
                        }
                        (Occur::Must, None) => return None,
                        (Occur::Should, Some(s)) => {
                            matched_should = true;
                            score += s;
                        }
                        (Occur::Should, None) => {}
                    }
                }

                (has_must || matched_should).then_some(score)
            }
        }
    }
}

/// Read-only index over a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex {
    records: Vec<IndexedRecord>,
}

impl SnapshotIndex {
    pub fn from_records(records: impl IntoIterator<Item = ArtifactRecord>) -> Self {
        Self {
            records: records.into_iter().map(IndexedRecord::new).collect(),
        }
    }

    /// Load a snapshot with one JSON [`ArtifactRecord`] per line. Blank lines
    /// are skipped; any malformed line makes the whole snapshot unusable.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SearchError::IndexUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let records = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<ArtifactRecord>(line).map_err(|e| {
                    SearchError::IndexUnavailable(format!(
                        "corrupt snapshot {} at line {}: {}",
                        path.display(),
                        i + 1,
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(path = %path.display(), records = records.len(), "Loaded artifact snapshot");

        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches<'a>(&'a self, query: &'a StructuredQuery) -> impl Iterator<Item = (u32, &'a ArtifactRecord)> {
        self.records
            .iter()
            .filter_map(move |indexed| indexed.score(query).map(|score| (score, &indexed.record)))
    }
}

#[async_trait]
impl ArtifactIndex for SnapshotIndex {
    async fn search_flat(&self, query: &StructuredQuery, limit: usize) -> Result<FlatHits> {
        let mut hits: Vec<(u32, &ArtifactRecord)> = self.matches(query).collect();

        hits.sort_by(|(score_a, a), (score_b, b)| {
            score_b
                .cmp(score_a)
                .then_with(|| a.group_key().cmp(&b.group_key()))
                .then_with(|| maven_repo::compare_versions(&b.version, &a.version))
        });

        Ok(FlatHits {
            total_hits: hits.len(),
            records: hits
                .into_iter()
                .take(limit)
                .map(|(_, record)| record.clone())
                .collect(),
        })
    }

    async fn search_grouped(&self, query: &StructuredQuery) -> Result<GroupedHits> {
        Ok(GroupedHits::from_records(
            self.matches(query).map(|(_, record)| record.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::search::builder::QueryBuilder;

    fn record(group_id: &str, artifact_id: &str, version: &str, classifier: Option<&str>) -> ArtifactRecord {
        ArtifactRecord {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier: classifier.map(str::to_string),
            extension: "jar".to_string(),
            name: None,
            description: None,
        }
    }

    fn index() -> SnapshotIndex {
        SnapshotIndex::from_records(vec![
            record("com.acme", "widget", "1.0", Some("sources")),
            record("com.acme", "widget", "1.1", Some("sources")),
            record("com.acme", "widget", "1.1", None),
            record("com.acme.widget", "core", "2.0", Some("sources")),
            record("org.widgets", "acme-com", "0.1", Some("sources")),
            record("org.apache.logging.log4j", "log4j-core", "2.20.0", Some("sources")),
        ])
    }

    #[tokio::test]
    async fn prefix_matches_either_field() {
        let query = QueryBuilder.build("log4j*").unwrap();
        let hits = index().search_grouped(&query).await.unwrap();

        assert_eq!(hits.total_groups, 1);
        assert_eq!(hits.groups[0].key, "org.apache.logging.log4j:log4j-core");
    }

    #[tokio::test]
    async fn all_terms_must_match_somewhere() {
        let query = QueryBuilder.build("com acme widget*").unwrap();
        let hits = index().search_grouped(&query).await.unwrap();

        let keys: Vec<&str> = hits.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["com.acme.widget:core", "com.acme:widget", "org.widgets:acme-com"]);
        assert_eq!(hits.total_individual, 5);
    }

    #[tokio::test]
    async fn phrase_match_ranks_first_in_flat_mode() {
        let query = QueryBuilder.build("com acme widget*").unwrap();
        let hits = index().search_flat(&query, 10).await.unwrap();

        assert_eq!(hits.total_hits, 5);
        assert_eq!(hits.records[0].group_id, "com.acme.widget");
    }

    #[tokio::test]
    async fn flat_limit_does_not_change_total() {
        let query = QueryBuilder.build("*").unwrap();
        let hits = index().search_flat(&query, 2).await.unwrap();

        assert_eq!(hits.records.len(), 2);
        assert_eq!(hits.total_hits, 6);
    }

    #[tokio::test]
    async fn classifier_filter_is_exact() {
        let query = QueryBuilder.with_classifier(QueryBuilder.build("widget*").unwrap(), "sources");
        let hits = index().search_grouped(&query).await.unwrap();

        let widget = hits
            .groups
            .iter()
            .find(|g| g.key == "com.acme:widget")
            .unwrap();
        assert_eq!(widget.records.len(), 2);
        assert!(widget
            .records
            .iter()
            .all(|r| r.classifier.as_deref() == Some("sources")));
    }

    #[tokio::test]
    async fn match_none_returns_nothing() {
        let query = QueryBuilder.build("   ").unwrap();
        let hits = index().search_grouped(&query).await.unwrap();
        assert_eq!(hits.total_groups, 0);
        assert_eq!(hits.total_individual, 0);
    }

    #[tokio::test]
    async fn load_reads_json_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"groupId":"com.acme","artifactId":"widget","version":"1.0","classifier":"sources","extension":"jar"}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"groupId":"com.acme","artifactId":"widget","version":"1.1","fileExtension":"jar","name":"Widget"}}"#
        )
        .unwrap();

        let index = SnapshotIndex::load(file.path()).await.unwrap();
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"groupId":"com.acme","artifactId":"widget","version":"1.0","extension":"jar"}}"#).unwrap();
        writeln!(file, "{{not json").unwrap();

        let err = SnapshotIndex::load(file.path()).await.unwrap_err();
        match err {
            SearchError::IndexUnavailable(message) => assert!(message.contains("line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_snapshot_is_unavailable() {
        let err = SnapshotIndex::load("/nonexistent/artifacts.jsonl").await.unwrap_err();
        assert!(matches!(err, SearchError::IndexUnavailable(_)));
    }
}
