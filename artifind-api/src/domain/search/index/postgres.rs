//! PostgreSQL-backed artifact index.
//!
//! Records live in the `artifacts` table with their analyzed group and
//! artifact ids stored as `text[]` token arrays. The structured query is
//! compiled into a parameterised SQL predicate over those arrays.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::search::query::{Field, Occur, StructuredQuery};
use crate::domain::search::traits::{ArtifactIndex, Result};
use crate::domain::search::types::{ArtifactRecord, FlatHits, GroupedHits};

const SELECT_COLUMNS: &str =
    "SELECT group_id, artifact_id, version, classifier, extension, name, description";

#[derive(Clone)]
pub struct PgArtifactIndex {
    pool: PgPool,
}

impl PgArtifactIndex {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ArtifactRow {
    group_id: String,
    artifact_id: String,
    version: String,
    classifier: Option<String>,
    extension: String,
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct FlatArtifactRow {
    #[sqlx(flatten)]
    artifact: ArtifactRow,
    total_hits: i64,
}

impl From<ArtifactRow> for ArtifactRecord {
    fn from(row: ArtifactRow) -> Self {
        ArtifactRecord {
            group_id: row.group_id,
            artifact_id: row.artifact_id,
            version: row.version,
            classifier: row.classifier,
            extension: row.extension,
            name: row.name,
            description: row.description,
        }
    }
}

fn token_column(field: Field) -> &'static str {
    match field {
        Field::GroupId => "group_tokens",
        Field::ArtifactId => "artifact_tokens",
        Field::Classifier => "ARRAY[classifier]",
    }
}

/// Escape `LIKE` wildcards in user-provided text.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append the SQL predicate for `query` to `builder`.
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, query: &StructuredQuery) {
    match query {
        StructuredQuery::MatchNone => {
            builder.push("FALSE");
        }
        StructuredQuery::Term(term) if term.field == Field::Classifier && !term.prefix => {
            builder.push("classifier = ");
            builder.push_bind(term.text.clone());
        }
        StructuredQuery::Term(term) if term.prefix => {
            builder.push(format!(
                "EXISTS (SELECT 1 FROM unnest({}) AS tok WHERE tok LIKE ",
                token_column(term.field)
            ));
            builder.push_bind(format!("{}%", escape_like(&term.text)));
            builder.push(")");
        }
        StructuredQuery::Term(term) => {
            builder.push_bind(term.text.clone());
            builder.push(format!(" = ANY({})", token_column(term.field)));
        }
        StructuredQuery::Phrase(phrase) => {
            if phrase.terms.is_empty() {
                builder.push("FALSE");
                return;
            }
            builder.push(format!(
                "(' ' || array_to_string({}, ' ') || ' ') LIKE ",
                token_column(phrase.field)
            ));
            builder.push_bind(format!("% {} %", escape_like(&phrase.terms.join(" "))));
        }
        StructuredQuery::Bool(clauses) => {
            let must: Vec<&StructuredQuery> = clauses
                .iter()
                .filter(|c| c.occur == Occur::Must)
                .map(|c| &c.query)
                .collect();
            // SHOULD clauses only affect matching when there is no MUST clause
            let (members, joiner) = if must.is_empty() {
                (
                    clauses.iter().map(|c| &c.query).collect::<Vec<_>>(),
                    " OR ",
                )
            } else {
                (must, " AND ")
            };

            if members.is_empty() {
                builder.push("FALSE");
                return;
            }

            builder.push("(");
            for (i, member) in members.into_iter().enumerate() {
                if i > 0 {
                    builder.push(joiner);
                }
                push_predicate(builder, member);
            }
            builder.push(")");
        }
    }
}

#[async_trait]
impl ArtifactIndex for PgArtifactIndex {
    async fn search_flat(&self, query: &StructuredQuery, limit: usize) -> Result<FlatHits> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        builder.push(", COUNT(*) OVER () AS total_hits FROM artifacts WHERE ");
        push_predicate(&mut builder, query);
        builder.push(" ORDER BY group_id, artifact_id, version DESC LIMIT ");
        builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

        let rows: Vec<FlatArtifactRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let total_hits = rows.first().map(|row| row.total_hits as usize).unwrap_or(0);
        Ok(FlatHits {
            records: rows.into_iter().map(|row| row.artifact.into()).collect(),
            total_hits,
        })
    }

    async fn search_grouped(&self, query: &StructuredQuery) -> Result<GroupedHits> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        builder.push(" FROM artifacts WHERE ");
        push_predicate(&mut builder, query);

        let rows: Vec<ArtifactRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(GroupedHits::from_records(rows.into_iter().map(ArtifactRecord::from)))
    }

    async fn close(&self) {
        tracing::info!("Closing artifact index connection pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::builder::QueryBuilder as SearchQueryBuilder;

    fn compile(query: &StructuredQuery) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("");
        push_predicate(&mut builder, query);
        builder.sql().to_string()
    }

    #[test]
    fn prefix_term_compiles_to_token_like() {
        let sql = compile(&StructuredQuery::prefix(Field::GroupId, "acme"));
        assert_eq!(
            sql,
            "EXISTS (SELECT 1 FROM unnest(group_tokens) AS tok WHERE tok LIKE $1)"
        );
    }

    #[test]
    fn exact_term_and_classifier() {
        assert_eq!(
            compile(&StructuredQuery::term(Field::ArtifactId, "core")),
            "$1 = ANY(artifact_tokens)"
        );
        assert_eq!(
            compile(&StructuredQuery::term(Field::Classifier, "sources")),
            "classifier = $1"
        );
    }

    #[test]
    fn should_only_bool_is_a_disjunction() {
        let query = SearchQueryBuilder.build("log4j*").unwrap();
        let sql = compile(&query);
        assert_eq!(
            sql,
            "((EXISTS (SELECT 1 FROM unnest(group_tokens) AS tok WHERE tok LIKE $1) OR \
             EXISTS (SELECT 1 FROM unnest(artifact_tokens) AS tok WHERE tok LIKE $2)))"
        );
    }

    #[test]
    fn must_clauses_ignore_shoulds() {
        let query = SearchQueryBuilder
            .with_classifier(StructuredQuery::term(Field::GroupId, "acme"), "sources");
        assert_eq!(compile(&query), "($1 = ANY(group_tokens) AND classifier = $2)");
    }

    #[test]
    fn empty_queries_match_nothing() {
        assert_eq!(compile(&StructuredQuery::MatchNone), "FALSE");
        assert_eq!(compile(&StructuredQuery::Bool(vec![])), "FALSE");
        assert_eq!(compile(&StructuredQuery::phrase(Field::GroupId, vec![])), "FALSE");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("a_b%c\\"), "a\\_b\\%c\\\\");
    }
}
