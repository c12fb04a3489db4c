//! Builds a [`StructuredQuery`] from a normalized search string.
//!
//! The parser understands the small subset of classic query syntax that
//! normalized input can contain:
//!
//! - bare words, analyzed into tokens (`commons` → `commons`)
//! - prefix words with a trailing `*` (`wid*`)
//! - a lone `*`, matching any value of the field
//! - double-quoted phrases (`"com acme widget"`)
//! - upper-case `AND` / `OR` between clauses
//!
//! Every word is matched against all default fields (a hit on either field
//! counts) and words are combined with AND semantics.

use super::analyzer::analyze;
use super::query::{Clause, Field, StructuredQuery};
use super::traits::{Result, SearchError};

/// Fields plain user input is matched against.
pub const DEFAULT_FIELDS: [Field; 2] = [Field::GroupId, Field::ArtifactId];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Phrase(String),
    And,
    Or,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut phrase = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                phrase.push(c);
            }
            if !closed {
                return Err(SearchError::QueryParse(format!(
                    "unbalanced quote in '{input}'"
                )));
            }
            tokens.push(Token::Phrase(phrase));
            continue;
        }

        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '"' {
                break;
            }
            word.push(c);
            chars.next();
        }
        tokens.push(match word.as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            _ => Token::Word(word),
        });
    }

    Ok(tokens)
}

/// A single term across all default fields.
fn multi_field(build: impl Fn(Field) -> StructuredQuery) -> StructuredQuery {
    StructuredQuery::Bool(
        DEFAULT_FIELDS
            .iter()
            .map(|field| Clause::should(build(*field)))
            .collect(),
    )
}

fn word_query(word: &str) -> Option<StructuredQuery> {
    let is_prefix = word.ends_with('*');
    let mut terms = analyze(word);

    if is_prefix {
        let Some(last) = terms.pop() else {
            // A bare `*` matches any value
            return Some(multi_field(|field| StructuredQuery::prefix(field, "")));
        };
        if terms.is_empty() {
            return Some(multi_field(|field| StructuredQuery::prefix(field, last.clone())));
        }
        // `foo+ba*`: exact leading terms, prefix on the last one
        let mut clauses: Vec<Clause> = terms
            .into_iter()
            .map(|term| Clause::must(multi_field(|field| StructuredQuery::term(field, term.clone()))))
            .collect();
        clauses.push(Clause::must(multi_field(|field| {
            StructuredQuery::prefix(field, last.clone())
        })));
        return Some(StructuredQuery::Bool(clauses));
    }

    phrase_or_term(terms)
}

fn phrase_or_term(mut terms: Vec<String>) -> Option<StructuredQuery> {
    match terms.len() {
        0 => None,
        1 => {
            let term = terms.remove(0);
            Some(multi_field(|field| StructuredQuery::term(field, term.clone())))
        }
        _ => Some(multi_field(|field| StructuredQuery::phrase(field, terms.clone()))),
    }
}

fn combine(mut clauses: Vec<StructuredQuery>) -> Option<StructuredQuery> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(StructuredQuery::Bool(
            clauses.into_iter().map(Clause::must).collect(),
        )),
    }
}

/// Parse a normalized string with AND as the default operator.
pub fn parse(input: &str) -> Result<StructuredQuery> {
    let tokens = tokenize(input)?;

    // Conjunctions separated by OR
    let mut alternatives: Vec<Vec<StructuredQuery>> = vec![Vec::new()];
    let mut expecting_operand = true;

    for token in &tokens {
        match token {
            Token::And | Token::Or if expecting_operand => {
                return Err(SearchError::QueryParse(format!(
                    "operator without operand in '{input}'"
                )));
            }
            Token::And => expecting_operand = true,
            Token::Or => {
                alternatives.push(Vec::new());
                expecting_operand = true;
            }
            Token::Word(word) => {
                expecting_operand = false;
                if let Some(query) = word_query(word) {
                    if let Some(current) = alternatives.last_mut() {
                        current.push(query);
                    }
                }
            }
            Token::Phrase(text) => {
                expecting_operand = false;
                if let Some(query) = phrase_or_term(analyze(text)) {
                    if let Some(current) = alternatives.last_mut() {
                        current.push(query);
                    }
                }
            }
        }
    }

    if expecting_operand && !tokens.is_empty() {
        return Err(SearchError::QueryParse(format!(
            "dangling operator in '{input}'"
        )));
    }

    let mut alternatives: Vec<StructuredQuery> =
        alternatives.into_iter().filter_map(combine).collect();

    Ok(match alternatives.len() {
        0 => StructuredQuery::MatchNone,
        1 => alternatives.remove(0),
        _ => StructuredQuery::Bool(alternatives.into_iter().map(Clause::should).collect()),
    })
}

/// Composes normalized user input into the query sent to the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Build the user query: the parsed input as one SHOULD clause and, for
    /// multi-token input, the whole input as a phrase in a second SHOULD
    /// clause so exact sequences outrank scattered matches.
    pub fn build(&self, normalized: &str) -> Result<StructuredQuery> {
        let mut clauses = vec![Clause::should(parse(normalized)?)];

        if normalized.contains(' ') {
            clauses.push(Clause::should(parse(&format!("\"{normalized}\""))?));
        }

        Ok(StructuredQuery::Bool(clauses))
    }

    /// Restrict `query` to artifacts with the given classifier.
    pub fn with_classifier(&self, query: StructuredQuery, classifier: &str) -> StructuredQuery {
        StructuredQuery::Bool(vec![
            Clause::must(query),
            Clause::must(StructuredQuery::term(Field::Classifier, classifier)),
        ])
    }
}
