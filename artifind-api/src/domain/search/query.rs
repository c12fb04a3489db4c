//! Structured boolean queries over indexed artifact fields.

use std::fmt;

/// Indexed fields a query can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Analyzed group id tokens
    GroupId,
    /// Analyzed artifact id tokens
    ArtifactId,
    /// Exact classifier value
    Classifier,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::GroupId => write!(f, "groupId"),
            Field::ArtifactId => write!(f, "artifactId"),
            Field::Classifier => write!(f, "classifier"),
        }
    }
}

/// Boolean occurrence of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Must,
    Should,
}

/// A single term match. A `prefix` term with empty `text` matches any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub field: Field,
    pub text: String,
    pub prefix: bool,
}

/// Consecutive terms in one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseQuery {
    pub field: Field,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub occur: Occur,
    pub query: StructuredQuery,
}

impl Clause {
    pub fn must(query: StructuredQuery) -> Self {
        Self {
            occur: Occur::Must,
            query,
        }
    }

    pub fn should(query: StructuredQuery) -> Self {
        Self {
            occur: Occur::Should,
            query,
        }
    }
}

/// A tree of field-match clauses.
///
/// A `Bool` matches when every `Must` clause matches and, if it has no
/// `Must` clauses, at least one `Should` clause matches. An empty `Bool`
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredQuery {
    Term(TermQuery),
    Phrase(PhraseQuery),
    Bool(Vec<Clause>),
    MatchNone,
}

impl StructuredQuery {
    pub fn term(field: Field, text: impl Into<String>) -> Self {
        Self::Term(TermQuery {
            field,
            text: text.into(),
            prefix: false,
        })
    }

    pub fn prefix(field: Field, text: impl Into<String>) -> Self {
        Self::Term(TermQuery {
            field,
            text: text.into(),
            prefix: true,
        })
    }

    pub fn phrase(field: Field, terms: Vec<String>) -> Self {
        Self::Phrase(PhraseQuery { field, terms })
    }

    #[cfg(test)]
    pub fn clauses(&self) -> &[Clause] {
        match self {
            Self::Bool(clauses) => clauses,
            _ => &[],
        }
    }
}

impl fmt::Display for StructuredQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) if term.prefix => write!(f, "{}:{}*", term.field, term.text),
            Self::Term(term) => write!(f, "{}:{}", term.field, term.text),
            Self::Phrase(phrase) => write!(f, "{}:\"{}\"", phrase.field, phrase.terms.join(" ")),
            Self::MatchNone => write!(f, "<none>"),
            Self::Bool(clauses) => {
                write!(f, "(")?;
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    if clause.occur == Occur::Must {
                        write!(f, "+")?;
                    }
                    write!(f, "{}", clause.query)?;
                }
                write!(f, ")")
            }
        }
    }
}
