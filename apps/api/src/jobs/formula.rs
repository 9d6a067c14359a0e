//! Formula expression builder.
//!
//! Filters are assembled as a small expression tree and rendered through
//! `Display` into Airtable's formula language. Text literals are quoted in one
//! place, so callers never splice raw values into formula strings.

use std::fmt;

use crate::jobs::models::{fields, JobFilters};

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// Pre-rendered formula text, emitted verbatim.
    #[cfg(test)]
    Raw(String),
    Field(String),
    Text(String),
    Number(i64),
    Lower(Box<Formula>),
    Find {
        needle: Box<Formula>,
        haystack: Box<Formula>,
    },
    Not(Box<Formula>),
    Eq(Box<Formula>, Box<Formula>),
    Gt(Box<Formula>, Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
}

impl Formula {
    #[cfg(test)]
    pub fn raw(text: impl Into<String>) -> Self {
        Formula::Raw(text.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Formula::Field(name.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Formula::Text(value.into())
    }

    pub fn number(value: i64) -> Self {
        Formula::Number(value)
    }

    pub fn lower(self) -> Self {
        Formula::Lower(Box::new(self))
    }

    pub fn find(needle: Formula, haystack: Formula) -> Self {
        Formula::Find {
            needle: Box::new(needle),
            haystack: Box::new(haystack),
        }
    }

    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn equals(self, other: Formula) -> Self {
        Formula::Eq(Box::new(self), Box::new(other))
    }

    pub fn greater_than(self, other: Formula) -> Self {
        Formula::Gt(Box::new(self), Box::new(other))
    }

    pub fn and(clauses: Vec<Formula>) -> Self {
        Formula::And(clauses)
    }

    pub fn or(clauses: Vec<Formula>) -> Self {
        Formula::Or(clauses)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(test)]
            Formula::Raw(text) => f.write_str(text),
            Formula::Field(name) => write!(f, "{{{name}}}"),
            Formula::Text(value) => write!(f, "'{}'", escape_text(value)),
            Formula::Number(value) => write!(f, "{value}"),
            Formula::Lower(inner) => write!(f, "LOWER({inner})"),
            Formula::Find { needle, haystack } => write!(f, "FIND({needle}, {haystack})"),
            Formula::Not(inner) => write!(f, "NOT({inner})"),
            Formula::Eq(lhs, rhs) => write!(f, "{lhs} = {rhs}"),
            Formula::Gt(lhs, rhs) => write!(f, "{lhs} > {rhs}"),
            Formula::And(clauses) => write_call(f, "AND", clauses),
            Formula::Or(clauses) => write_call(f, "OR", clauses),
        }
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[Formula]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(")")
}

/// The store's parser only needs single quotes escaped inside a literal.
/// Backslashes and other characters pass through untouched.
pub fn escape_text(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// Combines `base` with one OR-clause per non-empty filter, all AND-ed.
/// With no filters the result is still wrapped: `AND(base)`.
pub fn build_filter_formula(base: Formula, filters: &JobFilters) -> Formula {
    let mut clauses = vec![base];

    if let Some(keyword) = filters.keyword.as_deref().filter(|k| !k.is_empty()) {
        clauses.push(keyword_clause(&normalize_keyword(keyword)));
    }

    if !filters.work_types.is_empty() {
        clauses.push(Formula::or(
            filters
                .work_types
                .iter()
                .map(|t| {
                    Formula::field(fields::REMOTE_IN_PERSON).equals(Formula::text(t.as_str()))
                })
                .collect(),
        ));
    }

    if !filters.payment_types.is_empty() {
        clauses.push(Formula::or(
            filters
                .payment_types
                .iter()
                .map(|t| {
                    Formula::field(fields::PAID_UNPAID).equals(Formula::text(t.as_str()))
                })
                .collect(),
        ));
    }

    // Job Type is multi-select, so membership is a substring find.
    if !filters.job_types.is_empty() {
        clauses.push(Formula::or(
            filters
                .job_types
                .iter()
                .map(|t| {
                    Formula::find(Formula::text(t.as_str()), Formula::field(fields::JOB_TYPE))
                        .greater_than(Formula::number(0))
                })
                .collect(),
        ));
    }

    Formula::and(clauses)
}

/// Lowercases and turns each whitespace run into a single space.
/// Leading and trailing whitespace is kept, so `" acme "` stays padded.
fn normalize_keyword(keyword: &str) -> String {
    let mut normalized = String::with_capacity(keyword.len());
    let mut in_whitespace = false;
    for c in keyword.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push(' ');
            }
            in_whitespace = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    normalized
}

/// Case-insensitive exact or substring match on company, title and description.
fn keyword_clause(keyword: &str) -> Formula {
    let searched = [fields::COMPANY_NAME, fields::JOB_TITLE, fields::JOB_DESCRIPTION];
    Formula::or(
        searched
            .iter()
            .flat_map(|field| {
                [
                    Formula::field(*field).lower().equals(Formula::text(keyword)),
                    Formula::find(Formula::text(keyword), Formula::field(*field).lower())
                        .greater_than(Formula::number(0)),
                ]
            })
            .collect(),
    )
}
