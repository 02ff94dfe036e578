//! OData `$filter` expression builder.
//!
//! Clauses are combined with `and`; string literals are single-quoted with
//! embedded quotes doubled, timestamps are RFC 3339 strings.
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Default, Clone)]
pub struct ODataFilter {
    clauses: Vec<String>,
}

impl ODataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field eq 'value'`
    pub fn eq(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(format!("{} eq '{}'", field, escape(value)));
        self
    }

    /// `field eq value` for unquoted literals (numbers, booleans)
    pub fn eq_literal(mut self, field: &str, value: impl std::fmt::Display) -> Self {
        self.clauses.push(format!("{field} eq {value}"));
        self
    }

    /// `field ge 'timestamp'` (inclusive lower bound)
    pub fn ge(mut self, field: &str, value: DateTime<Utc>) -> Self {
        self.clauses.push(format!("{} ge '{}'", field, timestamp(value)));
        self
    }

    /// `field le 'timestamp'` (inclusive upper bound)
    pub fn le(mut self, field: &str, value: DateTime<Utc>) -> Self {
        self.clauses.push(format!("{} le '{}'", field, timestamp(value)));
        self
    }

    /// `contains(field, 'value')`
    pub fn contains(mut self, field: &str, value: &str) -> Self {
        self.clauses
            .push(format!("contains({}, '{}')", field, escape(value)));
        self
    }

    /// `field eq null`
    pub fn is_null(mut self, field: &str) -> Self {
        self.clauses.push(format!("{field} eq null"));
        self
    }

    /// `field ne null`
    pub fn is_not_null(mut self, field: &str) -> Self {
        self.clauses.push(format!("{field} ne null"));
        self
    }

    pub fn build(self) -> String {
        self.clauses.join(" and ")
    }
}

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
