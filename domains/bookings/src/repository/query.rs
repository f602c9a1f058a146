//! Dynamic WHERE/LIMIT/OFFSET construction for ticket searches
//!
//! Predicates are only emitted for criteria that are present. Every value is
//! passed as a positional parameter, and the parameter list is always in the
//! same order as the `$n` placeholders in the SQL text, with limit and offset
//! last.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::domain::filter::TicketFilter;

/// A bound value for one placeholder of a [`FilterClause`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParam {
    Text(String),
    BigInt(i64),
}

/// SQL suffix for a ticket search plus its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub sql: String,
    pub params: Vec<FilterParam>,
}

impl FilterClause {
    /// Number of `$n` placeholders in the SQL text
    pub fn placeholder_count(&self) -> usize {
        self.sql
            .as_bytes()
            .windows(2)
            .filter(|pair| pair[0] == b'$' && pair[1].is_ascii_digit())
            .count()
    }
}

/// Build the clause appended to the ticket SELECT for `filter`
pub fn build_filter_clause(filter: &TicketFilter) -> FilterClause {
    let mut predicates: Vec<String> = Vec::with_capacity(2);
    let mut params: Vec<FilterParam> = Vec::with_capacity(4);

    if let Some(seat_no) = &filter.seat_no {
        params.push(FilterParam::Text(format!("%{}%", escape_like(seat_no))));
        predicates.push(format!("seat_no LIKE ${}", params.len()));
    }
    if let Some(passenger_name) = &filter.passenger_name {
        params.push(FilterParam::Text(passenger_name.clone()));
        predicates.push(format!("passenger_name = ${}", params.len()));
    }

    let mut sql = String::new();
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    params.push(FilterParam::BigInt(filter.limit));
    let limit_index = params.len();
    params.push(FilterParam::BigInt(filter.offset));
    let offset_index = params.len();

    sql.push_str(&format!(
        " ORDER BY id LIMIT ${} OFFSET ${}",
        limit_index, offset_index
    ));

    FilterClause { sql, params }
}

/// Bind `params` to `query` in order
pub(crate) fn bind_params<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    params: Vec<FilterParam>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    params
        .into_iter()
        .fold(query, |query, param| match param {
            FilterParam::Text(value) => query.bind(value),
            FilterParam::BigInt(value) => query.bind(value),
        })
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
