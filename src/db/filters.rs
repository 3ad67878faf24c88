//! Whitelisted query-string filtering for list endpoints
//!
//! List reads accept arbitrary query parameters; only keys matching a
//! column in the entity's whitelist become SQL conditions. A single value
//! is an exact match (AND-combined across fields), a repeated key becomes
//! SQL IN for that field. Unknown keys are ignored, not errors.
//!
//! Values are compared against `column::text` so string query parameters
//! match integer and boolean columns too.

use sqlx::{Postgres, QueryBuilder};

/// A filterable field: the query-string key and the column it maps to
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub key: &'static str,
    pub column: &'static str,
}

/// Field where the query key and the column name coincide
pub const fn field(key: &'static str) -> FilterField {
    FilterField { key, column: key }
}

/// Field exposed under a different name than its column
pub const fn aliased(key: &'static str, column: &'static str) -> FilterField {
    FilterField { key, column }
}

/// Validated filter conditions for one list query
#[derive(Debug, Clone, Default)]
pub struct Filters {
    conditions: Vec<(&'static str, Vec<String>)>,
}

impl Filters {
    /// Build filters from raw query pairs against a field whitelist
    ///
    /// Pairs with keys outside the whitelist are dropped. Repeated keys
    /// accumulate into one multi-value condition.
    pub fn from_pairs(pairs: &[(String, String)], allowed: &[FilterField]) -> Self {
        let mut conditions: Vec<(&'static str, Vec<String>)> = Vec::new();
        for (key, value) in pairs {
            let Some(filter_field) = allowed.iter().find(|f| f.key == key) else {
                continue;
            };
            match conditions.iter_mut().find(|(col, _)| *col == filter_field.column) {
                Some((_, values)) => values.push(value.clone()),
                None => conditions.push((filter_field.column, vec![value.clone()])),
            }
        }
        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append the filter conditions to a query ending in a WHERE clause
    ///
    /// The caller's query must already contain a valid WHERE predicate
    /// (conventionally `WHERE 1 = 1`); each condition is AND-ed on.
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (column, values) in &self.conditions {
            if values.len() == 1 {
                qb.push(format!(" AND {}::text = ", column));
                qb.push_bind(values[0].clone());
            } else {
                qb.push(format!(" AND {}::text IN (", column));
                let mut separated = qb.separated(", ");
                for value in values {
                    separated.push_bind(value.clone());
                }
                qb.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[FilterField] = &[field("id"), field("code"), aliased("type", "question_type")];

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let filters = Filters::from_pairs(&pairs(&[("nope", "1"), ("bogus", "x")]), ALLOWED);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_exact_match_sql() {
        let filters = Filters::from_pairs(&pairs(&[("code", "MA101")]), ALLOWED);
        let mut qb = QueryBuilder::new("SELECT * FROM courses WHERE 1 = 1");
        filters.apply(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM courses WHERE 1 = 1 AND code::text = $1"
        );
    }

    #[test]
    fn test_repeated_key_becomes_in() {
        let filters = Filters::from_pairs(&pairs(&[("id", "1"), ("id", "2"), ("id", "3")]), ALLOWED);
        let mut qb = QueryBuilder::new("SELECT * FROM courses WHERE 1 = 1");
        filters.apply(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM courses WHERE 1 = 1 AND id::text IN ($1, $2, $3)"
        );
    }

    #[test]
    fn test_fields_and_combined() {
        let filters = Filters::from_pairs(&pairs(&[("id", "1"), ("code", "MA101")]), ALLOWED);
        let mut qb = QueryBuilder::new("SELECT * FROM courses WHERE 1 = 1");
        filters.apply(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM courses WHERE 1 = 1 AND id::text = $1 AND code::text = $2"
        );
    }

    #[test]
    fn test_aliased_field_uses_column_name() {
        let filters = Filters::from_pairs(&pairs(&[("type", "boolean")]), ALLOWED);
        let mut qb = QueryBuilder::new("SELECT * FROM questions WHERE 1 = 1");
        filters.apply(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM questions WHERE 1 = 1 AND question_type::text = $1"
        );
    }
}
