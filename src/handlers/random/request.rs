//! Random selector request DTOs

use serde::Deserialize;

/// Draw query
///
/// `id` is the learner's current 1-based index, kept out of the next
/// draw when possible. A non-numeric value means no exclusion.
#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub id: Option<String>,
}

impl RandomQuery {
    /// The excluded index, if the parameter parsed as one
    pub fn exclude(&self) -> Option<i64> {
        self.id.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_parses_numeric() {
        let query = RandomQuery {
            id: Some("3".to_string()),
        };
        assert_eq!(query.exclude(), Some(3));
    }

    #[test]
    fn test_non_numeric_means_no_exclusion() {
        let query = RandomQuery {
            id: Some("current".to_string()),
        };
        assert_eq!(query.exclude(), None);

        let query = RandomQuery { id: None };
        assert_eq!(query.exclude(), None);
    }
}
