//! Score presentation helpers
//!
//! Percentage and letter-grade derivation for progress aggregates. The
//! grade boundaries follow the Norwegian university scale.

/// Share of correct answers as a percentage, 0.0 when nothing is counted
pub fn percentage(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (correct as f64 / total as f64) * 100.0
}

/// Letter grade for a percentage score
pub fn grade(percentage: f64) -> char {
    if percentage >= 89.0 {
        'A'
    } else if percentage >= 77.0 {
        'B'
    } else if percentage >= 65.0 {
        'C'
    } else if percentage >= 53.0 {
        'D'
    } else if percentage >= 41.0 {
        'E'
    } else {
        'F'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(3, 4), 75.0);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade(100.0), 'A');
        assert_eq!(grade(89.0), 'A');
        assert_eq!(grade(88.9), 'B');
        assert_eq!(grade(77.0), 'B');
        assert_eq!(grade(65.0), 'C');
        assert_eq!(grade(53.0), 'D');
        assert_eq!(grade(41.0), 'E');
        assert_eq!(grade(40.9), 'F');
        assert_eq!(grade(0.0), 'F');
    }
}
