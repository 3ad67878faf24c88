//! Random question selection
//!
//! Draws a 1-based question index for a scope, avoiding the learner's
//! current question when there is any alternative to it.

use rand::Rng;
use sqlx::PgPool;

use crate::{
    db::repositories::{CourseRepository, ExamRepository},
    error::{AppError, AppResult},
    services::ContentService,
};

/// Random selector over the visible questions of a scope
pub struct RandomService;

impl RandomService {
    /// Draw a random visible question index for a course, or for one of
    /// its exams when `exam_name` is given
    ///
    /// `exclude` is the current 1-based index; pass None (or an index
    /// outside [1, n]) for the first draw in a session.
    pub async fn draw(
        pool: &PgPool,
        course_code: &str,
        exam_name: Option<&str>,
        exclude: Option<i64>,
    ) -> AppResult<i64> {
        let course = ContentService::course_by_code(pool, course_code).await?;

        // The count is re-derived per draw; a draw against a count made
        // slightly stale by a concurrent mutation is acceptable.
        let eligible = match exam_name {
            Some(name) => {
                let exam = ExamRepository::find_by_course_and_name(pool, course.id, name)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;
                if exam.hidden {
                    0
                } else {
                    ExamRepository::question_count(pool, exam.id).await?
                }
            }
            None => CourseRepository::visible_question_count(pool, course.id).await?,
        };

        Self::pick(eligible, exclude)
    }

    /// Pick a uniformly random index in [1, n], avoiding `exclude`
    ///
    /// With a single eligible question there is no valid alternative, so
    /// the excluded index may come back; callers must tolerate that.
    pub fn pick(n: i64, exclude: Option<i64>) -> AppResult<i64> {
        if n <= 0 {
            return Err(AppError::EmptyScope);
        }
        if n == 1 {
            return Ok(1);
        }

        let mut rng = rand::rng();
        match exclude.filter(|e| (1..=n).contains(e)) {
            // Draw from [1, n-1] and shift past the excluded index, which
            // is uniform over [1, n] minus the exclusion without rejection
            Some(excluded) => {
                let mut index = rng.random_range(1..n);
                if index >= excluded {
                    index += 1;
                }
                Ok(index)
            }
            None => Ok(rng.random_range(1..=n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_scope() {
        assert!(matches!(
            RandomService::pick(0, None).unwrap_err(),
            AppError::EmptyScope
        ));
    }

    #[test]
    fn test_single_question_may_repeat() {
        // With one eligible question the excluded index is allowed back
        assert_eq!(RandomService::pick(1, Some(1)).unwrap(), 1);
        assert_eq!(RandomService::pick(1, None).unwrap(), 1);
    }

    #[test]
    fn test_exclusion_never_drawn() {
        for _ in 0..1000 {
            let index = RandomService::pick(5, Some(3)).unwrap();
            assert!((1..=5).contains(&index));
            assert_ne!(index, 3);
        }
    }

    #[test]
    fn test_out_of_range_exclusion_ignored() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(RandomService::pick(3, Some(-1)).unwrap());
        }
        assert_eq!(seen.len(), 3);

        for _ in 0..100 {
            let index = RandomService::pick(3, Some(7)).unwrap();
            assert!((1..=3).contains(&index));
        }
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        // Chi-square over {1, 2, 4, 5} with 1000 draws and exclude=3.
        // 3 degrees of freedom; 16.27 is the 0.1% critical value, so a
        // fair generator fails this less than once in a thousand runs.
        let draws = 1000;
        let mut counts: HashMap<i64, f64> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(RandomService::pick(5, Some(3)).unwrap()).or_default() += 1.0;
        }
        assert_eq!(counts.len(), 4);

        let expected = draws as f64 / 4.0;
        let chi_square: f64 = counts
            .values()
            .map(|observed| (observed - expected).powi(2) / expected)
            .sum();
        assert!(chi_square < 16.27, "chi-square too high: {chi_square}");
    }
}
