//! Answer evaluation
//!
//! Pure correctness semantics for the two question types. Grading of
//! multiple-choice questions depends on the exam's `multiple_correct`
//! flag: subset-sufficient when false, exact-match when true.
//!
//! The subset rule means a learner who picks only some of the correct
//! alternatives (and no incorrect one) is still marked correct. That
//! asymmetry is a deliberate grading choice carried over from the
//! platform's history; changing it would change recorded outcomes.

use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};

/// The correct answer for a question, resolved from the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    /// Yes/no question with a single correct value
    Boolean { correct: bool },
    /// Multiple-choice question with the ids of its correct alternatives
    Multiple {
        correct_ids: BTreeSet<i64>,
        multiple_correct: bool,
    },
}

/// A learner's submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Boolean(bool),
    Alternatives(BTreeSet<i64>),
}

/// Evaluate a submission against the answer key
///
/// A submission of the wrong shape for the question type is a malformed
/// request, not an incorrect answer.
pub fn evaluate(key: &AnswerKey, submission: &Submission) -> AppResult<bool> {
    match (key, submission) {
        (AnswerKey::Boolean { correct }, Submission::Boolean(answer)) => Ok(correct == answer),
        (
            AnswerKey::Multiple {
                correct_ids,
                multiple_correct,
            },
            Submission::Alternatives(answered_ids),
        ) => {
            if *multiple_correct {
                Ok(correct_ids == answered_ids)
            } else {
                Ok(answered_ids.is_subset(correct_ids))
            }
        }
        (AnswerKey::Boolean { .. }, Submission::Alternatives(_)) => {
            Err(AppError::MissingParameter("correct"))
        }
        (AnswerKey::Multiple { .. }, Submission::Boolean(_)) => {
            Err(AppError::MissingParameter("alternative"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> BTreeSet<i64> {
        values.iter().copied().collect()
    }

    fn multiple(correct: &[i64], multiple_correct: bool) -> AnswerKey {
        AnswerKey::Multiple {
            correct_ids: ids(correct),
            multiple_correct,
        }
    }

    #[test]
    fn test_boolean_equality() {
        let key = AnswerKey::Boolean { correct: true };
        assert!(evaluate(&key, &Submission::Boolean(true)).unwrap());
        assert!(!evaluate(&key, &Submission::Boolean(false)).unwrap());

        let key = AnswerKey::Boolean { correct: false };
        assert!(evaluate(&key, &Submission::Boolean(false)).unwrap());
        assert!(!evaluate(&key, &Submission::Boolean(true)).unwrap());
    }

    #[test]
    fn test_subset_sufficient_grading() {
        let key = multiple(&[1, 2], false);
        // Fewer than all correct alternatives still counts
        assert!(evaluate(&key, &Submission::Alternatives(ids(&[1]))).unwrap());
        assert!(evaluate(&key, &Submission::Alternatives(ids(&[1, 2]))).unwrap());
        // Any incorrect alternative fails
        assert!(!evaluate(&key, &Submission::Alternatives(ids(&[1, 3]))).unwrap());
        assert!(!evaluate(&key, &Submission::Alternatives(ids(&[3]))).unwrap());
    }

    #[test]
    fn test_empty_submission_is_subset() {
        let key = multiple(&[1, 2], false);
        assert!(evaluate(&key, &Submission::Alternatives(ids(&[]))).unwrap());
    }

    #[test]
    fn test_exact_match_grading() {
        let key = multiple(&[1, 2], true);
        assert!(!evaluate(&key, &Submission::Alternatives(ids(&[1]))).unwrap());
        assert!(evaluate(&key, &Submission::Alternatives(ids(&[1, 2]))).unwrap());
        assert!(!evaluate(&key, &Submission::Alternatives(ids(&[1, 2, 3]))).unwrap());
        assert!(!evaluate(&key, &Submission::Alternatives(ids(&[]))).unwrap());
    }

    #[test]
    fn test_shape_mismatch_is_missing_parameter() {
        let boolean = AnswerKey::Boolean { correct: true };
        let err = evaluate(&boolean, &Submission::Alternatives(ids(&[1]))).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter("correct")));

        let multi = multiple(&[1], false);
        let err = evaluate(&multi, &Submission::Boolean(true)).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter("alternative")));
    }
}
