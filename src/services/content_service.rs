//! Content store service
//!
//! Read and write access to the Course → Exam → Question → Alternative
//! hierarchy, including the visibility rules: a hidden exam and every
//! question under it serialize to nothing for non-admin requesters
//! (full omission, not redaction), while courses and alternatives are
//! always visible.
//!
//! Capability checks (registered for create/update, admin for delete)
//! happen in the handlers; this service trusts that they already ran.
//! Every mutation runs as one transaction together with its revision
//! log entry.

use sqlx::PgPool;
use validator::{ValidationError, ValidationErrors};

use crate::{
    constants::{admin_fields, question_types},
    db::{
        filters::Filters,
        repositories::{
            AlternativeRepository, CourseRepository, ExamRepository, QuestionRepository,
            RevisionRepository, revision_repo::actions,
        },
    },
    error::{AppError, AppResult},
    handlers::{
        alternatives::{
            request::{CreateAlternativeRequest, UpdateAlternativeRequest},
            response::AlternativeResponse,
        },
        courses::{
            request::{CreateCourseRequest, UpdateCourseRequest},
            response::CourseResponse,
        },
        exams::{
            request::{CreateExamRequest, UpdateExamRequest},
            response::ExamResponse,
        },
        questions::{
            request::{CreateQuestionRequest, UpdateQuestionRequest},
            response::{NestedAlternative, QuestionResponse},
        },
    },
    middleware::Requester,
    models::{Alternative, Course, Exam, Question},
};

/// Content store service for the entity hierarchy
pub struct ContentService;

impl ContentService {
    // -------------------------------------------------------------------------
    // Courses
    // -------------------------------------------------------------------------

    /// Resolve a course by its unique code
    pub async fn course_by_code(pool: &PgPool, code: &str) -> AppResult<Course> {
        CourseRepository::find_by_code(pool, code)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    /// Get a single course
    pub async fn get_course(pool: &PgPool, id: i32) -> AppResult<CourseResponse> {
        let course = CourseRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        Self::serialize_course(pool, course).await
    }

    /// List courses; courses are visible to everyone
    pub async fn list_courses(pool: &PgPool, filters: &Filters) -> AppResult<Vec<CourseResponse>> {
        let courses = CourseRepository::list(pool, filters).await?;

        futures::future::try_join_all(
            courses
                .into_iter()
                .map(|course| Self::serialize_course(pool, course)),
        )
        .await
    }

    async fn serialize_course(pool: &PgPool, course: Course) -> AppResult<CourseResponse> {
        let question_count = CourseRepository::visible_question_count(pool, course.id).await?;
        let display = course.to_string();

        Ok(CourseResponse {
            id: course.id,
            code: course.code,
            name: course.name,
            str: display,
            question_count,
        })
    }

    /// Create a course
    pub async fn create_course(
        pool: &PgPool,
        requester: &Requester,
        payload: CreateCourseRequest,
    ) -> AppResult<Course> {
        let mut tx = pool.begin().await?;
        let course = CourseRepository::create(&mut *tx, &payload.code, &payload.name).await?;
        RevisionRepository::append(
            &mut *tx,
            "course",
            course.id,
            actions::CREATE,
            serde_json::to_value(&course).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(course)
    }

    /// Update a course
    pub async fn update_course(
        pool: &PgPool,
        requester: &Requester,
        id: i32,
        payload: UpdateCourseRequest,
    ) -> AppResult<Course> {
        if CourseRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let mut tx = pool.begin().await?;
        let course = CourseRepository::update(
            &mut *tx,
            id,
            payload.code.as_deref(),
            payload.name.as_deref(),
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "course",
            course.id,
            actions::UPDATE,
            serde_json::to_value(&course).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(course)
    }

    /// Delete a course; reports whether it existed
    pub async fn delete_course(pool: &PgPool, requester: &Requester, id: i32) -> AppResult<bool> {
        let Some(course) = CourseRepository::find_by_id(pool, id).await? else {
            return Ok(false);
        };

        let mut tx = pool.begin().await?;
        CourseRepository::delete(&mut *tx, id).await?;
        RevisionRepository::append(
            &mut *tx,
            "course",
            id,
            actions::DELETE,
            serde_json::to_value(&course).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Exams
    // -------------------------------------------------------------------------

    /// Get a single exam; hidden exams are NotFound for non-admins
    pub async fn get_exam(pool: &PgPool, id: i32, requester: &Requester) -> AppResult<ExamResponse> {
        let exam = ExamRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;

        Self::serialize_exam(pool, exam, requester)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))
    }

    /// List exams; hidden exams are omitted for non-admins, never nulled
    pub async fn list_exams(
        pool: &PgPool,
        filters: &Filters,
        requester: &Requester,
    ) -> AppResult<Vec<ExamResponse>> {
        let exams = ExamRepository::list(pool, filters).await?;

        let serialized = futures::future::try_join_all(
            exams
                .into_iter()
                .map(|exam| Self::serialize_exam(pool, exam, requester)),
        )
        .await?;

        Ok(serialized.into_iter().flatten().collect())
    }

    async fn serialize_exam(
        pool: &PgPool,
        exam: Exam,
        requester: &Requester,
    ) -> AppResult<Option<ExamResponse>> {
        if !exam.visible_to(requester.admin) {
            return Ok(None);
        }

        let question_count = ExamRepository::question_count(pool, exam.id).await?;

        Ok(Some(ExamResponse {
            id: exam.id,
            name: exam.name,
            course_id: exam.course_id,
            multiple_correct: exam.multiple_correct,
            question_count,
        }))
    }

    /// Create an exam; `hidden` is admin-only and stripped otherwise
    pub async fn create_exam(
        pool: &PgPool,
        requester: &Requester,
        payload: CreateExamRequest,
    ) -> AppResult<Exam> {
        if CourseRepository::find_by_id(pool, payload.course_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let hidden = Self::admin_only(requester, admin_fields::EXAM, "hidden", payload.hidden)
            .unwrap_or(false);

        let mut tx = pool.begin().await?;
        let exam = ExamRepository::create(
            &mut *tx,
            &payload.name,
            payload.course_id,
            payload.multiple_correct.unwrap_or(false),
            hidden,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "exam",
            exam.id,
            actions::CREATE,
            serde_json::to_value(&exam).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(exam)
    }

    /// Update an exam; `hidden` is admin-only and stripped otherwise
    pub async fn update_exam(
        pool: &PgPool,
        requester: &Requester,
        id: i32,
        payload: UpdateExamRequest,
    ) -> AppResult<Exam> {
        if ExamRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        let hidden = Self::admin_only(requester, admin_fields::EXAM, "hidden", payload.hidden);

        let mut tx = pool.begin().await?;
        let exam = ExamRepository::update(
            &mut *tx,
            id,
            payload.name.as_deref(),
            payload.course_id,
            payload.multiple_correct,
            hidden,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "exam",
            exam.id,
            actions::UPDATE,
            serde_json::to_value(&exam).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(exam)
    }

    /// Delete an exam; reports whether it existed
    pub async fn delete_exam(pool: &PgPool, requester: &Requester, id: i32) -> AppResult<bool> {
        let Some(exam) = ExamRepository::find_by_id(pool, id).await? else {
            return Ok(false);
        };

        let mut tx = pool.begin().await?;
        ExamRepository::delete(&mut *tx, id).await?;
        RevisionRepository::append(
            &mut *tx,
            "exam",
            id,
            actions::DELETE,
            serde_json::to_value(&exam).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Questions
    // -------------------------------------------------------------------------

    /// Get a single question; questions under hidden exams are NotFound
    /// for non-admins
    pub async fn get_question(
        pool: &PgPool,
        id: i32,
        requester: &Requester,
    ) -> AppResult<QuestionResponse> {
        let question = QuestionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        Self::serialize_question(pool, question, requester)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    /// List questions matching the filters, minus invisible ones
    pub async fn list_questions(
        pool: &PgPool,
        filters: &Filters,
        requester: &Requester,
    ) -> AppResult<Vec<QuestionResponse>> {
        let questions = QuestionRepository::list(pool, filters).await?;
        Self::serialize_questions(pool, questions, requester).await
    }

    /// All questions of a course, across all its exams
    pub async fn course_questions(
        pool: &PgPool,
        course_code: &str,
        requester: &Requester,
    ) -> AppResult<Vec<QuestionResponse>> {
        let course = Self::course_by_code(pool, course_code).await?;
        let questions = QuestionRepository::list_by_course(pool, course.id).await?;
        Self::serialize_questions(pool, questions, requester).await
    }

    /// All questions of an exam, addressed by course code and exam name
    pub async fn exam_questions(
        pool: &PgPool,
        course_code: &str,
        exam_name: &str,
        requester: &Requester,
    ) -> AppResult<Vec<QuestionResponse>> {
        let course = Self::course_by_code(pool, course_code).await?;
        let exam = ExamRepository::find_by_course_and_name(pool, course.id, exam_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;
        let questions = QuestionRepository::list_by_exam(pool, exam.id).await?;
        Self::serialize_questions(pool, questions, requester).await
    }

    /// Positional lookup: the idx-th visible question of a course
    ///
    /// The visible subset (questions of non-hidden exams) is the same for
    /// every requester; admins practice the same sequence as learners.
    pub async fn positional_course_question(
        pool: &PgPool,
        course_code: &str,
        idx: i64,
        requester: &Requester,
    ) -> AppResult<QuestionResponse> {
        let course = Self::course_by_code(pool, course_code).await?;
        let question = CourseRepository::positional_question(pool, course.id, idx)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        Self::serialize_question(pool, question, requester)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    /// Positional lookup: the idx-th question of an exam, NotFound when
    /// the exam is hidden
    pub async fn positional_exam_question(
        pool: &PgPool,
        exam_id: i32,
        idx: i64,
        requester: &Requester,
    ) -> AppResult<QuestionResponse> {
        let exam = ExamRepository::find_by_id(pool, exam_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;
        if exam.hidden {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        let question = ExamRepository::positional_question(pool, exam.id, idx)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        Self::serialize_question(pool, question, requester)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    async fn serialize_questions(
        pool: &PgPool,
        questions: Vec<Question>,
        requester: &Requester,
    ) -> AppResult<Vec<QuestionResponse>> {
        let serialized = futures::future::try_join_all(
            questions
                .into_iter()
                .map(|question| Self::serialize_question(pool, question, requester)),
        )
        .await?;

        Ok(serialized.into_iter().flatten().collect())
    }

    async fn serialize_question(
        pool: &PgPool,
        question: Question,
        requester: &Requester,
    ) -> AppResult<Option<QuestionResponse>> {
        let exam = ExamRepository::find_by_id(pool, question.exam_id)
            .await?
            .ok_or_else(|| AppError::Database("Question references missing exam".to_string()))?;

        if !exam.visible_to(requester.admin) {
            return Ok(None);
        }

        let image = match question.image.as_deref().filter(|i| !i.is_empty()) {
            Some(_) => {
                let course = CourseRepository::find_by_id(pool, exam.course_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Database("Exam references missing course".to_string())
                    })?;
                question.image_url(&course.code)
            }
            None => None,
        };

        let multiple = question.multiple();
        let alternatives = if multiple {
            // Foreign-key back-references are stripped from nested
            // alternatives; they repeat the surrounding question id
            let alternatives = AlternativeRepository::list_by_question(pool, question.id).await?;
            Some(
                alternatives
                    .into_iter()
                    .map(|a| NestedAlternative {
                        id: a.id,
                        text: a.text,
                        correct: a.correct,
                    })
                    .collect(),
            )
        } else {
            None
        };

        Ok(Some(QuestionResponse {
            id: question.id,
            text: question.text,
            exam_id: question.exam_id,
            multiple,
            question_type: question.question_type,
            alternatives,
            correct: if multiple { None } else { question.correct },
            image,
            reason: question.reason,
        }))
    }

    /// Create a question
    ///
    /// Boolean questions must carry their correct value; multiple-choice
    /// questions get their correctness from alternatives instead.
    pub async fn create_question(
        pool: &PgPool,
        requester: &Requester,
        payload: CreateQuestionRequest,
    ) -> AppResult<Question> {
        Self::validate_question_type(&payload.question_type)?;
        if payload.question_type == question_types::BOOLEAN && payload.correct.is_none() {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("required");
            error.message = Some("Boolean questions require a correct value".into());
            errors.add("correct".into(), error);
            return Err(errors.into());
        }

        if ExamRepository::find_by_id(pool, payload.exam_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        let correct = if payload.question_type == question_types::MULTIPLE {
            None
        } else {
            payload.correct
        };

        let mut tx = pool.begin().await?;
        let question = QuestionRepository::create(
            &mut *tx,
            &payload.question_type,
            &payload.text,
            payload.image.as_deref(),
            payload.reason.as_deref(),
            payload.exam_id,
            correct,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "question",
            question.id,
            actions::CREATE,
            serde_json::to_value(&question).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(question)
    }

    /// Update a question; its type is immutable
    pub async fn update_question(
        pool: &PgPool,
        requester: &Requester,
        id: i32,
        payload: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        if QuestionRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        if let Some(exam_id) = payload.exam_id
            && ExamRepository::find_by_id(pool, exam_id).await?.is_none()
        {
            return Err(AppError::NotFound("Exam not found".to_string()));
        }

        let mut tx = pool.begin().await?;
        let question = QuestionRepository::update(
            &mut *tx,
            id,
            payload.text.as_deref(),
            payload.image.as_deref(),
            payload.reason.as_deref(),
            payload.exam_id,
            payload.correct,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "question",
            question.id,
            actions::UPDATE,
            serde_json::to_value(&question).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(question)
    }

    /// Delete a question; reports whether it existed
    pub async fn delete_question(pool: &PgPool, requester: &Requester, id: i32) -> AppResult<bool> {
        let Some(question) = QuestionRepository::find_by_id(pool, id).await? else {
            return Ok(false);
        };

        let mut tx = pool.begin().await?;
        QuestionRepository::delete(&mut *tx, id).await?;
        RevisionRepository::append(
            &mut *tx,
            "question",
            id,
            actions::DELETE,
            serde_json::to_value(&question).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Alternatives
    // -------------------------------------------------------------------------

    /// Get a single alternative; alternatives are visible to everyone,
    /// their exposure is controlled by the owning question's serialization
    pub async fn get_alternative(pool: &PgPool, id: i32) -> AppResult<AlternativeResponse> {
        let alternative = AlternativeRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alternative not found".to_string()))?;

        Ok(Self::serialize_alternative(alternative))
    }

    /// List alternatives
    pub async fn list_alternatives(
        pool: &PgPool,
        filters: &Filters,
    ) -> AppResult<Vec<AlternativeResponse>> {
        let alternatives = AlternativeRepository::list(pool, filters).await?;

        Ok(alternatives
            .into_iter()
            .map(Self::serialize_alternative)
            .collect())
    }

    fn serialize_alternative(alternative: Alternative) -> AlternativeResponse {
        AlternativeResponse {
            id: alternative.id,
            text: alternative.text,
            correct: alternative.correct,
            question_id: alternative.question_id,
        }
    }

    /// Create an alternative under a multiple-choice question
    pub async fn create_alternative(
        pool: &PgPool,
        requester: &Requester,
        payload: CreateAlternativeRequest,
    ) -> AppResult<Alternative> {
        let question = QuestionRepository::find_by_id(pool, payload.question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;
        if !question.multiple() {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("question_type");
            error.message = Some("Only multiple-choice questions have alternatives".into());
            errors.add("question_id".into(), error);
            return Err(errors.into());
        }

        let mut tx = pool.begin().await?;
        let alternative = AlternativeRepository::create(
            &mut *tx,
            &payload.text,
            payload.correct.unwrap_or(false),
            payload.question_id,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "alternative",
            alternative.id,
            actions::CREATE,
            serde_json::to_value(&alternative).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(alternative)
    }

    /// Update an alternative
    pub async fn update_alternative(
        pool: &PgPool,
        requester: &Requester,
        id: i32,
        payload: UpdateAlternativeRequest,
    ) -> AppResult<Alternative> {
        if AlternativeRepository::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("Alternative not found".to_string()));
        }

        let mut tx = pool.begin().await?;
        let alternative = AlternativeRepository::update(
            &mut *tx,
            id,
            payload.text.as_deref(),
            payload.correct,
        )
        .await?;
        RevisionRepository::append(
            &mut *tx,
            "alternative",
            alternative.id,
            actions::UPDATE,
            serde_json::to_value(&alternative).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(alternative)
    }

    /// Delete an alternative; reports whether it existed
    pub async fn delete_alternative(
        pool: &PgPool,
        requester: &Requester,
        id: i32,
    ) -> AppResult<bool> {
        let Some(alternative) = AlternativeRepository::find_by_id(pool, id).await? else {
            return Ok(false);
        };

        let mut tx = pool.begin().await?;
        AlternativeRepository::delete(&mut *tx, id).await?;
        RevisionRepository::append(
            &mut *tx,
            "alternative",
            id,
            actions::DELETE,
            serde_json::to_value(&alternative).unwrap_or(serde_json::Value::Null),
            requester.id,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Pass a field value through only if the requester may set it
    fn admin_only<T>(
        requester: &Requester,
        entity_admin_fields: &[&str],
        field: &str,
        value: Option<T>,
    ) -> Option<T> {
        if requester.admin || !entity_admin_fields.contains(&field) {
            value
        } else {
            None
        }
    }

    fn validate_question_type(question_type: &str) -> AppResult<()> {
        if question_types::ALL.contains(&question_type) {
            return Ok(());
        }
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("question_type");
        error.message = Some("Unknown question type".into());
        errors.add("type".into(), error);
        Err(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester(admin: bool) -> Requester {
        Requester {
            id: Some(1),
            registered: true,
            admin,
        }
    }

    #[test]
    fn test_admin_only_field_stripped_for_non_admin() {
        let value = ContentService::admin_only(
            &requester(false),
            admin_fields::EXAM,
            "hidden",
            Some(true),
        );
        assert_eq!(value, None);
    }

    #[test]
    fn test_admin_only_field_kept_for_admin() {
        let value =
            ContentService::admin_only(&requester(true), admin_fields::EXAM, "hidden", Some(true));
        assert_eq!(value, Some(true));
    }

    #[test]
    fn test_non_admin_fields_pass_through() {
        let value = ContentService::admin_only(
            &requester(false),
            admin_fields::EXAM,
            "name",
            Some("midterm"),
        );
        assert_eq!(value, Some("midterm"));
    }

    #[test]
    fn test_question_type_validation() {
        assert!(ContentService::validate_question_type("multiple").is_ok());
        assert!(ContentService::validate_question_type("boolean").is_ok());
        assert!(ContentService::validate_question_type("essay").is_err());
    }
}
