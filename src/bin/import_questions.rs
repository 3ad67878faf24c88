//! Bulk question importer
//!
//! Loads a JSON tree of one course with its exams, questions and
//! alternatives into the database:
//! `import-questions <file.json>`
//!
//! An existing course with the same code is reused; everything else is
//! inserted. The whole import runs in one transaction.

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;

use quizdeck::{
    config::CONFIG,
    constants::question_types,
    db::repositories::{
        AlternativeRepository, CourseRepository, ExamRepository, QuestionRepository,
    },
};

#[derive(Debug, Deserialize)]
struct CourseImport {
    code: String,
    name: String,
    #[serde(default)]
    exams: Vec<ExamImport>,
}

#[derive(Debug, Deserialize)]
struct ExamImport {
    name: String,
    #[serde(default)]
    multiple_correct: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    questions: Vec<QuestionImport>,
}

#[derive(Debug, Deserialize)]
struct QuestionImport {
    #[serde(rename = "type")]
    question_type: String,
    text: String,
    image: Option<String>,
    reason: Option<String>,
    correct: Option<bool>,
    #[serde(default)]
    alternatives: Vec<AlternativeImport>,
}

#[derive(Debug, Deserialize)]
struct AlternativeImport {
    text: String,
    #[serde(default)]
    correct: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = std::env::args()
        .nth(1)
        .context("usage: import-questions <file.json>")?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Cannot read {path}"))?;
    let import: CourseImport =
        serde_json::from_str(&raw).with_context(|| format!("Malformed import file {path}"))?;

    for exam in &import.exams {
        for question in &exam.questions {
            anyhow::ensure!(
                question_types::ALL.contains(&question.question_type.as_str()),
                "Unknown question type '{}' in exam '{}'",
                question.question_type,
                exam.name
            );
        }
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&CONFIG.database.url)
        .await?;

    let mut tx = pool.begin().await?;

    let course = match CourseRepository::find_by_code(&pool, &import.code).await? {
        Some(existing) => {
            tracing::info!(code = %existing.code, "Reusing existing course");
            existing
        }
        None => CourseRepository::create(&mut *tx, &import.code, &import.name).await?,
    };

    let mut questions = 0usize;
    for exam in import.exams {
        let created = ExamRepository::create(
            &mut *tx,
            &exam.name,
            course.id,
            exam.multiple_correct,
            exam.hidden,
        )
        .await?;

        for question in exam.questions {
            let stored = QuestionRepository::create(
                &mut *tx,
                &question.question_type,
                &question.text,
                question.image.as_deref(),
                question.reason.as_deref(),
                created.id,
                question.correct,
            )
            .await?;
            questions += 1;

            for alternative in question.alternatives {
                AlternativeRepository::create(
                    &mut *tx,
                    &alternative.text,
                    alternative.correct,
                    stored.id,
                )
                .await?;
            }
        }
    }

    tx.commit().await?;
    tracing::info!(course = %course.code, questions, "Import complete");

    Ok(())
}
