//! QuizDeck - Quiz Practice Platform Core
//!
//! This library provides the core functionality for the QuizDeck
//! platform, a question-bank service for exam practice: courses hold
//! exams, exams hold questions, and learners answer, track progress and
//! draw random questions.
//!
//! # Features
//!
//! - Course / exam / question / alternative content store with
//!   admin-gated visibility of hidden exams
//! - Boolean and multiple-choice grading (subset or exact-match per exam)
//! - Append-only progress tracking with idempotent recording and resets
//! - Random question selection that avoids the current question
//! - Read-through Redis response cache with whole-cache invalidation
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
mod test_utils;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
