//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod alternative_repo;
pub mod course_repo;
pub mod exam_repo;
pub mod question_repo;
pub mod revision_repo;
pub mod stats_repo;
pub mod user_repo;

pub use alternative_repo::AlternativeRepository;
pub use course_repo::CourseRepository;
pub use exam_repo::ExamRepository;
pub use question_repo::QuestionRepository;
pub use revision_repo::RevisionRepository;
pub use stats_repo::StatsRepository;
pub use user_repo::UserRepository;
