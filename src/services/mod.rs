//! Business logic services

pub mod answer_service;
pub mod cache_service;
pub mod content_service;
pub mod evaluator;
pub mod random_service;
pub mod stats_service;

pub use answer_service::AnswerService;
pub use cache_service::CacheService;
pub use content_service::ContentService;
pub use random_service::RandomService;
pub use stats_service::StatsService;
