//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// CACHE DEFAULTS
// =============================================================================

/// Default cache entry lifetime in seconds
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Key prefix for cached read responses
pub const CACHE_KEY_PREFIX: &str = "quizdeck:cache";

/// Key holding the cache generation counter; bumping it invalidates
/// every entry at once
pub const CACHE_GENERATION_KEY: &str = "quizdeck:cache:generation";

// =============================================================================
// QUESTION TYPES
// =============================================================================

/// Question type identifiers
pub mod question_types {
    /// Question with a set of alternatives, some marked correct
    pub const MULTIPLE: &str = "multiple";

    /// Yes/no question with a single correct boolean
    pub const BOOLEAN: &str = "boolean";

    /// All supported question types
    pub const ALL: &[&str] = &[MULTIPLE, BOOLEAN];
}

// =============================================================================
// ADMIN-ONLY FIELDS
// =============================================================================

/// Field names that only admin requesters may set on create/update,
/// per entity type. Non-admin payloads have these stripped before the
/// write is applied.
pub mod admin_fields {
    pub const COURSE: &[&str] = &[];
    pub const EXAM: &[&str] = &["hidden"];
    pub const QUESTION: &[&str] = &[];
    pub const ALTERNATIVE: &[&str] = &[];
}

// =============================================================================
// CONTENT LIMITS
// =============================================================================

/// Maximum course code length
pub const MAX_COURSE_CODE_LENGTH: u64 = 80;

/// Maximum course name length
pub const MAX_COURSE_NAME_LENGTH: u64 = 120;

/// Maximum exam name length
pub const MAX_EXAM_NAME_LENGTH: u64 = 120;

/// Maximum question text length
pub const MAX_QUESTION_TEXT_LENGTH: u64 = 4096;

/// Maximum alternative text length
pub const MAX_ALTERNATIVE_TEXT_LENGTH: u64 = 1024;
