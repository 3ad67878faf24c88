//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod alternative;
pub mod course;
pub mod exam;
pub mod question;
pub mod stats;
pub mod user;

pub use alternative::*;
pub use course::*;
pub use exam::*;
pub use question::*;
pub use stats::*;
pub use user::*;
