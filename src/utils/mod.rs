//! Utility functions

pub mod grading;

pub use grading::{grade, percentage};
