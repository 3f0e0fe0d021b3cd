/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for creating and querying questions.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod question_repo;

// Re-export all repository functions
pub use question_repo::*;
