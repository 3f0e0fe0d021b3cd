/// Polls: a small question-publishing service
///
/// This library provides the core functionality of a polls application:
/// questions with a publish date, the rules deciding which questions are
/// visible, database access, and a JSON web API.
///
/// ### Modules
///
/// - `config`: Layered configuration (defaults, config file, environment, CLI)
/// - `db`: Database connection management
/// - `dto`: Request and response bodies of the web API
/// - `errors`: API error type and its HTTP mapping
/// - `handlers`: Axum request handlers
/// - `models`: Data structures representing questions
/// - `publication`: The recency predicate and the published-question query
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// - `GET /polls`: Published questions, newest first (optional `?limit=N`)
/// - `GET /polls/recent`: Questions published within the last 24 hours
/// - `GET /polls/{id}`: A published question; 404 if missing or not yet published
/// - `POST /questions`: Create a question
/// - `GET /questions`: All questions, including unpublished ones

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod publication;
pub mod repo;
pub mod schema;

#[cfg(test)]
mod test_utils;

use anyhow::anyhow;
use axum::{
    routing::{get, post},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use errors::ApiError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the application router
///
/// This function sets up the Axum router with all the API endpoints.
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Index of published questions
        .route("/polls", get(handlers::index_handler))
        // Questions published in the last 24 hours
        .route("/polls/recent", get(handlers::recent_handler))
        // Detail of a published question
        .route("/polls/{id}", get(handlers::detail_handler))
        // Creating and listing all questions
        .route("/questions", post(handlers::create_question_handler).get(handlers::list_questions_handler))
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Errors
///
/// Returns an error if a pending migration fails to apply
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;

    info!("Applied {} pending migrations", applied.len());
    Ok(())
}
