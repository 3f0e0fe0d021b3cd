use crate::db::DbPool;
use crate::models::Question;
use crate::publication;
use crate::schema::questions;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new question in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `question_text` - The text of the question
/// * `pub_date` - When the question is published
///
/// ### Returns
///
/// A Result containing the newly created Question if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, question_text), fields(pub_date = %pub_date))]
pub fn create_question(pool: &DbPool, question_text: String, pub_date: DateTime<Utc>) -> Result<Question> {
    debug!("Creating question");
    insert_question(pool, Question::new(question_text, pub_date))
}

fn insert_question(pool: &DbPool, new_question: Question) -> Result<Question> {
    let conn = &mut pool.get()?;

    diesel::insert_into(questions::table)
        .values(&new_question)
        .execute(conn)?;

    info!("Created question with id: {}", new_question.get_id());
    Ok(new_question)
}

/// Creates a new question published `days` days away from now
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `question_text` - The text of the question
/// * `days` - Day offset from now; negative for the past, positive for the future
///
/// ### Errors
///
/// Returns an error if the offset is out of range or the insert fails
pub fn create_question_in_days(pool: &DbPool, question_text: String, days: i64) -> Result<Question> {
    let new_question = Question::published_in_days(question_text, days)
        .ok_or_else(|| anyhow!("Day offset out of range: {}", days))?;

    insert_question(pool, new_question)
}

/// Retrieves a question by its ID, whatever its publish date
///
/// ### Returns
///
/// A Result containing Some(Question) if found, or None if not found
#[instrument(skip(pool), fields(question_id = %question_id))]
pub fn get_question(pool: &DbPool, question_id: &str) -> Result<Option<Question>> {
    debug!("Getting question by id");

    let conn = &mut pool.get()?;

    let result = questions::table
        .find(question_id)
        .first::<Question>(conn)
        .optional()?;

    Ok(result)
}

/// Retrieves a question by its ID if it is already published at `now`
///
/// A question whose publish date is still in the future is reported as
/// absent, exactly as if it did not exist.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `question_id` - The ID of the question
/// * `now` - The reference instant
///
/// ### Returns
///
/// A Result containing Some(Question) if found and published, None otherwise
#[instrument(skip(pool), fields(question_id = %question_id))]
pub fn get_published_question(pool: &DbPool, question_id: &str, now: DateTime<Utc>) -> Result<Option<Question>> {
    debug!("Getting published question by id");

    let conn = &mut pool.get()?;

    let result = questions::table
        .find(question_id)
        .filter(questions::pub_date.le(now.naive_utc()))
        .first::<Question>(conn)
        .optional()?;

    Ok(result)
}

/// Lists every question in the database, including unpublished ones
#[instrument(skip(pool))]
pub fn list_questions(pool: &DbPool) -> Result<Vec<Question>> {
    debug!("Listing all questions");

    let conn = &mut pool.get()?;

    let result = questions::table
        .order(questions::pub_date.desc())
        .load::<Question>(conn)?;

    info!("Retrieved {} questions", result.len());
    Ok(result)
}

/// Lists the questions published at `now`, most recently published first
///
/// The filter and ordering run as a single read-only query.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `now` - The reference instant
/// * `limit` - Optional maximum number of questions to return
///
/// ### Returns
///
/// A Result containing the published questions, newest first
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_latest_questions(pool: &DbPool, now: DateTime<Utc>, limit: Option<i64>) -> Result<Vec<Question>> {
    debug!("Listing latest questions");

    let conn = &mut pool.get()?;

    let mut query = questions::table
        .filter(questions::pub_date.le(now.naive_utc()))
        .order(questions::pub_date.desc())
        .into_boxed();

    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let result = query.load::<Question>(conn)?;

    info!("Retrieved {} latest questions", result.len());
    Ok(result)
}

/// Lists the questions published within the 24 hours before `now`, newest first
#[instrument(skip(pool))]
pub fn list_recent_questions(pool: &DbPool, now: DateTime<Utc>) -> Result<Vec<Question>> {
    debug!("Listing recent questions");

    let conn = &mut pool.get()?;

    let window_start = now - publication::recent_window();
    let candidates = questions::table
        .filter(questions::pub_date.gt(window_start.naive_utc()))
        .filter(questions::pub_date.le(now.naive_utc()))
        .load::<Question>(conn)?;

    // The SQL bounds narrow the scan; the predicate is the source of truth
    let result = publication::recent_question_list(candidates, now);

    info!("Retrieved {} recent questions", result.len());
    Ok(result)
}
