use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{instrument, debug, info};

use crate::db::DbPool;
use crate::dto::{CreateQuestionDto, IndexDto, IndexQueryDto, QuestionDetailDto};
use crate::errors::ApiError;
use crate::models::Question;
use crate::repo;

/// Handler for the poll index
///
/// This function handles GET requests to `/polls`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `query` - Optional `limit` on the number of questions returned
///
/// ### Returns
///
/// The published questions, newest first, plus a message when there are none
#[instrument(skip(pool))]
pub async fn index_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the query string; a malformed one is reported as an ApiError
    query: Result<Query<IndexQueryDto>, QueryRejection>,
) -> Result<Json<IndexDto>, ApiError> {
    let Query(query) = query?;
    debug!("Listing latest questions for index");

    if let Some(limit) = query.limit {
        if limit < 1 {
            return Err(ApiError::InvalidLimit(
                "Limit must be at least 1".to_string()
            ));
        }
    }

    let questions = repo::list_latest_questions(&pool, Utc::now(), query.limit)
        .map_err(ApiError::Database)?;

    info!("Index shows {} questions", questions.len());

    Ok(Json(IndexDto::new(questions)))
}

/// Handler for the detail page of a published question
///
/// This function handles GET requests to `/polls/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `question_id` - The ID of the question, extracted from the URL path
///
/// ### Returns
///
/// The question with its recency flag, or 404 if it does not exist or is
/// not published yet
#[instrument(skip(pool), fields(question_id = %question_id))]
pub async fn detail_handler(
    State(pool): State<Arc<DbPool>>,
    Path(question_id): Path<String>,
) -> Result<Json<QuestionDetailDto>, ApiError> {
    debug!("Retrieving question detail");

    let now = Utc::now();
    let question = repo::get_published_question(&pool, &question_id, now)
        .map_err(ApiError::Database)?
        .ok_or_else(|| {
            debug!("Question missing or not yet published");
            ApiError::NotFound
        })?;

    let was_published_recently = question.was_published_recently_at(now);

    Ok(Json(QuestionDetailDto { question, was_published_recently }))
}

/// Handler listing questions published within the last 24 hours
///
/// This function handles GET requests to `/polls/recent`.
#[instrument(skip(pool))]
pub async fn recent_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = repo::list_recent_questions(&pool, Utc::now())
        .map_err(ApiError::Database)?;

    info!("Retrieved {} recent questions", questions.len());
    Ok(Json(questions))
}

/// Handler for creating a new question
///
/// This function handles POST requests to `/questions`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The question text and either an absolute `pub_date` or a `days` offset
///
/// ### Returns
///
/// The newly created question as JSON
#[instrument(skip(pool, payload))]
pub async fn create_question_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    payload: Result<Json<CreateQuestionDto>, JsonRejection>,
) -> Result<Json<Question>, ApiError> {
    let Json(payload) = payload?;
    info!(days = ?payload.days, pub_date = ?payload.pub_date, "Creating new question");

    let pub_date = payload.resolve_pub_date(Utc::now())
        .map_err(ApiError::InvalidQuestion)?;

    let question = repo::create_question(&pool, payload.question_text, pub_date)
        .map_err(ApiError::Database)?;

    info!("Successfully created question with id: {}", question.get_id());

    Ok(Json(question))
}

/// Handler for listing every question, published or not
///
/// This function handles GET requests to `/questions`.
#[instrument(skip(pool))]
pub async fn list_questions_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = repo::list_questions(&pool)
        .map_err(ApiError::Database)?;

    Ok(Json(questions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;
    use chrono::Duration;

    #[tokio::test]
    async fn test_index_handler_no_question() {
        let pool = setup_test_db();

        let result = index_handler(
            State(pool.clone()),
            Ok(Query(IndexQueryDto::default())),
        ).await.unwrap();

        let index = result.0;
        assert!(index.latest_question_list.is_empty());
        assert_eq!(index.message.as_deref(), Some("No polls are available."));
    }

    #[tokio::test]
    async fn test_index_handler_past_question() {
        let pool = setup_test_db();
        let question = repo::create_question_in_days(&pool, "Past question".to_string(), -10).unwrap();

        let result = index_handler(
            State(pool.clone()),
            Ok(Query(IndexQueryDto::default())),
        ).await.unwrap();

        let index = result.0;
        assert_eq!(index.latest_question_list, vec![question]);
        assert!(index.message.is_none());
    }

    #[tokio::test]
    async fn test_index_handler_rejects_zero_limit() {
        let pool = setup_test_db();

        let result = index_handler(
            State(pool.clone()),
            Ok(Query(IndexQueryDto { limit: Some(0) })),
        ).await;

        assert!(matches!(result, Err(ApiError::InvalidLimit(_))));
    }

    #[tokio::test]
    async fn test_detail_handler_future_question() {
        let pool = setup_test_db();
        let future = repo::create_question_in_days(&pool, "Future question".to_string(), 30).unwrap();

        let result = detail_handler(
            State(pool.clone()),
            Path(future.get_id()),
        ).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_detail_handler_past_question() {
        let pool = setup_test_db();
        let past = repo::create_question_in_days(&pool, "Past question".to_string(), -30).unwrap();

        let detail = detail_handler(
            State(pool.clone()),
            Path(past.get_id()),
        ).await.unwrap().0;

        assert_eq!(detail.question, past);
        assert!(!detail.was_published_recently);
    }

    #[tokio::test]
    async fn test_detail_handler_recent_question() {
        let pool = setup_test_db();
        let question = repo::create_question(&pool, "Fresh".to_string(), Utc::now() - Duration::hours(2)).unwrap();

        let detail = detail_handler(
            State(pool.clone()),
            Path(question.get_id()),
        ).await.unwrap().0;

        assert!(detail.was_published_recently);
    }

    #[tokio::test]
    async fn test_detail_handler_unknown_id() {
        let pool = setup_test_db();

        let result = detail_handler(
            State(pool.clone()),
            Path("nonexistent".to_string()),
        ).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_question_handler_with_days() {
        let pool = setup_test_db();
        let payload = CreateQuestionDto {
            question_text: "Created via handler".to_string(),
            days: Some(-2),
            ..Default::default()
        };

        let question = create_question_handler(
            State(pool.clone()),
            Ok(Json(payload)),
        ).await.unwrap().0;

        assert_eq!(question.get_question_text(), "Created via handler");
        assert!(question.get_pub_date() < Utc::now() - Duration::days(1));
        assert!(repo::get_question(&pool, &question.get_id()).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_question_handler_rejects_both_dates() {
        let pool = setup_test_db();
        let payload = CreateQuestionDto {
            question_text: "Confused".to_string(),
            pub_date: Some(Utc::now()),
            days: Some(1),
        };

        let result = create_question_handler(
            State(pool.clone()),
            Ok(Json(payload)),
        ).await;

        assert!(matches!(result, Err(ApiError::InvalidQuestion(_))));
        assert!(repo::list_questions(&pool).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_handler() {
        let pool = setup_test_db();
        repo::create_question(&pool, "Fresh".to_string(), Utc::now() - Duration::hours(1)).unwrap();
        repo::create_question_in_days(&pool, "Stale".to_string(), -3).unwrap();
        repo::create_question_in_days(&pool, "Upcoming".to_string(), 3).unwrap();

        let recent = recent_handler(State(pool.clone())).await.unwrap().0;

        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].get_question_text(), "Fresh");
    }

    #[tokio::test]
    async fn test_list_questions_handler_includes_unpublished() {
        let pool = setup_test_db();
        repo::create_question_in_days(&pool, "Past".to_string(), -3).unwrap();
        repo::create_question_in_days(&pool, "Upcoming".to_string(), 3).unwrap();

        let all = list_questions_handler(State(pool.clone())).await.unwrap().0;
        assert_eq!(all.len(), 2);
    }
}
