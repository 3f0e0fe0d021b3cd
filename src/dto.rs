use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Question;
use crate::publication::{self, NO_POLLS_MESSAGE};

/// Data transfer object for creating a new question
///
/// The publish date is given either as an absolute `pub_date` or as a day
/// offset `days` from the moment of creation. Giving neither publishes the
/// question immediately.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CreateQuestionDto {
    /// The text of the question
    pub question_text: String,

    /// Absolute publish date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,

    /// Publish date as a day offset from now (negative for the past)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl CreateQuestionDto {
    /// Resolves the requested publish date relative to `now`
    ///
    /// ### Errors
    ///
    /// Returns a message if both `pub_date` and `days` are set
    pub fn resolve_pub_date(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
        match (self.pub_date, self.days) {
            (Some(_), Some(_)) => Err("Provide either pub_date or days, not both".to_string()),
            (Some(pub_date), None) => Ok(pub_date),
            (None, Some(days)) => publication::offset_by_days(now, days)
                .ok_or_else(|| format!("Day offset out of range: {}", days)),
            (None, None) => Ok(now),
        }
    }
}

/// Query parameters accepted by the index
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy)]
#[serde(default)]
pub struct IndexQueryDto {
    /// Maximum number of questions to return
    pub limit: Option<i64>,
}

/// Response body of the index
#[derive(Serialize, Deserialize, Debug)]
pub struct IndexDto {
    /// Published questions, newest first
    pub latest_question_list: Vec<Question>,

    /// Set when there is nothing to show
    pub message: Option<String>,
}

impl IndexDto {
    /// Wraps a question list, attaching the empty-index message when needed
    pub fn new(latest_question_list: Vec<Question>) -> Self {
        let message = latest_question_list
            .is_empty()
            .then(|| NO_POLLS_MESSAGE.to_string());

        Self { latest_question_list, message }
    }
}

/// Response body of the detail page
#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionDetailDto {
    /// The question itself
    pub question: Question,

    /// Whether the question was published within the last 24 hours
    pub was_published_recently: bool,
}
