use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::publication;

/// Represents a poll question in the system
///
/// Questions are created once and never mutated. The `pub_date` may lie in
/// the past, the present or the future; only questions whose `pub_date` has
/// been reached are visible on the public index and detail pages.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Question {
    /// Unique identifier for the question (UUID v4 as string)
    id: String,

    /// The text of the question
    question_text: String,

    /// When this question is, was, or will be published
    pub_date: NaiveDateTime,
}

impl Question {
    /// Creates a new question
    ///
    /// ### Arguments
    ///
    /// * `question_text` - The text of the question
    /// * `pub_date` - When the question is published
    ///
    /// ### Returns
    ///
    /// A new `Question` instance with a freshly generated ID
    pub fn new(question_text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question_text,
            pub_date: pub_date.naive_utc(),
        }
    }

    /// Creates a new question published `days` days away from now
    ///
    /// Negative offsets publish in the past, positive offsets in the future
    /// and zero publishes at the current instant.
    ///
    /// ### Arguments
    ///
    /// * `question_text` - The text of the question
    /// * `days` - The day offset from now
    ///
    /// ### Returns
    ///
    /// A new `Question` instance, or `None` if the offset is out of range
    pub fn published_in_days(question_text: String, days: i64) -> Option<Self> {
        publication::offset_by_days(Utc::now(), days)
            .map(|pub_date| Self::new(question_text, pub_date))
    }

    /// Creates a new question with all fields specified
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the question
    /// * `question_text` - The text of the question
    /// * `pub_date` - When the question is published
    ///
    /// ### Returns
    ///
    /// A new `Question` instance with the specified fields
    pub fn new_with_fields(id: String, question_text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id,
            question_text,
            pub_date: pub_date.naive_utc(),
        }
    }

    /// Gets the question's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the question's text
    pub fn get_question_text(&self) -> String {
        self.question_text.clone()
    }

    /// Gets the question's publish date as a DateTime<Utc>
    pub fn get_pub_date(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.pub_date, Utc)
    }

    /// Gets the question's raw publish date
    pub fn get_pub_date_raw(&self) -> NaiveDateTime {
        self.pub_date
    }

    /// Whether the question is visible at `now`, i.e. its publish date has been reached
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        publication::is_published(self.get_pub_date(), now)
    }

    /// Whether the question was published within the 24 hours before `now`
    ///
    /// ### Arguments
    ///
    /// * `now` - The reference instant
    ///
    /// ### Returns
    ///
    /// `true` if `now - 24h < pub_date <= now`
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        publication::was_published_recently(self.get_pub_date(), now)
    }

    /// Whether the question was published within the last 24 hours
    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }
}
