//! Publication rules for questions
//!
//! Two pure operations decide what the public pages show:
//!
//! - `was_published_recently`: whether a publish date falls inside the
//!   24 hours ending at `now` (inclusive of `now`, exclusive of `now - 24h`)
//! - `latest_question_list`: the questions already published at `now`,
//!   most recently published first
//!
//! The repository layer issues the same filter and ordering as a single SQL
//! query; these functions are the in-memory form used on already loaded
//! collections.

use chrono::{DateTime, Duration, Utc};

use crate::models::Question;

/// Length of the "recently published" window, in hours
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Message shown by the index when no question is published yet
pub const NO_POLLS_MESSAGE: &str = "No polls are available.";

/// Returns the "recently published" window as a Duration
pub fn recent_window() -> Duration {
    Duration::hours(RECENT_WINDOW_HOURS)
}

/// Shifts `now` by a whole number of days
///
/// Returns `None` when the offset does not fit in a representable date.
pub fn offset_by_days(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|offset| now.checked_add_signed(offset))
}

/// Whether a publish date has been reached at `now`
pub fn is_published(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    pub_date <= now
}

/// Decides whether a publish date counts as recently published
///
/// ### Arguments
///
/// * `pub_date` - When the item is, was, or will be published
/// * `now` - The reference instant
///
/// ### Returns
///
/// `true` iff `now - 24h < pub_date <= now`
pub fn was_published_recently(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - recent_window() < pub_date && is_published(pub_date, now)
}

/// Selects the questions visible on the index at `now`
///
/// Questions with a publish date in the future are dropped and the rest are
/// ordered by publish date, newest first. Questions sharing a publish date
/// keep their input order.
///
/// ### Arguments
///
/// * `questions` - The candidate questions, in any order
/// * `now` - The reference instant
///
/// ### Returns
///
/// The published questions, most recently published first
pub fn latest_question_list<I>(questions: I, now: DateTime<Utc>) -> Vec<Question>
where
    I: IntoIterator<Item = Question>,
{
    let mut latest: Vec<Question> = questions
        .into_iter()
        .filter(|question| question.is_published_at(now))
        .collect();

    latest.sort_by(|a, b| b.get_pub_date_raw().cmp(&a.get_pub_date_raw()));
    latest
}

/// Selects the questions published within the 24 hours before `now`, newest first
pub fn recent_question_list<I>(questions: I, now: DateTime<Utc>) -> Vec<Question>
where
    I: IntoIterator<Item = Question>,
{
    latest_question_list(questions, now)
        .into_iter()
        .filter(|question| question.was_published_recently_at(now))
        .collect()
}
