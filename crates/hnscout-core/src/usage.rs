use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Classification, UsageData};

/// Build the usage snapshot for a run whose posts were classified into `classified`.
///
/// Bucket totals are taken from the classification, never recounted. A clock
/// that moved backwards yields a zero duration; an empty run has a zero average.
pub fn summarize_usage(
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    total_bytes_scraped: usize,
    classified: &Classification,
) -> UsageData {
    let duration = (finished_at - started_at).to_std().unwrap_or(Duration::ZERO);
    let total_posts = classified.len();

    UsageData {
        id: Uuid::new_v4(),
        created_at: finished_at,
        started_at,
        finished_at,
        duration,
        total_posts,
        total_bytes_scraped,
        total_posts_with_more_than_five_words: classified.more_than_five_words,
        total_posts_with_five_or_fewer_words: classified.five_words_or_less,
        average_time_per_post: average_per_post(duration, total_posts),
    }
}

fn average_per_post(duration: Duration, total_posts: usize) -> Duration {
    // checked_div yields None for an empty run
    u32::try_from(total_posts)
        .ok()
        .and_then(|n| duration.checked_div(n))
        .unwrap_or(Duration::ZERO)
}
