//! Core domain model for hnscout: posts, usage snapshots, title classification.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod classify;
mod usage;
mod words;

pub use classify::{classify, Classification, TITLE_WORD_THRESHOLD};
pub use usage::summarize_usage;
pub use words::count_words;

pub const CRATE_NAME: &str = "hnscout-core";

/// Bucket tag assigned to a post once it has been classified by title length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleFilter {
    MoreThanFiveWords,
    FiveWordsOrLess,
}

impl TitleFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            TitleFilter::MoreThanFiveWords => "more_than_five_words",
            TitleFilter::FiveWordsOrLess => "five_words_or_less",
        }
    }
}

impl fmt::Display for TitleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate record extracted from one listing row, before it is accepted into a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub points: u32,
    pub comments: u32,
    pub source: String,
    pub source_domain: String,
}

/// Post collected during a run. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub points: u32,
    pub comments: u32,
    pub source: String,
    pub source_domain: String,
    pub applied_filter: Option<TitleFilter>,
}

impl Post {
    pub fn from_draft(draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            title: draft.title,
            points: draft.points,
            comments: draft.comments,
            source: draft.source,
            source_domain: draft.source_domain,
            applied_filter: None,
        }
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.title)
    }
}

/// Run-level statistics snapshot. One record per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageData {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,
    pub total_posts: usize,
    pub total_bytes_scraped: usize,
    pub total_posts_with_more_than_five_words: usize,
    pub total_posts_with_five_or_fewer_words: usize,
    pub average_time_per_post: Duration,
}
