use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use hnscout_core::{Post, UsageData};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("post titled {0:?} already exists")]
    DuplicateTitle(String),
}

/// Persistence capability used by the scrape pipeline.
///
/// Batch writes are all-or-nothing: on error nothing from the batch is visible.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Whether a post with exactly this title was persisted by an earlier run.
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError>;

    async fn create_posts(&self, posts: &[Post]) -> Result<(), StoreError>;

    async fn create_usage(&self, usage: &UsageData) -> Result<(), StoreError>;
}

fn to_db_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_db_nanos(value: Duration) -> i64 {
    i64::try_from(value.as_nanos()).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create_posts(&self, posts: &[Post]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for post in posts {
            sqlx::query(
                r#"
                INSERT INTO posts (id, created_at, title, points, comments, source, source_domain, applied_filter)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(post.id)
            .bind(post.created_at)
            .bind(&post.title)
            .bind(i64::from(post.points))
            .bind(i64::from(post.comments))
            .bind(&post.source)
            .bind(&post.source_domain)
            .bind(post.applied_filter.map(|f| f.as_str()))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(posts = posts.len(), "post batch committed");
        Ok(())
    }

    async fn create_usage(&self, usage: &UsageData) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO usage_data (
                id, created_at, started_at, finished_at, duration_ns,
                total_posts, total_bytes_scraped,
                total_posts_with_more_than_five_words, total_posts_with_five_or_fewer_words,
                average_time_per_post_ns
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(usage.id)
        .bind(usage.created_at)
        .bind(usage.started_at)
        .bind(usage.finished_at)
        .bind(to_db_nanos(usage.duration))
        .bind(to_db_count(usage.total_posts))
        .bind(to_db_count(usage.total_bytes_scraped))
        .bind(to_db_count(usage.total_posts_with_more_than_five_words))
        .bind(to_db_count(usage.total_posts_with_five_or_fewer_words))
        .bind(to_db_nanos(usage.average_time_per_post))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(usage_id = %usage.id, "usage record committed");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    posts: Vec<Post>,
    usage: Vec<UsageData>,
}

/// In-process store with the same unique-title rule as the `posts` table.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    state: Mutex<MemoryState>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                posts,
                usage: Vec::new(),
            }),
        }
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }

    pub async fn usage(&self) -> Vec<UsageData> {
        self.state.lock().await.usage.clone()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn title_exists(&self, title: &str) -> Result<bool, StoreError> {
        let state = self.state.lock().await;
        Ok(state.posts.iter().any(|p| p.title == title))
    }

    async fn create_posts(&self, posts: &[Post]) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut titles: HashSet<&str> = state.posts.iter().map(|p| p.title.as_str()).collect();
        for post in posts {
            if !titles.insert(post.title.as_str()) {
                return Err(StoreError::DuplicateTitle(post.title.clone()));
            }
        }
        state.posts.extend_from_slice(posts);
        Ok(())
    }

    async fn create_usage(&self, usage: &UsageData) -> Result<(), StoreError> {
        self.state.lock().await.usage.push(usage.clone());
        Ok(())
    }
}
