//! Listing page adapters: map a site's front page HTML to post drafts.

use hnscout_core::PostDraft;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

pub const CRATE_NAME: &str = "hnscout-adapters";

pub const HACKER_NEWS: &str = "hacker-news";

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("{0}")]
    Message(String),
}

/// Parses one listing page into drafts, in document order.
///
/// Implementations never fail on missing or malformed fields; those fall back to
/// empty strings and zero counts.
pub trait ListingAdapter: Send + Sync {
    fn site_id(&self) -> &'static str;

    fn parse_listing(&self, html: &str) -> Result<Vec<PostDraft>, AdapterError>;
}

fn selector(css: &str) -> Result<Selector, AdapterError> {
    Selector::parse(css).map_err(|e| AdapterError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Count written before `marker`, e.g. `"87 comments"`.
///
/// Everything ahead of the first `marker` must parse as a whole number once
/// trimmed; anything else (`"1,234"`, `"12abc"`, a missing marker) is 0.
pub fn count_before(text: &str, marker: &str) -> u32 {
    text.split(marker)
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
struct HackerNewsSelectors {
    row: Selector,
    title_link: Selector,
    score: Selector,
    subtext_link: Selector,
}

/// Adapter for the Hacker News front page markup.
///
/// Each story is a `tr.athing` row followed by a metadata row holding the
/// score and the discussion link.
#[derive(Debug, Clone)]
pub struct HackerNewsAdapter {
    selectors: HackerNewsSelectors,
}

impl HackerNewsAdapter {
    pub fn new() -> Result<Self, AdapterError> {
        Ok(Self {
            selectors: HackerNewsSelectors {
                row: selector("tr.athing")?,
                title_link: selector("td.title span.titleline a")?,
                score: selector("td.subtext span.score")?,
                subtext_link: selector("td.subtext a")?,
            },
        })
    }

    /// Story rows paired with the metadata row that follows each of them.
    pub fn listing_rows<'a>(
        &self,
        document: &'a Html,
    ) -> Vec<(ElementRef<'a>, Option<ElementRef<'a>>)> {
        document
            .select(&self.selectors.row)
            .map(|row| (row, row.next_siblings().find_map(ElementRef::wrap)))
            .collect()
    }

    pub fn extract_post(&self, row: ElementRef<'_>, meta: Option<ElementRef<'_>>) -> PostDraft {
        let mut links = row.select(&self.selectors.title_link);
        let article = links.next();
        let domain = links.next();

        PostDraft {
            title: article.map(element_text).unwrap_or_default(),
            source: article
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default()
                .to_string(),
            source_domain: domain.map(element_text).unwrap_or_default(),
            points: meta.map(|m| self.points(m)).unwrap_or(0),
            comments: meta.map(|m| self.comments(m)).unwrap_or(0),
        }
    }

    fn points(&self, meta: ElementRef<'_>) -> u32 {
        let text: String = meta.select(&self.selectors.score).map(element_text).collect();
        if text.is_empty() {
            return 0;
        }
        count_before(&text, "points")
    }

    fn comments(&self, meta: ElementRef<'_>) -> u32 {
        match meta.select(&self.selectors.subtext_link).last() {
            Some(link) => {
                let text = element_text(link);
                if text.contains("comments") {
                    count_before(&text, "comments")
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

impl ListingAdapter for HackerNewsAdapter {
    fn site_id(&self) -> &'static str {
        HACKER_NEWS
    }

    fn parse_listing(&self, html: &str) -> Result<Vec<PostDraft>, AdapterError> {
        let document = Html::parse_document(html);
        let drafts: Vec<PostDraft> = self
            .listing_rows(&document)
            .into_iter()
            .map(|(row, meta)| self.extract_post(row, meta))
            .collect();
        debug!(site = HACKER_NEWS, rows = drafts.len(), "listing parsed");
        Ok(drafts)
    }
}

pub fn hacker_news_adapter() -> Result<HackerNewsAdapter, AdapterError> {
    HackerNewsAdapter::new()
}

pub fn adapter_for_site(site_id: &str) -> Result<Box<dyn ListingAdapter>, AdapterError> {
    match site_id {
        HACKER_NEWS => Ok(Box::new(HackerNewsAdapter::new()?)),
        other => Err(AdapterError::Message(format!(
            "no listing adapter registered for {other}"
        ))),
    }
}
