pub mod cms;
pub mod loader;
pub mod sample;

use chrono::{DateTime, Utc};

use crate::http::TransportError;

/// Number of posts requested per page. A shorter page means the feed is exhausted.
pub const PAGE_SIZE: usize = 6;

pub const DEFAULT_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1499750789382-d3c6df2c8fde?w=800&auto=format&fit=crop";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl Filters {
    pub fn new(category: Option<String>, tag: Option<String>) -> Self {
        Self { category, tag }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: usize,
    pub filters: Filters,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub slug: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Anything that can hand out pages of feed entries.
pub trait PageSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<FeedEntry>, TransportError>;
}
