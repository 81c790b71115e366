//! Paginated, filterable accumulation of blog entries.
//!
//! A load is split in two halves: [`FeedLoader::begin_next_page`] /
//! [`FeedLoader::set_filters`] hand out a [`PendingPage`] ticket, and
//! [`FeedLoader::complete`] applies the response for that ticket. Every filter
//! change bumps the generation, so a response that arrives for an older
//! generation is dropped instead of leaking entries from the previous filter.

use chrono::Utc;

use super::sample::sample_entries;
use super::{FeedEntry, Filters, PAGE_SIZE, PageRequest, PageSource};
use crate::http::TransportError;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPage {
    generation: u64,
    replace: bool,
    request: PageRequest,
}

impl PendingPage {
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn replaces_entries(&self) -> bool {
        self.replace
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Guard refused the load: already loading or nothing left.
    Skipped,
    /// The page arrived; `added` entries now sit at the end of the list.
    Loaded { added: usize },
    /// The response belongs to a superseded filter session.
    Stale,
    /// The request failed and the loader fell back to what it could show.
    Fallback(Notice),
}

#[derive(Debug)]
pub struct FeedLoader {
    entries: Vec<FeedEntry>,
    filters: Filters,
    current_page: u32,
    is_loading: bool,
    has_more: bool,
    generation: u64,
    reset_pending: bool,
    page_size: usize,
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedLoader {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            filters: Filters::default(),
            current_page: 1,
            is_loading: false,
            has_more: true,
            generation: 0,
            reset_pending: true,
            page_size,
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the "load more" control should be offered.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading
    }

    /// Starts a new filter session: empties the list and requests page 1.
    ///
    /// Never refused, even while another request is in flight; that request
    /// becomes stale.
    pub fn set_filters(&mut self, filters: Filters) -> PendingPage {
        self.generation += 1;
        self.filters = filters;
        self.entries.clear();
        self.current_page = 1;
        self.has_more = true;
        self.reset_pending = true;
        self.start(1, true)
    }

    /// Requests the page after the last one loaded, unless a load is already
    /// running or the feed is exhausted.
    pub fn begin_next_page(&mut self) -> Option<PendingPage> {
        if self.is_loading || !self.has_more {
            return None;
        }
        if self.reset_pending {
            return Some(self.start(1, true));
        }
        let next = self.current_page + 1;
        Some(self.start(next, false))
    }

    fn start(&mut self, page: u32, replace: bool) -> PendingPage {
        self.is_loading = true;
        PendingPage {
            generation: self.generation,
            replace,
            request: PageRequest {
                page,
                page_size: self.page_size,
                filters: self.filters.clone(),
            },
        }
    }

    /// Applies the response for `pending`.
    pub fn complete(
        &mut self,
        pending: PendingPage,
        result: Result<Vec<FeedEntry>, TransportError>,
    ) -> LoadOutcome {
        if pending.generation != self.generation {
            tracing::debug!(
                page = pending.request.page,
                generation = pending.generation,
                current = self.generation,
                "discarding stale page"
            );
            return LoadOutcome::Stale;
        }
        self.is_loading = false;

        match result {
            Ok(page) => {
                let added = page.len();
                if pending.replace {
                    self.entries = page;
                } else {
                    self.entries.extend(page);
                }
                self.current_page = pending.request.page;
                self.has_more = added >= self.page_size;
                self.reset_pending = false;
                tracing::debug!(page = self.current_page, added, has_more = self.has_more, "page loaded");
                LoadOutcome::Loaded { added }
            }
            Err(e) => {
                tracing::warn!(page = pending.request.page, error = %e, "blog page request failed");
                if pending.replace {
                    self.entries = sample_entries(Utc::now());
                    self.reset_pending = true;
                }
                LoadOutcome::Fallback(Notice::info(
                    "Using Demo Data",
                    "Could not connect to the blog API. Showing sample blog posts.",
                ))
            }
        }
    }

    /// Changes filters and fetches the first page of the new session.
    pub fn apply_filters<S: PageSource>(&mut self, source: &S, filters: Filters) -> LoadOutcome {
        let pending = self.set_filters(filters);
        let result = source.fetch_page(pending.request());
        self.complete(pending, result)
    }

    pub fn load_next_page<S: PageSource>(&mut self, source: &S) -> LoadOutcome {
        let Some(pending) = self.begin_next_page() else {
            return LoadOutcome::Skipped;
        };
        let result = source.fetch_page(pending.request());
        self.complete(pending, result)
    }

    /// The sentinel below the list scrolled into view.
    pub fn on_sentinel_visible<S: PageSource>(&mut self, source: &S) -> LoadOutcome {
        if !self.can_load_more() {
            return LoadOutcome::Skipped;
        }
        self.load_next_page(source)
    }

    /// The explicit "load more" control was used.
    pub fn load_more<S: PageSource>(&mut self, source: &S) -> LoadOutcome {
        if !self.can_load_more() {
            return LoadOutcome::Skipped;
        }
        self.load_next_page(source)
    }
}
