//! Browsing session
//!
//! Caller-owned accumulation of listing pages with "load more" semantics and
//! abandonment: once a session is abandoned, no fetched page is applied.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::services::CatalogService;
use crate::application::ApplicationResult;
use crate::domain::{Entry, PageSet};

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many entries were appended
    Appended(usize),
    /// The source has no more entries
    Exhausted,
    /// The session was abandoned; nothing was applied
    Abandoned,
}

/// Listing state for one browsing view.
#[derive(Debug)]
pub struct BrowseSession {
    pages: PageSet,
    page_size: u32,
    cancel: CancellationToken,
}

impl BrowseSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            pages: PageSet::new(),
            page_size,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that abandons this session when cancelled, e.g. on navigation away.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn abandon(&self) {
        self.cancel.cancel();
    }

    pub fn is_live(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn entries(&self) -> &[Entry] {
        self.pages.entries()
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    /// Fetch and append the next page.
    pub async fn load_next(&mut self, catalog: &CatalogService) -> ApplicationResult<LoadOutcome> {
        self.load(catalog, 1).await
    }

    /// Fetch the next `count` pages concurrently and append them in offset order.
    pub async fn prefetch(
        &mut self,
        catalog: &CatalogService,
        count: u32,
    ) -> ApplicationResult<LoadOutcome> {
        self.load(catalog, count).await
    }

    async fn load(&mut self, catalog: &CatalogService, count: u32) -> ApplicationResult<LoadOutcome> {
        if !self.is_live() {
            return Ok(LoadOutcome::Abandoned);
        }
        if self.pages.is_exhausted() {
            return Ok(LoadOutcome::Exhausted);
        }

        let offset = self.pages.next_offset();
        let fetch = catalog.fetch_pages(offset, self.page_size, count);
        let pages = tokio::select! {
            _ = self.cancel.cancelled() => {
                debug!("load: abandoned while fetching offset {}", offset);
                return Ok(LoadOutcome::Abandoned);
            }
            result = fetch => result?,
        };

        // Liveness may have flipped between completion and this point
        if !self.is_live() {
            return Ok(LoadOutcome::Abandoned);
        }

        // All or nothing: a bad page leaves the session as it was
        let appended = self.pages.append_all(pages)?;
        debug!("load: appended {} entries, total {}", appended, self.pages.len());

        if appended == 0 && self.pages.is_exhausted() {
            Ok(LoadOutcome::Exhausted)
        } else {
            Ok(LoadOutcome::Appended(appended))
        }
    }
}
