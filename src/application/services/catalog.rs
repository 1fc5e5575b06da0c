//! Catalog service
//!
//! Fetches pages, the full listing, detail records, and lineage trees from the
//! catalog source. Holds no listing state: every call is a function of its
//! arguments and the source's current response.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use crate::application::wire::{
    DetailResponse, EvolutionChainResponse, ListingResponse, SpeciesResponse,
};
use crate::application::{decode, ApplicationError, ApplicationResult, SourceFailure, SourceResultExt};
use crate::config::Settings;
use crate::domain::{
    filter_by_name, flatten, id_from_url, DomainError, Entry, EntryDetail, LineageEntry, LineageNode,
    MaxResults, Page, PageSet, SearchQuery,
};
use crate::infrastructure::traits::SharedSource;

/// Service for reading the remote catalog.
#[derive(Clone)]
pub struct CatalogService {
    source: SharedSource,
    settings: Arc<Settings>,
}

impl CatalogService {
    pub fn new(source: SharedSource, settings: Arc<Settings>) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn listing_url(&self, offset: u32, limit: u32) -> String {
        format!(
            "{}/pokemon?limit={}&offset={}",
            self.settings.base_url, limit, offset
        )
    }

    pub fn detail_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.settings.base_url, id)
    }

    pub fn species_url(&self, id: u32) -> String {
        format!("{}/pokemon-species/{}", self.settings.base_url, id)
    }

    /// Fetch `limit` entries starting at `offset`.
    ///
    /// Entry ids are `offset + position + 1`. A body without `results`, or an
    /// item without `name`/`url`, fails the whole page.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, offset: u32, limit: u32) -> ApplicationResult<Page> {
        if limit == 0 {
            return Err(DomainError::InvalidLimit.into());
        }
        let url = self.listing_url(offset, limit);
        let body = self
            .source
            .get_json(&url)
            .await
            .with_request_context("fetch page", &url)?;
        let listing: ListingResponse = decode(body, "fetch page", &url)?;

        let page = Page::from_items(
            offset,
            limit,
            listing.results.into_iter().map(|item| (item.name, item.url)),
        )?;
        debug!("fetch_page: {} entries at offset {}", page.len(), offset);
        Ok(page)
    }

    /// Fetch `count` consecutive pages concurrently, returned in offset order.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_pages(
        &self,
        offset: u32,
        limit: u32,
        count: u32,
    ) -> ApplicationResult<Vec<Page>> {
        let offsets = (0..count)
            .map(|i| {
                i.checked_mul(limit)
                    .and_then(|step| offset.checked_add(step))
                    .ok_or(DomainError::OffsetOverflow { offset, limit })
            })
            .collect::<Result<Vec<u32>, DomainError>>()?;
        let requests = offsets.into_iter().map(|at| self.fetch_page(at, limit));
        let mut pages = try_join_all(requests).await?;
        pages.sort_by_key(|page| page.offset);
        Ok(pages)
    }

    /// Page through the entire catalog until the source returns a short page.
    ///
    /// This is the search universe; nothing beyond the first N items is cut off.
    /// Unlike browsing pages, entries here are keyed by the id in their resource
    /// URL, since the catalog's numbering has gaps past the main series. An
    /// entry without a usable URL id fails the listing as malformed.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_full_listing(&self) -> ApplicationResult<Vec<Entry>> {
        let limit = self.settings.search_page_size;
        let mut pages = PageSet::new();
        loop {
            let page = self.fetch_page(pages.next_offset(), limit).await?;
            let done = page.is_last();
            pages.append(page)?;
            if done {
                break;
            }
        }
        debug!("fetch_full_listing: {} entries", pages.len());
        pages
            .into_entries()
            .into_iter()
            .map(keyed_by_url)
            .collect()
    }

    /// Search the full listing by name. A blank query returns nothing without a request.
    pub async fn search(&self, query: &str, max: MaxResults) -> ApplicationResult<Vec<Entry>> {
        if SearchQuery::new(query).is_blank() {
            return Ok(Vec::new());
        }
        let listing = self.fetch_full_listing().await?;
        Ok(filter_by_name(&listing, query, max))
    }

    /// Suggestions for a partially typed query over an already fetched listing.
    ///
    /// Queries shorter than `min_suggest_len` yield nothing.
    pub fn suggest(&self, listing: &[Entry], query: &str) -> Vec<Entry> {
        let normalized = SearchQuery::new(query).normalized();
        if normalized.chars().count() < self.settings.min_suggest_len {
            return Vec::new();
        }
        filter_by_name(
            listing,
            &normalized,
            MaxResults::Limit(self.settings.suggestion_limit),
        )
    }

    /// Fetch the detail record of one entry. HTTP 404 maps to `NotFound`.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_detail(&self, id: u32) -> ApplicationResult<EntryDetail> {
        let url = self.detail_url(id);
        let body = self.get_or_not_found(&url, "fetch detail", id).await?;
        let raw: DetailResponse = decode(body, "fetch detail", &url)?;
        Ok(EntryDetail::from(raw))
    }

    /// Resolve species -> evolution chain and parse it into a lineage tree.
    ///
    /// Returns `None` when the species has no evolution chain.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_lineage(&self, id: u32) -> ApplicationResult<Option<LineageNode>> {
        let species_url = self.species_url(id);
        let body = self
            .get_or_not_found(&species_url, "fetch species", id)
            .await?;
        let species: SpeciesResponse = decode(body, "fetch species", &species_url)?;

        let Some(chain_ref) = species.evolution_chain else {
            debug!("fetch_lineage: species {} has no evolution chain", id);
            return Ok(None);
        };

        let chain_url = chain_ref.url;
        let body = self
            .source
            .get_json(&chain_url)
            .await
            .with_request_context("fetch evolution chain", &chain_url)?;
        let chain: EvolutionChainResponse = decode(body, "fetch evolution chain", &chain_url)?;

        let node = LineageNode::try_from(&chain.chain).map_err(|e| {
            ApplicationError::unavailable(
                format!("fetch evolution chain: {}", chain_url),
                SourceFailure::Malformed {
                    url: chain_url.clone(),
                    reason: e.to_string(),
                },
            )
        })?;
        Ok(Some(node))
    }

    /// Lineage of `id` flattened into pre-order; empty when there is no chain.
    pub async fn fetch_flattened_lineage(&self, id: u32) -> ApplicationResult<Vec<LineageEntry>> {
        let root = self.fetch_lineage(id).await?;
        Ok(flatten(root.as_ref()))
    }

    async fn get_or_not_found(
        &self,
        url: &str,
        action: &str,
        id: u32,
    ) -> ApplicationResult<serde_json::Value> {
        match self.source.get_json(url).await {
            Ok(body) => Ok(body),
            Err(e) if e.is_not_found() => Err(ApplicationError::NotFound(id.to_string())),
            Err(e) => Err(ApplicationError::unavailable(
                format!("{}: {}", action, url),
                e,
            )),
        }
    }
}

/// Replace the position-derived id with the one in the entry's resource URL.
fn keyed_by_url(entry: Entry) -> ApplicationResult<Entry> {
    match id_from_url(&entry.source_url) {
        Ok(id) => Ok(Entry { id, ..entry }),
        Err(e) => Err(ApplicationError::unavailable(
            format!("fetch full listing: {}", entry.name),
            SourceFailure::Malformed {
                url: entry.source_url,
                reason: e.to_string(),
            },
        )),
    }
}
