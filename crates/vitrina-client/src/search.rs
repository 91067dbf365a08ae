//! Catalog browsing session: filter state, debounced search and
//! latest-request-wins fetching.
//!
//! Every fetch takes a generation ticket. When its response arrives the
//! ticket is compared with the newest one handed out; if a newer request has
//! started in the meantime the response (or error) is dropped and the call
//! returns `Ok(None)`. Search text additionally waits out a quiescence window
//! before fetching, and a burst of keystrokes collapses into one request for
//! the last text. Until then the text is held as pending and is not part of
//! the filter, so other filter changes made meanwhile fetch without it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use vitrina_core::{total_pages, AppConfig, CatalogFilter, ProductPage};

use crate::client::ApiClient;
use crate::error::ClientError;

/// A listing page together with the filter it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResults {
    pub filter: CatalogFilter,
    pub page: ProductPage,
    pub total_pages: u64,
}

pub struct CatalogSession<'a> {
    api: &'a ApiClient,
    filter: Mutex<CatalogFilter>,
    pending_search: Mutex<Option<String>>,
    page_size: u32,
    debounce: Duration,
    generation: AtomicU64,
}

impl<'a> CatalogSession<'a> {
    #[must_use]
    pub fn new(api: &'a ApiClient, page_size: u32, debounce: Duration) -> Self {
        Self {
            api,
            filter: Mutex::new(CatalogFilter::default()),
            pending_search: Mutex::new(None),
            page_size: page_size.max(1),
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn from_config(api: &'a ApiClient, config: &AppConfig) -> Self {
        Self::new(
            api,
            config.page_size,
            Duration::from_millis(config.search_debounce_ms),
        )
    }

    /// Current filter state. Search text still inside its debounce window is
    /// not included.
    #[must_use]
    pub fn filter(&self) -> CatalogFilter {
        self.lock_filter().clone()
    }

    /// Updates the search text and fetches once the text has been stable for
    /// the debounce window.
    ///
    /// Returns `Ok(None)` if a newer search or fetch superseded this one.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from the listing request, unless the
    /// request was superseded.
    pub async fn search(
        &self,
        text: impl Into<String>,
    ) -> Result<Option<CatalogResults>, ClientError> {
        *lock(&self.pending_search) = Some(text.into());
        let ticket = self.next_ticket();
        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(ticket) {
            tracing::debug!(ticket, "search superseded during debounce");
            return Ok(None);
        }
        let pending = lock(&self.pending_search).take();
        if let Some(text) = pending {
            self.lock_filter().set_search(text);
        }
        self.fetch(ticket).await
    }

    /// Selects a collection (clearing the category) and fetches.
    ///
    /// # Errors
    ///
    /// See [`CatalogSession::refresh`].
    pub async fn set_collection(
        &self,
        collection: Option<String>,
    ) -> Result<Option<CatalogResults>, ClientError> {
        self.lock_filter().set_collection(collection);
        self.refresh().await
    }

    /// # Errors
    ///
    /// See [`CatalogSession::refresh`].
    pub async fn set_category(
        &self,
        category: Option<String>,
    ) -> Result<Option<CatalogResults>, ClientError> {
        self.lock_filter().set_category(category);
        self.refresh().await
    }

    /// # Errors
    ///
    /// See [`CatalogSession::refresh`].
    pub async fn set_in_stock_only(
        &self,
        in_stock_only: bool,
    ) -> Result<Option<CatalogResults>, ClientError> {
        self.lock_filter().set_in_stock_only(in_stock_only);
        self.refresh().await
    }

    /// # Errors
    ///
    /// See [`CatalogSession::refresh`].
    pub async fn set_page(&self, page: u32) -> Result<Option<CatalogResults>, ClientError> {
        self.lock_filter().set_page(page);
        self.refresh().await
    }

    /// Fetches the listing for the current filter immediately.
    ///
    /// Returns `Ok(None)` if a newer request started before this one
    /// completed.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from the listing request, unless the
    /// request was superseded.
    pub async fn refresh(&self) -> Result<Option<CatalogResults>, ClientError> {
        let ticket = self.next_ticket();
        self.fetch(ticket).await
    }

    async fn fetch(&self, ticket: u64) -> Result<Option<CatalogResults>, ClientError> {
        let filter = self.filter();
        let result = self.api.list_products(&filter, self.page_size).await;

        if !self.is_latest(ticket) {
            tracing::debug!(ticket, ok = result.is_ok(), "discarding stale catalog response");
            return Ok(None);
        }

        let page = result?;
        let total_pages = total_pages(page.total, self.page_size);
        Ok(Some(CatalogResults {
            filter,
            page,
            total_pages,
        }))
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    fn lock_filter(&self) -> MutexGuard<'_, CatalogFilter> {
        lock(&self.filter)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
