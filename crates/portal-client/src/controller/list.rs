// crates/portal-client/src/controller/list.rs
// Paginated list controller: Idle -> Loading -> {Loaded, Errored}

use crate::client::{ResourceClient, paged};
use crate::error::Result;
use async_trait::async_trait;
use portal_types::{Identified, Page, Pagination};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Anything that can fetch one page of `T`
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Page<T>>;
}

/// Page source backed by a paginated GET endpoint (`<path>?page=N`)
#[derive(Debug, Clone)]
pub struct PathPages {
    client: ResourceClient,
    path: String,
}

impl PathPages {
    pub fn new(client: ResourceClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T> PageSource<T> for PathPages
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, page: u32) -> Result<Page<T>> {
        self.client.get(&paged(&self.path, page)).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// What happens to the previously shown items when a fetch fails.
///
/// Both behaviours exist across list pages, so each page picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    KeepItems,
    ClearItems,
}

/// Holds the current page of a list view and refetches on page change.
///
/// `load` takes `&mut self`, so a single view never has two fetches in
/// flight and an older reply cannot overwrite a newer one.
pub struct PaginatedListController<T, S> {
    source: S,
    policy: ErrorPolicy,
    state: LoadState,
    items: Vec<T>,
    pagination: Option<Pagination>,
    requested_page: u32,
}

impl<T, S> PaginatedListController<T, S>
where
    S: PageSource<T>,
{
    pub fn new(source: S, policy: ErrorPolicy) -> Self {
        Self {
            source,
            policy,
            state: LoadState::Idle,
            items: Vec::new(),
            pagination: None,
            requested_page: 1,
        }
    }

    /// Fetch `page` (0 is treated as 1). Returns the error after recording it.
    pub async fn load(&mut self, page: u32) -> Result<()> {
        let page = self.begin(page);
        let result = self.source.fetch_page(page).await;
        self.complete(result)
    }

    /// Advance one page. `Ok(false)` when already on the last page.
    pub async fn next(&mut self) -> Result<bool> {
        match self.pagination.and_then(|p| p.next_page()) {
            Some(page) => self.load(page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Go back one page. `Ok(false)` when already on the first page.
    pub async fn previous(&mut self) -> Result<bool> {
        match self.pagination.and_then(|p| p.previous_page()) {
            Some(page) => self.load(page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Refetch the page last requested
    pub async fn refresh(&mut self) -> Result<()> {
        self.load(self.requested_page).await
    }

    fn begin(&mut self, page: u32) -> u32 {
        let page = page.max(1);
        self.requested_page = page;
        self.state = LoadState::Loading;
        debug!(page, "loading page");
        page
    }

    fn complete(&mut self, result: Result<Page<T>>) -> Result<()> {
        match result {
            Ok(page) => {
                debug!(
                    page = page.pagination.current_page,
                    items = page.items.len(),
                    "page loaded"
                );
                self.items = page.items;
                self.pagination = Some(page.pagination);
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                error!(page = self.requested_page, error = %e, "failed to load page");
                if self.policy == ErrorPolicy::ClearItems {
                    self.items.clear();
                    self.pagination = None;
                }
                self.state = LoadState::Errored(e.to_user_string());
                Err(e)
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Errored(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Page shown when loaded, otherwise the page being requested
    pub fn current_page(&self) -> u32 {
        self.pagination
            .map(|p| p.current_page)
            .unwrap_or(self.requested_page)
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Snapshot for rendering
    pub fn view(&self) -> ListView<'_, T> {
        ListView {
            items: &self.items,
            pagination: self.pagination,
            state: &self.state,
        }
    }
}

/// Local list edits applied after a successful mutation
pub trait ItemRemoval {
    /// Drop the item with `id` without refetching; true if something was removed
    fn remove_item(&mut self, id: &str) -> bool;
}

impl<T, S> ItemRemoval for PaginatedListController<T, S>
where
    T: Identified,
    S: PageSource<T>,
{
    fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| item.identifier().as_deref() != Some(id));
        let removed = before - self.items.len();
        if removed == 0 {
            return false;
        }
        if let Some(p) = self.pagination.as_mut() {
            p.total_items = p.total_items.saturating_sub(removed as u32);
        }
        true
    }
}

/// Render-ready view of a list controller
#[derive(Debug)]
pub struct ListView<'a, T> {
    pub items: &'a [T],
    pub pagination: Option<Pagination>,
    pub state: &'a LoadState,
}

impl<T> ListView<'_, T> {
    pub fn next_enabled(&self) -> bool {
        !matches!(self.state, LoadState::Loading)
            && self.pagination.is_some_and(|p| p.has_next())
    }

    pub fn previous_enabled(&self) -> bool {
        !matches!(self.state, LoadState::Loading)
            && self.pagination.is_some_and(|p| p.has_previous())
    }

    /// Loaded with nothing to show: render the empty-state message
    pub fn is_empty_state(&self) -> bool {
        matches!(self.state, LoadState::Loaded) && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        match self.state {
            LoadState::Errored(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(i64);

    impl Identified for Item {
        fn identifier(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    /// Scripted page source: pops one canned reply per fetch
    struct Scripted {
        replies: Mutex<Vec<Result<Page<Item>>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl Scripted {
        fn new(mut replies: Vec<Result<Page<Item>>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource<Item> for Scripted {
        async fn fetch_page(&self, page: u32) -> Result<Page<Item>> {
            self.requested.lock().unwrap().push(page);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(PortalError::InvalidInput("no reply scripted".into())))
        }
    }

    fn page(ids: &[i64], current_page: u32, total_pages: u32) -> Result<Page<Item>> {
        Ok(Page {
            items: ids.iter().copied().map(Item).collect(),
            pagination: Pagination {
                current_page,
                total_pages,
                total_items: ids.len() as u32,
                items_per_page: 10,
            },
        })
    }

    fn server_error() -> Result<Page<Item>> {
        Err(PortalError::Status { status: 500 })
    }

    fn controller(
        replies: Vec<Result<Page<Item>>>,
        policy: ErrorPolicy,
    ) -> PaginatedListController<Item, Scripted> {
        PaginatedListController::new(Scripted::new(replies), policy)
    }

    // ============================================================================
    // State machine
    // ============================================================================

    #[test]
    fn test_starts_idle() {
        let list = controller(vec![], ErrorPolicy::KeepItems);
        assert_eq!(list.state(), &LoadState::Idle);
        assert_eq!(list.current_page(), 1);
        assert!(!list.view().is_empty_state());
    }

    #[test]
    fn test_begin_enters_loading_and_disables_controls() {
        let mut list =
            controller(vec![], ErrorPolicy::KeepItems);
        list.complete(page(&[1], 1, 3)).unwrap();
        assert!(list.view().next_enabled());

        list.begin(2);
        assert!(list.is_loading());
        assert!(!list.view().next_enabled());
        assert_eq!(list.current_page(), 1);
    }

    #[tokio::test]
    async fn test_load_success() {
        let mut list = controller(vec![page(&[1, 2, 3], 1, 3)], ErrorPolicy::KeepItems);
        list.load(1).await.unwrap();
        assert_eq!(list.state(), &LoadState::Loaded);
        assert_eq!(list.items(), &[Item(1), Item(2), Item(3)]);
        assert!(list.view().next_enabled());
        assert!(!list.view().previous_enabled());
    }

    #[tokio::test]
    async fn test_page_zero_requests_page_one() {
        let mut list = controller(vec![page(&[1], 1, 1)], ErrorPolicy::KeepItems);
        list.load(0).await.unwrap();
        assert_eq!(list.source.requested(), vec![1]);
    }

    // ============================================================================
    // Error policies
    // ============================================================================

    #[tokio::test]
    async fn test_keep_items_on_error() {
        let mut list =
            controller(vec![page(&[1, 2], 1, 2), server_error()], ErrorPolicy::KeepItems);
        list.load(1).await.unwrap();
        let err = list.load(2).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(list.error(), Some("HTTP error! status: 500"));
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.current_page(), 1);
    }

    #[tokio::test]
    async fn test_clear_items_on_error() {
        let mut list =
            controller(vec![page(&[1, 2], 1, 2), server_error()], ErrorPolicy::ClearItems);
        list.load(1).await.unwrap();
        list.load(2).await.unwrap_err();
        assert!(list.items().is_empty());
        assert!(list.pagination().is_none());
        assert!(!list.view().is_empty_state());
        assert!(list.view().error().is_some());
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    #[tokio::test]
    async fn test_next_and_previous() {
        let pages = vec![page(&[1], 1, 2), page(&[2], 2, 2), page(&[1], 1, 2)];
        let mut list = controller(pages, ErrorPolicy::KeepItems);
        list.load(1).await.unwrap();

        assert!(list.next().await.unwrap());
        assert_eq!(list.current_page(), 2);
        assert!(!list.view().next_enabled());
        assert!(!list.next().await.unwrap());

        assert!(list.previous().await.unwrap());
        assert!(!list.previous().await.unwrap());
        assert_eq!(list.source.requested(), vec![1, 2, 1]);
    }

    #[tokio::test]
    async fn test_refresh_repeats_last_request() {
        let mut list = controller(vec![server_error(), page(&[9], 3, 3)], ErrorPolicy::KeepItems);
        list.load(3).await.unwrap_err();
        list.refresh().await.unwrap();
        assert_eq!(list.source.requested(), vec![3, 3]);
        assert_eq!(list.items(), &[Item(9)]);
    }

    // ============================================================================
    // Optimistic removal
    // ============================================================================

    #[tokio::test]
    async fn test_remove_item_without_refetch() {
        let mut list = controller(vec![page(&[1, 2, 3], 1, 1)], ErrorPolicy::KeepItems);
        list.load(1).await.unwrap();

        assert!(list.remove_item("2"));
        assert_eq!(list.items(), &[Item(1), Item(3)]);
        assert_eq!(list.pagination().map(|p| p.total_items), Some(2));
        assert!(!list.remove_item("2"));
        assert_eq!(list.source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_state_after_last_removal() {
        let mut list = controller(vec![page(&[7], 1, 1)], ErrorPolicy::KeepItems);
        list.load(1).await.unwrap();
        list.remove_item("7");
        assert!(list.view().is_empty_state());
    }
}
