//! Paginated collection controller.
//!
//! One controller owns the `{filter, page, items, total_pages, loading, error}`
//! tuple of a single list view. Transitions never perform IO: they hand back the
//! [`FetchRequest`] the caller must issue, and the caller reports the result via
//! [`CollectionController::on_fetch_settled`].

/// Parameters of one issued fetch. Doubles as the tag used to recognise stale
/// results: a settlement is applied only while its request is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<K> {
    pub filter: K,
    pub page: u32,
    pub refresh_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub reason: String,
    pub retryable: bool,
}

impl FetchFailure {
    pub fn new(reason: impl Into<String>, retryable: bool) -> Self {
        Self {
            reason: reason.into(),
            retryable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Success { items: Vec<T>, total_pages: u32 },
    Failure(FetchFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionController<K, T> {
    filter: K,
    page: u32,
    total_pages: u32,
    items: Vec<T>,
    refresh_token: u64,
    loading: bool,
    last_error: Option<FetchFailure>,
}

impl<K: Clone + PartialEq, T> CollectionController<K, T> {
    /// A freshly mounted view: first page of `filter`, nothing loaded yet.
    pub fn new(filter: K) -> Self {
        Self {
            filter,
            page: 0,
            total_pages: 0,
            items: Vec::new(),
            refresh_token: 0,
            loading: false,
            last_error: None,
        }
    }

    /// Initial load for the mounted view.
    pub fn mount(&mut self) -> FetchRequest<K> {
        self.issue()
    }

    /// Switches the filter and returns to the first page.
    ///
    /// Selecting the filter that is already active issues nothing. The page
    /// count of the old filter is dropped, so only page 0 is accepted until
    /// the new filter's first result settles.
    pub fn set_filter(&mut self, filter: K) -> Option<FetchRequest<K>> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        self.page = 0;
        self.total_pages = 0;
        Some(self.issue())
    }

    /// Moves to `index`. Requests outside the known page range, or for the page
    /// already shown, are ignored without touching state.
    pub fn set_page(&mut self, index: u32) -> Option<FetchRequest<K>> {
        if !self.accepts_page(index) || index == self.page {
            return None;
        }
        self.page = index;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<FetchRequest<K>> {
        let index = self.page.checked_add(1)?;
        self.set_page(index)
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest<K>> {
        let index = self.page.checked_sub(1)?;
        self.set_page(index)
    }

    /// Forces a reload of the current filter and page.
    pub fn bump_refresh_token(&mut self) -> FetchRequest<K> {
        self.refresh_token += 1;
        self.issue()
    }

    /// Applies a fetch result if `request` is still the current one.
    ///
    /// Returns `false` when the result is stale and was discarded. A failure keeps
    /// the previously displayed items and page count.
    pub fn on_fetch_settled(&mut self, request: &FetchRequest<K>, outcome: FetchOutcome<T>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        match outcome {
            FetchOutcome::Success { items, total_pages } => {
                self.items = items;
                self.total_pages = total_pages;
                self.last_error = None;
            }
            FetchOutcome::Failure(failure) => {
                self.last_error = Some(failure);
            }
        }
        self.loading = false;
        true
    }

    pub fn current_request(&self) -> FetchRequest<K> {
        FetchRequest {
            filter: self.filter.clone(),
            page: self.page,
            refresh_token: self.refresh_token,
        }
    }

    pub fn is_current(&self, request: &FetchRequest<K>) -> bool {
        request.filter == self.filter
            && request.page == self.page
            && request.refresh_token == self.refresh_token
    }

    pub fn accepts_page(&self, index: u32) -> bool {
        if self.total_pages == 0 {
            index == 0
        } else {
            index < self.total_pages
        }
    }

    pub fn filter(&self) -> &K {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn refresh_token(&self) -> u64 {
        self.refresh_token
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&FetchFailure> {
        self.last_error.as_ref()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    fn issue(&mut self) -> FetchRequest<K> {
        self.loading = true;
        self.current_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total_pages: u32) -> CollectionController<&'static str, u32> {
        let mut controller = CollectionController::new("all");
        let request = controller.mount();
        controller.on_fetch_settled(
            &request,
            FetchOutcome::Success {
                items: vec![1, 2, 3],
                total_pages,
            },
        );
        controller
    }

    #[test]
    fn empty_collection_only_accepts_first_page() {
        let controller: CollectionController<&str, u32> = CollectionController::new("all");
        assert!(controller.accepts_page(0));
        assert!(!controller.accepts_page(1));
    }

    #[test]
    fn previous_on_first_page_is_ignored() {
        let mut controller = loaded(2);
        assert_eq!(controller.previous_page(), None);
        assert_eq!(controller.page(), 0);
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut controller = loaded(2);
        assert!(controller.next_page().is_some());
        assert_eq!(controller.next_page(), None);
        assert_eq!(controller.page(), 1);
        assert!(!controller.has_next());
    }
}
