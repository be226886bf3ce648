//! Per-entity list state: search, sort, paging, selection and deletes
//!
//! Every screen drives the backend the same way. Search, sort and paging
//! always go to the server, so the controller only ever holds one page.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::api::{decode_page, ApiRequest, Backend, ListQuery, Resource, SortOrder};
use crate::config::ListSettings;
use crate::debounce::Debouncer;
use crate::error::Result;

/// Rows-per-page choices offered by the pagination bar
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

/// State of the select-all checkbox in a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    Unchecked,
    Indeterminate,
    Checked,
}

/// A delete waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    One(String),
    Selected(Vec<String>),
}

impl PendingDelete {
    pub fn prompt(&self, noun: &str) -> String {
        match self {
            PendingDelete::One(_) => format!("Are you sure you want to delete this {noun}?"),
            PendingDelete::Selected(ids) => format!(
                "Are you sure you want to delete {} selected {noun}s?",
                ids.len()
            ),
        }
    }
}

pub struct ListController<R: Resource> {
    items: Vec<R>,
    total: usize,
    page: usize,
    page_size: usize,
    search_term: String,
    sort: SortOrder,
    selected: BTreeSet<String>,
    search_debounce: Debouncer<ListQuery>,
    pending_delete: Option<PendingDelete>,
    last_error: Option<String>,
}

impl<R: Resource> ListController<R> {
    pub fn new(settings: &ListSettings) -> Self {
        let page_size = if PAGE_SIZES.contains(&settings.default_page_size) {
            settings.default_page_size
        } else {
            PAGE_SIZES[0]
        };
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            page_size,
            search_term: String::new(),
            sort: SortOrder::default(),
            selected: BTreeSet::new(),
            search_debounce: Debouncer::new(Duration::from_millis(settings.search_debounce_ms)),
            pending_delete: None,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// A search fetch is waiting out the debounce.
    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            search: self.search_term.clone(),
            page: self.page,
            limit: self.page_size,
            sort: self.sort,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Query parameters
    // ─────────────────────────────────────────────────────────────

    /// Update the term and schedule a debounced fetch from page 0.
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.search_term = term.into();
        self.page = 0;
        self.search_debounce.schedule(self.query(), now);
    }

    /// Run the debounced search fetch once it is due. Returns true if it ran.
    pub fn poll(&mut self, backend: &dyn Backend, now: Instant) -> bool {
        match self.search_debounce.poll(now) {
            Some(query) => {
                self.fetch_query(backend, query);
                true
            }
            None => false,
        }
    }

    pub fn set_page(&mut self, page: usize, backend: &dyn Backend) {
        self.page = page.min(self.page_count() - 1);
        self.fetch(backend);
    }

    pub fn set_page_size(&mut self, page_size: usize, backend: &dyn Backend) {
        if !PAGE_SIZES.contains(&page_size) {
            warn!("Ignoring page size {} for {}", page_size, R::PATH);
            return;
        }
        self.page_size = page_size;
        self.page = 0;
        self.fetch(backend);
    }

    pub fn set_sort_order(&mut self, sort: SortOrder, backend: &dyn Backend) {
        self.sort = sort;
        self.fetch(backend);
    }

    /// Fetch the current page now, superseding any pending search fetch.
    pub fn fetch(&mut self, backend: &dyn Backend) {
        self.search_debounce.cancel();
        self.fetch_query(backend, self.query());
    }

    fn fetch_query(&mut self, backend: &dyn Backend, query: ListQuery) {
        debug!("Fetching {} {:?}", R::PATH, query);
        let result = backend
            .execute(ApiRequest::list(R::PATH, &query))
            .and_then(decode_page::<R>);
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.last_error = None;
                // selection only ever covers rows on screen
                let visible: BTreeSet<&str> = self.items.iter().map(|item| item.id()).collect();
                self.selected.retain(|id| visible.contains(id.as_str()));
            }
            Err(e) => {
                error!("Error fetching {}: {}", R::PATH, e);
                self.last_error = Some(format!("Could not load {}: {}", R::PATH, e.user_message()));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    pub fn toggle_select_all(&mut self, checked: bool) {
        self.selected = if checked {
            self.items.iter().map(|item| item.id().to_string()).collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn toggle_select(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn header_check(&self) -> HeaderCheck {
        let visible_selected = self
            .items
            .iter()
            .filter(|item| self.selected.contains(item.id()))
            .count();
        if visible_selected == 0 {
            HeaderCheck::Unchecked
        } else if visible_selected == self.items.len() {
            HeaderCheck::Checked
        } else {
            HeaderCheck::Indeterminate
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Deletion
    // ─────────────────────────────────────────────────────────────

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(PendingDelete::One(id.to_string()));
    }

    pub fn request_delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.pending_delete = Some(PendingDelete::Selected(
            self.selected.iter().cloned().collect(),
        ));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Run the confirmed delete, then refetch whatever the outcome.
    pub fn confirm_delete(&mut self, backend: &dyn Backend) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        let (failure, clear_selection) = match pending {
            PendingDelete::One(id) => match backend.execute(ApiRequest::delete(R::PATH, &id)) {
                Ok(_) => {
                    info!("Deleted {} {}", R::NOUN, id);
                    self.selected.remove(&id);
                    (None, false)
                }
                Err(e) => {
                    error!("Error deleting {} {}: {}", R::NOUN, id, e);
                    let message = format!("Failed to delete {}: {}", R::NOUN, e.user_message());
                    (Some(message), false)
                }
            },
            PendingDelete::Selected(ids) => {
                let failed = delete_all::<R>(backend, &ids);
                info!("Bulk delete of {} {}s: {} failed", ids.len(), R::NOUN, failed);
                let message = (failed > 0)
                    .then(|| format!("Failed to delete {} of {} {}s", failed, ids.len(), R::NOUN));
                (message, true)
            }
        };

        self.fetch(backend);
        if clear_selection {
            self.selected.clear();
        }
        if failure.is_some() {
            self.last_error = failure;
        }
    }
}

/// Fire one delete per id concurrently; returns how many failed.
fn delete_all<R: Resource>(backend: &dyn Backend, ids: &[String]) -> usize {
    std::thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                scope.spawn(move || -> Result<()> {
                    backend
                        .execute(ApiRequest::delete(R::PATH, id))
                        .inspect_err(|e| error!("Error deleting {} {}: {}", R::NOUN, id, e))?;
                    Ok(())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(|outcome| !matches!(outcome, Ok(Ok(()))))
            .count()
    })
}
