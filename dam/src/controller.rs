//! List controller: fetch, store, and derive the paged view of one list.
//!
//! Every fetch is stamped with a sequence number. Only the completion that
//! carries the most recently issued number is applied; earlier ones are
//! dropped, so a slow "apply filters" response cannot overwrite the result of
//! a later "clear filters".

use tracing::{debug, warn};

use crate::error::Result;
use crate::pager::{Pager, DEFAULT_PAGE_SIZE};
use crate::query::FilterSet;
use crate::rest::DamHttpClient;
use crate::types::{ActivityLog, Asset, Listing, Resource, ResultPage, User};

/// Records that can be narrowed by a free-text search on the client.
pub trait Searchable {
    /// Text fields the search looks into.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match against any search field.
    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.username.as_str(),
            self.email.as_str(),
            self.role.as_str(),
        ]
    }
}

impl Searchable for Asset {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.category.as_deref());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for ActivityLog {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.username.as_str(), self.action_type.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Failed with a user-facing message.
    Error(String),
}

/// Handle for one issued fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    /// Filters as they were when the fetch was issued.
    pub filters: FilterSet,
}

#[derive(Debug)]
pub struct ListController<T> {
    filters: FilterSet,
    items: Vec<T>,
    result_page: Option<ResultPage>,
    pager: Pager<T>,
    local_search: String,
    state: LoadState,
    issued: u64,
    server_page_size: u32,
}

impl<T: Clone + Searchable> ListController<T> {
    pub fn new(filter_fields: &[&str], server_page_size: u32) -> Self {
        Self {
            filters: FilterSet::with_fields(filter_fields),
            items: Vec::new(),
            result_page: None,
            pager: Pager::new(Vec::new(), DEFAULT_PAGE_SIZE),
            local_search: String::new(),
            state: LoadState::Idle,
            issued: 0,
            server_page_size: server_page_size.max(1),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    /// Replace the whole filter set; takes effect on the next fetch.
    pub fn replace_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// The full loaded collection, before local search and paging.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn result_page(&self) -> Option<&ResultPage> {
        self.result_page.as_ref()
    }

    /// Pager over the locally searched view.
    pub fn pager(&self) -> &Pager<T> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager<T> {
        &mut self.pager
    }

    pub fn visible(&self) -> &[T] {
        self.pager.visible_slice()
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pager.set_page_size(page_size);
    }

    pub fn local_search(&self) -> &str {
        &self.local_search
    }

    /// Narrow the loaded collection client-side and go back to page 1.
    pub fn set_local_search(&mut self, query: impl Into<String>) {
        self.local_search = query.into();
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let view: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.matches(&self.local_search))
            .cloned()
            .collect();
        self.pager.set_items(view);
    }

    /// Issue a new fetch; any earlier outstanding ticket becomes stale.
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        debug!(seq = self.issued, page, "fetch issued");
        FetchTicket {
            seq: self.issued,
            page: page.max(1),
            filters: self.filters.clone(),
        }
    }

    /// Start an "apply filters" fetch from page 1.
    pub fn begin_apply(&mut self) -> FetchTicket {
        self.begin_fetch(1)
    }

    /// Empty every filter, then start a fetch from page 1.
    pub fn begin_clear(&mut self) -> FetchTicket {
        self.filters.clear();
        self.begin_fetch(1)
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket was
    /// superseded and the outcome was dropped.
    pub fn finish(&mut self, ticket: &FetchTicket, outcome: Result<Listing<T>>) -> bool {
        if ticket.seq != self.issued {
            warn!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale list response"
            );
            return false;
        }
        match outcome {
            Ok(listing) => {
                debug!(seq = ticket.seq, items = listing.items.len(), "list loaded");
                self.items = listing.items;
                self.result_page = Some(listing.page);
                self.rebuild_view();
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "list fetch failed");
                self.state = LoadState::Error(e.user_message());
            }
        }
        true
    }
}

impl<T: Clone + Searchable + Resource> ListController<T> {
    /// Fetch `page` with the current filters and apply the result.
    pub async fn fetch(&mut self, client: &DamHttpClient, page: u32) -> bool {
        let ticket = self.begin_fetch(page);
        let outcome = client
            .list::<T>(&ticket.filters, Some(ticket.page), self.server_page_size)
            .await;
        self.finish(&ticket, outcome)
    }

    pub async fn apply_filters(&mut self, client: &DamHttpClient) -> bool {
        self.fetch(client, 1).await
    }

    pub async fn clear_filters(&mut self, client: &DamHttpClient) -> bool {
        self.filters.clear();
        self.fetch(client, 1).await
    }
}
