//! Async driver of the customer list screen.

use crate::domain::filter::FilterField;
use crate::domain::types::PerPage;
use crate::forms::FormError;
use crate::forms::filter::FilterForm;
use crate::repository::CustomerReader;
use crate::services::list_query::{FetchOutcome, ListQueryController};

/// Requests issued per operation: the fetch itself plus follow-ups while the
/// server keeps reporting a page past the end.
const MAX_REQUESTS_PER_SYNC: usize = 3;

/// The query part of the browser location.
pub trait AddressBar {
    fn current_query(&self) -> String;
    /// Replaces the query without adding a history entry.
    fn replace_query(&mut self, query: &str);
}

/// In-memory [`AddressBar`] that remembers every replaced query.
#[derive(Clone, Debug, Default)]
pub struct MemoryAddressBar {
    query: String,
    history: Vec<String>,
}

impl MemoryAddressBar {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl AddressBar for MemoryAddressBar {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.history.push(self.query.clone());
    }
}

/// Couples a [`ListQueryController`] with a repository and an address bar.
///
/// Every operation updates the state, keeps the address bar in sync and
/// awaits the resulting fetch. Operations take `&mut self`, so they never
/// overlap.
pub struct ListScreen<R, A> {
    repo: R,
    address_bar: A,
    controller: ListQueryController,
}

impl<R, A> ListScreen<R, A>
where
    R: CustomerReader,
    A: AddressBar,
{
    pub fn new(repo: R, address_bar: A, default_per_page: PerPage) -> Self {
        Self {
            repo,
            address_bar,
            controller: ListQueryController::new(default_per_page),
        }
    }

    pub fn controller(&self) -> &ListQueryController {
        &self.controller
    }

    pub fn address_bar(&self) -> &A {
        &self.address_bar
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Hydrates from the address bar and loads the first page.
    pub async fn mount(&mut self) -> FetchOutcome {
        let query = self.address_bar.current_query();
        self.controller.hydrate_from_url(&query);
        self.sync().await
    }

    pub async fn set_page(&mut self, page: u32) -> FetchOutcome {
        if !self.controller.set_page(page) {
            return FetchOutcome::Unchanged;
        }
        self.sync().await
    }

    pub async fn set_per_page(&mut self, per_page: PerPage) -> FetchOutcome {
        self.controller.set_per_page(per_page);
        self.sync().await
    }

    pub async fn apply_filter<I, S>(&mut self, fields: I) -> FetchOutcome
    where
        I: IntoIterator<Item = (FilterField, S)>,
        S: AsRef<str>,
    {
        self.controller.apply_filter(fields);
        self.sync().await
    }

    /// Validates the search dialog and applies it.
    pub async fn submit_filter(&mut self, form: FilterForm) -> Result<FetchOutcome, FormError> {
        let fields = form.into_fields().map_err(|err| {
            log::warn!("Rejected filter form: {err}");
            err
        })?;
        Ok(self.apply_filter(fields).await)
    }

    pub async fn clear_filter(&mut self) -> FetchOutcome {
        self.controller.clear_filter();
        self.sync().await
    }

    /// Reloads the current page, e.g. after a failure or an edit.
    pub async fn retry(&mut self) -> FetchOutcome {
        self.controller.refresh();
        self.sync().await
    }

    async fn sync(&mut self) -> FetchOutcome {
        self.push_url();

        let mut outcome = FetchOutcome::Unchanged;
        for _ in 0..MAX_REQUESTS_PER_SYNC {
            let Some(request) = self.controller.next_request() else {
                break;
            };
            let result = self.repo.list_customers(request.query).await;
            outcome = self.controller.complete(request.ticket, result);
            self.push_url();
            if outcome != FetchOutcome::Clamped {
                break;
            }
        }

        if outcome == FetchOutcome::Clamped {
            outcome = self
                .controller
                .abandon("The customer list kept shrinking while loading, please retry");
        }
        outcome
    }

    fn push_url(&mut self) {
        let query = self.controller.url_query();
        if self.address_bar.current_query() != query {
            self.address_bar.replace_query(query);
        }
    }
}
