//! Pagination and filter state of the customer list.
//!
//! [`ListQueryController`] never performs I/O. Operations mutate the state and
//! mark it dirty; the driver drains at most one [`FetchRequest`] built from the
//! final state and reports the response back through
//! [`ListQueryController::complete`]. Responses to superseded requests are
//! dropped without touching the state.

use std::fmt;

use crate::domain::customer::Customer;
use crate::domain::filter::{FilterField, FilterState};
use crate::domain::types::PerPage;
use crate::dto::url_state::ListUrlState;
use crate::pagination::PaginationState;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerListQuery, CustomerPage, Endpoint};

/// Identifies an issued request. Later requests carry larger tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub query: CustomerListQuery,
}

/// What [`ListQueryController::complete`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and totals were replaced.
    Applied,
    /// The server reported a page past the end. The page was moved back and
    /// a follow-up request is pending; rows are unchanged.
    Clamped,
    /// The request failed; previous rows are kept and an error is set.
    Failed,
    /// The response belongs to a superseded request and was ignored.
    Stale,
    /// Nothing was requested.
    Unchanged,
}

#[derive(Debug)]
pub struct ListQueryController {
    default_per_page: PerPage,
    pagination: PaginationState,
    filter: FilterState,
    rows: Vec<Customer>,
    error: Option<String>,
    url: String,
    dirty: bool,
    issued: u64,
    in_flight: Option<Ticket>,
}

impl Default for ListQueryController {
    fn default() -> Self {
        Self::new(PerPage::default())
    }
}

impl ListQueryController {
    pub fn new(default_per_page: PerPage) -> Self {
        let pagination = PaginationState::new(default_per_page);
        let filter = FilterState::new();
        let url = ListUrlState::encode(&pagination, &filter);
        Self {
            default_per_page,
            pagination,
            filter,
            rows: Vec::new(),
            error: None,
            url,
            dirty: false,
            issued: 0,
            in_flight: None,
        }
    }

    /// Controller hydrated from `query` with its initial fetch scheduled.
    pub fn from_url(query: &str, default_per_page: PerPage) -> Self {
        let mut controller = Self::new(default_per_page);
        controller.hydrate_from_url(query);
        controller
    }

    /// Restores pagination and filter from an address-bar query.
    ///
    /// Unknown or malformed parameters fall back to defaults.
    pub fn hydrate_from_url(&mut self, query: &str) {
        let state = ListUrlState::parse(query);
        self.pagination = PaginationState::starting_at(
            state.current_page.unwrap_or(1),
            state.per_page.unwrap_or(self.default_per_page),
        );
        self.filter = state.filter;
        self.rows.clear();
        self.error = None;
        self.schedule();
    }

    /// Moves to `page`. Returns `false` and does nothing when `page` is
    /// outside `[1, last_page]`.
    pub fn set_page(&mut self, page: u32) -> bool {
        if !self.pagination.go_to(page) {
            log::debug!(
                "Ignoring page {page}, last page is {}",
                self.pagination.last_page()
            );
            return false;
        }
        self.schedule();
        true
    }

    pub fn set_per_page(&mut self, per_page: PerPage) {
        self.pagination.resize(per_page);
        self.schedule();
    }

    /// Merges `fields` into the filter and goes back to the first page.
    /// Fields not mentioned keep their value; an empty value clears one.
    pub fn apply_filter<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (FilterField, S)>,
        S: AsRef<str>,
    {
        self.filter.merge(fields);
        self.pagination.rewind();
        self.schedule();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.pagination.rewind();
        self.schedule();
    }

    /// Fetches the current state again.
    pub fn refresh(&mut self) {
        self.schedule();
    }

    /// Runs several operations; they produce a single request for the final
    /// state.
    pub fn batch<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        f(self)
    }

    /// Takes the pending request, if any, and marks it in flight.
    pub fn next_request(&mut self) -> Option<FetchRequest> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some(ticket);

        Some(FetchRequest {
            ticket,
            query: self.query(),
        })
    }

    /// Applies the response to the request identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: RepositoryResult<CustomerPage>,
    ) -> FetchOutcome {
        if self.in_flight != Some(ticket) {
            log::debug!("Discarding response to superseded request {ticket}");
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                self.error = None;
                if self.pagination.absorb(&page.meta) {
                    log::debug!(
                        "Page {} is past the end, moving to page {}",
                        page.meta.current_page,
                        self.pagination.current_page()
                    );
                    self.schedule();
                    return FetchOutcome::Clamped;
                }
                self.rows = page.data;
                self.url = ListUrlState::encode(&self.pagination, &self.filter);
                FetchOutcome::Applied
            }
            Err(err) => {
                log::warn!("Failed to load customers: {err}");
                self.error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Drops the pending or in-flight request and reports `message` as a
    /// load failure. Rows and pagination are kept.
    pub fn abandon(&mut self, message: impl Into<String>) -> FetchOutcome {
        let message = message.into();
        log::warn!("Giving up on loading customers: {message}");
        self.dirty = false;
        self.in_flight = None;
        self.error = Some(message);
        FetchOutcome::Failed
    }

    /// Query served by the current state.
    pub fn query(&self) -> CustomerListQuery {
        CustomerListQuery::new()
            .paginate(self.pagination.current_page(), self.pagination.per_page())
            .filter(self.filter.clone())
    }

    pub fn endpoint(&self) -> Endpoint {
        self.query().endpoint()
    }

    /// Canonical address-bar query of the current state, without the `?`.
    pub fn url_query(&self) -> &str {
        &self.url
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn rows(&self) -> &[Customer] {
        &self.rows
    }

    /// Rows paired with their 1-based position in the whole result set.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (u64, &Customer)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(offset, row)| (self.pagination.row_index(offset), row))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.dirty || self.in_flight.is_some()
    }

    fn schedule(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            log::debug!("Request {ticket} superseded");
        }
        self.dirty = true;
        self.url = ListUrlState::encode(&self.pagination, &self.filter);
    }
}
