//! Access to the customer REST API behind reader/writer traits.

use async_trait::async_trait;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::filter::FilterState;
use crate::domain::types::{CustomerId, PerPage};
use crate::dto::api::Page;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

/// A page of customers together with the server's pagination metadata.
pub type CustomerPage = Page<Customer>;

/// Collection endpoint serving a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /customers`
    List,
    /// `GET /customer-filter`
    Filter,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::List => "customers",
            Endpoint::Filter => "customer-filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: PerPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub pagination: Pagination,
    pub filter: Option<FilterState>,
}

impl Default for CustomerListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self {
            pagination: Pagination {
                page: 1,
                per_page: PerPage::default(),
            },
            filter: None,
        }
    }

    pub fn paginate(mut self, page: u32, per_page: PerPage) -> Self {
        self.pagination = Pagination {
            page: page.max(1),
            per_page,
        };
        self
    }

    /// Restricts the query; a filter without constraints is dropped.
    pub fn filter(mut self, filter: FilterState) -> Self {
        self.filter = Some(filter).filter(FilterState::is_active);
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        if self.filter.is_some() {
            Endpoint::Filter
        } else {
            Endpoint::List
        }
    }
}

#[async_trait]
pub trait CustomerReader {
    async fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<CustomerPage>;
    async fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
}

#[async_trait]
pub trait CustomerWriter {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    async fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
}
