//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerListQuery, CustomerPage, CustomerReader, CustomerWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl CustomerReader for Repository {
        async fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<CustomerPage>;
        async fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    }

    #[async_trait]
    impl CustomerWriter for Repository {
        async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        async fn update_customer(
            &self,
            id: CustomerId,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
    }
}
