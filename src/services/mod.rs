//! Services coordinating the customer list and the create/edit workflows.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod customer;
pub mod list_query;
pub mod list_screen;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer not found")]
    NotFound,

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
