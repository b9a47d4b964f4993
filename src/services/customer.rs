//! Services backing the create and edit customer screens.

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::forms::customer::{CreateCustomerForm, EditCustomerForm};
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads a single customer for the edit screen.
pub async fn load_customer<R>(repo: &R, customer_id: i64) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let customer_id = CustomerId::new(customer_id)?;

    repo.get_customer_by_id(customer_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load customer {customer_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates the create form and stores the new customer.
pub async fn create_customer<R>(repo: &R, form: CreateCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let payload = NewCustomer::try_from(form).map_err(|err| {
        log::error!("Failed to validate customer form: {err}");
        err
    })?;

    let customer = repo.create_customer(&payload).await.map_err(|err| {
        log::error!("Failed to create customer: {err}");
        err
    })?;

    Ok(customer)
}

/// Validates the edit form and saves it over the existing record.
pub async fn update_customer<R>(
    repo: &R,
    customer_id: i64,
    form: EditCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = CustomerId::new(customer_id)?;

    let updates = UpdateCustomer::try_from(form).map_err(|err| {
        log::error!("Failed to validate customer form: {err}");
        err
    })?;

    let customer = repo
        .update_customer(customer_id, &updates)
        .await
        .map_err(|err| {
            log::error!("Failed to update customer {customer_id}: {err}");
            err
        })?;

    Ok(customer)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::forms::FormError;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn stored(id: i64, first_name: &str) -> Customer {
        Customer {
            id,
            first_name: Some(first_name.to_string()),
            last_name: Some("Lee".to_string()),
            email: Some("ann@example.com".to_string()),
            phone: Some("0812".to_string()),
            is_activated: true,
            ..Customer::default()
        }
    }

    fn create_form() -> CreateCustomerForm {
        CreateCustomerForm {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ANN@example.com".to_string(),
            phone: "0812".to_string(),
            is_activated: false,
        }
    }

    #[tokio::test]
    async fn load_returns_customer() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .withf(|id| id.get() == 7)
            .times(1)
            .returning(|id| Ok(Some(stored(id.get(), "Ann"))));

        let customer = load_customer(&repo, 7).await.unwrap();
        assert_eq!(customer.id, 7);
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));

        let result = load_customer(&repo, 7).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn invalid_id_skips_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().times(0);

        let result = load_customer(&repo, 0).await;
        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[tokio::test]
    async fn create_sends_normalized_payload() {
        let mut repo = MockRepository::new();
        repo.expect_create_customer()
            .withf(|payload: &NewCustomer| {
                payload.email.as_str() == "ann@example.com" && !payload.is_activated
            })
            .times(1)
            .returning(|_| Ok(stored(11, "Ann")));

        let customer = create_customer(&repo, create_form()).await.unwrap();
        assert_eq!(customer.id, 11);
    }

    #[tokio::test]
    async fn invalid_create_form_skips_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_customer().times(0);

        let form = CreateCustomerForm {
            phone: "+4412".to_string(),
            ..create_form()
        };
        let result = create_customer(&repo, form).await;
        match result {
            Err(ServiceError::Form(err @ FormError::Validation(_))) => {
                assert!(err.field_messages().contains_key("phone"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_surfaces_backend_validation() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer()
            .withf(|id, updates: &UpdateCustomer| {
                id.get() == 3 && updates.first_name.as_str() == "Annie"
            })
            .returning(|_, _| {
                Err(RepositoryError::ValidationError(
                    "The email has already been taken.".to_string(),
                ))
            });

        let mut form = EditCustomerForm::from_customer(&stored(3, "Ann"));
        form.first_name = "Annie".to_string();

        let result = update_customer(&repo, 3, form).await;
        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::ValidationError(_)))
        ));
    }

    #[tokio::test]
    async fn update_of_deleted_customer_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let form = EditCustomerForm::from_customer(&stored(3, "Ann"));
        let result = update_customer(&repo, 3, form).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
