use customer_panel::domain::customer::NewCustomer;
use customer_panel::domain::filter::{FilterField, FilterState};
use customer_panel::domain::types::{
    CustomerEmail, CustomerId, CustomerName, PerPage, PhoneNumber,
};
use customer_panel::repository::errors::RepositoryError;
use customer_panel::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, HttpRepository,
};

mod common;

#[tokio::test]
async fn list_requests_page_from_plain_endpoint() {
    let backend = common::Backend::seeded(23);
    let repo = backend.spawn().await;

    let page = repo
        .list_customers(CustomerListQuery::new().paginate(2, PerPage::new(5).unwrap()))
        .await
        .unwrap();

    let ids: Vec<i64> = page.data.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    assert_eq!(page.meta.total, 23);
    assert_eq!(page.meta.last_page, 5);
    assert_eq!(page.meta.per_page, 5);
    assert_eq!(page.meta.from, Some(6));
    assert!(page.data[1].is_activated);
    assert!(!page.data[0].is_activated);
    assert_eq!(backend.requests(), ["/api/customers?page=2&per_page=5"]);
}

#[tokio::test]
async fn filtered_list_uses_filter_endpoint() {
    let backend = common::Backend::seeded(23);
    let repo = backend.spawn().await;

    let mut filter = FilterState::new();
    filter.merge([
        (FilterField::FirstName, "ann"),
        (FilterField::IsActivated, "false"),
    ]);
    let page = repo
        .list_customers(CustomerListQuery::new().filter(filter))
        .await
        .unwrap();

    assert_eq!(page.meta.total, 11);
    assert!(page.data.iter().all(|c| c.id % 2 == 0 && !c.is_activated));
    assert_eq!(
        backend.requests(),
        ["/api/customer-filter?first_name=ann&is_activated=false&page=1&per_page=10"]
    );
}

#[tokio::test]
async fn missing_customer_is_none() {
    let backend = common::Backend::seeded(3);
    let repo = backend.spawn().await;

    let found = repo
        .get_customer_by_id(CustomerId::new(2).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.full_name(), "Ann Customer2");
    assert_eq!(found.email.as_deref(), Some("customer2@example.com"));

    let missing = repo
        .get_customer_by_id(CustomerId::new(999).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn server_error_carries_backend_message() {
    let backend = common::Backend::seeded(3);
    backend.fail_lists(true);
    let repo = backend.spawn().await;

    let err = repo
        .list_customers(CustomerListQuery::new())
        .await
        .unwrap_err();
    match err {
        RepositoryError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_posts_payload_and_reports_conflicts() {
    let backend = common::Backend::seeded(2);
    let repo = backend.spawn().await;

    let new_customer = NewCustomer {
        first_name: CustomerName::new("Cleo").unwrap(),
        last_name: CustomerName::new("Park").unwrap(),
        email: CustomerEmail::new("cleo@example.com").unwrap(),
        phone: PhoneNumber::new("0899").unwrap(),
        is_activated: true,
    };
    let created = repo.create_customer(&new_customer).await.unwrap();
    assert_eq!(created.id, 3);
    assert!(created.is_activated);
    assert_eq!(backend.customer(3).unwrap()["is_activated"], 1);

    let err = repo.create_customer(&new_customer).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::ValidationError(message) if message == "The email has already been taken."
    ));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let repo = HttpRepository::with_client(client, "http://127.0.0.1:1/api").unwrap();

    let err = repo
        .list_customers(CustomerListQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Network(_)));
}
