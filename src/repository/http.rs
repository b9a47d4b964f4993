use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::dto::api::{Envelope, ListEnvelope};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerListQuery, CustomerPage, CustomerReader, CustomerWriter};

/// [`CustomerReader`] and [`CustomerWriter`] over the REST API.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    /// Builds a client with the configured base url and request timeout.
    pub fn new(config: &ClientConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_base_url)
    }

    /// Uses an existing `reqwest` client. `base_url` is the API root, e.g.
    /// `http://127.0.0.1:8000/api`.
    pub fn with_client(client: Client, base_url: &str) -> RepositoryResult<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full url of a list query, including filter and pagination parameters.
    pub fn list_url(&self, query: &CustomerListQuery) -> RepositoryResult<Url> {
        let mut url = self.base_url.join(query.endpoint().path())?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(filter) = &query.filter {
                for (field, value) in filter.active() {
                    pairs.append_pair(field.as_str(), value);
                }
            }
            pairs.append_pair("page", &query.pagination.page.to_string());
            pairs.append_pair("per_page", &query.pagination.per_page.to_string());
        }
        Ok(url)
    }

    fn record_url(&self, id: Option<CustomerId>) -> RepositoryResult<Url> {
        let path = match id {
            Some(id) => format!("customers/{id}"),
            None => "customers".to_string(),
        };
        Ok(self.base_url.join(&path)?)
    }
}

/// Turns a non-success response into a [`RepositoryError`].
///
/// Laravel-style `{"message": "..."}` bodies are surfaced verbatim.
async fn error_for_status(response: Response) -> RepositoryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    match status {
        StatusCode::NOT_FOUND => RepositoryError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => RepositoryError::ValidationError(message),
        _ => RepositoryError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl CustomerReader for HttpRepository {
    async fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<CustomerPage> {
        let url = self.list_url(&query)?;
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let envelope: ListEnvelope<Customer> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let url = self.record_url(Some(id))?;
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        match read_json::<Envelope<Customer>>(response).await {
            Ok(envelope) => Ok(Some(envelope.data)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl CustomerWriter for HttpRepository {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let url = self.record_url(None)?;
        log::debug!("POST {url}");
        let response = self.client.post(url).json(new_customer).send().await?;
        let envelope: Envelope<Customer> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        let url = self.record_url(Some(id))?;
        log::debug!("PUT {url}");
        let response = self.client.put(url).json(updates).send().await?;
        let envelope: Envelope<Customer> = read_json(response).await?;
        Ok(envelope.data)
    }
}
