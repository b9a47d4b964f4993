//! Response envelopes of the customer REST API.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, DisplayFromStr, PickFirst, serde_as};

/// Pagination metadata shipped next to each page of rows.
///
/// Numbers may arrive quoted.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub current_page: u32,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub from: Option<u64>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub last_page: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub per_page: u32,
    #[serde(default)]
    pub prev_page_url: Option<String>,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub to: Option<u64>,
    #[serde_as(as = "DefaultOnNull<PickFirst<(_, DisplayFromStr)>>")]
    pub total: u64,
}

/// One page of rows plus its metadata (`data.data`, `data.current_page`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// Outer `{ "data": ... }` wrapper used by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Body of `GET /customers` and `GET /customer-filter`.
pub type ListEnvelope<T> = Envelope<Page<T>>;
