use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::formats::Flexible;
use serde_with::{BoolFromInt, DefaultOnNull, DisplayFromStr, PickFirst, serde_as};

use crate::domain::lenient;
use crate::domain::types::{CustomerEmail, CustomerName, PhoneNumber};

/// Customer row as returned by the backend.
///
/// Columns the panel does not know about are kept in `extra` so they survive
/// a round trip to the display layer untouched.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<PickFirst<(_, BoolFromInt<Flexible>, DisplayFromStr)>>")]
    pub is_activated: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub updated_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// `"First Last"` with missing parts skipped.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Payload for `POST /customers`.
#[serde_as]
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCustomer {
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub email: CustomerEmail,
    pub phone: PhoneNumber,
    #[serde_as(as = "BoolFromInt")]
    pub is_activated: bool,
}

/// Payload for `PUT /customers/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateCustomer {
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub email: CustomerEmail,
    pub phone: PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}
