//! Filter state for the customer list and the per-field matching rules.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::lenient::{parse_flag, parse_timestamp};
use crate::domain::types::TypeConstraintError;

/// How a filter value is compared with a record column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive substring.
    Text,
    /// `true`/`false` exact match.
    Boolean,
    /// Same calendar day.
    Timestamp,
}

/// Filterable customer columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Id,
    FirstName,
    LastName,
    Phone,
    Email,
    IsActivated,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

impl FilterField {
    /// Every field, in the order used for query strings.
    pub const ALL: [FilterField; 10] = [
        FilterField::Id,
        FilterField::FirstName,
        FilterField::LastName,
        FilterField::Phone,
        FilterField::Email,
        FilterField::IsActivated,
        FilterField::CreatedBy,
        FilterField::UpdatedBy,
        FilterField::CreatedAt,
        FilterField::UpdatedAt,
    ];

    /// Query parameter and backend column name.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterField::Id => "id",
            FilterField::FirstName => "first_name",
            FilterField::LastName => "last_name",
            FilterField::Phone => "phone",
            FilterField::Email => "email",
            FilterField::IsActivated => "is_activated",
            FilterField::CreatedBy => "created_by",
            FilterField::UpdatedBy => "updated_by",
            FilterField::CreatedAt => "created_at",
            FilterField::UpdatedAt => "updated_at",
        }
    }

    pub const fn kind(self) -> FilterKind {
        match self {
            FilterField::IsActivated => FilterKind::Boolean,
            FilterField::CreatedAt | FilterField::UpdatedAt => FilterKind::Timestamp,
            _ => FilterKind::Text,
        }
    }

    /// Checks that `value` can be compared under this field's kind.
    ///
    /// Empty values are always accepted; they mean "no constraint".
    pub fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        match self.kind() {
            FilterKind::Text => true,
            FilterKind::Boolean => parse_flag(value).is_some(),
            FilterKind::Timestamp => parse_timestamp(value).is_some(),
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// Column value of a record as seen by the matcher.
enum RecordValue<'a> {
    Text(Option<String>),
    Flag(bool),
    Timestamp(Option<&'a NaiveDateTime>),
}

fn record_value(customer: &Customer, field: FilterField) -> RecordValue<'_> {
    match field {
        FilterField::Id => RecordValue::Text(Some(customer.id.to_string())),
        FilterField::FirstName => RecordValue::Text(customer.first_name.clone()),
        FilterField::LastName => RecordValue::Text(customer.last_name.clone()),
        FilterField::Phone => RecordValue::Text(customer.phone.clone()),
        FilterField::Email => RecordValue::Text(customer.email.clone()),
        FilterField::IsActivated => RecordValue::Flag(customer.is_activated),
        FilterField::CreatedBy => RecordValue::Text(customer.created_by.clone()),
        FilterField::UpdatedBy => RecordValue::Text(customer.updated_by.clone()),
        FilterField::CreatedAt => RecordValue::Timestamp(customer.created_at.as_ref()),
        FilterField::UpdatedAt => RecordValue::Timestamp(customer.updated_at.as_ref()),
    }
}

fn field_matches(customer: &Customer, field: FilterField, wanted: &str) -> bool {
    match record_value(customer, field) {
        RecordValue::Text(value) => value
            .map(|v| v.to_lowercase().contains(&wanted.to_lowercase()))
            .unwrap_or(false),
        RecordValue::Flag(value) => parse_flag(wanted) == Some(value),
        RecordValue::Timestamp(value) => match (value, parse_timestamp(wanted)) {
            (Some(actual), Some(wanted)) => actual.date() == wanted.date(),
            _ => false,
        },
    }
}

/// Active filter values keyed by field.
///
/// The key set is fixed at construction: every [`FilterField`] is present and
/// an empty value means the field is unconstrained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<FilterField, String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            values: FilterField::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FilterField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Replaces a single value, trimming surrounding whitespace.
    pub fn set(&mut self, field: FilterField, value: impl AsRef<str>) {
        if let Some(slot) = self.values.get_mut(&field) {
            *slot = value.as_ref().trim().to_string();
        }
    }

    /// Merges a partial update; fields not mentioned keep their value.
    pub fn merge<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (FilterField, S)>,
        S: AsRef<str>,
    {
        for (field, value) in fields {
            self.set(field, value);
        }
    }

    /// Resets every field to the empty value.
    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    /// `true` when at least one field carries a constraint.
    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
    }

    /// Non-empty constraints in field order.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(field, v)| (*field, v.as_str()))
    }

    /// Number of fields, always `FilterField::ALL.len()`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A record matches when every non-empty constraint matches.
    pub fn matches(&self, customer: &Customer) -> bool {
        self.active()
            .all(|(field, wanted)| field_matches(customer, field, wanted))
    }

    /// Client-side fallback used only when the filter endpoint is unavailable.
    ///
    /// Filters the given slice, so results are limited to the rows already
    /// fetched.
    pub fn filter_rows<'a>(&self, rows: &'a [Customer]) -> Vec<&'a Customer> {
        rows.iter().filter(|c| self.matches(c)).collect()
    }
}
