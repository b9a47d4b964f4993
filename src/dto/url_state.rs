//! Address-bar representation of the list screen state.
//!
//! Parameters use the backend's snake_case names: `current_page`,
//! `per_page` and one parameter per non-empty filter field (`first_name`,
//! `is_activated`, ...). Pagination parameters always come first, filter
//! parameters follow in [`FilterField::ALL`] order.

use std::collections::BTreeMap;

use crate::domain::filter::{FilterField, FilterState};
use crate::domain::types::PerPage;
use crate::pagination::PaginationState;

pub const CURRENT_PAGE_PARAM: &str = "current_page";
pub const PER_PAGE_PARAM: &str = "per_page";

/// Query parameters by name. A repeated name keeps its last value.
#[derive(Debug, Default)]
struct RawListQuery {
    params: BTreeMap<String, String>,
}

impl RawListQuery {
    fn decode(query: &str) -> Self {
        let pairs: Vec<(String, String)> = match serde_html_form::from_str(query) {
            Ok(pairs) => pairs,
            Err(err) => {
                log::debug!("Ignoring unparseable list query {query:?}: {err}");
                return Self::default();
            }
        };

        let mut params = BTreeMap::new();
        for (name, value) in pairs {
            if let Some(previous) = params.insert(name.clone(), value) {
                log::debug!("Repeated {name}, dropping {previous:?}");
            }
        }
        Self { params }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// State recovered from a query string.
///
/// Missing or malformed parameters are `None`/empty so the caller can apply
/// its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListUrlState {
    pub current_page: Option<u32>,
    pub per_page: Option<PerPage>,
    pub filter: FilterState,
}

impl ListUrlState {
    /// Parses a query string (with or without the leading `?`).
    ///
    /// Never fails: anything unparseable is dropped and logged at debug level.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let raw = RawListQuery::decode(query);

        let current_page = raw.get(CURRENT_PAGE_PARAM).and_then(|value| {
            match value.trim().parse::<u32>() {
                Ok(page) if page >= 1 => Some(page),
                _ => {
                    log::debug!("Ignoring {CURRENT_PAGE_PARAM}={value:?}");
                    None
                }
            }
        });

        let per_page = raw
            .get(PER_PAGE_PARAM)
            .and_then(|value| match value.parse::<PerPage>() {
                Ok(per_page) => Some(per_page),
                Err(err) => {
                    log::debug!("Ignoring {PER_PAGE_PARAM}={value:?}: {err}");
                    None
                }
            });

        let mut filter = FilterState::new();
        for field in FilterField::ALL {
            let Some(value) = raw.get(field.as_str()).map(str::trim) else {
                continue;
            };
            if field.accepts(value) {
                filter.set(field, value);
            } else {
                log::debug!("Ignoring {field}={value:?}");
            }
        }

        Self {
            current_page,
            per_page,
            filter,
        }
    }

    /// Serializes pagination and filter state into the canonical query string.
    pub fn encode(pagination: &PaginationState, filter: &FilterState) -> String {
        let mut pairs: Vec<(&str, String)> = vec![
            (CURRENT_PAGE_PARAM, pagination.current_page().to_string()),
            (PER_PAGE_PARAM, pagination.per_page().to_string()),
        ];
        pairs.extend(
            filter
                .active()
                .map(|(field, value)| (field.as_str(), value.to_string())),
        );

        serde_html_form::to_string(&pairs).unwrap_or_else(|err| {
            log::error!("Failed to encode list query: {err}");
            String::new()
        })
    }
}
