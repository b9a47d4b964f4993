//! DTOs that bridge the REST API and the address bar with the domain layer.

pub mod api;
pub mod url_state;
