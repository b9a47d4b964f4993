//! Domain records and value objects shared by the list and form screens.

pub mod customer;
pub mod filter;
pub mod lenient;
pub mod types;
