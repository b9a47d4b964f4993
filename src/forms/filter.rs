//! Advanced search dialog of the customer list.

use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::{FilterField, FilterState};
use crate::forms::{
    FormError, validate_optional_date, validate_optional_email, validate_optional_flag,
    validate_optional_phone,
};

/// Every input of the dialog; empty inputs clear their constraint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FilterForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_email"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_flag"))]
    pub is_activated: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub created_at: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub updated_at: String,
}

impl FilterForm {
    /// Prefills the dialog with the active filter.
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            id: state.get(FilterField::Id).to_string(),
            first_name: state.get(FilterField::FirstName).to_string(),
            last_name: state.get(FilterField::LastName).to_string(),
            phone: state.get(FilterField::Phone).to_string(),
            email: state.get(FilterField::Email).to_string(),
            is_activated: state.get(FilterField::IsActivated).to_string(),
            created_by: state.get(FilterField::CreatedBy).to_string(),
            updated_by: state.get(FilterField::UpdatedBy).to_string(),
            created_at: state.get(FilterField::CreatedAt).to_string(),
            updated_at: state.get(FilterField::UpdatedAt).to_string(),
        }
    }

    /// Validates the inputs and returns the update for `apply_filter`.
    pub fn into_fields(self) -> Result<Vec<(FilterField, String)>, FormError> {
        self.validate()?;

        Ok(vec![
            (FilterField::Id, self.id),
            (FilterField::FirstName, self.first_name),
            (FilterField::LastName, self.last_name),
            (FilterField::Phone, self.phone),
            (FilterField::Email, self.email),
            (FilterField::IsActivated, self.is_activated),
            (FilterField::CreatedBy, self.created_by),
            (FilterField::UpdatedBy, self.updated_by),
            (FilterField::CreatedAt, self.created_at),
            (FilterField::UpdatedAt, self.updated_at),
        ])
    }
}
