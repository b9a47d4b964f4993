use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::lenient::parse_timestamp;
use crate::domain::types::{CustomerEmail, CustomerName, PhoneNumber};
use crate::forms::{FormError, validate_local_phone, validate_optional_timestamp};

fn default_activated() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for the create-customer screen.
pub struct CreateCustomerForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom(function = "validate_local_phone")
    )]
    pub phone: String,
    #[serde(default = "default_activated")]
    pub is_activated: bool,
}

impl Default for CreateCustomerForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            is_activated: default_activated(),
        }
    }
}

impl TryFrom<CreateCustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: CreateCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCustomer {
            first_name: CustomerName::new(form.first_name).map_err(|_| FormError::InvalidName)?,
            last_name: CustomerName::new(form.last_name).map_err(|_| FormError::InvalidName)?,
            email: CustomerEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            is_activated: form.is_activated,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for the edit-customer screen.
pub struct EditCustomerForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom(function = "validate_local_phone")
    )]
    pub phone: String,
    /// `YYYY-MM-DDTHH:MM` as produced by a `datetime-local` input.
    #[serde(default)]
    #[validate(custom(function = "validate_optional_timestamp"))]
    pub created_at: String,
}

impl EditCustomerForm {
    /// Prefills the form from the record being edited.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            created_at: customer
                .created_at
                .map(|ts| ts.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

impl TryFrom<EditCustomerForm> for UpdateCustomer {
    type Error = FormError;

    fn try_from(form: EditCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let created_at = if form.created_at.trim().is_empty() {
            None
        } else {
            Some(parse_timestamp(&form.created_at).ok_or(FormError::InvalidDate)?)
        };

        Ok(UpdateCustomer {
            first_name: CustomerName::new(form.first_name).map_err(|_| FormError::InvalidName)?,
            last_name: CustomerName::new(form.last_name).map_err(|_| FormError::InvalidName)?,
            email: CustomerEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            created_at,
        })
    }
}
