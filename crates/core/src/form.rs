//! Delivery form fields and their validators.
//!
//! Validation here is advisory: each edit reports a [`FieldStatus`] for the
//! presentation layer to show inline. Only the required-field check performed
//! at submission blocks anything.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CheckoutConfig;
use crate::types::{PaymentMethod, PhoneNumber};

/// Per-field validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// The name is too short after stripping disallowed characters.
    #[error("please enter your full name")]
    InvalidName,
    /// The address is too short to deliver to.
    #[error("please enter a complete delivery address")]
    IncompleteAddress,
    /// The phone number does not have the required number of digits.
    #[error("please enter a valid phone number")]
    InvalidPhone,
}

/// Validity of a single field after its latest edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum FieldStatus {
    /// Not edited since the last reset.
    #[default]
    Untouched,
    Valid,
    Invalid(FieldError),
}

impl FieldStatus {
    /// Returns `true` for [`FieldStatus::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    fn from_check(check: Result<(), FieldError>) -> Self {
        match check {
            Ok(()) => Self::Valid,
            Err(e) => Self::Invalid(e),
        }
    }
}

/// The editable delivery form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Address,
    Phone,
}

impl FieldName {
    /// Fields in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Address, Self::Phone];
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Address => write!(f, "address"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

impl std::str::FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "address" => Ok(Self::Address),
            "phone" => Ok(Self::Phone),
            _ => Err(format!("invalid field: {s}")),
        }
    }
}

/// Latest status of every field, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldValidity {
    pub name: FieldStatus,
    pub address: FieldStatus,
    pub phone: FieldStatus,
}

impl FieldValidity {
    /// Returns the status recorded for `field`.
    #[must_use]
    pub const fn get(&self, field: FieldName) -> FieldStatus {
        match field {
            FieldName::Name => self.name,
            FieldName::Address => self.address,
            FieldName::Phone => self.phone,
        }
    }

    fn set(&mut self, field: FieldName, status: FieldStatus) {
        match field {
            FieldName::Name => self.name = status,
            FieldName::Address => self.address = status,
            FieldName::Phone => self.phone = status,
        }
    }
}

/// Strip everything except letters and spaces.
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .collect()
}

/// Check a sanitized name.
///
/// # Errors
///
/// Returns [`FieldError::InvalidName`] if the trimmed name has fewer than
/// `min_len` characters.
pub fn validate_name(name: &str, min_len: usize) -> Result<(), FieldError> {
    if name.trim().chars().count() >= min_len {
        Ok(())
    } else {
        Err(FieldError::InvalidName)
    }
}

/// Check an address.
///
/// # Errors
///
/// Returns [`FieldError::IncompleteAddress`] if the trimmed address has fewer
/// than `min_len` characters.
pub fn validate_address(address: &str, min_len: usize) -> Result<(), FieldError> {
    if address.trim().chars().count() >= min_len {
        Ok(())
    } else {
        Err(FieldError::IncompleteAddress)
    }
}

/// Check a phone number.
///
/// # Errors
///
/// Returns [`FieldError::InvalidPhone`] unless exactly `required_digits`
/// digits follow the prefix.
pub fn validate_phone(phone: &PhoneNumber, required_digits: usize) -> Result<(), FieldError> {
    if phone.is_complete(required_digits) {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

/// Delivery details and payment selection collected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryForm {
    pub name: String,
    pub address: String,
    pub phone: PhoneNumber,
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip)]
    validity: FieldValidity,
}

impl DeliveryForm {
    /// An empty form whose phone carries `phone_prefix`.
    #[must_use]
    pub fn new(phone_prefix: &str) -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: PhoneNumber::new(phone_prefix),
            payment_method: None,
            validity: FieldValidity::default(),
        }
    }

    /// Sanitize and store one field, then re-validate it.
    pub fn update(&mut self, field: FieldName, raw: &str, config: &CheckoutConfig) -> FieldStatus {
        let check = match field {
            FieldName::Name => {
                self.name = sanitize_name(raw);
                validate_name(&self.name, config.name_min_len)
            }
            FieldName::Address => {
                self.address = raw.to_owned();
                validate_address(&self.address, config.address_min_len)
            }
            FieldName::Phone => {
                self.phone.apply_edit(raw);
                validate_phone(&self.phone, config.phone_digits)
            }
        };

        let status = FieldStatus::from_check(check);
        self.validity.set(field, status);
        status
    }

    /// Fields that are blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|field| match field {
                FieldName::Name => self.name.trim().is_empty(),
                FieldName::Address => self.address.trim().is_empty(),
                FieldName::Phone => self.phone.is_blank(),
            })
            .collect()
    }

    /// Latest status of each field.
    #[must_use]
    pub const fn validity(&self) -> FieldValidity {
        self.validity
    }

    /// Clear every field, keeping the phone prefix.
    pub fn reset(&mut self) {
        self.name.clear();
        self.address.clear();
        self.phone.clear();
        self.payment_method = None;
        self.validity = FieldValidity::default();
    }
}

impl Default for DeliveryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: PhoneNumber::default(),
            payment_method: None,
            validity: FieldValidity::default(),
        }
    }
}
