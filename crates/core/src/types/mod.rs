//! Core value types for Greenleaf.
//!
//! This module provides type-safe wrappers for product IDs, prices, payment
//! methods and the prefixed phone field.

pub mod id;
pub mod payment;
pub mod phone;
pub mod price;

pub use id::ProductId;
pub use payment::PaymentMethod;
pub use phone::{DEFAULT_PHONE_PREFIX, PhoneEdit, PhoneNumber};
pub use price::Price;
