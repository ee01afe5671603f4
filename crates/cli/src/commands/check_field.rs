//! Validate a single delivery field.
//!
//! # Usage
//!
//! ```bash
//! gl-cli check-field --field name --value "Asha Rao"
//! gl-cli check-field --field phone --value "+91 98765 43210"
//! ```
//!
//! Prints the stored (sanitized) value and its status.

use std::io::{self, Write};

use greenleaf_core::{DeliveryForm, FieldName, FieldStatus};

use super::CliError;
use crate::config::CliConfig;

/// Check `value` for `field` and print the result to stdout.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn check_field(
    config: &CliConfig,
    field: FieldName,
    value: &str,
) -> Result<FieldStatus, CliError> {
    let mut out = io::stdout().lock();
    check_field_to(config, field, value, &mut out)
}

/// Check `value` for `field`, writing the result to `out`.
///
/// # Errors
///
/// Returns `CliError::Io` if writing fails.
pub fn check_field_to(
    config: &CliConfig,
    field: FieldName,
    value: &str,
    out: &mut impl Write,
) -> Result<FieldStatus, CliError> {
    let checkout = &config.checkout;
    let mut form = DeliveryForm::new(&checkout.phone_prefix);
    let status = form.update(field, value, checkout);

    let stored = match field {
        FieldName::Name => form.name,
        FieldName::Address => form.address,
        FieldName::Phone => form.phone.value(),
    };

    writeln!(out, "{field}: {stored}")?;
    match status {
        FieldStatus::Invalid(error) => writeln!(out, "status: invalid ({error})")?,
        FieldStatus::Valid | FieldStatus::Untouched => writeln!(out, "status: valid")?,
    }

    Ok(status)
}
