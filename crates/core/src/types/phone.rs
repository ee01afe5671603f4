//! Phone field with an immutable country-code prefix.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Country prefix the storefront delivers to.
pub const DEFAULT_PHONE_PREFIX: &str = "+91 ";

/// The delivery phone number as typed into the form.
///
/// The value always starts with a fixed country-code prefix that edits cannot
/// remove or overwrite. Everything after the prefix is restricted to ASCII digits.
///
/// ## Edit rules
///
/// [`PhoneNumber::apply_edit`] receives the full raw value of the input after
/// the user's edit:
///
/// - Shorter than the prefix (e.g. the whole value was replaced by a short
///   paste): reset to the bare prefix.
/// - Does not start with the prefix (the edit touched the prefix): rejected,
///   the value is unchanged.
/// - Otherwise: non-digits after the prefix are stripped.
///
/// ## Examples
///
/// ```
/// use greenleaf_core::PhoneNumber;
///
/// let mut phone = PhoneNumber::new("+91 ");
/// phone.apply_edit("+91 98a76");
/// assert_eq!(phone.value(), "+91 9876");
///
/// // Deleting inside the prefix is ignored
/// phone.apply_edit("+9 9876");
/// assert_eq!(phone.value(), "+91 9876");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    prefix: String,
    digits: String,
}

/// What an edit did to the phone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneEdit {
    /// Digits after the prefix were updated (possibly with characters stripped).
    Accepted,
    /// The edit touched the prefix and was discarded.
    Rejected,
    /// The value was shorter than the prefix and was reset to the bare prefix.
    Reset,
}

impl PhoneNumber {
    /// Create an empty phone value carrying only the prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            digits: String::new(),
        }
    }

    /// Apply a raw edit of the whole input value.
    pub fn apply_edit(&mut self, raw: &str) -> PhoneEdit {
        if raw.len() < self.prefix.len() {
            self.digits.clear();
            return PhoneEdit::Reset;
        }

        let Some(rest) = raw.strip_prefix(self.prefix.as_str()) else {
            return PhoneEdit::Rejected;
        };

        self.digits = rest.chars().filter(char::is_ascii_digit).collect();
        PhoneEdit::Accepted
    }

    /// Returns the full value including the prefix (e.g. `"+91 9876543210"`).
    #[must_use]
    pub fn value(&self) -> String {
        format!("{}{}", self.prefix, self.digits)
    }

    /// Returns the immutable prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the digits entered after the prefix.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns `true` if nothing has been entered after the prefix.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns `true` if exactly `required_digits` digits follow the prefix.
    #[must_use]
    pub fn is_complete(&self, required_digits: usize) -> bool {
        self.digits.len() == required_digits
    }

    /// Reset to the bare prefix.
    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE_PREFIX)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_as_bare_prefix() {
        let phone = PhoneNumber::default();
        assert_eq!(phone.value(), "+91 ");
        assert!(phone.is_blank());
    }

    #[test]
    fn test_strips_non_digits_after_prefix() {
        let mut phone = PhoneNumber::default();
        assert_eq!(phone.apply_edit("+91 98-76 x54"), PhoneEdit::Accepted);
        assert_eq!(phone.digits(), "987654");
    }

    #[test]
    fn test_rejects_edit_inside_prefix() {
        let mut phone = PhoneNumber::default();
        phone.apply_edit("+91 12345");
        assert_eq!(phone.apply_edit("+1 12345"), PhoneEdit::Rejected);
        assert_eq!(phone.value(), "+91 12345");
    }

    #[test]
    fn test_rejects_overwrite_of_prefix() {
        let mut phone = PhoneNumber::default();
        phone.apply_edit("+91 555");
        assert_eq!(phone.apply_edit("+44 555"), PhoneEdit::Rejected);
        assert_eq!(phone.value(), "+91 555");
    }

    #[test]
    fn test_short_value_resets_to_prefix() {
        let mut phone = PhoneNumber::default();
        phone.apply_edit("+91 98765");
        assert_eq!(phone.apply_edit("+9"), PhoneEdit::Reset);
        assert_eq!(phone.value(), "+91 ");
    }

    #[test]
    fn test_complete_with_exact_digit_count() {
        let mut phone = PhoneNumber::default();
        phone.apply_edit("+91 987654321");
        assert!(!phone.is_complete(10));
        phone.apply_edit("+91 9876543210");
        assert!(phone.is_complete(10));
        phone.apply_edit("+91 98765432109");
        assert!(!phone.is_complete(10));
    }

    #[test]
    fn test_clear() {
        let mut phone = PhoneNumber::new("+1 ");
        phone.apply_edit("+1 5551234567");
        phone.clear();
        assert_eq!(phone.to_string(), "+1 ");
    }
}
