//! Stable product identifiers.
//!
//! Every cart intent addresses its line item through a [`ProductId`], so the
//! presentation layer can route all quantity buttons through one delegated
//! handler instead of binding a listener per rendered row.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// The storefront uses short string slugs (`"pea-shoots"`, `"sunflower"`) taken
/// from the product card markup.
///
/// # Example
///
/// ```rust
/// use greenleaf_core::ProductId;
///
/// let id = ProductId::new("pea-shoots");
/// assert_eq!(id.as_str(), "pea-shoots");
/// assert_eq!(id, ProductId::from("pea-shoots"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
