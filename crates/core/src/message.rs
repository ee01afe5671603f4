//! Order snapshots and the outbound order message.
//!
//! On submission the flow freezes the cart and form into an [`Order`], renders
//! it as plain text and hands the resulting [`OrderMessage`] to a
//! [`MessageChannel`]. Delivery of that message is the channel's business; the
//! core never learns whether it arrived.
//!
//! # Message format
//!
//! ```text
//! New order
//! Name: Asha Rao
//! Address: 12 Elm Street, Pune
//! Phone: +91 9876543210
//! Payment: UPI
//!
//! Items:
//! Pea Shoots x2
//! Radish x1
//!
//! Total: ₹280.00
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use url::form_urlencoded;

use crate::cart::LineItem;
use crate::form::DeliveryForm;
use crate::types::{PaymentMethod, Price};

/// Default chat endpoint that receives order messages.
pub const DEFAULT_ENDPOINT_BASE: &str = "https://wa.me/919000000000";
/// Default query parameter carrying the message text.
pub const DEFAULT_ENDPOINT_PARAM: &str = "text";

/// Errors building a [`MessageEndpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The base is not a valid absolute URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
    /// Only http and https endpoints are supported.
    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
    /// The query parameter name is empty.
    #[error("endpoint query parameter cannot be empty")]
    EmptyParam,
}

/// A fixed external endpoint template: a base URL plus the query parameter
/// that carries the order text.
///
/// ```
/// use greenleaf_core::MessageEndpoint;
///
/// let endpoint = MessageEndpoint::parse("https://wa.me/15550001111", "text").unwrap();
/// assert_eq!(
///     endpoint.link_for("Hi there"),
///     "https://wa.me/15550001111?text=Hi+there"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEndpoint {
    base: String,
    param: String,
}

impl MessageEndpoint {
    /// Validate and build an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute http(s) URL or `param`
    /// is empty.
    pub fn parse(base: &str, param: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(base).map_err(|e| EndpointError::InvalidUrl(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(url.scheme().to_string()));
        }

        if param.trim().is_empty() {
            return Err(EndpointError::EmptyParam);
        }

        Ok(Self {
            base: url.to_string(),
            param: param.trim().to_string(),
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the query parameter name.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Build the link that delivers `text` to the endpoint.
    #[must_use]
    pub fn link_for(&self, text: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.param, text)
            .finish();
        let separator = if self.base.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.base)
    }
}

impl Default for MessageEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_ENDPOINT_BASE.to_string(),
            param: DEFAULT_ENDPOINT_PARAM.to_string(),
        }
    }
}

/// Immutable snapshot of everything being ordered, built at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<LineItem>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub form: DeliveryForm,
    pub payment_method: PaymentMethod,
}

impl Order {
    /// Render the human-readable order summary.
    #[must_use]
    pub fn summary_text(&self, currency_symbol: &str) -> String {
        let mut text = String::from("New order\n");
        let _ = writeln!(text, "Name: {}", self.form.name.trim());
        let _ = writeln!(text, "Address: {}", self.form.address.trim());
        let _ = writeln!(text, "Phone: {}", self.form.phone);
        let _ = writeln!(text, "Payment: {}", self.payment_method);
        text.push_str("\nItems:\n");
        for item in &self.items {
            let _ = writeln!(text, "{} x{}", item.name, item.quantity);
        }
        let _ = write!(text, "\nTotal: {}", self.total.display(currency_symbol));
        text
    }
}

/// The text payload and the link that delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMessage {
    pub text: String,
    pub link: String,
}

impl OrderMessage {
    /// Build the outbound message for an order.
    #[must_use]
    pub fn build(order: &Order, currency_symbol: &str, endpoint: &MessageEndpoint) -> Self {
        let text = order.summary_text(currency_symbol);
        let link = endpoint.link_for(&text);
        Self { text, link }
    }
}

/// Adapter that delivers order messages to the outside world.
///
/// Dispatch is fire-and-forget: implementations report their own failures
/// (logging, retries) and never feed them back into the checkout state.
pub trait MessageChannel {
    /// Hand a message to the channel.
    fn dispatch(&mut self, message: &OrderMessage);
}

impl<F> MessageChannel for F
where
    F: FnMut(&OrderMessage),
{
    fn dispatch(&mut self, message: &OrderMessage) {
        self(message);
    }
}

/// Channel that keeps every dispatched message in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    sent: Vec<OrderMessage>,
}

impl RecordingChannel {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { sent: Vec::new() }
    }

    /// Messages dispatched so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[OrderMessage] {
        &self.sent
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&OrderMessage> {
        self.sent.last()
    }
}

impl MessageChannel for RecordingChannel {
    fn dispatch(&mut self, message: &OrderMessage) {
        self.sent.push(message.clone());
    }
}
