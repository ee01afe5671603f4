//! The checkout state machine.
//!
//! [`CheckoutFlow`] owns the cart, the delivery form and the current
//! [`CheckoutStage`]. Every intent from the presentation layer goes through it:
//!
//! ```text
//! Browsing ──open_cart──▶ ReviewingCart ──begin_checkout──▶ Payment
//!    ▲                          ▲                              │
//!    │                          └──────────open_cart───────────┤
//!    └──────────── submit_order / cancel_order(true) ──────────┘
//! ```
//!
//! Guards run before any mutation, so a rejected intent leaves the cart, the
//! form and the stage exactly as they were.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::cart::{CartError, CartStore};
use crate::config::CheckoutConfig;
use crate::form::{DeliveryForm, FieldName, FieldStatus};
use crate::message::{MessageChannel, Order, OrderMessage};
use crate::types::{PaymentMethod, Price, ProductId};
use crate::view::{CheckoutView, NoopRenderer, OrderSummary, Renderer};

/// Which panel is showing. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    #[default]
    Browsing,
    ReviewingCart,
    Payment,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browsing => write!(f, "browsing"),
            Self::ReviewingCart => write!(f, "reviewing cart"),
            Self::Payment => write!(f, "payment"),
        }
    }
}

/// Errors returned by checkout intents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout (or submission) attempted with nothing in the cart.
    #[error("your cart is empty")]
    EmptyCart,

    /// Required delivery fields are blank.
    #[error("please fill all details (missing: {})", join_fields(.0))]
    MissingFields(Vec<FieldName>),

    /// No payment method has been selected.
    #[error("please select a payment method")]
    NoPaymentMethod,

    /// The intent is not available in the current stage.
    #[error("not available while {actual} (requires {expected})")]
    WrongStage {
        expected: CheckoutStage,
        actual: CheckoutStage,
    },

    /// A cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

fn join_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cart, delivery form and stage, driven by user intents.
///
/// `C` receives the order message on submission and `R` is redrawn after
/// every successful state change.
///
/// # Example
///
/// ```rust
/// use greenleaf_core::{
///     CheckoutConfig, CheckoutFlow, CheckoutStage, FieldName, PaymentMethod, Price, ProductId,
///     RecordingChannel,
/// };
///
/// let config = CheckoutConfig::default();
/// let mut flow = CheckoutFlow::without_renderer(config, RecordingChannel::new());
/// flow.add(ProductId::new("pea"), "Pea Shoots", Price::from_units(100)).unwrap();
/// flow.open_cart();
/// flow.begin_checkout().unwrap();
///
/// flow.update_field(FieldName::Name, "Asha Rao");
/// flow.update_field(FieldName::Address, "12 Elm Street, Pune");
/// flow.update_field(FieldName::Phone, "+91 9876543210");
/// flow.select_payment(PaymentMethod::Upi).unwrap();
///
/// let message = flow.submit_order().unwrap();
/// assert!(message.text.contains("Pea Shoots x1"));
/// assert_eq!(flow.stage(), CheckoutStage::Browsing);
/// assert!(flow.cart().is_empty());
/// ```
#[derive(Debug)]
pub struct CheckoutFlow<C, R = NoopRenderer> {
    config: CheckoutConfig,
    cart: CartStore,
    form: DeliveryForm,
    stage: CheckoutStage,
    summary: Option<OrderSummary>,
    channel: C,
    renderer: R,
}

impl<C: MessageChannel> CheckoutFlow<C, NoopRenderer> {
    /// Create a flow that renders nothing.
    #[must_use]
    pub fn without_renderer(config: CheckoutConfig, channel: C) -> Self {
        Self::new(config, channel, NoopRenderer)
    }
}

impl<C: MessageChannel, R: Renderer> CheckoutFlow<C, R> {
    /// Create a flow in the [`CheckoutStage::Browsing`] stage with an empty cart.
    #[must_use]
    pub fn new(config: CheckoutConfig, channel: C, renderer: R) -> Self {
        Self {
            cart: CartStore::with_delivery_fee(config.delivery_fee),
            form: DeliveryForm::new(&config.phone_prefix),
            stage: CheckoutStage::Browsing,
            summary: None,
            channel,
            renderer,
            config,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The cart (read-only).
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The delivery form (read-only).
    #[must_use]
    pub const fn form(&self) -> &DeliveryForm {
        &self.form
    }

    /// The active stage.
    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// The payment panel summary, present only in [`CheckoutStage::Payment`].
    #[must_use]
    pub const fn summary(&self) -> Option<&OrderSummary> {
        self.summary.as_ref()
    }

    /// The configuration this flow was built with.
    #[must_use]
    pub const fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// The message channel.
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Build a snapshot of the current state.
    #[must_use]
    pub fn view(&self) -> CheckoutView {
        CheckoutView {
            stage: self.stage,
            items: self.cart.items().to_vec(),
            item_count: self.cart.item_count(),
            subtotal: self.cart.subtotal(),
            delivery_fee: self.cart.delivery_fee(),
            total: self.cart.total(),
            field_validity: self.form.validity(),
            payment_method: self.form.payment_method,
            summary: self.summary.clone(),
        }
    }

    // =========================================================================
    // Cart intents
    // =========================================================================

    /// Add one unit of a product. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] if the price is negative or the cart
    /// total would overflow.
    #[instrument(skip(self, name))]
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
    ) -> Result<u32, CheckoutError> {
        let quantity = self
            .cart
            .add(product_id, name, unit_price)
            .inspect_err(|e| warn!(error = %e, "Add rejected"))?;
        self.refresh();
        Ok(quantity)
    }

    /// Increment a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] if the product is not in the cart.
    #[instrument(skip(self))]
    pub fn increase(&mut self, product_id: &ProductId) -> Result<u32, CheckoutError> {
        let quantity = self.cart.increase(product_id).inspect_err(|e| {
            warn!(error = %e, "Increase rejected");
        })?;
        self.refresh();
        Ok(quantity)
    }

    /// Decrement a line's quantity, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] if the product is not in the cart.
    #[instrument(skip(self))]
    pub fn decrease(&mut self, product_id: &ProductId) -> Result<u32, CheckoutError> {
        let quantity = self.cart.decrease(product_id).inspect_err(|e| {
            warn!(error = %e, "Decrease rejected");
        })?;
        self.refresh();
        Ok(quantity)
    }

    /// Remove a line. Removing an absent product is a no-op.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let removed = self.cart.remove(product_id);
        if removed {
            self.refresh();
        }
        removed
    }

    // =========================================================================
    // Stage transitions
    // =========================================================================

    /// Show the cart. Allowed from any stage.
    #[instrument(skip(self), fields(from = %self.stage))]
    pub fn open_cart(&mut self) {
        self.summary = None;
        self.transition(CheckoutStage::ReviewingCart);
        self.refresh();
    }

    /// Move from the cart to the payment panel, freezing the order summary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty, or
    /// [`CheckoutError::WrongStage`] if the cart is not being reviewed.
    #[instrument(skip(self), fields(items = self.cart.items().len()))]
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        self.require_stage(CheckoutStage::ReviewingCart)?;

        self.summary = Some(OrderSummary::capture(&self.cart));
        self.transition(CheckoutStage::Payment);
        self.refresh();
        Ok(())
    }

    /// Select the payment method, replacing any previous choice.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStage`] outside the payment panel.
    #[instrument(skip(self))]
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Payment)?;
        self.form.payment_method = Some(method);
        debug!("Payment method selected");
        self.refresh();
        Ok(())
    }

    /// Sanitize, store and validate one delivery field. Allowed in any stage.
    ///
    /// The returned status is advisory and never blocks anything.
    #[instrument(skip(self, raw))]
    pub fn update_field(&mut self, field: FieldName, raw: &str) -> FieldStatus {
        let status = self.form.update(field, raw, &self.config);
        debug!(?status, "Field updated");
        self.refresh();
        status
    }

    /// Submit the order.
    ///
    /// Checks, in order: required fields, payment method, non-empty cart. On
    /// success the order message is dispatched and the flow is fully reset.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::WrongStage`] outside the payment panel
    /// - [`CheckoutError::MissingFields`] if name, address or phone is blank
    /// - [`CheckoutError::NoPaymentMethod`] if no method is selected
    /// - [`CheckoutError::EmptyCart`] if the cart was emptied during payment
    #[instrument(skip(self))]
    pub fn submit_order(&mut self) -> Result<OrderMessage, CheckoutError> {
        self.require_stage(CheckoutStage::Payment)?;

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Submission rejected: missing fields");
            return Err(CheckoutError::MissingFields(missing));
        }

        let Some(payment_method) = self.form.payment_method else {
            warn!("Submission rejected: no payment method");
            return Err(CheckoutError::NoPaymentMethod);
        };

        if self.cart.is_empty() {
            warn!("Submission rejected: empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let order = Order {
            items: self.cart.items().to_vec(),
            subtotal: self.cart.subtotal(),
            delivery_fee: self.cart.delivery_fee(),
            total: self.cart.total(),
            form: self.form.clone(),
            payment_method,
        };
        let message =
            OrderMessage::build(&order, &self.config.currency_symbol, &self.config.endpoint);

        info!(
            items = order.items.len(),
            total = %order.total,
            payment = %payment_method,
            "Dispatching order message"
        );
        self.channel.dispatch(&message);

        self.reset();
        self.refresh();
        Ok(message)
    }

    /// Abandon the order after the user confirmed.
    ///
    /// Returns `true` if the flow was reset, `false` if the user declined
    /// (nothing changes).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStage`] outside the payment panel.
    #[instrument(skip(self))]
    pub fn cancel_order(&mut self, confirmed: bool) -> Result<bool, CheckoutError> {
        self.require_stage(CheckoutStage::Payment)?;

        if !confirmed {
            debug!("Cancellation declined");
            return Ok(false);
        }

        info!("Order cancelled");
        self.reset();
        self.refresh();
        Ok(true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_stage(&self, expected: CheckoutStage) -> Result<(), CheckoutError> {
        if self.stage == expected {
            Ok(())
        } else {
            warn!(%expected, actual = %self.stage, "Intent not available in this stage");
            Err(CheckoutError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    fn transition(&mut self, to: CheckoutStage) {
        if self.stage != to {
            info!(from = %self.stage, %to, "Stage changed");
        }
        self.stage = to;
    }

    /// Clear cart, form, payment selection and summary; return to browsing.
    fn reset(&mut self) {
        self.cart.clear();
        self.form.reset();
        self.summary = None;
        self.transition(CheckoutStage::Browsing);
    }

    fn refresh(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }
}
