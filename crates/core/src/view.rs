//! Render snapshots handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, LineItem};
use crate::checkout::CheckoutStage;
use crate::form::FieldValidity;
use crate::types::{PaymentMethod, Price, ProductId};

/// One row of the payment panel's order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub line_total: Price,
}

impl SummaryLine {
    /// Row label, e.g. `"Pea Shoots x2"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} x{}", self.name, self.quantity)
    }
}

/// Frozen copy of the cart taken when the payment panel opens.
///
/// Later cart edits do not change it; it is only retaken the next time
/// checkout begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Snapshot the current cart.
    #[must_use]
    pub fn capture(cart: &CartStore) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| SummaryLine {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: cart.subtotal(),
            delivery_fee: cart.delivery_fee(),
            total: cart.total(),
        }
    }
}

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutView {
    pub stage: CheckoutStage,
    pub items: Vec<LineItem>,
    /// Badge count (sum of quantities)
    pub item_count: u32,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub field_validity: FieldValidity,
    pub payment_method: Option<PaymentMethod>,
    /// Present while the payment panel is showing
    pub summary: Option<OrderSummary>,
}

impl CheckoutView {
    /// Returns `true` if the product has a line (drives the "Added" button state).
    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }
}

/// Receives a fresh [`CheckoutView`] after every successful state change.
pub trait Renderer {
    /// Draw the view.
    fn render(&mut self, view: &CheckoutView);
}

impl<F> Renderer for F
where
    F: FnMut(&CheckoutView),
{
    fn render(&mut self, view: &CheckoutView) {
        self(view);
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _view: &CheckoutView) {}
}
