//! User intents as data.
//!
//! The presentation layer can call [`CheckoutFlow`] methods directly, or hand
//! over serialized [`Intent`]s (one per button press or field edit) through a
//! single [`CheckoutFlow::dispatch`] entry point.
//!
//! # Wire format
//!
//! ```json
//! {"intent": "add", "product_id": "pea", "name": "Pea Shoots", "unit_price": "100"}
//! {"intent": "decrease", "product_id": "pea"}
//! {"intent": "update_field", "field": "phone", "value": "+91 9876543210"}
//! {"intent": "cancel_order", "confirmed": true}
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::{CheckoutError, CheckoutFlow};
use crate::form::{FieldName, FieldStatus};
use crate::message::{MessageChannel, OrderMessage};
use crate::types::{PaymentMethod, Price, ProductId};
use crate::view::Renderer;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Add {
        product_id: ProductId,
        name: String,
        unit_price: Price,
    },
    Increase {
        product_id: ProductId,
    },
    Decrease {
        product_id: ProductId,
    },
    Remove {
        product_id: ProductId,
    },
    OpenCart,
    BeginCheckout,
    SelectPayment {
        method: PaymentMethod,
    },
    UpdateField {
        field: FieldName,
        value: String,
    },
    SubmitOrder,
    CancelOrder {
        confirmed: bool,
    },
}

impl Intent {
    /// Parse one JSON-encoded intent.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the input is not a valid intent.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Increase { .. } => "increase",
            Self::Decrease { .. } => "decrease",
            Self::Remove { .. } => "remove",
            Self::OpenCart => "open_cart",
            Self::BeginCheckout => "begin_checkout",
            Self::SelectPayment { .. } => "select_payment",
            Self::UpdateField { .. } => "update_field",
            Self::SubmitOrder => "submit_order",
            Self::CancelOrder { .. } => "cancel_order",
        }
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The intent was applied (or was a permitted no-op).
    Applied,
    /// A line now has this quantity (0 after a decrease removed it).
    Quantity(u32),
    /// A field was edited.
    Field(FieldStatus),
    /// The order was sent.
    Submitted(OrderMessage),
    /// The user confirmed cancellation and the flow was reset.
    Cancelled,
    /// The user declined to cancel.
    Kept,
}

impl<C: MessageChannel, R: Renderer> CheckoutFlow<C, R> {
    /// Route an intent to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying operation returns.
    #[instrument(skip_all, fields(intent = intent.name()))]
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, CheckoutError> {
        let outcome = match intent {
            Intent::Add {
                product_id,
                name,
                unit_price,
            } => Outcome::Quantity(self.add(product_id, name, unit_price)?),
            Intent::Increase { product_id } => Outcome::Quantity(self.increase(&product_id)?),
            Intent::Decrease { product_id } => Outcome::Quantity(self.decrease(&product_id)?),
            Intent::Remove { product_id } => {
                self.remove(&product_id);
                Outcome::Applied
            }
            Intent::OpenCart => {
                self.open_cart();
                Outcome::Applied
            }
            Intent::BeginCheckout => {
                self.begin_checkout()?;
                Outcome::Applied
            }
            Intent::SelectPayment { method } => {
                self.select_payment(method)?;
                Outcome::Applied
            }
            Intent::UpdateField { field, value } => {
                Outcome::Field(self.update_field(field, &value))
            }
            Intent::SubmitOrder => Outcome::Submitted(self.submit_order()?),
            Intent::CancelOrder { confirmed } => {
                if self.cancel_order(confirmed)? {
                    Outcome::Cancelled
                } else {
                    Outcome::Kept
                }
            }
        };
        Ok(outcome)
    }
}
