//! Integration tests for Greenleaf.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenleaf-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - End-to-end browse, review, pay and submit sessions
//! - `cart_properties` - Seeded random sequences against cart invariants
//! - `shared_checkout` - Concurrent callers through `SharedCheckout`
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use greenleaf_core::{
    CheckoutConfig, CheckoutError, CheckoutFlow, CheckoutView, FieldName, PaymentMethod, Price,
    ProductId, RecordingChannel,
};

/// Renderer that keeps every view it was handed.
#[derive(Debug, Default)]
pub struct ViewLog {
    pub views: Vec<CheckoutView>,
}

impl greenleaf_core::Renderer for ViewLog {
    fn render(&mut self, view: &CheckoutView) {
        self.views.push(view.clone());
    }
}

/// Flow wired to in-memory adapters.
pub type TestFlow = CheckoutFlow<RecordingChannel, ViewLog>;

/// A flow with default settings and in-memory adapters.
#[must_use]
pub fn test_flow() -> TestFlow {
    CheckoutFlow::new(
        CheckoutConfig::default(),
        RecordingChannel::new(),
        ViewLog::default(),
    )
}

/// A catalog product: id, name and unit price in whole rupees.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
}

impl Product {
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.id)
    }

    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::from_units(self.price)
    }
}

pub const PEA_SHOOTS: Product = Product {
    id: "pea-shoots",
    name: "Pea Shoots",
    price: 100,
};

pub const RADISH: Product = Product {
    id: "radish",
    name: "Radish",
    price: 50,
};

pub const SUNFLOWER: Product = Product {
    id: "sunflower",
    name: "Sunflower",
    price: 80,
};

/// Products used by the random sequence tests.
pub const CATALOG: [Product; 3] = [PEA_SHOOTS, RADISH, SUNFLOWER];

/// Add `product` once.
///
/// # Errors
///
/// Returns the cart error if the product's price is rejected.
pub fn add(flow: &mut TestFlow, product: Product) -> Result<u32, CheckoutError> {
    flow.add(product.product_id(), product.name, product.unit_price())
}

/// Fill every delivery field with valid values and pick `method`.
///
/// # Errors
///
/// Returns the payment selection error outside the payment stage.
pub fn fill_delivery_details(
    flow: &mut TestFlow,
    method: PaymentMethod,
) -> Result<(), CheckoutError> {
    flow.update_field(FieldName::Name, "Asha Rao");
    flow.update_field(FieldName::Address, "12 Elm Street, Pune");
    flow.update_field(FieldName::Phone, "+91 9876543210");
    flow.select_payment(method)
}
