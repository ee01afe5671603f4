//! In-memory cart with derived totals.
//!
//! [`CartStore`] owns the ordered list of [`LineItem`]s. Insertion order is
//! display order. Totals are computed from the items on every read and are
//! never stored, so they cannot go stale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{Price, ProductId};

/// Flat delivery fee charged on any non-empty cart.
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Errors returned by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product is not in the cart.
    #[error("product not in cart: {0}")]
    NotFound(ProductId),

    /// The unit price is below zero.
    #[error("negative price for product: {0}")]
    NegativePrice(ProductId),

    /// Another unit would push the cart total past the representable range.
    #[error("cart total out of range when adding: {0}")]
    PriceOutOfRange(ProductId),
}

/// One product entry in the cart.
///
/// `quantity` is always at least 1 while the item is in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The cart.
///
/// ## Invariants
///
/// - At most one [`LineItem`] per [`ProductId`]
/// - Every item has `quantity >= 1`
/// - `total() == subtotal() + delivery_fee()` for every state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStore {
    items: Vec<LineItem>,
    delivery_fee: Price,
}

impl CartStore {
    /// Create an empty cart with the default flat delivery fee.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_delivery_fee(Price::new(DEFAULT_DELIVERY_FEE))
    }

    /// Create an empty cart charging `delivery_fee` whenever it is non-empty.
    #[must_use]
    pub const fn with_delivery_fee(delivery_fee: Price) -> Self {
        Self {
            items: Vec::new(),
            delivery_fee,
        }
    }

    /// Add one unit of a product.
    ///
    /// Merges into the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] for a new line priced below zero,
    /// or [`CartError::PriceOutOfRange`] if the cart total would overflow.
    /// The cart is unchanged on error.
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
    ) -> Result<u32, CartError> {
        if let Some(pos) = self.position(&product_id) {
            let quantity = self.bump(pos, &product_id)?;
            debug!(%product_id, quantity, "Merged into existing line");
            return Ok(quantity);
        }

        if unit_price.is_negative() {
            return Err(CartError::NegativePrice(product_id));
        }
        self.ensure_headroom(unit_price, &product_id)?;

        debug!(%product_id, "Appended new line");
        self.items.push(LineItem {
            product_id,
            name: name.into(),
            unit_price,
            quantity: 1,
        });
        Ok(1)
    }

    /// Increment a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the product is not in the cart, or
    /// [`CartError::PriceOutOfRange`] if the cart total would overflow.
    pub fn increase(&mut self, product_id: &ProductId) -> Result<u32, CartError> {
        let pos = self
            .position(product_id)
            .ok_or_else(|| CartError::NotFound(product_id.clone()))?;
        let quantity = self.bump(pos, product_id)?;
        debug!(%product_id, quantity, "Increased quantity");
        Ok(quantity)
    }

    /// Decrement a line's quantity by one, removing the line when it would
    /// reach zero. Returns the remaining quantity (0 if the line was removed).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the product is not in the cart.
    pub fn decrease(&mut self, product_id: &ProductId) -> Result<u32, CartError> {
        let pos = self
            .position(product_id)
            .ok_or_else(|| CartError::NotFound(product_id.clone()))?;

        let remaining = match self.items.get_mut(pos) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                item.quantity
            }
            _ => {
                self.items.remove(pos);
                0
            }
        };
        debug!(%product_id, remaining, "Decreased quantity");
        Ok(remaining)
    }

    /// Remove a line entirely. Returns whether a line was removed.
    ///
    /// Removing a product that is not in the cart is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        let removed = self.items.len() != before;
        debug!(%product_id, removed, "Removed line");
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns `true` if the product has a line in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Returns the line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Sum of quantities across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of the lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The flat fee when the subtotal is positive, zero otherwise.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        if self.subtotal() > Price::ZERO {
            self.delivery_fee
        } else {
            Price::ZERO
        }
    }

    /// Subtotal plus delivery fee.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.delivery_fee()
    }

    /// Add one unit to the line at `pos`.
    fn bump(&mut self, pos: usize, product_id: &ProductId) -> Result<u32, CartError> {
        let unit_price = self
            .items
            .get(pos)
            .map(|item| item.unit_price)
            .ok_or_else(|| CartError::NotFound(product_id.clone()))?;
        self.ensure_headroom(unit_price, product_id)?;

        let item = self
            .items
            .get_mut(pos)
            .ok_or_else(|| CartError::NotFound(product_id.clone()))?;
        item.quantity = item.quantity.saturating_add(1);
        Ok(item.quantity)
    }

    /// Checks that the total stays representable with `extra` more in the cart.
    fn ensure_headroom(&self, extra: Price, product_id: &ProductId) -> Result<(), CartError> {
        let total = self
            .items
            .iter()
            .try_fold(extra, |acc, item| {
                acc.checked_add(item.unit_price.checked_times(item.quantity)?)
            })
            .and_then(|subtotal| subtotal.checked_add(self.delivery_fee));

        if total.is_some() {
            Ok(())
        } else {
            warn!(%product_id, "Cart total would overflow");
            Err(CartError::PriceOutOfRange(product_id.clone()))
        }
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_merges_duplicate_products() {
        let mut cart = CartStore::new();
        assert_eq!(cart.add(id("a"), "Pea Shoots", Price::from_units(100)), Ok(1));
        assert_eq!(cart.add(id("a"), "Pea Shoots", Price::from_units(100)), Ok(2));
        cart.add(id("b"), "Radish", Price::from_units(50)).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.get(&id("a")).unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = CartStore::new();
        cart.add(id("b"), "Radish", Price::from_units(50)).unwrap();
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();
        cart.add(id("b"), "Radish", Price::from_units(50)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_increase_missing_product() {
        let mut cart = CartStore::new();
        assert_eq!(
            cart.increase(&id("ghost")),
            Err(CartError::NotFound(id("ghost")))
        );
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let mut cart = CartStore::new();
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();

        assert_eq!(cart.decrease(&id("a")), Ok(1));
        assert_eq!(cart.decrease(&id("a")), Ok(0));
        assert!(!cart.is_in_cart(&id("a")));
        assert!(cart.is_empty());
        assert_eq!(
            cart.decrease(&id("a")),
            Err(CartError::NotFound(id("a")))
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::new();
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();

        assert!(cart.remove(&id("a")));
        assert!(!cart.remove(&id("a")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = CartStore::new();
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert_eq!(cart.delivery_fee(), Price::ZERO);
        assert_eq!(cart.total(), Price::ZERO);

        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();
        cart.add(id("b"), "Radish", Price::from_units(50)).unwrap();

        assert_eq!(cart.subtotal(), Price::from_units(250));
        assert_eq!(cart.delivery_fee(), Price::from_units(30));
        assert_eq!(cart.total(), Price::from_units(280));
    }

    #[test]
    fn test_free_items_do_not_trigger_fee() {
        let mut cart = CartStore::new();
        cart.add(id("sample"), "Free Sample", Price::ZERO).unwrap();

        assert!(!cart.is_empty());
        assert_eq!(cart.delivery_fee(), Price::ZERO);
    }

    #[test]
    fn test_custom_delivery_fee() {
        let mut cart = CartStore::with_delivery_fee(Price::from_units(45));
        cart.add(id("a"), "Pea Shoots", Price::from_units(100)).unwrap();
        assert_eq!(cart.total(), Price::from_units(145));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut cart = CartStore::new();
        assert_eq!(
            cart.add(id("refund"), "Refund", Price::from_units(-50)),
            Err(CartError::NegativePrice(id("refund")))
        );
        assert!(cart.is_empty());
        assert_eq!(cart.delivery_fee(), Price::ZERO);
    }

    #[test]
    fn test_out_of_range_price_rejected_before_mutation() {
        let mut cart = CartStore::new();
        let huge = Price::new(Decimal::MAX);

        // MAX plus the delivery fee is not representable
        assert_eq!(
            cart.add(id("gold"), "Gold Bar", huge),
            Err(CartError::PriceOutOfRange(id("gold")))
        );
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_out_of_range_merge_keeps_quantity() {
        let mut cart = CartStore::new();
        let half = Price::new(Decimal::MAX / Decimal::TWO);
        cart.add(id("gold"), "Gold Bar", half).unwrap();

        assert_eq!(
            cart.add(id("gold"), "Gold Bar", half),
            Err(CartError::PriceOutOfRange(id("gold")))
        );
        assert_eq!(
            cart.increase(&id("gold")),
            Err(CartError::PriceOutOfRange(id("gold")))
        );
        assert_eq!(cart.get(&id("gold")).unwrap().quantity, 1);
        assert_eq!(cart.total(), half + Price::from_units(30));
    }

    #[test]
    fn test_line_total() {
        let item = LineItem {
            product_id: id("a"),
            name: "Pea Shoots".to_string(),
            unit_price: Price::new(Decimal::new(1250, 2)),
            quantity: 4,
        };
        assert_eq!(item.line_total(), Price::from_units(50));
    }
}
