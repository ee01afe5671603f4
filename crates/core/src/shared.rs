//! Serialized access for multiple callers.
//!
//! A [`CheckoutFlow`] assumes a single caller. Quantity changes read then write
//! the cart, so concurrent callers must go through one lock. [`SharedCheckout`]
//! is that lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::checkout::CheckoutFlow;

/// Cloneable handle that serializes every call on one [`CheckoutFlow`].
///
/// ```rust
/// use greenleaf_core::{
///     CheckoutConfig, CheckoutFlow, Price, ProductId, RecordingChannel, SharedCheckout,
/// };
///
/// let shared = SharedCheckout::new(CheckoutFlow::without_renderer(
///     CheckoutConfig::default(),
///     RecordingChannel::new(),
/// ));
/// let handle = shared.clone();
/// handle
///     .with(|flow| flow.add(ProductId::new("pea"), "Pea Shoots", Price::from_units(100)))
///     .unwrap();
/// assert_eq!(shared.with(|flow| flow.cart().item_count()), 1);
/// ```
#[derive(Debug)]
pub struct SharedCheckout<C, R> {
    inner: Arc<Mutex<CheckoutFlow<C, R>>>,
}

impl<C, R> Clone for SharedCheckout<C, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, R> SharedCheckout<C, R> {
    /// Wrap a flow.
    #[must_use]
    pub fn new(flow: CheckoutFlow<C, R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(flow)),
        }
    }

    /// Run `f` with exclusive access to the flow.
    ///
    /// A panic in another caller poisons the lock; the flow is recovered
    /// because every operation validates before it mutates.
    pub fn with<T>(&self, f: impl FnOnce(&mut CheckoutFlow<C, R>) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }

    fn lock(&self) -> MutexGuard<'_, CheckoutFlow<C, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
