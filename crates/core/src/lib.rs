//! Greenleaf Core - Cart and checkout state machine.
//!
//! This crate holds the client-side ordering flow of the Greenleaf storefront:
//! the cart, its derived totals, the browse → cart → payment sequence, the
//! delivery form validators and the order message handed to an external chat
//! channel.
//!
//! # Architecture
//!
//! The core crate contains only types, state and traits - no I/O, no
//! environment reads, no network. Presentation and delivery plug in through
//! two traits:
//!
//! - [`Renderer`] - redrawn with a [`CheckoutView`] after every state change
//! - [`MessageChannel`] - receives the [`OrderMessage`] on submission
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, payment methods and the prefixed phone field
//! - [`cart`] - [`CartStore`] and [`LineItem`]
//! - [`form`] - [`DeliveryForm`] and field validators
//! - [`checkout`] - [`CheckoutFlow`], the stage machine
//! - [`intent`] - Serializable user intents and dispatch
//! - [`message`] - Order snapshot, message text and endpoint
//! - [`view`] - Render snapshots and the payment summary
//! - [`shared`] - Mutex-serialized handle for multi-caller use
//! - [`config`] - [`CheckoutConfig`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod form;
pub mod intent;
pub mod message;
pub mod shared;
pub mod types;
pub mod view;

pub use cart::{CartError, CartStore, LineItem};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutStage};
pub use config::CheckoutConfig;
pub use form::{DeliveryForm, FieldError, FieldName, FieldStatus, FieldValidity};
pub use intent::{Intent, Outcome};
pub use message::{
    EndpointError, MessageChannel, MessageEndpoint, Order, OrderMessage, RecordingChannel,
};
pub use shared::SharedCheckout;
pub use types::*;
pub use view::{CheckoutView, NoopRenderer, OrderSummary, Renderer, SummaryLine};
