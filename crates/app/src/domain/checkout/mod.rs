//! Checkout
//!
//! Turns a user's cart into an order inside one bounded transaction. Cart
//! lines and their products are locked before anything is validated, so
//! stock and prices are read exactly once and cannot change underneath the
//! order being written.

pub mod contact;
pub mod data;
pub mod delivery;
pub mod errors;
pub mod order_number;
pub mod pricing;
pub(crate) mod repository;
pub mod service;
pub mod stock;

pub use errors::{CheckoutError, SUCCESS_OUTCOME, StockShortfall, ValidationError};
pub use service::*;
