//! Orders

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
pub use status::OrderStatus;
