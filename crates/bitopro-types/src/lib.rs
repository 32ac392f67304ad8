//! Shared types for the BitoPro exchange APIs
//!
//! This crate provides the wire-level type definitions used across the
//! BitoPro SDK. It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`OrderAction`], [`OrderType`], [`TimeInForce`], [`OrderStatus`] - order enums
//! - [`WsOrderBookEvent`], [`WsTickerEvent`], [`WsTradeEvent`] - public push messages
//! - [`WsActiveOrdersEvent`], [`WsAccountBalanceEvent`] - private push messages

pub mod enums;
pub mod messages;

// Re-export commonly used types
pub use enums::*;
pub use messages::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
