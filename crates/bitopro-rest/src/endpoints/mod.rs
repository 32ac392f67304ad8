//! Endpoint groups
//!
//! - [`market`] - public market data, no authentication
//! - [`account`] - private account queries
//! - [`trading`] - private order management

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
