//! WebSocket push-message shapes
//!
//! The WebSocket layer hands raw text frames to the caller; these are the
//! shapes those frames decode into. Public channels push per-pair events,
//! private channels push maps keyed by pair (orders) or a fixed key
//! (balances).

use crate::enums::{OrderAction, OrderType, TimeInForce};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// One aggregated price level in an order-book push
#[derive(Debug, Clone, Deserialize)]
pub struct WsBookLevel {
    /// Price of the level
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Amount resting at the level
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Number of orders aggregated into the level
    pub count: u32,
    /// Cumulative amount up to this level
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Order-book snapshot pushed on the `order-books` channel
#[derive(Debug, Clone, Deserialize)]
pub struct WsOrderBookEvent {
    /// Event name (e.g. "ORDER_BOOK")
    pub event: String,
    /// Trading pair
    pub pair: String,
    /// Server timestamp in milliseconds
    pub timestamp: u64,
    /// Server timestamp, formatted
    pub datetime: String,
    /// Bid levels, best first
    pub bids: Vec<WsBookLevel>,
    /// Ask levels, best first
    pub asks: Vec<WsBookLevel>,
}

/// 24h rolling-window statistics pushed on the `tickers` channel
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsTickerEvent {
    pub event: String,
    pub pair: String,
    /// Whether the last trade was buyer-initiated
    pub is_buyer: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_change24hr: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume24hr: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high24hr: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low24hr: Decimal,
    pub timestamp: u64,
    pub datetime: String,
}

/// One executed trade inside a trades push
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsTradeEntry {
    pub timestamp: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub is_buyer: bool,
}

/// Recent trades pushed on the `trades` channel
#[derive(Debug, Clone, Deserialize)]
pub struct WsTradeEvent {
    pub event: String,
    pub pair: String,
    pub timestamp: u64,
    pub datetime: String,
    pub data: Vec<WsTradeEntry>,
}

/// One active order inside an `auth/orders` push
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsActiveOrder {
    pub id: String,
    pub pair: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub avg_execution_price: Decimal,
    pub action: OrderAction,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub timestamp: u64,
    pub updated_timestamp: u64,
    pub created_timestamp: u64,
    /// Numeric status code, see [`crate::OrderStatus::from_code`]
    pub status: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    pub fee_symbol: String,
    /// Fee paid in BITO
    #[serde(with = "rust_decimal::serde::str")]
    pub bito_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub seq: String,
    pub time_in_force: TimeInForce,
}

/// Active orders pushed on the private `auth/orders` channel
///
/// The first push after connecting carries active orders for all pairs;
/// subsequent pushes carry only the updated pair.
#[derive(Debug, Clone, Deserialize)]
pub struct WsActiveOrdersEvent {
    pub event: String,
    pub timestamp: u64,
    pub datetime: String,
    /// Active orders keyed by trading pair
    pub data: HashMap<String, Vec<WsActiveOrder>>,
}

/// One currency balance inside an `auth/account-balance` push
#[derive(Debug, Clone, Deserialize)]
pub struct WsBalance {
    /// Currency symbol, uppercase
    pub currency: String,
    /// Total amount
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Amount available for trading
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    /// Amount locked in staking
    #[serde(with = "rust_decimal::serde::str")]
    pub stake: Decimal,
    pub tradable: bool,
}

/// Balances pushed on the private `auth/account-balance` channel
#[derive(Debug, Clone, Deserialize)]
pub struct WsAccountBalanceEvent {
    pub event: String,
    pub timestamp: u64,
    pub datetime: String,
    /// Balances keyed by currency
    pub data: HashMap<String, Vec<WsBalance>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_book_event_decodes() {
        let raw = r#"{
            "event": "ORDER_BOOK",
            "pair": "BTC_USDT",
            "timestamp": 1639386803663,
            "datetime": "2021-12-13T09:13:23.663Z",
            "bids": [{"price": "40000.1", "amount": "0.5", "count": 2, "total": "0.5"}],
            "asks": [{"price": "40001.0", "amount": "1.25", "count": 1, "total": "1.25"}]
        }"#;
        let event: WsOrderBookEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.pair, "BTC_USDT");
        assert_eq!(event.bids.len(), 1);
        assert_eq!(event.asks[0].count, 1);
    }

    #[test]
    fn test_active_orders_event_decodes() {
        let raw = r#"{
            "event": "ACTIVE_ORDERS",
            "timestamp": 1639386803663,
            "datetime": "2021-12-13T09:13:23.663Z",
            "data": {
                "sol_usdt": [{
                    "id": "8917255503",
                    "pair": "sol_usdt",
                    "price": "107",
                    "avgExecutionPrice": "0",
                    "action": "SELL",
                    "type": "LIMIT",
                    "timestamp": 1639386803663,
                    "updatedTimestamp": 1639386803663,
                    "createdTimestamp": 1639386803663,
                    "status": 0,
                    "originalAmount": "0.02",
                    "remainingAmount": "0.02",
                    "executedAmount": "0",
                    "fee": "0",
                    "feeSymbol": "usdt",
                    "bitoFee": "0",
                    "total": "0",
                    "seq": "SOLUSDT3273528249",
                    "timeInForce": "GTC"
                }]
            }
        }"#;
        let event: WsActiveOrdersEvent = serde_json::from_str(raw).unwrap();
        let orders = &event.data["sol_usdt"];
        assert_eq!(orders[0].action, OrderAction::Sell);
        assert_eq!(orders[0].order_type, OrderType::Limit);
        assert_eq!(orders[0].status, 0);
    }

    #[test]
    fn test_ticker_event_decodes() {
        let raw = r#"{
            "event": "TICKER",
            "pair": "eth_btc",
            "isBuyer": false,
            "priceChange24hr": "0",
            "volume24hr": "0.00000000",
            "high24hr": "0.03252800",
            "low24hr": "0.03252800",
            "timestamp": 1639386803663,
            "datetime": "2021-12-13T09:13:23.663Z"
        }"#;
        let event: WsTickerEvent = serde_json::from_str(raw).unwrap();
        assert!(!event.is_buyer);
        assert_eq!(event.pair, "eth_btc");
    }
}
