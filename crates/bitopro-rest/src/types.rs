//! Request/response shapes for the REST API
//!
//! Field names follow the exchange's camelCase wire format. Amounts the
//! exchange sends as numeric strings decode into `Decimal`; provisioning
//! metadata that may arrive as empty strings stays `String`.

use bitopro_types::{OrderAction, OrderType, TimeInForce};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{data: T}` wrapper used by most list-returning endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// ============================================================================
// Provisioning (public)
// ============================================================================

/// Listed currency and its deposit/withdraw limits
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub currency: String,
    pub deposit: bool,
    pub deposit_confirmation: String,
    pub max_daily_withdraw: String,
    pub max_withdraw: String,
    pub min_withdraw: String,
    pub withdraw: bool,
    pub withdraw_fee: String,
}

/// VIP fee tier
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingFeeRate {
    pub rank: u32,
    pub twd_volume_symbol: String,
    pub twd_volume: String,
    pub bito_amount_symbol: String,
    pub bito_amount: String,
    pub maker_fee: String,
    pub taker_fee: String,
    pub maker_bito_fee: String,
    pub taker_bito_fee: String,
}

/// Minimum order size per pair
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFeesAndLimitations {
    pub pair: String,
    pub minimum_order_amount: String,
    pub minimum_order_amount_base: String,
    pub minimum_order_number_of_digits: String,
}

/// Withdrawal fee restrictions per currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionsOfWithdrawalFees {
    pub currency: String,
    pub fee: String,
    pub minimum_trading_amount: String,
    pub maximum_trading_amount: String,
    pub daily_cumulative_maximum_amount: String,
    pub remarks: String,
}

/// Deposit fee and confirmation requirements per currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptocurrencyDepositFeeAndConfirmation {
    pub currency: String,
    pub general_deposit_fees: String,
    pub blockchain_confirmation_required: String,
}

/// TTCheck fees and limitations per currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtCheckFeesAndLimitations {
    pub currency: String,
    pub redeem_daily_cumulative_maximum_amount: String,
    pub generate_minimum_trading_amount: String,
    pub generate_maximum_trading_amount: String,
    pub generate_daily_cumulative_maximum_amount: String,
}

/// Full fee/limitation sheet (not wrapped in the `{data}` envelope)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitationsAndFees {
    pub trading_fee_rate: Vec<TradingFeeRate>,
    pub order_fees_and_limitations: Vec<OrderFeesAndLimitations>,
    pub restrictions_of_withdrawal_fees: Vec<RestrictionsOfWithdrawalFees>,
    pub cryptocurrency_deposit_fee_and_confirmation: Vec<CryptocurrencyDepositFeeAndConfirmation>,
    pub tt_check_fees_and_limitations_level1: Vec<TtCheckFeesAndLimitations>,
    pub tt_check_fees_and_limitations_level2: Vec<TtCheckFeesAndLimitations>,
}

/// Tradable pair and its limits
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub base: String,
    pub base_precision: String,
    pub maintain: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_limit_base_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_limit_base_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_market_buy_quote_amount: Decimal,
    pub order_open_limit: String,
    pub pair: String,
    pub quote: String,
    pub quote_precision: String,
}

// ============================================================================
// Market data (public)
// ============================================================================

/// One aggregated price level of the order book
#[derive(Debug, Clone, Deserialize)]
pub struct BookLevel {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Order book snapshot (not wrapped in the `{data}` envelope)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

/// 24h market statistics for one pair
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    #[serde(with = "rust_decimal::serde::str")]
    pub high24hr: Decimal,
    pub is_buyer: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub last_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low24hr: Decimal,
    pub pair: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_change24hr: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume24hr: Decimal,
}

/// One public trade
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTrade {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub is_buyer: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub timestamp: u64,
}

/// One OHLCV candle from the trading-history endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Candle {
    pub timestamp: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
}

// ============================================================================
// Account (private)
// ============================================================================

/// Balance of one currency
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalance {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub stake: Decimal,
    pub tradable: bool,
}

/// One order as reported by the order endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub avg_execution_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bito_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    pub fee_symbol: String,
    pub id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_amount: Decimal,
    pub pair: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_amount: Decimal,
    pub seq: String,
    /// Numeric status code, see [`bitopro_types::OrderStatus::from_code`]
    pub status: i32,
    pub created_timestamp: u64,
    pub updated_timestamp: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub client_id: Option<i64>,
}

/// One of the caller's executed trades
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub trade_id: String,
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    pub fee_symbol: String,
    pub is_taker: bool,
    /// Deprecated by the exchange, use `created_timestamp`
    #[serde(default)]
    pub timestamp: Option<u64>,
    pub created_timestamp: u64,
}

/// Query filter for the all-orders endpoint; all fields optional
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Defaults to 90 days ago server-side
    pub start_timestamp: Option<u64>,
    /// Defaults to now server-side
    pub end_timestamp: Option<u64>,
    /// One of OPEN, DONE, ALL (server default: ALL)
    pub status_kind: Option<String>,
    /// Filter by exact numeric status code
    pub status: Option<i32>,
    pub order_id: Option<String>,
    /// Server default 100, range 1..=1000
    pub limit: Option<u32>,
    /// Range 1..=2147483647
    pub client_id: Option<u32>,
}

impl OrderFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(v) = self.start_timestamp {
            query.push(("startTimestamp", v.to_string()));
        }
        if let Some(v) = self.end_timestamp {
            query.push(("endTimestamp", v.to_string()));
        }
        if let Some(v) = &self.status_kind {
            query.push(("statusKind", v.clone()));
        }
        if let Some(v) = self.status {
            query.push(("status", v.to_string()));
        }
        if let Some(v) = &self.order_id {
            query.push(("orderId", v.clone()));
        }
        if let Some(v) = self.limit {
            query.push(("limit", v.to_string()));
        }
        if let Some(v) = self.client_id {
            query.push(("clientId", v.to_string()));
        }
        query
    }
}

/// Query filter for the trade-list endpoint; all fields optional
#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub start_timestamp: Option<u64>,
    pub end_timestamp: Option<u64>,
    pub order_id: Option<String>,
    pub trade_id: Option<String>,
    /// Server default 100, range 1..=1000
    pub limit: Option<u32>,
}

impl TradeFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(v) = self.start_timestamp {
            query.push(("startTimestamp", v.to_string()));
        }
        if let Some(v) = self.end_timestamp {
            query.push(("endTimestamp", v.to_string()));
        }
        if let Some(v) = &self.order_id {
            query.push(("orderId", v.clone()));
        }
        if let Some(v) = &self.trade_id {
            query.push(("tradeId", v.clone()));
        }
        if let Some(v) = self.limit {
            query.push(("limit", v.to_string()));
        }
        query
    }
}

// ============================================================================
// Trading (private)
// ============================================================================

/// Body for creating one order
///
/// Serialized field order is fixed by declaration order, which keeps the
/// signed payload deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Client timestamp in milliseconds
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trigger price, required for stop-limit orders
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_price: Option<Decimal>,
    /// Stop trigger condition (e.g. ">=" / "<="), required for stop-limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,
    /// Sell-order balance percentage, 1..=100 (server default 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
}

/// Acknowledgement for a created order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: u64,
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub timestamp: u64,
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub client_id: Option<i64>,
}

/// One entry of a batch-create body; carries its own pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrderEntry {
    pub pair: String,
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Client timestamp in milliseconds
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u32>,
}

/// Acknowledgement for one order of a batch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrderResult {
    pub order_id: u64,
    pub action: OrderAction,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub timestamp: u64,
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub client_id: Option<i64>,
}

/// Batch-cancel body and cancel responses: order ids keyed by pair
///
/// Ordered map so the signed batch-cancel payload serializes with stable
/// key order.
pub type OrderIdsByPair = BTreeMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_create_order_request_serializes_in_declaration_order() {
        let request = CreateOrderRequest {
            action: OrderAction::Buy,
            amount: Decimal::from_str("250").unwrap(),
            price: Decimal::from_str("0.000075").unwrap(),
            timestamp: 1504262258000,
            order_type: OrderType::Limit,
            stop_price: None,
            condition: None,
            time_in_force: None,
            client_id: None,
            percentage: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"action":"BUY","amount":"250","price":"0.000075","timestamp":1504262258000,"type":"LIMIT"}"#
        );
    }

    #[test]
    fn test_order_decodes() {
        let raw = r#"{
            "action": "BUY",
            "avgExecutionPrice": "0",
            "bitoFee": "0",
            "executedAmount": "0",
            "fee": "0",
            "feeSymbol": "bito",
            "id": "887521192",
            "originalAmount": "1000",
            "pair": "bito_eth",
            "price": "0.005",
            "remainingAmount": "1000",
            "seq": "BITOETH8913789893",
            "status": 0,
            "createdTimestamp": 1570591525592,
            "updatedTimestamp": 1570601523551,
            "total": "0",
            "type": "LIMIT",
            "timeInForce": "GTC",
            "clientId": 123
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, "887521192");
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.client_id, Some(123));
    }

    #[test]
    fn test_envelope_unwraps() {
        let raw = r#"{"data":[{"amount":"0.11","isBuyer":false,"price":"126709.0","timestamp":1551753875}]}"#;
        let envelope: Envelope<Vec<RecentTrade>> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert!(!envelope.data[0].is_buyer);
    }

    #[test]
    fn test_order_filter_query_uses_wire_names() {
        let filter = OrderFilter {
            start_timestamp: Some(1),
            status_kind: Some("OPEN".to_string()),
            limit: Some(500),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("startTimestamp", "1".to_string()),
                ("statusKind", "OPEN".to_string()),
                ("limit", "500".to_string()),
            ]
        );
    }
}
