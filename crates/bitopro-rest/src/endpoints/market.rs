//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::types::{
    Candle, Currency, Envelope, LimitationsAndFees, OrderBook, RecentTrade, Ticker, TradingPair,
};
use tracing::instrument;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get the list of currencies available and information for each
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> RestResult<Vec<Currency>> {
        let response: Envelope<Vec<Currency>> = self
            .dispatcher
            .get("/provisioning/currencies", None, &[])
            .await?;
        Ok(response.data)
    }

    /// Get VIP trading fee rates, order fees and limitations, withdrawal
    /// fee restrictions, deposit fees and TTCheck limitations
    #[instrument(skip(self))]
    pub async fn get_limitations_and_fees(&self) -> RestResult<LimitationsAndFees> {
        self.dispatcher
            .get("/provisioning/limitations-and-fees", None, &[])
            .await
    }

    /// Get the pairs available for trade
    #[instrument(skip(self))]
    pub async fn get_trading_pairs(&self) -> RestResult<Vec<TradingPair>> {
        let response: Envelope<Vec<TradingPair>> = self
            .dispatcher
            .get("/provisioning/trading-pairs", None, &[])
            .await?;
        Ok(response.data)
    }

    /// Get the order book of a pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair in `${BASE}_${QUOTE}` format (e.g. "btc_usdt")
    /// * `limit` - Levels per side, one of 1, 5, 10, 20 (default 5)
    /// * `scale` - Price aggregation scale (default 0)
    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        pair: &str,
        limit: Option<u8>,
        scale: Option<u32>,
    ) -> RestResult<OrderBook> {
        let query = [
            ("limit", limit.unwrap_or(5).to_string()),
            ("scale", scale.unwrap_or(0).to_string()),
        ];
        self.dispatcher
            .get(&format!("/order-book/{}", pair), None, &query)
            .await
    }

    /// Get the 24h ticker of a pair: best bid/ask, last price, volume
    #[instrument(skip(self))]
    pub async fn get_tickers(&self, pair: &str) -> RestResult<Vec<Ticker>> {
        let response: Envelope<Vec<Ticker>> = self
            .dispatcher
            .get(&format!("/tickers/{}", pair), None, &[])
            .await?;
        Ok(response.data)
    }

    /// Get the most recent public trades of a pair
    #[instrument(skip(self))]
    pub async fn get_recent_trades(&self, pair: &str) -> RestResult<Vec<RecentTrade>> {
        let response: Envelope<Vec<RecentTrade>> = self
            .dispatcher
            .get(&format!("/trades/{}", pair), None, &[])
            .await?;
        Ok(response.data)
    }

    /// Get candlestick data for a period
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `resolution` - Time frame, one of 1m, 5m, 15m, 30m, 1h, 3h, 6h, 12h, 1d, 1w, 1M
    /// * `from` - Start time, unix seconds
    /// * `to` - End time, unix seconds
    #[instrument(skip(self))]
    pub async fn get_trading_history(
        &self,
        pair: &str,
        resolution: &str,
        from: u64,
        to: u64,
    ) -> RestResult<Vec<Candle>> {
        let query = [
            ("resolution", resolution.to_string()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];
        let response: Envelope<Vec<Candle>> = self
            .dispatcher
            .get(&format!("/trading-history/{}", pair), None, &query)
            .await?;
        Ok(response.data)
    }
}
