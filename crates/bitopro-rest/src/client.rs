//! Main REST client implementation

use crate::dispatch::Dispatcher;
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::types::{
    AccountBalance, BatchOrderEntry, BatchOrderResult, Candle, CreateOrderRequest,
    CreateOrderResponse, Currency, LimitationsAndFees, Order, OrderBook, OrderFilter,
    OrderIdsByPair, RecentTrade, Ticker, Trade, TradeFilter, TradingPair,
};
use bitopro_auth::{Clock, Credentials, SystemClock};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// REST base URL
pub const BASE_URL: &str = "https://api.bitopro.com/v3";

/// BitoPro REST API client
///
/// Provides access to both public and private endpoints. The credential
/// set and base URL are read-only after construction, so one client can
/// serve concurrent calls; each call derives its own auth headers.
///
/// # Example
///
/// ```no_run
/// use bitopro_rest::{BitoProRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BitoProRestClient::new();
///     let book = client.get_order_book("btc_usdt", None, None).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BitoProRestClient::with_credentials(creds);
///     let balance = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitoProRestClient {
    dispatcher: Dispatcher,
    credentials: Option<Credentials>,
    clock: Arc<dyn Clock>,
}

impl BitoProRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            // No configured timeout means the transport default applies
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().expect("Failed to create HTTP client");

        info!("Created BitoPro REST client for {}", config.base_url);

        Self {
            dispatcher: Dispatcher::new(http_client, config.base_url),
            credentials: config.credentials,
            clock: config.clock,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher)
    }

    /// Get the list of currencies available for trade
    pub async fn get_currencies(&self) -> RestResult<Vec<Currency>> {
        self.market().get_currencies().await
    }

    /// Get fee rates and order/withdrawal limitations
    pub async fn get_limitations_and_fees(&self) -> RestResult<LimitationsAndFees> {
        self.market().get_limitations_and_fees().await
    }

    /// Get the pairs available for trade
    pub async fn get_trading_pairs(&self) -> RestResult<Vec<TradingPair>> {
        self.market().get_trading_pairs().await
    }

    /// Get the order book of a pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "btc_usdt")
    /// * `limit` - Levels per side, one of 1, 5, 10, 20 (default 5)
    /// * `scale` - Price aggregation scale (default 0)
    pub async fn get_order_book(
        &self,
        pair: &str,
        limit: Option<u8>,
        scale: Option<u32>,
    ) -> RestResult<OrderBook> {
        self.market().get_order_book(pair, limit, scale).await
    }

    /// Get the 24h ticker of a pair
    pub async fn get_tickers(&self, pair: &str) -> RestResult<Vec<Ticker>> {
        self.market().get_tickers(pair).await
    }

    /// Get the most recent public trades of a pair
    pub async fn get_recent_trades(&self, pair: &str) -> RestResult<Vec<RecentTrade>> {
        self.market().get_recent_trades(pair).await
    }

    /// Get candlestick data for a period
    pub async fn get_trading_history(
        &self,
        pair: &str,
        resolution: &str,
        from: u64,
        to: u64,
    ) -> RestResult<Vec<Candle>> {
        self.market()
            .get_trading_history(pair, resolution, from, to)
            .await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(
            &self.dispatcher,
            creds,
            self.clock.as_ref(),
        ))
    }

    /// Get the account balance
    pub async fn get_balance(&self) -> RestResult<Vec<AccountBalance>> {
        self.account()?.get_balance().await
    }

    /// Get orders of a pair, filtered
    pub async fn get_all_orders(&self, pair: &str, filter: &OrderFilter) -> RestResult<Vec<Order>> {
        self.account()?.get_all_orders(pair, filter).await
    }

    /// Get a single order
    pub async fn get_order(&self, pair: &str, order_id: &str) -> RestResult<Order> {
        self.account()?.get_order(pair, order_id).await
    }

    /// Get the caller's executed trades of a pair, filtered
    pub async fn get_trade_list(&self, pair: &str, filter: &TradeFilter) -> RestResult<Vec<Trade>> {
        self.account()?.get_trade_list(pair, filter).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(
            &self.dispatcher,
            creds,
            self.clock.as_ref(),
        ))
    }

    /// Create an order
    pub async fn create_order(
        &self,
        pair: &str,
        request: &CreateOrderRequest,
    ) -> RestResult<CreateOrderResponse> {
        self.trading()?.create_order(pair, request).await
    }

    /// Create up to 10 limit/market orders at a time
    pub async fn create_batch_orders(
        &self,
        orders: &[BatchOrderEntry],
    ) -> RestResult<Vec<BatchOrderResult>> {
        self.trading()?.create_batch_orders(orders).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, pair: &str, order_id: &str) -> RestResult<OrderIdsByPair> {
        self.trading()?.cancel_order(pair, order_id).await
    }

    /// Cancel all active orders of a pair, or of every pair
    pub async fn cancel_all_orders(&self, pair: Option<&str>) -> RestResult<OrderIdsByPair> {
        self.trading()?.cancel_all_orders(pair).await
    }

    /// Cancel multiple orders at a time
    pub async fn cancel_batch_orders(&self, orders: &OrderIdsByPair) -> RestResult<OrderIdsByPair> {
        self.trading()?.cancel_batch_orders(orders).await
    }
}

impl Default for BitoProRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitoProRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitoProRestClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// REST base URL
    pub base_url: String,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    /// Nonce clock for signed requests
    pub clock: Arc<dyn Clock>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: BASE_URL.to_string(),
            timeout: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the REST base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the nonce clock (tests inject a fixed clock here)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
