//! Private account endpoints
//!
//! These endpoints require authentication. GET calls carry the default
//! `{identity, nonce}` signing body; the nonce is fresh per call.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::types::{AccountBalance, Envelope, Order, OrderFilter, Trade, TradeFilter};
use bitopro_auth::{AuthHeaders, Clock, Credentials};
use tracing::instrument;

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
    credentials: &'a Credentials,
    clock: &'a dyn Clock,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(
        dispatcher: &'a Dispatcher,
        credentials: &'a Credentials,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            dispatcher,
            credentials,
            clock,
        }
    }

    fn auth(&self) -> RestResult<AuthHeaders> {
        Ok(self.credentials.sign_identity(self.clock.now_millis())?)
    }

    /// Get the account balance
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Vec<AccountBalance>> {
        let auth = self.auth()?;
        let response: Envelope<Vec<AccountBalance>> = self
            .dispatcher
            .get("/accounts/balance", Some(&auth), &[])
            .await?;
        Ok(response.data)
    }

    /// Get orders of a pair, filtered
    ///
    /// The exchange reports `data: null` when nothing matches; that decodes
    /// to an empty list here.
    #[instrument(skip(self, filter))]
    pub async fn get_all_orders(&self, pair: &str, filter: &OrderFilter) -> RestResult<Vec<Order>> {
        let auth = self.auth()?;
        let query = filter.to_query();
        let response: Envelope<Option<Vec<Order>>> = self
            .dispatcher
            .get(&format!("/orders/all/{}", pair), Some(&auth), &query)
            .await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Get a single order
    #[instrument(skip(self))]
    pub async fn get_order(&self, pair: &str, order_id: &str) -> RestResult<Order> {
        let auth = self.auth()?;
        self.dispatcher
            .get(&format!("/orders/{}/{}", pair, order_id), Some(&auth), &[])
            .await
    }

    /// Get the caller's executed trades of a pair, filtered
    #[instrument(skip(self, filter))]
    pub async fn get_trade_list(&self, pair: &str, filter: &TradeFilter) -> RestResult<Vec<Trade>> {
        let auth = self.auth()?;
        let query = filter.to_query();
        let response: Envelope<Option<Vec<Trade>>> = self
            .dispatcher
            .get(&format!("/orders/trades/{}", pair), Some(&auth), &query)
            .await?;
        Ok(response.data.unwrap_or_default())
    }
}
