//! Trading endpoints for order management
//!
//! These endpoints require authentication. Calls with a JSON body sign
//! that body; DELETE calls sign the default `{identity, nonce}` body.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::types::{
    BatchOrderEntry, BatchOrderResult, CreateOrderRequest, CreateOrderResponse, Envelope,
    OrderIdsByPair,
};
use bitopro_auth::{AuthHeaders, Clock, Credentials};
use tracing::{debug, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
    credentials: &'a Credentials,
    clock: &'a dyn Clock,
}

impl<'a> TradingEndpoints<'a> {
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

    fn identity_auth(&self) -> RestResult<AuthHeaders> {
        Ok(self.credentials.sign_identity(self.clock.now_millis())?)
    }

    /// Create an order
    #[instrument(skip(self, request), fields(pair = %pair, action = %request.action, order_type = %request.order_type))]
    pub async fn create_order(
        &self,
        pair: &str,
        request: &CreateOrderRequest,
    ) -> RestResult<CreateOrderResponse> {
        let auth = self.credentials.sign(request)?;
        debug!(
            "Placing {} {} order for {} {}",
            request.action, request.order_type, request.amount, pair
        );
        self.dispatcher
            .post(&format!("/orders/{}", pair), &auth, request)
            .await
    }

    /// Create up to 10 limit/market orders at a time
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn create_batch_orders(
        &self,
        orders: &[BatchOrderEntry],
    ) -> RestResult<Vec<BatchOrderResult>> {
        let auth = self.credentials.sign(&orders)?;
        let response: Envelope<Vec<BatchOrderResult>> = self
            .dispatcher
            .post("/orders/batch", &auth, &orders)
            .await?;
        Ok(response.data)
    }

    /// Cancel an order
    ///
    /// # Returns
    /// Cancelled order ids keyed by pair
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, pair: &str, order_id: &str) -> RestResult<OrderIdsByPair> {
        let auth = self.identity_auth()?;
        self.dispatcher
            .delete(&format!("/orders/{}/{}", pair, order_id), &auth)
            .await
    }

    /// Cancel all active orders of a pair, or of every pair when `pair`
    /// is omitted
    ///
    /// Rate limited by the exchange to 1 request per second per IP.
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self, pair: Option<&str>) -> RestResult<OrderIdsByPair> {
        let auth = self.identity_auth()?;
        let response: Envelope<Option<OrderIdsByPair>> = self
            .dispatcher
            .delete(&format!("/orders/{}", pair.unwrap_or("all")), &auth)
            .await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Cancel multiple orders at a time
    ///
    /// The exchange expects this as a PUT against `/orders`, not a DELETE;
    /// the verb is part of the live contract. Rate limited to 1 request
    /// per second per IP.
    ///
    /// # Arguments
    /// * `orders` - Order ids to cancel, keyed by pair
    #[instrument(skip(self, orders), fields(pairs = orders.len()))]
    pub async fn cancel_batch_orders(&self, orders: &OrderIdsByPair) -> RestResult<OrderIdsByPair> {
        let auth = self.credentials.sign(orders)?;
        let response: Envelope<OrderIdsByPair> =
            self.dispatcher.put("/orders", &auth, orders).await?;
        Ok(response.data)
    }
}
