//! WebSocket channel client for BitoPro exchange streams
//!
//! Each subscribable stream maps to one URL and one connection. The
//! client opens channels; the caller owns each channel's lifecycle:
//! there is no reconnection, no heartbeat management and no message
//! deduplication. A closed channel stays closed.
//!
//! # Channels
//!
//! - **Public**: order books (single or multi pair, depth 1/5/10/20),
//!   tickers, trades
//! - **Private**: active orders, account balance — authenticated with
//!   the same signed-payload headers as the REST API, fresh nonce per
//!   connection attempt
//!
//! Connections optionally tunnel through a SOCKS5 proxy.
//!
//! # Example
//!
//! ```no_run
//! use bitopro_ws::{BitoProWsClient, BookDepth, ChannelEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BitoProWsClient::new();
//!     let mut channel = client
//!         .listen_order_books(
//!             vec!["btc_usdt".to_string(), "eth_usdt".to_string()],
//!             BookDepth::D5,
//!         )
//!         .await?;
//!
//!     let mut events = channel.take_event_receiver().unwrap();
//!     tokio::spawn(async move {
//!         while let Some(event) = events.recv().await {
//!             println!("lifecycle: {:?}", event);
//!         }
//!     });
//!
//!     while let Some(message) = channel.next().await {
//!         println!("{:?}", message?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod endpoint;
pub mod error;
pub mod events;

// Re-export main types
pub use channel::{BitoProWsClient, ProxyConfig, WsChannel, WsConfig};
pub use endpoint::{BookDepth, StreamChannel, BASE_URL};
pub use error::{WsError, WsResult};
pub use events::{ChannelEvent, ChannelState};

// Re-export the message type channels yield and the auth surface callers
// need to construct a client
pub use bitopro_auth::{Clock, Credentials, FixedClock, SystemClock};
pub use tokio_tungstenite::tungstenite::Message;

// Push-message shapes text frames decode into
pub use bitopro_types::{
    WsAccountBalanceEvent, WsActiveOrdersEvent, WsOrderBookEvent, WsTickerEvent, WsTradeEvent,
};
