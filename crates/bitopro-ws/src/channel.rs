//! Channel client and the channels it opens

use crate::endpoint::{BookDepth, StreamChannel, BASE_URL};
use crate::error::{WsError, WsResult};
use crate::events::{ChannelEvent, ChannelState};

use bitopro_auth::{Clock, Credentials, SystemClock, API_HEADER, SDK_IDENTIFIER};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_socks::tcp::Socks5Stream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::header::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{Error as TungsteniteError, Message};
use tokio_tungstenite::{client_async_tls, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, instrument};

/// SOCKS5 proxy the stream connection tunnels through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host
    pub host: String,
    /// Proxy port
    pub port: u16,
}

impl ProxyConfig {
    /// Create a proxy configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Stream client configuration
#[derive(Clone)]
pub struct WsConfig {
    /// API credentials, required only for private channels
    pub credentials: Option<Credentials>,
    /// Optional SOCKS5 proxy for every connection
    pub proxy: Option<ProxyConfig>,
    /// WebSocket stream base URL
    pub base_url: String,
    /// Nonce clock for the handshake auth headers
    pub clock: Arc<dyn Clock>,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            proxy: None,
            base_url: BASE_URL.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl WsConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Route every connection through a SOCKS5 proxy
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set the stream base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the nonce clock (tests inject a fixed clock here)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for WsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsConfig")
            .field("credentials", &self.credentials)
            .field("proxy", &self.proxy)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// BitoPro stream client
///
/// A factory for [`WsChannel`] values, one connection per channel. The
/// client itself holds no sockets; it carries the credentials, proxy and
/// base URL every channel is opened with.
///
/// # Example
///
/// ```no_run
/// use bitopro_ws::{BitoProWsClient, BookDepth};
/// use futures_util::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BitoProWsClient::new();
///     let mut channel = client
///         .listen_order_book("btc_usdt", BookDepth::D5)
///         .await?;
///
///     while let Some(message) = channel.next().await {
///         println!("{:?}", message?);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BitoProWsClient {
    config: WsConfig,
}

impl BitoProWsClient {
    /// Create a client for public channels only
    pub fn new() -> Self {
        Self::with_config(WsConfig::default())
    }

    /// Create a client with credentials for private channels
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(WsConfig::default().with_credentials(credentials))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: WsConfig) -> Self {
        Self { config }
    }

    /// Check if the client has credentials for private channels
    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    /// Open one channel over its own connection
    ///
    /// Private channels without credentials fail fast before any I/O.
    /// Auth headers are signed with a fresh nonce per connection attempt.
    #[instrument(skip(self, channel), fields(channel = channel.label()))]
    pub async fn open_channel(&self, channel: StreamChannel) -> WsResult<WsChannel> {
        if channel.requires_auth() && self.config.credentials.is_none() {
            return Err(WsError::AuthRequired);
        }

        let url = format!("{}{}", self.config.base_url, channel.path());
        let mut request = url.as_str().into_client_request()?;
        insert_header(&mut request, API_HEADER, SDK_IDENTIFIER)?;

        if channel.requires_auth() {
            // Presence checked above
            let credentials = self.config.credentials.as_ref().ok_or(WsError::AuthRequired)?;
            let auth = credentials.sign_identity(self.config.clock.now_millis())?;
            for (name, value) in auth.pairs() {
                insert_header(&mut request, name, value)?;
            }
        }

        WsChannel::open(request, url, channel.label(), self.config.proxy.as_ref()).await
    }

    /// Order book of one pair, pushed every second when updated
    pub async fn listen_order_book(
        &self,
        pair: impl Into<String>,
        depth: BookDepth,
    ) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::OrderBook {
            pair: pair.into(),
            depth,
        })
        .await
    }

    /// Order books of several pairs over one connection
    pub async fn listen_order_books(
        &self,
        pairs: Vec<String>,
        depth: BookDepth,
    ) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::OrderBooks { pairs, depth })
            .await
    }

    /// 24h rolling-window statistics of one pair
    pub async fn listen_ticker(&self, pair: impl Into<String>) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::Ticker { pair: pair.into() })
            .await
    }

    /// 24h rolling-window statistics of several pairs
    pub async fn listen_tickers(&self, pairs: Vec<String>) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::Tickers { pairs }).await
    }

    /// Public trades of one pair
    pub async fn listen_trade(&self, pair: impl Into<String>) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::Trade { pair: pair.into() })
            .await
    }

    /// Public trades of several pairs
    pub async fn listen_trades(&self, pairs: Vec<String>) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::Trades { pairs }).await
    }

    /// The caller's active orders (requires credentials)
    pub async fn listen_active_orders(&self) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::ActiveOrders).await
    }

    /// The caller's account balance (requires credentials)
    pub async fn listen_account_balance(&self) -> WsResult<WsChannel> {
        self.open_channel(StreamChannel::AccountBalance).await
    }
}

impl Default for BitoProWsClient {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_header(request: &mut Request, name: &str, value: &str) -> WsResult<()> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|err| WsError::InvalidUrl(format!("header {}: {}", name, err)))?;
    let value = HeaderValue::from_str(value)
        .map_err(|err| WsError::InvalidUrl(format!("header {}: {}", name, err)))?;
    request.headers_mut().insert(name, value);
    Ok(())
}

/// One open stream channel
///
/// Owns its socket. Lifecycle is `Open → Closed` with `Closed` terminal;
/// there is no reconnection and no heartbeat handling. Payloads come back
/// as raw [`Message`] values, decodable into the `Ws*` shapes from
/// `bitopro-types`.
pub struct WsChannel {
    label: &'static str,
    url: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    state: ChannelState,
    event_tx: mpsc::UnboundedSender<ChannelEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<ChannelEvent>>,
}

impl WsChannel {
    async fn open(
        request: Request,
        url: String,
        label: &'static str,
        proxy: Option<&ProxyConfig>,
    ) -> WsResult<Self> {
        let uri = request.uri();
        let host = uri
            .host()
            .ok_or_else(|| WsError::InvalidUrl(format!("no host in {}", url)))?
            .to_string();
        let port = uri
            .port_u16()
            .unwrap_or(if uri.scheme_str() == Some("wss") { 443 } else { 80 });

        debug!("WebSocket({}) connecting: {}", label, url);

        let tcp = match proxy {
            Some(proxy) => {
                debug!(
                    "WebSocket({}) tunneling via socks5://{}:{}",
                    label, proxy.host, proxy.port
                );
                Socks5Stream::connect((proxy.host.as_str(), proxy.port), (host.as_str(), port))
                    .await?
                    .into_inner()
            }
            None => TcpStream::connect((host.as_str(), port)).await?,
        };

        // TLS (for wss) and the WebSocket handshake over whichever stream
        // the proxy decision produced
        let (stream, _response) = client_async_tls(request, tcp).await?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let channel = Self {
            label,
            url,
            stream,
            state: ChannelState::Open,
            event_tx,
            event_rx: Some(event_rx),
        };
        channel.emit(ChannelEvent::Opened);
        info!("WebSocket({}) open: {}", label, channel.url);
        Ok(channel)
    }

    /// Receive the next data message
    ///
    /// Ping/pong frames are handled internally. A close frame or end of
    /// stream moves the channel to `Closed` and yields `None`. Read errors
    /// come back as `Some(Err(_))` and are mirrored as
    /// [`ChannelEvent::Errored`]; they do not close the channel.
    pub async fn next(&mut self) -> Option<WsResult<Message>> {
        if self.state == ChannelState::Closed {
            return None;
        }
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Close(_))) | None => {
                    self.mark_closed();
                    return None;
                }
                Some(Ok(Message::Ping(_)))
                | Some(Ok(Message::Pong(_)))
                | Some(Ok(Message::Frame(_))) => continue,
                Some(Ok(message)) => return Some(Ok(message)),
                Some(Err(err)) => {
                    error!("WebSocket({}) error: {}", self.label, err);
                    self.emit(ChannelEvent::Errored {
                        message: err.to_string(),
                    });
                    return Some(Err(err.into()));
                }
            }
        }
    }

    /// Send a message on the channel
    pub async fn send(&mut self, message: Message) -> WsResult<()> {
        if self.state == ChannelState::Closed {
            return Err(WsError::Closed);
        }
        if let Err(err) = self.stream.send(message).await {
            error!("WebSocket({}) send failed: {}", self.label, err);
            self.emit(ChannelEvent::Errored {
                message: err.to_string(),
            });
            return Err(err.into());
        }
        Ok(())
    }

    /// Close the channel; idempotent
    pub async fn close(&mut self) -> WsResult<()> {
        if self.state == ChannelState::Closed {
            return Ok(());
        }
        let result = self.stream.close(None).await;
        self.mark_closed();
        match result {
            Ok(()) | Err(TungsteniteError::ConnectionClosed) | Err(TungsteniteError::AlreadyClosed) => {
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Short channel name used in log lines
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Full URL the channel was opened against
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Take the lifecycle event receiver (can only be taken once)
    ///
    /// `Opened` is already buffered when the channel is handed out, so it
    /// always arrives before any `Errored` or `Closed`.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<ChannelEvent>> {
        self.event_rx.take()
    }

    fn mark_closed(&mut self) {
        if self.state != ChannelState::Closed {
            self.state = ChannelState::Closed;
            self.emit(ChannelEvent::Closed);
            info!("WebSocket({}) closed: {}", self.label, self.url);
        }
    }

    fn emit(&self, event: ChannelEvent) {
        // Receiver may have been dropped; lifecycle events are best-effort
        let _ = self.event_tx.send(event);
    }
}

impl std::fmt::Debug for WsChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsChannel")
            .field("label", &self.label)
            .field("url", &self.url)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = BitoProWsClient::new();
        assert!(!client.has_credentials());
    }

    #[tokio::test]
    async fn test_private_channel_fails_fast_without_credentials() {
        // Unroutable base URL: the auth check must trip before any I/O
        let client = BitoProWsClient::with_config(
            WsConfig::new().with_base_url("ws://192.0.2.1:1"),
        );
        let err = client.listen_active_orders().await.unwrap_err();
        assert!(matches!(err, WsError::AuthRequired));

        let err = client.listen_account_balance().await.unwrap_err();
        assert!(matches!(err, WsError::AuthRequired));
    }

    #[test]
    fn test_config_builder() {
        let config = WsConfig::new()
            .with_base_url("ws://localhost:9443/ws/v1")
            .with_proxy(ProxyConfig::new("127.0.0.1", 1080));

        assert_eq!(config.base_url, "ws://localhost:9443/ws/v1");
        assert_eq!(config.proxy, Some(ProxyConfig::new("127.0.0.1", 1080)));
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let creds = Credentials::new("key", "ws-secret", "a@b.c").unwrap();
        let config = WsConfig::new().with_credentials(creds);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ws-secret"));
    }
}
