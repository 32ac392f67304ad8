//! Integration tests against a loopback WebSocket server

use std::sync::Arc;

use bitopro_ws::{
    BitoProWsClient, BookDepth, ChannelEvent, ChannelState, Credentials, FixedClock, Message,
    StreamChannel, WsConfig, WsOrderBookEvent,
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{
    ErrorResponse, Request, Response,
};

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, base_url)
}

#[tokio::test]
async fn public_channel_streams_until_server_close() {
    let (listener, base_url) = bind().await;
    let (path_tx, path_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let api = request
                .headers()
                .get("X-BITOPRO-API")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            assert_eq!(api.as_deref(), Some("hello bitopro"));
            let _ = path_tx.send(request.uri().to_string());
            Ok(response)
        };
        let mut ws = accept_hdr_async(stream, callback).await.unwrap();

        ws.send(Message::Text(
            r#"{
                "event": "ORDER_BOOK",
                "pair": "BTC_USDT",
                "timestamp": 1639386803663,
                "datetime": "2021-12-13T09:13:23.663Z",
                "bids": [{"price": "40000.1", "amount": "0.5", "count": 2, "total": "0.5"}],
                "asks": [{"price": "40001.0", "amount": "1.25", "count": 1, "total": "1.25"}]
            }"#
            .to_string(),
        ))
        .await
        .unwrap();

        // Echo one client message back before closing
        if let Some(Ok(Message::Text(text))) = ws.next().await {
            ws.send(Message::Text(text)).await.unwrap();
        }
        ws.close(None).await.unwrap();
    });

    let client = BitoProWsClient::with_config(WsConfig::new().with_base_url(base_url));
    let mut channel = client
        .open_channel(StreamChannel::OrderBook {
            pair: "BTC_USDT".to_string(),
            depth: BookDepth::D5,
        })
        .await
        .unwrap();

    assert_eq!(channel.state(), ChannelState::Open);
    assert_eq!(channel.label(), "OrderBook");
    assert_eq!(path_rx.await.unwrap(), "/pub/order-books/BTC_USDT:5");

    let first = channel.next().await.unwrap().unwrap();
    let event: WsOrderBookEvent = match first {
        Message::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    };
    assert_eq!(event.event, "ORDER_BOOK");
    assert_eq!(event.pair, "BTC_USDT");
    assert_eq!(event.bids[0].count, 2);

    channel.send(Message::Text("ping".to_string())).await.unwrap();
    let echoed = channel.next().await.unwrap().unwrap();
    assert_eq!(echoed, Message::Text("ping".to_string()));

    // Server close frame ends the stream and the state machine
    assert!(channel.next().await.is_none());
    assert_eq!(channel.state(), ChannelState::Closed);
    assert!(channel.next().await.is_none());

    let mut events = channel.take_event_receiver().unwrap();
    assert_eq!(events.recv().await, Some(ChannelEvent::Opened));
    assert_eq!(events.recv().await, Some(ChannelEvent::Closed));
}

#[tokio::test]
async fn private_channel_signs_the_handshake() {
    let (listener, base_url) = bind().await;
    let (headers_tx, headers_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let pick = |name: &str| {
                request
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned)
            };
            let _ = headers_tx.send((
                request.uri().to_string(),
                pick("X-BITOPRO-APIKEY"),
                pick("X-BITOPRO-PAYLOAD"),
                pick("X-BITOPRO-SIGNATURE"),
            ));
            Ok(response)
        };
        let mut ws = accept_hdr_async(stream, callback).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let creds = Credentials::new("api-key-123", "super-secret", "trader@example.com").unwrap();
    let client = BitoProWsClient::with_config(
        WsConfig::new()
            .with_base_url(base_url)
            .with_credentials(creds)
            .with_clock(Arc::new(FixedClock(1_650_000_000_000))),
    );
    let mut channel = client.listen_active_orders().await.unwrap();

    // {"identity":"trader@example.com","nonce":1650000000000} under
    // secret "super-secret", verified against a reference implementation
    let (uri, api_key, payload, signature) = headers_rx.await.unwrap();
    assert_eq!(uri, "/pub/auth/orders");
    assert_eq!(api_key.as_deref(), Some("api-key-123"));
    assert_eq!(
        payload.as_deref(),
        Some("eyJpZGVudGl0eSI6InRyYWRlckBleGFtcGxlLmNvbSIsIm5vbmNlIjoxNjUwMDAwMDAwMDAwfQ==")
    );
    assert_eq!(
        signature.as_deref(),
        Some("c90f1e32970faa45396a9ae10fce2a4da642f1127417b858e9630d20b320622554c711a94e6eb31f1c486ad639f4b0d1")
    );

    assert!(channel.next().await.is_none());
    assert_eq!(channel.state(), ChannelState::Closed);
}

#[tokio::test]
async fn close_is_idempotent_and_send_after_close_fails() {
    let (listener, base_url) = bind().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        // Drain until the client closes
        while let Some(Ok(_)) = ws.next().await {}
    });

    let client = BitoProWsClient::with_config(WsConfig::new().with_base_url(base_url));
    let mut channel = client.listen_ticker("btc_usdt").await.unwrap();

    channel.close().await.unwrap();
    assert_eq!(channel.state(), ChannelState::Closed);
    channel.close().await.unwrap();

    let err = channel
        .send(Message::Text("late".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, bitopro_ws::WsError::Closed));

    let mut events = channel.take_event_receiver().unwrap();
    assert_eq!(events.recv().await, Some(ChannelEvent::Opened));
    assert_eq!(events.recv().await, Some(ChannelEvent::Closed));
    // Closed was emitted exactly once
    drop(channel);
    assert_eq!(events.recv().await, None);
}
