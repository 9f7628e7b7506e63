#![allow(dead_code)]
//! Shared helpers for the integration tests: an in-process WebSocket server
//! built on the same transport stack as the client, plus polling utilities.

use futures_util::{SinkExt, StreamExt};
use notify_link::{ConnectionOptions, NotifyLinkTimeouts};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

pub type ServerWs = WebSocketStream<TcpStream>;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bind a listener on an ephemeral port and return it with the matching
/// client base URL.
pub async fn bind_server() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    (listener, base_url)
}

/// Accept one WebSocket connection, completing the handshake.
pub async fn accept_ws(listener: &TcpListener) -> ServerWs {
    let (stream, _) = timeout(TEST_TIMEOUT, listener.accept())
        .await
        .expect("timed out waiting for client connection")
        .expect("accept");
    tokio_tungstenite::accept_async(stream)
        .await
        .expect("websocket handshake")
}

/// Send one text frame from the server side.
pub async fn server_send(ws: &mut ServerWs, payload: &str) {
    ws.send(Message::Text(payload.to_string().into()))
        .await
        .expect("server send");
}

/// Read frames until a text frame arrives, returning its payload.
pub async fn next_text(ws: &mut ServerWs) -> String {
    loop {
        let frame = timeout(TEST_TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for client frame")
            .expect("client closed stream")
            .expect("client frame error");
        match frame {
            Message::Text(text) => return text.to_string(),
            _ => continue,
        }
    }
}

/// Poll `cond` until it holds or the test deadline passes.
pub async fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    while !cond() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Assert that no client connects within `window`.
pub async fn assert_no_connection(listener: &TcpListener, window: Duration) {
    if timeout(window, listener.accept()).await.is_ok() {
        panic!("unexpected client connection");
    }
}

/// Reconnect options tuned for tests: short delays, small cap.
pub fn fast_reconnect(max_attempts: u32) -> ConnectionOptions {
    ConnectionOptions::new()
        .with_reconnect_delay_ms(30)
        .with_max_reconnect_delay_ms(120)
        .with_max_reconnect_attempts(max_attempts)
}

/// Timeouts with heartbeats disabled, so liveness timers never interfere
/// with lifecycle assertions.
pub fn no_heartbeat() -> NotifyLinkTimeouts {
    NotifyLinkTimeouts::builder()
        .connection_timeout(Duration::from_secs(2))
        .heartbeat_interval(Duration::ZERO)
        .build()
}
