use super::*;
use events::EventName;
use futures_util::SinkExt;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::time::{Duration, timeout};

type ServerStream = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

async fn relay_stub() -> (String, tokio::task::JoinHandle<ServerStream>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let accept = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("accept");
        tokio_tungstenite::accept_async(tcp).await.expect("handshake")
    });
    (format!("ws://{addr}/ws"), accept)
}

#[test]
fn ws_url_maps_http_schemes() {
    assert_eq!(ws_url("http://127.0.0.1:5000").unwrap(), "ws://127.0.0.1:5000/ws");
    assert_eq!(ws_url("https://relay.example/").unwrap(), "wss://relay.example/ws");
}

#[test]
fn ws_url_rejects_other_schemes() {
    assert!(matches!(ws_url("ftp://relay.example"), Err(CliError::InvalidBaseUrl(_))));
}

#[tokio::test]
async fn forwards_decoded_events_and_skips_garbage() {
    let (url, accept) = relay_stub().await;
    let (tx, mut rx) = mpsc::channel(8);
    let handle = subscribe(&url, tx).await.expect("subscribe");
    let mut server = accept.await.expect("accept task");

    let event = RelayEvent::new(EventName::TaskCreated, json!({ "id": "C1", "idList": "L1" }));
    server.send(Message::Text("not json".into())).await.expect("send garbage");
    server
        .send(Message::Text(events::encode_event(&event).into()))
        .await
        .expect("send event");

    let received = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("event within timeout")
        .expect("sink open");
    assert_eq!(received, event);

    handle.cancel();
}

#[tokio::test]
async fn cancel_stops_delivery() {
    let (url, accept) = relay_stub().await;
    let (tx, mut rx) = mpsc::channel(8);
    let handle = subscribe(&url, tx).await.expect("subscribe");
    let mut server = accept.await.expect("accept task");

    handle.cancel();
    let event = RelayEvent::new(EventName::TaskDeleted, json!({ "cardId": "C9" }));
    let _ = server.send(Message::Text(events::encode_event(&event).into())).await;

    // The aborted reader drops its sender, closing the sink.
    let closed = timeout(Duration::from_secs(2), rx.recv()).await.expect("sink closes");
    assert!(closed.is_none());
}

#[tokio::test]
async fn server_close_ends_subscription() {
    let (url, accept) = relay_stub().await;
    let (tx, mut rx) = mpsc::channel(8);
    let handle = subscribe(&url, tx).await.expect("subscribe");
    let mut server = accept.await.expect("accept task");

    server.close(None).await.expect("close");

    let closed = timeout(Duration::from_secs(2), rx.recv()).await.expect("sink closes");
    assert!(closed.is_none());
    timeout(Duration::from_secs(1), async {
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("reader task finishes");
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let (tx, _rx) = mpsc::channel(1);
    let result = subscribe(&format!("ws://{addr}/ws"), tx).await;
    assert!(matches!(result, Err(CliError::WsConnect(_))));
}
