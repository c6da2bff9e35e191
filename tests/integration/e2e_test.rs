//! End-to-end integration tests

use goldboard::config::Config;
use goldboard::feed::build_feed;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.scheduler.interval_secs, 30);
    assert!(config.validate().is_ok());
}

/// Serve the same JSON body to every request
async fn spot_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/v1/spot/gold", addr)
}

#[tokio::test]
async fn test_upstream_price_reaches_subscribers() {
    let mut config = Config::default();
    config.source.url = spot_server(r#"{"price": 3100.0, "change": 12.0}"#).await;

    let feed = build_feed(&config, false).unwrap();
    let snapshot = feed.tick_now().await.unwrap();

    let expected = dec!(3100.0) / dec!(31.1035) * dec!(0.85);
    assert!((snapshot.price - expected).abs() < dec!(0.000001));
    assert_eq!(feed.latest(), snapshot);
}

#[tokio::test]
async fn test_unconvertible_upstream_falls_back() {
    // 95 USD/oz converts to ~2.6 EUR/g, below the 80 EUR/g floor
    let mut config = Config::default();
    config.source.url = spot_server(r#"{"price": 95.0, "change": 1.0}"#).await;

    let feed = build_feed(&config, false).unwrap();
    let snapshot = feed.tick_now().await.unwrap();

    assert!(snapshot.price >= config.simulator.floor);
    assert_eq!(snapshot.change, snapshot.price - dec!(85.25));
}
