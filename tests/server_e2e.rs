//! End-to-end tests: boot the sheriff on an ephemeral port and talk to it
//! over real HTTP.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Notify};

use ssrf_sheriff::config::{AppState, Config, LogFormat, LogLevel};
use ssrf_sheriff::server;

fn config(templates_dir: &str, webhook_url: &str) -> Config {
    Config {
        addr: "127.0.0.1:0".to_string(),
        ssrf_token: "abc123".to_string(),
        webhook_url: webhook_url.to_string(),
        healthcheck_url: "/healthz".to_string(),
        logging_format: LogFormat::Console,
        log_file_name: None,
        log_level: LogLevel::Info,
        templates_dir: templates_dir.to_string(),
        cache_templates: true,
        workers: None,
        read_timeout: 5,
        max_connections: None,
        notify_timeout: 2,
        notify_queue_size: 16,
    }
}

/// Start the sheriff; returns its address and the shutdown handle
async fn start_sheriff(cfg: Config) -> (SocketAddr, Arc<Notify>) {
    let listener = server::create_reusable_listener(cfg.get_socket_addr().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let (state, _worker) = AppState::from_config(cfg).await.unwrap();

    let shutdown = Arc::new(Notify::new());
    tokio::spawn(server::start_server_loop(
        listener,
        Arc::new(state),
        Arc::clone(&shutdown),
    ));
    (addr, shutdown)
}

/// Minimal webhook receiver forwarding each POST body to a channel
async fn start_webhook_receiver() -> (String, mpsc::UnboundedReceiver<serde_json::Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                    let tx = tx.clone();
                    async move {
                        let body = req.into_body().collect().await.unwrap().to_bytes();
                        if let Ok(json) = serde_json::from_slice(&body) {
                            let _ = tx.send(json);
                        }
                        Ok::<_, Infallible>(Response::new(Full::new(Bytes::from_static(b"ok"))))
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (format!("http://{addr}/services/T000/B000"), rx)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn templates_dir() -> String {
    format!("{}/templates", env!("CARGO_MANIFEST_DIR"))
}

#[tokio::test]
async fn test_json_over_http() {
    let (addr, shutdown) = start_sheriff(config(&templates_dir(), "")).await;

    let response = client()
        .get(format!("http://{addr}/exfil.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(response.headers()["x-secret-token"], "abc123");
    assert_eq!(response.text().await.unwrap(), r#"{"token":"abc123"}"#);

    shutdown.notify_one();
}

#[tokio::test]
async fn test_any_method_and_template_formats() {
    let (addr, shutdown) = start_sheriff(config(&templates_dir(), "")).await;
    let client = client();

    let response = client
        .delete(format!("http://{addr}/admin/page.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/html");
    let html = response.text().await.unwrap();
    assert!(html.contains("abc123"));
    assert!(!html.contains("{{token}}"));

    let response = client
        .put(format!("http://{addr}/report.csv"))
        .body("ignored")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert_eq!(response.text().await.unwrap(), "token\nabc123\n");

    let response = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(response.headers()["content-type"], "text/plain");
    assert_eq!(response.text().await.unwrap(), "abc123");

    shutdown.notify_one();
}

#[tokio::test]
async fn test_missing_templates_give_empty_bodies() {
    let empty = tempfile::tempdir().unwrap();
    let dir = empty.path().to_string_lossy().into_owned();
    let (addr, shutdown) = start_sheriff(config(&dir, "")).await;

    let response = client()
        .get(format!("http://{addr}/data.csv"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert_eq!(response.headers()["x-secret-token"], "abc123");
    assert!(response.bytes().await.unwrap().is_empty());

    shutdown.notify_one();
}

#[tokio::test]
async fn test_uncached_templates_read_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(&dir.path().to_string_lossy(), "");
    cfg.cache_templates = false;
    let (addr, shutdown) = start_sheriff(cfg).await;
    let client = client();

    let response = client.get(format!("http://{addr}/a.csv")).send().await.unwrap();
    assert!(response.bytes().await.unwrap().is_empty());

    std::fs::write(dir.path().join("csv.csv"), "id\n{{token}}\n").unwrap();
    let response = client.get(format!("http://{addr}/a.csv")).send().await.unwrap();
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert_eq!(response.text().await.unwrap(), "id\nabc123\n");

    shutdown.notify_one();
}

#[tokio::test]
async fn test_hit_posts_webhook_alert() {
    let (webhook_url, mut alerts) = start_webhook_receiver().await;
    let (addr, shutdown) = start_sheriff(config(&templates_dir(), &webhook_url)).await;
    let client = client();

    // Health probes first: neither should produce an alert
    client
        .get(format!("http://{addr}/anything"))
        .header("User-Agent", "ELB-HealthChecker/2.0")
        .send()
        .await
        .unwrap();
    client
        .get(format!("http://{addr}/healthz"))
        .send()
        .await
        .unwrap();

    client
        .get(format!("http://{addr}/latest/meta-data.txt"))
        .header("User-Agent", "Go-http-client/1.1")
        .send()
        .await
        .unwrap();

    let alert = tokio::time::timeout(Duration::from_secs(5), alerts.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alert["username"], "SSRF Sheriff");
    assert_eq!(alert["mrkdwn"], true);
    let text = alert["text"].as_str().unwrap();
    assert!(text.contains("/latest/meta-data.txt"));
    assert!(text.contains("Go-http-client/1.1"));

    // Only the genuine hit was alerted
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(alerts.try_recv().is_err());

    shutdown.notify_one();
}
