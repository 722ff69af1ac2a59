use faultline::config::Config;
use faultline::daemon::DaemonServer;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "/api/v1/global-error-handler";

struct RunningDaemon {
    addr: SocketAddr,
    token: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningDaemon {
    async fn start(config: Config) -> Self {
        let server = DaemonServer::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();
        let token = CancellationToken::new();
        let handle = tokio::spawn(server.run(token.clone()));
        Self {
            addr,
            token,
            handle,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("http://{}{}{}", self.addr, BASE, endpoint)
    }

    async fn stop(self) {
        self.token.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

fn config_for(webhook: &MockServer) -> Config {
    Config {
        server: "127.0.0.1:0".to_string(),
        webhook_url: format!("{}/hook", webhook.uri()),
        delivery_retry_delay_ms: 10,
        ..Config::default()
    }
}

#[tokio::test]
async fn simulated_error_reaches_the_webhook() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(json!({
            "event_name": "Error Report",
            "status": "success",
            "username": "Global Error Handler",
            "message": {
                "ExceptionType": "InvalidOperation",
                "Message": "This is a test exception to simulate an error.",
                "HttpMethod": "GET",
                "Url": "/api/v1/global-error-handler/simulate-error",
                "StatusCode": 500
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook)
        .await;

    let daemon = RunningDaemon::start(config_for(&webhook)).await;

    let response = reqwest::get(daemon.url("/simulate-error")).await.unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "An internal server error occurred. Please try again later."})
    );

    // shutdown drains the delivery queue
    daemon.stop().await;
    assert_eq!(webhook.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failing_webhook_is_retried_then_dropped() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&webhook)
        .await;

    let daemon = RunningDaemon::start(config_for(&webhook)).await;

    let response = reqwest::get(daemon.url("/simulate-error")).await.unwrap();
    assert_eq!(response.status().as_u16(), 500);

    daemon.stop().await;
}

#[tokio::test]
async fn format_message_round_trip() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let daemon = RunningDaemon::start(config_for(&webhook)).await;

    let request = json!({
        "message": json!({
            "ErrorId": "abc-1",
            "Timestamp": "2025-02-20T10:15:30Z",
            "ExceptionType": "System.Exception",
            "Message": "Test error",
            "InnerExceptionMessage": "socket closed"
        }).to_string(),
        "settings": [
            {"label": "Include InnerException", "type": "checkbox", "default": "true"}
        ]
    });

    let client = reqwest::Client::new();
    let response = client
        .post(daemon.url("/format-message"))
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Error Id: abc-1\n\
         Error Timestamp: 2025-02-20T10:15:30.000Z\n\
         Exception: System.Exception\n\
         Message: Test error\n\
         HTTP Method:  || URL:  || Status Code: 0\n\
         ⚠️ Inner Exception: socket closed\n"
    );

    let response = client
        .post(daemon.url("/format-message"))
        .json(&json!({"message": "", "settings": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    drop(client);
    daemon.stop().await;
}

#[tokio::test]
async fn builtin_manifest_points_at_format_message() {
    let webhook = MockServer::start().await;
    let daemon = RunningDaemon::start(Config {
        public_url: Some("https://errors.example.com".to_string()),
        ..config_for(&webhook)
    })
    .await;

    let manifest: Value = reqwest::get(daemon.url("/integration.json"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        manifest["data"]["target_url"],
        "https://errors.example.com/api/v1/global-error-handler/format-message"
    );

    daemon.stop().await;
}

#[tokio::test]
async fn second_daemon_on_same_port_fails_to_bind() {
    let webhook = MockServer::start().await;
    let first = DaemonServer::bind(config_for(&webhook)).await.unwrap();
    let addr = first.local_addr().unwrap();

    let result = DaemonServer::bind(Config {
        server: addr.to_string(),
        ..config_for(&webhook)
    })
    .await;

    let err = result.err().unwrap();
    assert!(err.to_string().contains("already in use"), "{err}");
}

#[tokio::test]
async fn daemon_refuses_to_start_without_webhook_url() {
    let result = DaemonServer::bind(Config {
        server: "127.0.0.1:0".to_string(),
        ..Config::default()
    })
    .await;

    let err = result.err().unwrap();
    assert!(err.to_string().contains("webhook_url is missing"), "{err}");
}
