//! Retry and reconfiguration tests driven through a scripted transport.
//!
//! Time is paused so backoff waits complete instantly while elapsed time
//! can still be asserted exactly.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nexusmods_api::{
    ApiKey, ErrorCode, HttpRequest, NexusClient, NexusConfig, RawResponse, Transport,
    TransportError, TransportRequest,
};
use serde_json::json;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

type Step = Result<RawResponse, TransportError>;

/// Replays a fixed script and records every request it is given.
#[derive(Debug, Default)]
struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<TransportRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        self.steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("connection refused".to_string())))
    }
}

fn client_over(transport: &Arc<ScriptedTransport>) -> NexusClient {
    let config = NexusConfig::builder()
        .api_key(ApiKey::new("scripted-key").unwrap())
        .build()
        .unwrap();
    NexusClient::with_transport(config, Arc::clone(transport) as Arc<dyn Transport>)
}

fn ok(body: &str) -> Step {
    Ok(RawResponse::new(
        200,
        Vec::<(String, String)>::new(),
        body.as_bytes().to_vec(),
    ))
}

fn refused() -> Step {
    Err(TransportError::Connect("connection refused".to_string()))
}

fn header_value<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_host_yields_998_after_six_attempts() {
    let transport = ScriptedTransport::new(Vec::new());
    let client = client_over(&transport);
    let waits = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&waits);
    client.set_backoff_callback(move |secs| sink.lock().unwrap().push(secs));

    let started = Instant::now();
    let error = assert_err!(client.get_game("skyrim").await);

    assert_eq!(error.code(), ErrorCode::TransportExhausted);
    assert_eq!(error.endpoint(), "/v1/games/skyrim.json");
    assert_eq!(error.to_json()["code"], 998);
    assert_eq!(transport.seen().len(), 6);
    assert_eq!(*waits.lock().unwrap(), vec![2, 4, 8, 16, 32, 64]);
    assert_eq!(started.elapsed(), Duration::from_secs(126));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_then_success_waits_retry_after() {
    let transport = ScriptedTransport::new(vec![
        Ok(RawResponse::new(429, [("Retry-After", "5")], Vec::new())),
        ok(r#"{"mod_id":266}"#),
    ]);
    let client = client_over(&transport);

    let started = Instant::now();
    let document = assert_ok!(client.get_mod("skyrim", "266").await);

    assert_eq!(document, json!({"mod_id": 266}));
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_request_keeps_its_settings() {
    let transport = ScriptedTransport::new(vec![refused(), ok("{}"), ok("{}")]);
    let client = Arc::new(client_over(&transport));

    let in_flight = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.get_game("skyrim").await })
    };

    // The spawned request is now sleeping its 2s backoff.
    tokio::time::sleep(Duration::from_secs(1)).await;
    client.set_api_header_name("X-Other").unwrap();
    client.set_timeout_seconds(5).unwrap();

    assert_ok!(in_flight.await.unwrap());
    assert_ok!(client.get_game("skyrim").await);

    let seen = transport.seen();
    assert_eq!(seen.len(), 3);
    for attempt in &seen[..2] {
        assert_eq!(header_value(attempt, "apikey"), Some("scripted-key"));
        assert_eq!(header_value(attempt, "x-other"), None);
        assert_eq!(attempt.timeout, Duration::from_secs(30));
    }
    assert_eq!(header_value(&seen[2], "x-other"), Some("scripted-key"));
    assert_eq!(header_value(&seen[2], "apikey"), None);
    assert_eq!(seen[2].timeout, Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_callback_change_applies_to_next_request_only() {
    let transport = ScriptedTransport::new(vec![refused(), ok("{}"), refused(), ok("{}")]);
    let client = client_over(&transport);
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&first);
    client.set_backoff_callback(move |secs| sink.lock().unwrap().push(secs));
    assert_ok!(client.get_trending("skyrim").await);

    let sink = Arc::clone(&second);
    client.set_backoff_callback(move |secs| sink.lock().unwrap().push(secs));
    assert_ok!(client.get_trending("skyrim").await);

    client.clear_backoff_callback();

    assert_eq!(*first.lock().unwrap(), vec![2]);
    assert_eq!(*second.lock().unwrap(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_share_one_client() {
    let transport = ScriptedTransport::new(vec![ok("[1]"), ok("[1]"), ok("[1]"), ok("[1]")]);
    let client = Arc::new(client_over(&transport));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_latest_added("skyrim").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(assert_ok!(handle.await.unwrap()), json!([1]));
    }
    assert_eq!(transport.seen().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_caller_headers_survive_retries() {
    let transport = ScriptedTransport::new(vec![refused(), ok("{}")]);
    let client = client_over(&transport);
    let request = HttpRequest::builder("/v1/games/skyrim/mods/12/files.json")
        .query_param("category", "main")
        .header("Application-Name", "MyModManager")
        .build();

    assert_ok!(client.get_json(&request).await);

    let seen = transport.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert_eq!(
        seen[0].query,
        vec![("category".to_string(), "main".to_string())]
    );
    assert_eq!(header_value(&seen[0], "application-name"), Some("MyModManager"));
    assert_eq!(header_value(&seen[0], "accept"), Some("application/json"));
}
