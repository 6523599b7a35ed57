//! End-to-end REST tests against a server on an ephemeral port.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use serde_json::Value;

use lodge_ledger::api;
use lodge_ledger::app_state::AppState;
use lodge_ledger::domain::EventBus;
use lodge_ledger::service::LedgerService;
use lodge_ledger::store::CsvStore;
use lodge_ledger::ws::handler::ws_handler;

async fn spawn_server() -> SocketAddr {
    let path = std::env::temp_dir().join(format!("lodge-ledger-e2e-{}.csv", uuid::Uuid::new_v4()));
    let store = CsvStore::new(path);
    let Ok(()) = store.initialize() else {
        panic!("store initialization failed");
    };

    let event_bus = EventBus::new(100);
    let ledger = Arc::new(LedgerService::new(store, event_bus.clone()));
    let state = AppState { ledger, event_bus };

    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await;
    let Ok(listener) = listener else {
        panic!("failed to bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("missing local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn post_record(client: &reqwest::Client, base: &str, name: &str) -> Value {
    let response = client
        .post(format!("{base}/records"))
        .json(&serde_json::json!({
            "name": name,
            "occupation": "Clerk",
            "lodge_date": "2024-07-12",
            "comments": "urgent"
        }))
        .send()
        .await;
    let Ok(response) = response else {
        panic!("post failed");
    };
    assert_eq!(response.status().as_u16(), 201);
    let body = response.json::<Value>().await;
    let Ok(body) = body else {
        panic!("created record should be JSON");
    };
    body
}

#[tokio::test]
async fn submit_then_list_round_trips() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let created = post_record(&client, &base, "A. Smith").await;
    assert_eq!(
        created.pointer("/lodge_date").and_then(Value::as_str),
        Some("12 July, 2024")
    );
    assert_eq!(
        created.pointer("/grant_date").and_then(Value::as_str),
        Some("None")
    );

    let response = client.get(format!("{base}/records")).send().await;
    let Ok(response) = response else {
        panic!("list failed");
    };
    assert_eq!(response.status().as_u16(), 200);
    let table = response.json::<Value>().await;
    let Ok(table) = table else {
        panic!("table should be JSON");
    };
    assert_eq!(table.pointer("/total").and_then(Value::as_u64), Some(1));
    assert_eq!(
        table.pointer("/data/0/name").and_then(Value::as_str),
        Some("A. Smith")
    );
    assert_eq!(
        table.pointer("/data/0/lodge_date").and_then(Value::as_str),
        Some("12 July, 2024")
    );
    assert!(table.pointer("/warning").is_none());
}

#[tokio::test]
async fn export_is_downloadable_html() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let _ = post_record(&client, &base, "A. Smith").await;

    let response = client.get(format!("{base}/records/export")).send().await;
    let Ok(response) = response else {
        panic!("export failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("table.html"));

    let body = response.text().await.unwrap_or_default();
    assert!(body.contains("<td>A. Smith</td>"));
    assert!(body.contains("<th>Grant Date</th>"));
}

#[tokio::test]
async fn empty_export_has_header_only() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/records/export")).send().await;
    let Ok(response) = response else {
        panic!("export failed");
    };
    let body = response.text().await.unwrap_or_default();
    assert!(body.contains("<th>Name</th>"));
    assert!(!body.contains("<td>"));
}

#[tokio::test]
async fn delete_keeps_remaining_order() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let _ = post_record(&client, &base, "A").await;
    let b = post_record(&client, &base, "B").await;
    let _ = post_record(&client, &base, "C").await;

    let Some(b_id) = b.pointer("/id").and_then(Value::as_str) else {
        panic!("created record should carry an id");
    };
    let response = client
        .delete(format!("{base}/records/{b_id}"))
        .send()
        .await;
    let Ok(response) = response else {
        panic!("delete failed");
    };
    assert_eq!(response.status().as_u16(), 204);

    let response = client.get(format!("{base}/records")).send().await;
    let Ok(response) = response else {
        panic!("list failed");
    };
    let table = response.json::<Value>().await.unwrap_or_default();
    let names: Vec<&str> = table
        .pointer("/data")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.pointer("/name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test]
async fn update_sets_grant_date() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let created = post_record(&client, &base, "A. Smith").await;
    let Some(id) = created.pointer("/id").and_then(Value::as_str) else {
        panic!("created record should carry an id");
    };

    let response = client
        .put(format!("{base}/records/{id}"))
        .json(&serde_json::json!({
            "name": "A. Smith",
            "occupation": "Clerk",
            "lodge_date": "2024-07-12",
            "grant_date": "2024-08-01",
            "comments": "approved"
        }))
        .send()
        .await;
    let Ok(response) = response else {
        panic!("update failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    let response = client.get(format!("{base}/records/{id}")).send().await;
    let Ok(response) = response else {
        panic!("get failed");
    };
    let record = response.json::<Value>().await.unwrap_or_default();
    assert_eq!(
        record.pointer("/grant_date").and_then(Value::as_str),
        Some("1 August, 2024")
    );
    assert_eq!(
        record.pointer("/comments").and_then(Value::as_str),
        Some("approved")
    );
}

#[tokio::test]
async fn unknown_id_is_404_with_error_body() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}/api/v1");
    let client = reqwest::Client::new();

    let missing = uuid::Uuid::new_v4();
    let response = client
        .get(format!("{base}/records/{missing}"))
        .send()
        .await;
    let Ok(response) = response else {
        panic!("get failed");
    };
    assert_eq!(response.status().as_u16(), 404);

    let body = response.json::<Value>().await.unwrap_or_default();
    assert_eq!(
        body.pointer("/error/code").and_then(Value::as_u64),
        Some(2001)
    );
}

#[tokio::test]
async fn health_is_ok() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("http://{addr}/health")).send().await;
    let Ok(response) = response else {
        panic!("health failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<Value>().await.unwrap_or_default();
    assert_eq!(
        body.pointer("/status").and_then(Value::as_str),
        Some("healthy")
    );
}
