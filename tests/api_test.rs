use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use plyzer::config::Config;
use plyzer::error::Error;
use plyzer::management::TokenManager;
use plyzer::server::router;
use plyzer::spotify::AuthProvider;
use plyzer::spotify::auth::{authorize_url, token_from_json};
use plyzer::types::Token;

fn create_test_config_with(upstream: Option<&str>) -> Config {
    let mut values: HashMap<&str, String> = HashMap::from([
        ("SPOTIFY_CLIENT_ID", "client".to_string()),
        ("SPOTIFY_CLIENT_SECRET", "secret".to_string()),
        ("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8888/callback".to_string()),
    ]);
    if let Some(base) = upstream {
        values.insert("SPOTIFY_API_URL", format!("{}/v1", base));
        values.insert("SPOTIFY_TOKEN_URL", format!("{}/api/token", base));
    }
    Config::from_lookup(|key: &str| values.get(key).cloned(), "test").unwrap()
}

fn create_test_config() -> Config {
    create_test_config_with(None)
}

fn create_test_token(obtained_at: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-read-private".to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

fn temp_token_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("plyzer-api-test-{}-{}", name, std::process::id()))
        .join("token.json")
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_server() -> String {
    let auth = AuthProvider::new(Arc::new(create_test_config()));
    serve(router(Arc::new(Mutex::new(None)), auth)).await
}

async fn token_endpoint(State(calls): State<Arc<AtomicUsize>>) -> Json<Value> {
    calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "access_token": "fresh", "expires_in": 3600 }))
}

async fn empty_tracks() -> Json<Value> {
    Json(json!({ "items": [], "next": null, "offset": 0, "limit": 100, "total": 0 }))
}

/// Fake accounts service and Web API. Returns the base URL and the number of
/// token requests served.
async fn spawn_upstream() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/token", post(token_endpoint))
        .route("/v1/playlists/{id}/tracks", get(empty_tracks))
        .with_state(Arc::clone(&calls));
    (serve(app).await, calls)
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server().await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "plyzer");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_analyze_rejects_invalid_input() {
    let base = spawn_server().await;

    let response = reqwest::get(format!(
        "{}/api/analyze?playlist=https%3A%2F%2Fopen.spotify.com%2Falbum%2Fxyz",
        base
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["retryable"], false);
    assert!(body["remediation"].as_str().unwrap().contains("playlist"));
}

#[tokio::test]
async fn test_callback_without_pending_authorization() {
    let base = spawn_server().await;

    let body = reqwest::get(format!("{}/callback?code=abc&state=xyz", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("No authorization in progress"));
}

#[tokio::test]
async fn test_export_of_empty_playlist_is_empty_result() {
    let (upstream, _) = spawn_upstream().await;
    let path = temp_token_path("export");
    let auth = AuthProvider::with_token_manager(
        Arc::new(create_test_config_with(Some(&upstream))),
        TokenManager::with_path(create_test_token(Utc::now().timestamp() as u64), path),
    );
    let base = serve(router(Arc::new(Mutex::new(None)), auth)).await;

    let response = reqwest::get(format!("{}/api/export?playlist=emptyplaylist", base))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn test_concurrent_clients_refresh_token_once() {
    let (upstream, token_calls) = spawn_upstream().await;
    let path = temp_token_path("refresh");
    // long expired
    let auth = AuthProvider::with_token_manager(
        Arc::new(create_test_config_with(Some(&upstream))),
        TokenManager::with_path(create_test_token(0), path.clone()),
    );

    let (first, second) = tokio::join!(auth.client(), auth.client());

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(token_calls.load(Ordering::SeqCst), 1);

    let persisted = TokenManager::load_from(path.clone()).await.unwrap();
    assert_eq!(persisted.current_token().access_token, "fresh");
    // the refresh token is kept when the response omits it
    assert_eq!(persisted.current_token().refresh_token, "refresh");

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_error_status_codes() {
    use axum::http::StatusCode;

    assert_eq!(
        Error::InvalidInput("x".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(Error::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        Error::RateLimited { retry_after: 3 }.status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        Error::EmptyResult("x".into()).status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(Error::Fetch("x".into()).status_code(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_authorize_url() {
    let url = authorize_url(&create_test_config(), "state123").unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(params["client_id"], "client");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:8888/callback");
    assert_eq!(params["state"], "state123");
    assert!(params["scope"].contains("playlist-read-private"));
}

#[test]
fn test_token_from_json() {
    let token = token_from_json(
        &json!({
            "access_token": "access",
            "refresh_token": "refresh",
            "scope": "playlist-read-private",
            "expires_in": 3600
        }),
        None,
    )
    .unwrap();

    assert_eq!(token.access_token, "access");
    assert_eq!(token.refresh_token, "refresh");
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_from_json_keeps_previous_refresh_token() {
    let token = token_from_json(&json!({ "access_token": "new" }), Some("old-refresh")).unwrap();
    assert_eq!(token.refresh_token, "old-refresh");
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_from_json_without_access_token() {
    let result = token_from_json(&json!({ "error": "invalid_grant" }), None);
    assert!(matches!(result, Err(Error::AuthFlow(_))));
}
