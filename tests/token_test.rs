use chrono::Utc;

use plyzer::error::Error;
use plyzer::management::TokenManager;
use plyzer::types::Token;

fn create_test_token(expires_in: u64, obtained_at: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-read-private".to_string(),
        expires_in,
        obtained_at,
    }
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}

#[test]
fn test_fresh_token_is_not_expired() {
    let manager = TokenManager::new(create_test_token(3600, now()));
    assert!(!manager.is_expired());
}

#[test]
fn test_token_close_to_expiry_is_expired() {
    // three minutes left is inside the refresh margin
    let manager = TokenManager::new(create_test_token(3600, now() - 3600 + 180));
    assert!(manager.is_expired());
}

#[tokio::test]
async fn test_persist_and_load() {
    let path = std::env::temp_dir()
        .join(format!("plyzer-token-test-{}", std::process::id()))
        .join("token.json");

    TokenManager::with_path(create_test_token(3600, 42), path.clone())
        .persist()
        .await
        .unwrap();

    let loaded = TokenManager::load_from(path.clone()).await.unwrap();
    assert_eq!(loaded.current_token().access_token, "access");
    assert_eq!(loaded.current_token().obtained_at, 42);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_missing_cache_is_auth_error() {
    let path = std::env::temp_dir().join("plyzer-token-test-missing/token.json");
    let result = TokenManager::load_from(path).await;
    assert!(matches!(result, Err(Error::AuthFlow(_))));
}
