//! Shared helpers for web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use gymdesk::web::handlers::AppState;
use gymdesk::web::router::create_router;
use gymdesk::{Config, Database, NewUser, Role, UserRepository};

/// Create a test configuration with defaults suitable for in-process tests.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.logging.level = "warn".to_string();
    config.logging.file = String::new();
    config
}

/// Create a test server backed by a fresh in-memory database.
///
/// Cookie saving is enabled so a login response's session cookie is
/// replayed on subsequent requests, like a browser would.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let server = attach_server(&db);
    (server, db)
}

/// Attach another server to an existing database, simulating a second
/// client with its own cookie jar.
pub fn attach_server(db: &Database) -> TestServer {
    let config = test_config();

    let app_state = Arc::new(AppState::new(db.clone(), &config));
    let router = create_router(app_state, &config.web.cors_origins);

    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();
    server
}

/// Seed a user with the given role and return its id.
pub async fn seed_user(db: &Database, username: &str, password: &str, role: Role) -> i64 {
    let hash = gymdesk::hash_password(password).expect("Failed to hash password");
    let repo = UserRepository::new(db.pool());
    let user = repo
        .create(&NewUser::new(username, hash, username).with_role(role))
        .await
        .expect("Failed to seed user");
    user.id
}

/// Log in through the API and return the response body.
///
/// The session cookie is captured by the server's cookie jar.
pub async fn login(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}
