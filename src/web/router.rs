//! Router configuration for the Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_financial_record, create_user, delete_user, financial_monthly_trend, financial_report,
    get_user, list_financial_records, list_users, login, logout, me, navigate, record_scan,
    scan_stats, update_user, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/navigate", get(navigate));

    let user_routes = Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user).patch(update_user).delete(delete_user),
        );

    let financial_routes = Router::new()
        .route("/", get(list_financial_records).post(create_financial_record))
        .route("/report", get(financial_report))
        .route("/monthly-trend", get(financial_monthly_trend));

    let scan_routes = Router::new().route("/", get(scan_stats).post(record_scan));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/financial-records", financial_routes)
        .nest("/qr-scan", scan_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
