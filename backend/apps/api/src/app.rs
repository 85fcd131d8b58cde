//! Router Composition

use std::sync::Arc;

use auth::{AuthConfig, AuthGateState, PgAuthRepository, auth_router, require_bearer};
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use catalog::{PgCatalogRepository, catalog_router};
use orders::{PgOrderRepository, orders_router};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// All routes over one pool. Auth and orders share a single token service,
/// so tokens issued by `/auth/*` are the ones the order gate accepts.
pub fn build_router(pool: PgPool, auth: AuthConfig, frontend_origins: &[String]) -> Router {
    let gate = AuthGateState::from_config(&auth);

    let orders = orders_router(PgOrderRepository::new(pool.clone()))
        .route_layer(middleware::from_fn_with_state(gate.clone(), require_bearer));

    Router::new()
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            Arc::new(auth),
            gate,
        ))
        .merge(catalog_router(PgCatalogRepository::new(pool)))
        .merge(orders)
        .layer(TraceLayer::new_for_http())
        .layer(cors(frontend_origins))
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
