use axum::Router;

pub mod rolls;
pub mod system;

/// Router for all roll endpoints.
pub fn router() -> Router {
    Router::new().nest("/rolls", rolls::router())
}
