use axum::Router;

pub mod adjustments;
pub mod departments;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/adjustments", adjustments::router())
        .nest("/departments", departments::router())
}
