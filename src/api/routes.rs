use axum::Router;

pub mod hello;
pub mod system;

pub fn api_routes() -> Router {
    Router::new()
        .merge(hello::routes())
        .merge(system::routes())
}
