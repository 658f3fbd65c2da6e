// src/api/routes/hello.rs
use axum::{
    routing::get,
    Router,
};
use crate::api::handlers::hello;

pub fn routes() -> Router {
    Router::new()
        .route("/hello", get(hello::hello))
}
