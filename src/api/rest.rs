// src/api/rest.rs
use axum::Router;
use tower_http::{
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse},
    timeout::TimeoutLayer,
};
use tracing::{debug, Level};

use crate::config::RestApiConfig;
use super::{
    handlers::hello::not_found,
    routes::api_routes,
};

pub struct RestApi {
    api_config: RestApiConfig,
}

impl RestApi {
    pub fn new(api_config: RestApiConfig) -> Self {
        Self { api_config }
    }

    pub fn base_path(&self) -> &str {
        &self.api_config.base_path
    }

    /// 建立完整的應用路由，包含中間件
    pub fn router(&self) -> Router {
        let api_router = api_routes();

        // axum 不允許在根路徑 nest，根路徑直接合併
        let app = if self.api_config.base_path == "/" {
            Router::new().merge(api_router)
        } else {
            Router::new().nest(&self.api_config.base_path, api_router)
        };
        debug!(base_path = %self.api_config.base_path, "已掛載 API 路由");

        app.fallback(not_found)
            // 追蹤層
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO))
            )
            // 超時設置
            .layer(TimeoutLayer::new(self.api_config.request_timeout()))
    }
}
