#![allow(dead_code)]

use std::net::SocketAddr;

use hello_service::config::{RestApiConfig, ServerConfig};
use hello_service::server::{Server, ServerBuilder};

/// 測試伺服器配置：只監聽本機，埠號由系統分配
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        shutdown_timeout: 5,
    }
}

/// 以指定的 API 配置啟動測試伺服器
pub async fn spawn_server_with(api_config: RestApiConfig) -> (Server, SocketAddr) {
    let mut server = ServerBuilder::new()
        .with_server_config(test_server_config())
        .with_rest_api_config(api_config)
        .build()
        .expect("Failed to build test server");

    let addr = server.start().await.expect("Failed to start test server");
    (server, addr)
}

/// 以預設 API 配置啟動測試伺服器
pub async fn spawn_server() -> (Server, SocketAddr) {
    spawn_server_with(RestApiConfig::default()).await
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}
