// api.rs - API服務模組，宣告子模組
//
// API服務模組提供對外的 HTTP 接口：
// - 路由表與處理器
// - 中間件堆疊（追蹤、超時）

/// REST API實現
pub mod rest;
/// API路由定義
pub mod routes;
/// API處理器模組
pub mod handlers;

pub use handlers::hello::HELLO_MESSAGE;
pub use rest::RestApi;
