use axum::http::StatusCode;

/// `GET /hello` 的固定回應內容
pub const HELLO_MESSAGE: &str = "Hello, CI/CD!";

/// 返回固定字串，以 `text/plain; charset=utf-8` 輸出
pub async fn hello() -> &'static str {
    HELLO_MESSAGE
}

/// 未匹配任何路由時的回應
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
