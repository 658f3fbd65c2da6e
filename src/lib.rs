// 模組定義
pub mod api;
pub mod config;
pub mod monitor;
pub mod server;

pub use api::HELLO_MESSAGE;
pub use server::{Server, ServerBuilder, ServerError, ServerResult, ServerState};
