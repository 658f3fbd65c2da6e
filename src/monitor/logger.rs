// monitor/logger.rs - 日誌初始化

use std::fmt;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::monitor::{MonitorError, MonitorResult};

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人類可讀格式
    Pretty,
    /// 每行一個 JSON 物件
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> MonitorResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(MonitorError::LoggerError(format!("未知的日誌格式: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 建立過濾器，`RUST_LOG` 優先於配置中的級別
fn build_filter(level: &str) -> MonitorResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.to_lowercase())
            .map_err(|e| MonitorError::LoggerError(format!("無效的日誌級別 {}: {}", level, e))),
    }
}

/// 初始化全局日誌系統
///
/// 只能成功調用一次；再次調用返回 `MonitorError::InitializationError`。
pub fn init_logging(log_config: &LogConfig) -> MonitorResult<()> {
    let filter = build_filter(&log_config.level)?;
    let format = LogFormat::parse(&log_config.format)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| MonitorError::InitializationError(format!("設置日誌系統失敗: {}", e)))?;

    tracing::info!(format = %format, level = %log_config.level, "日誌系統初始化完成");
    Ok(())
}
