use serde::{Serialize, Deserialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub server: ServerConfig,
    pub rest_api: RestApiConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.log.validate()?;
        self.server.validate()?;
        self.rest_api.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level"
        )?;

        ValidationUtils::one_of(
            &self.format.to_lowercase().as_str(),
            &["pretty", "json"],
            "log.format"
        )?;

        Ok(())
    }
}

/// 伺服器配置
///
/// `port` 為 0 時由作業系統分配埠號。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 優雅關閉時等待進行中請求的最長時間（秒）
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 10,
        }
    }
}

impl ServerConfig {
    /// 解析監聽地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip = ValidationUtils::ip_addr(&self.host, "server.host")?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// 優雅關閉的等待時間
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

impl Validator for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.host, "server.host")?;
        let _: IpAddr = ValidationUtils::ip_addr(&self.host, "server.host")?;
        ValidationUtils::in_range(self.shutdown_timeout, 1, 300, "server.shutdown_timeout")?;

        Ok(())
    }
}

/// REST API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    /// 所有路由掛載的前綴，例如 `/api`
    pub base_path: String,
    /// 單一請求的處理超時（秒）
    pub request_timeout: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            base_path: "/api".to_string(),
            request_timeout: 30,
        }
    }
}

impl RestApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Validator for RestApiConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.base_path, "rest_api.base_path")?;
        ValidationUtils::path_prefix(&self.base_path, "rest_api.base_path")?;
        ValidationUtils::in_range(self.request_timeout, 1, 3600, "rest_api.request_timeout")?;

        Ok(())
    }
}
