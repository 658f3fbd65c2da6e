use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::types::{LogConfig, RestApiConfig, ServerConfig};

/// 選擇運行環境的環境變數
pub const ENV_VAR: &str = "HELLO_ENV";
/// 配置目錄的環境變數
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";
/// 覆寫配置項的環境變數前綴，例如 `HELLO__SERVER__PORT=0`
pub const ENV_PREFIX: &str = "HELLO";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        Self::parse(&env::var(ENV_VAR).unwrap_or_else(|_| "development".into()))
    }

    /// 可接受的環境名稱
    pub const NAMES: [&'static str; 4] = ["development", "dev", "production", "prod"];

    /// 解析環境名稱，無法識別時返回 `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    /// 解析環境名稱，未知名稱記錄警告並視為開發環境
    pub fn parse(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("無法識別的運行環境 {:?}，改用 development", name);
            Environment::Development
        })
    }

    /// 轉換為配置文件名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 配置加載器，負責根據環境加載適當的配置
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置目錄，未設定時使用 `config`
    pub fn config_dir() -> PathBuf {
        PathBuf::from(env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "config".into()))
    }

    /// 載入指定環境的配置
    pub fn load(env: Environment) -> Result<Config, ConfigError> {
        Self::load_from_dir(&Self::config_dir(), env)
    }

    /// 從指定目錄載入配置，文件不存在時只使用預設值與環境變數
    pub fn load_from_dir(config_dir: &Path, env: Environment) -> Result<Config, ConfigError> {
        let config_path = config_dir.join(env.as_filename());

        let mut config_builder = Self::with_defaults(Config::builder())?;

        // 加載環境特定配置
        config_builder = config_builder.add_source(File::from(config_path).required(false));

        // 從環境變數加載配置（優先級高於文件配置）
        config_builder = config_builder.add_source(
            ConfigEnvironment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        config_builder.build()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let log = LogConfig::default();
        let server = ServerConfig::default();
        let rest_api = RestApiConfig::default();

        builder
            .set_default("log.level", log.level)?
            .set_default("log.format", log.format)?
            .set_default("server.host", server.host)?
            .set_default("server.port", server.port)?
            .set_default("server.shutdown_timeout", server.shutdown_timeout)?
            .set_default("rest_api.base_path", rest_api.base_path)?
            .set_default("rest_api.request_timeout", rest_api.request_timeout)
    }
}
