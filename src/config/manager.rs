use once_cell::sync::OnceCell;
use config::ConfigError;
use tracing::debug;
use crate::config::types::ApplicationConfig;
use crate::config::loader::{ConfigLoader, Environment};
use crate::config::validation::validate_config;

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 獲取已初始化的應用程序配置
pub fn get_config() -> Option<&'static ApplicationConfig> {
    CONFIG.get()
}

/// 初始化配置（在應用程序啟動時調用），重複調用返回同一實例
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigError> {
    CONFIG.get_or_try_init(|| {
        let app_config = ApplicationConfig::load_from_env()?;
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
        Ok(app_config)
    })
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置，驗證失敗視為加載失敗
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load(env)?;

        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        validate_config(&app_config)
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        debug!("配置驗證通過");

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{CONFIG_DIR_VAR, ENV_VAR};
    use serial_test::serial;
    use std::env;
    use std::fs;

    fn write_config(dir: &std::path::Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    #[serial]
    fn test_environment_configuration() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "development.toml",
            r#"
            [log]
            level = "debug"
            format = "pretty"

            [server]
            host = "127.0.0.1"
            port = 3001
            "#,
        );
        env::set_var(CONFIG_DIR_VAR, dir.path());
        env::set_var(ENV_VAR, "development");

        let config = ApplicationConfig::load_from_env().expect("無法加載測試配置");

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.log.level, "debug");
        // 未在文件中出現的項目使用預設值
        assert_eq!(config.rest_api.base_path, "/api");
        assert_eq!(config.server.shutdown_timeout, 10);

        env::remove_var(CONFIG_DIR_VAR);
        env::remove_var(ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "production.toml",
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            "#,
        );
        env::set_var(CONFIG_DIR_VAR, dir.path());
        env::set_var("HELLO__SERVER__PORT", "0");
        env::set_var("HELLO__REST_API__BASE_PATH", "/v1");

        let config = ApplicationConfig::load(Environment::Production).unwrap();
        assert_eq!(config.server.port, 0);
        assert_eq!(config.rest_api.base_path, "/v1");

        env::remove_var("HELLO__SERVER__PORT");
        env::remove_var("HELLO__REST_API__BASE_PATH");
        env::remove_var(CONFIG_DIR_VAR);
    }

    #[test]
    #[serial]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "development.toml",
            r#"
            [log]
            level = "loud"
            "#,
        );
        env::set_var(CONFIG_DIR_VAR, dir.path());

        let err = ApplicationConfig::load(Environment::Development).unwrap_err();
        assert!(err.to_string().contains("log.level"));

        env::remove_var(CONFIG_DIR_VAR);
    }

    #[test]
    #[serial]
    fn test_init_config_is_shared() {
        env::remove_var(CONFIG_DIR_VAR);
        env::remove_var(ENV_VAR);

        let first = init_config().unwrap();
        let second = init_config().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(get_config().unwrap(), first));
    }
}
