use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use hello_service::config::{self, Environment, loader::{CONFIG_DIR_VAR, ENV_VAR}};
use hello_service::monitor::init_logging;
use hello_service::server::ServerBuilder;

/// Hello 服務命令行參數，命令行參數優先於配置文件與環境變數
#[derive(Debug, Parser)]
#[command(name = "hello_service", version, about = "Serves GET /api/hello")]
struct Cli {
    /// 配置文件目錄
    #[arg(long, env = CONFIG_DIR_VAR)]
    config_dir: Option<PathBuf>,

    /// 運行環境 (development | production)
    #[arg(
        long,
        env = ENV_VAR,
        ignore_case = true,
        value_parser = clap::builder::PossibleValuesParser::new(Environment::NAMES),
    )]
    env: Option<String>,

    /// 監聽地址
    #[arg(long)]
    host: Option<String>,

    /// 監聽埠號，0 表示由系統分配
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    /// 將命令行參數寫入對應的環境變數，交由配置加載器統一處理
    fn apply_to_env(&self) {
        if let Some(dir) = &self.config_dir {
            env::set_var(CONFIG_DIR_VAR, dir);
        }
        if let Some(name) = &self.env {
            env::set_var(ENV_VAR, name);
        }
        if let Some(host) = &self.host {
            env::set_var("HELLO__SERVER__HOST", host);
        }
        if let Some(port) = self.port {
            env::set_var("HELLO__SERVER__PORT", port.to_string());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.apply_to_env();

    // 初始化配置
    let app_config = config::init_config()?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    let mut server = ServerBuilder::from_config(app_config).build()?;
    let addr = server.start().await?;

    info!("伺服器初始化完成，等待請求...");
    info!("監聽地址: {}", addr);

    // 等待關閉信號
    let signal_result = signal::ctrl_c().await;
    match &signal_result {
        Ok(()) => info!("接收到關閉信號，正在退出..."),
        Err(err) => error!("無法監聽關閉信號: {}", err),
    }

    server.shutdown().await?;

    signal_result.map_err(|err| anyhow!("無法監聽關閉信號: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    const OVERRIDES: [&str; 4] = [CONFIG_DIR_VAR, ENV_VAR, "HELLO__SERVER__HOST", "HELLO__SERVER__PORT"];

    fn clear_overrides() {
        for key in OVERRIDES {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_port_flag_maps_to_env_override() {
        clear_overrides();

        let cli = Cli::try_parse_from(["hello_service", "--port", "0"]).unwrap();
        cli.apply_to_env();

        assert_eq!(env::var("HELLO__SERVER__PORT").unwrap(), "0");
        assert!(env::var("HELLO__SERVER__HOST").is_err());

        clear_overrides();
    }

    #[test]
    #[serial]
    fn test_all_flags_map_to_env_overrides() {
        clear_overrides();

        let cli = Cli::try_parse_from([
            "hello_service",
            "--config-dir", "/etc/hello",
            "--env", "production",
            "--host", "127.0.0.1",
            "--port", "9090",
        ])
        .unwrap();
        cli.apply_to_env();

        assert_eq!(env::var(CONFIG_DIR_VAR).unwrap(), "/etc/hello");
        assert_eq!(Environment::from_env(), Environment::Production);
        assert_eq!(env::var("HELLO__SERVER__HOST").unwrap(), "127.0.0.1");
        assert_eq!(env::var("HELLO__SERVER__PORT").unwrap(), "9090");

        clear_overrides();
    }

    #[test]
    #[serial]
    fn test_unknown_env_name_is_rejected() {
        clear_overrides();

        assert!(Cli::try_parse_from(["hello_service", "--env", "prodution"]).is_err());
        assert!(Cli::try_parse_from(["hello_service", "--port", "70000"]).is_err());
    }
}
