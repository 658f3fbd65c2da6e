use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::RestApi;
use crate::config::types::{ApplicationConfig, RestApiConfig, ServerConfig};
use crate::config::validation::Validator;
use crate::server::{ServerState, ServerError, ServerResult};

type ServeTask = JoinHandle<std::io::Result<()>>;

/// 伺服器實例
///
/// `start` 返回時監聽器已綁定並開始接受連線。
/// 未調用 `shutdown` 就丟棄實例時，關閉通道隨之關閉，服務同樣會優雅結束。
pub struct Server {
    /// 伺服器配置
    server_config: ServerConfig,
    /// REST API
    rest_api: RestApi,
    /// 伺服器狀態
    state: Arc<RwLock<ServerState>>,
    /// 實際綁定的地址
    local_addr: Option<SocketAddr>,
    /// 關閉通道發送端
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// HTTP 服務任務
    serve_task: Option<ServeTask>,
}

impl Server {
    /// 啟動伺服器，返回實際綁定的地址
    pub async fn start(&mut self) -> ServerResult<SocketAddr> {
        if self.serve_task.is_some() {
            return Err(ServerError::Runtime("伺服器已經啟動".to_string()));
        }

        info!("啟動伺服器...");
        self.set_state(ServerState::Initializing).await;

        let listener = match self.bind().await {
            Ok(listener) => listener,
            Err(e) => {
                error!("伺服器啟動失敗: {}", e);
                self.set_state(ServerState::Stopped).await;
                return Err(e);
            }
        };
        let local_addr = listener.local_addr()?;

        let app = self.rest_api.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let serve_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // 發送端被丟棄時同樣視為關閉訊號
                    let _ = shutdown_rx.await;
                })
                .await
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.serve_task = Some(serve_task);
        self.local_addr = Some(local_addr);
        self.set_state(ServerState::Running).await;

        info!("Starting REST API server on {}{}", local_addr, self.rest_api.base_path());

        Ok(local_addr)
    }

    async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.server_config.socket_addr()?;
        debug!("綁定監聽地址: {}", addr);

        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// 檢查伺服器健康狀態
    pub async fn check_health(&self) -> ServerResult<()> {
        debug!("檢查伺服器健康狀態");

        let state = self.state().await;
        if state != ServerState::Running {
            return Err(ServerError::Runtime(format!("伺服器狀態不是運行中: {:?}", state)));
        }

        match &self.serve_task {
            Some(task) if !task.is_finished() => Ok(()),
            _ => Err(ServerError::Runtime("HTTP 服務任務已結束".to_string())),
        }
    }

    /// 優雅關閉伺服器
    pub async fn shutdown(&mut self) -> ServerResult<()> {
        info!("正在關閉伺服器...");
        self.set_state(ServerState::ShuttingDown).await;

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                warn!("HTTP 服務任務已提前結束");
            }
        }

        let result = match self.serve_task.take() {
            Some(task) => self.wait_for_requests_completion(task).await,
            None => Ok(()),
        };

        self.local_addr = None;
        self.set_state(ServerState::Stopped).await;

        info!("伺服器已關閉");

        result
    }

    /// 等待進行中的請求完成，超過 `shutdown_timeout` 則強制中止
    async fn wait_for_requests_completion(&self, mut task: ServeTask) -> ServerResult<()> {
        let max_wait_time = self.server_config.shutdown_timeout();
        info!("等待所有正在處理的請求完成，最長 {:?}", max_wait_time);

        match tokio::time::timeout(max_wait_time, &mut task).await {
            Ok(Ok(Ok(()))) => {
                info!("所有請求已完成處理");
                Ok(())
            }
            Ok(Ok(Err(e))) => Err(ServerError::Io(e)),
            Ok(Err(e)) => Err(ServerError::Shutdown(format!("HTTP 服務任務異常結束: {}", e))),
            Err(_) => {
                warn!("等待請求完成超時，強制關閉");
                task.abort();
                let _ = task.await;
                Ok(())
            }
        }
    }

    async fn set_state(&self, next: ServerState) {
        let mut state = self.state.write().await;
        debug!("伺服器狀態: {:?} -> {:?}", *state, next);
        *state = next;
    }

    /// 獲取伺服器狀態
    pub async fn state(&self) -> ServerState {
        *self.state.read().await
    }

    /// 獲取實際綁定的地址，未啟動時為 `None`
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

/// 伺服器構建器
pub struct ServerBuilder {
    server_config: Option<ServerConfig>,
    rest_api_config: Option<RestApiConfig>,
}

impl ServerBuilder {
    /// 創建新的伺服器構建器
    pub fn new() -> Self {
        Self {
            server_config: None,
            rest_api_config: None,
        }
    }

    /// 從完整的應用程序配置建立構建器
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self::new()
            .with_server_config(config.server.clone())
            .with_rest_api_config(config.rest_api.clone())
    }

    /// 設置伺服器配置
    pub fn with_server_config(mut self, config: ServerConfig) -> Self {
        self.server_config = Some(config);
        self
    }

    /// 設置 REST API 配置
    pub fn with_rest_api_config(mut self, config: RestApiConfig) -> Self {
        self.rest_api_config = Some(config);
        self
    }

    /// 構建並返回伺服器實例
    pub fn build(self) -> ServerResult<Server> {
        info!("構建伺服器實例");

        let server_config = self.server_config
            .ok_or_else(|| ServerError::Config("未提供伺服器配置".to_string()))?;
        let rest_api_config = self.rest_api_config.unwrap_or_default();

        server_config.validate()?;
        rest_api_config.validate()?;

        let server = Server {
            server_config,
            rest_api: RestApi::new(rest_api_config),
            state: Arc::new(RwLock::new(ServerState::Initializing)),
            local_addr: None,
            shutdown_tx: None,
            serve_task: None,
        };

        info!("伺服器實例構建完成");

        Ok(server)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
