/// 配置管理模組
///
/// 負責加載、驗證和管理服務配置。
/// 配置來源依優先級由低到高：內建預設值、環境配置文件、`HELLO__` 前綴環境變數。
// 宣告子模組
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use manager::{get_config, init_config};
pub use types::*;
pub use validation::{validate_config, ValidationError, ValidationUtils, Validator};
