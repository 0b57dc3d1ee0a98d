// ==========================================
// 社区花名册 - 配置层
// ==========================================
// 职责: 引擎参数管理，支持 默认值 → 配置文件 → 环境变量 逐级覆写
// ==========================================

pub mod config_manager;
pub mod config_reader_trait;
pub mod engine_config;
pub mod error;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigManager, ConfigSource};
pub use config_reader_trait::EngineConfigReader;
pub use engine_config::{EngineConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::ConfigError;
