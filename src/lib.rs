// ==========================================
// 社区花名册 - 核心库
// ==========================================
// 职责: 从格式不统一的社区/村花名册表格中推断结构，
//       产出 社区名 → 结构化记录 的映射（地图看板数据源）
// 技术栈: Rust + calamine
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格 / 标准字段 / 社区记录 / 质量报告
pub mod domain;

// 导入层 - 推断引擎
pub mod importer;

// 配置层 - 引擎参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外数据契约
pub mod api;

// 应用层 - 会话与共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Cell, ColumnValue, CommunityAnalysis, CommunityMap, CommunityRecord, DataQualityReport,
    RawTable,
};

// 推断引擎
pub use importer::{ImportError, RecordBuilder, RosterImporter};

// API
pub use api::{ApiError, CommunityApi};

// 应用状态
pub use app::{AppState, SessionContext};

// 配置
pub use config::{ConfigManager, EngineConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "社区花名册分析";
