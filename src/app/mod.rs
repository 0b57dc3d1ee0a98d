// ==========================================
// 社区花名册 - 应用层
// ==========================================
// 职责: 会话上下文 / 结果缓存 / 应用共享状态
// ==========================================

pub mod cache;
pub mod session;
pub mod state;

// 重导出
pub use cache::{ContentHash, ResultCache};
pub use session::{AnalysisOutcome, LoadedFile, SessionContext};
pub use state::AppState;
