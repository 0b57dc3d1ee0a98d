// ==========================================
// 社区花名册 - API层
// ==========================================
// 职责: 对外数据契约（上传 / 查询 / 诊断）
// ==========================================

pub mod community_api;
pub mod error;
pub mod validator;

pub use community_api::{CommunityApi, CurrentFileInfo, UploadResponse};
pub use error::{ApiError, ApiResult};
pub use validator::UploadValidator;
