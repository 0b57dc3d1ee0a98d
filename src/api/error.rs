// ==========================================
// 社区花名册 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入/配置错误转换为调用方可区分的错误
// 分类: 输入拒绝 / 解码失败 / 未识别到社区 / 查询未命中
// ==========================================

use crate::config::ConfigError;
use crate::domain::DataQualityReport;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
/// 所有分类均可由调用方恢复（更换文件重试 / 接受空结果）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入拒绝（解析前）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("不支持的文件格式: {extension}（仅支持 {allowed}）")]
    UnsupportedFormat { extension: String, allowed: String },

    #[error("文件过大: {size} 字节，上限 {limit} 字节")]
    PayloadTooLarge { size: u64, limit: u64 },

    // ==========================================
    // 解析结果
    // ==========================================
    #[error("文件解析失败: {0}")]
    DecodeFailed(String),

    /// 文件可解析但没有社区行；附带本次质量报告（未写入槽位）供排查
    #[error("未识别到社区数据: {filename}")]
    NoCommunitiesDetected {
        filename: String,
        report: Box<DataQualityReport>,
    },

    // ==========================================
    // 查询
    // ==========================================
    #[error("{0}")]
    NotFound(String),

    #[error("尚未上传文件")]
    NoFileLoaded,

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定的错误码（供前端/日志分类）
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ApiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ApiError::DecodeFailed(_) => "DECODE_FAILED",
            ApiError::NoCommunitiesDetected { .. } => "NO_COMMUNITIES_DETECTED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::NoFileLoaded => "NO_FILE_LOADED",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 查询未命中（404 语义）
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_) | ApiError::NoFileLoaded)
    }

    /// 解析前即被拒绝的输入
    pub fn is_input_rejected(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidInput(_)
                | ApiError::UnsupportedFormat { .. }
                | ApiError::PayloadTooLarge { .. }
        )
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        if err.is_decode_failure() {
            ApiError::DecodeFailed(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTable;
    use crate::importer::{RecordBuilder, RosterImporter};

    #[test]
    fn test_import_error_conversion() {
        let err: ApiError = ImportError::ExcelParseError {
            xlsx: "invalid zip".to_string(),
            xls: "invalid cfb".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "DECODE_FAILED");

        let err: ApiError = ImportError::InternalError("boom".to_string()).into();
        assert_eq!(err.kind(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::NotFound("未找到该社区数据: 张家村".to_string()).is_not_found());
        assert!(ApiError::NoFileLoaded.is_not_found());
        assert!(!ApiError::DecodeFailed("x".to_string()).is_not_found());

        let too_large = ApiError::PayloadTooLarge {
            size: 200,
            limit: 100,
        };
        assert!(too_large.is_input_rejected());
        let report = RecordBuilder::default()
            .build_from_table(&RawTable::default())
            .report;
        let empty = ApiError::NoCommunitiesDetected {
            filename: "a.xlsx".to_string(),
            report: Box::new(report),
        };
        assert!(!empty.is_input_rejected());
        assert_eq!(empty.to_string(), "未识别到社区数据: a.xlsx");
    }
}
