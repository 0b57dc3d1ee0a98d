// ==========================================
// 社区花名册 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 输入错误 =====
    #[error("文件内容为空")]
    EmptyInput,

    // ===== 解码错误 =====
    #[error("表格解码失败（xlsx: {xlsx}; xls: {xls}）")]
    ExcelParseError { xlsx: String, xls: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否为解码类错误（两种格式均无法解析）
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, ImportError::ExcelParseError { .. } | ImportError::EmptyInput)
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::InternalError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
