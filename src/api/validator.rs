// ==========================================
// 社区花名册 - 上传校验器
// ==========================================
// 职责: 解析前拒绝非法上传（空文件名 / 扩展名 / 超限 / 空内容）
// 红线: 校验失败不得修改会话状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfigReader;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::importer::{file_extension, SpreadsheetFormat};

#[derive(Debug, Clone)]
pub struct UploadValidator {
    allowed_extensions: Vec<String>,
    max_upload_bytes: u64,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["xlsx".to_string(), "xls".to_string()],
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadValidator {
    pub fn from_config<C: EngineConfigReader + ?Sized>(config: &C) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions()
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_upload_bytes: config.max_upload_bytes(),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// 校验上传
    ///
    /// # 参数
    /// - filename: 原始文件名
    /// - size: 内容字节数
    ///
    /// # 返回
    /// - Ok(()): 可进入解析
    /// - Err(ApiError): InvalidInput / UnsupportedFormat / PayloadTooLarge
    pub fn validate(&self, filename: &str, size: u64) -> ApiResult<()> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(ApiError::InvalidInput("没有选择文件".to_string()));
        }

        // 既要在配置白名单内，也要是解码器支持的格式
        let extension = file_extension(filename);
        let decodable = SpreadsheetFormat::from_filename(filename).is_some();
        if !decodable || !self.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(ApiError::UnsupportedFormat {
                extension,
                allowed: self.allowed_extensions.join(", "),
            });
        }

        if size > self.max_upload_bytes {
            return Err(ApiError::PayloadTooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }

        if size == 0 {
            return Err(ApiError::InvalidInput("文件内容为空".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_accepts_supported_extensions() {
        let validator = UploadValidator::default();
        assert!(validator.validate("花名册.xlsx", 10).is_ok());
        assert!(validator.validate("ROSTER.XLS", 10).is_ok());
    }

    #[test]
    fn test_rejects_empty_filename() {
        let validator = UploadValidator::default();
        assert!(matches!(
            validator.validate("  ", 10),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let validator = UploadValidator::default();
        for name in ["data.csv", "data", "data.xlsx.txt"] {
            assert!(matches!(
                validator.validate(name, 10),
                Err(ApiError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_allow_list_cannot_enable_undecodable_format() {
        let mut config = EngineConfig::default();
        config.allowed_extensions = vec![".xlsx".to_string(), "CSV".to_string()];
        let validator = UploadValidator::from_config(&config);

        assert!(validator.validate("a.xlsx", 10).is_ok());
        match validator.validate("a.csv", 10) {
            Err(ApiError::UnsupportedFormat { extension, allowed }) => {
                assert_eq!(extension, "csv");
                assert_eq!(allowed, "xlsx, csv");
            }
            other => panic!("应拒绝 csv, 实际: {:?}", other),
        }
        // 解码器支持但不在白名单
        assert!(matches!(
            validator.validate("a.xls", 10),
            Err(ApiError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_size_limits() {
        let validator = UploadValidator::default();
        let limit = validator.max_upload_bytes();
        assert!(validator.validate("a.xlsx", limit).is_ok());
        assert!(matches!(
            validator.validate("a.xlsx", limit + 1),
            Err(ApiError::PayloadTooLarge { .. })
        ));
        assert!(matches!(
            validator.validate("a.xlsx", 0),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
