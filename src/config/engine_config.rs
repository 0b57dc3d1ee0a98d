// ==========================================
// 社区花名册 - 引擎配置
// ==========================================
// 职责: 推断引擎阈值 / 扫描范围 / 上传限制 / 缓存开关
// 默认值即系统内置常量，配置文件只需覆写需要修改的项
// ==========================================

use crate::config::config_reader_trait::EngineConfigReader;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

/// 上传大小上限默认值（100MB）
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // ===== 表头识别 =====
    pub header_scan_rows: usize,

    // ===== 社区列识别 =====
    pub content_scan_columns: usize,
    pub content_scan_rows: usize,
    pub community_ratio_threshold: f64,
    pub default_community_column: usize,

    // ===== 字段映射 =====
    pub fuzzy_threshold: f64,
    pub similarity_scorer: String,

    // ===== 上传限制 =====
    pub max_upload_bytes: u64,
    pub allowed_extensions: Vec<String>,

    // ===== 结果缓存 =====
    pub cache_enabled: bool,
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 5,
            content_scan_columns: 5,
            content_scan_rows: 20,
            community_ratio_threshold: 0.3,
            default_community_column: 1,
            fuzzy_threshold: 0.6,
            similarity_scorer: "levenshtein".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: vec!["xlsx".to_string(), "xls".to_string()],
            cache_enabled: true,
            cache_capacity: 16,
        }
    }
}

impl EngineConfig {
    /// 校验取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("header_scan_rows", self.header_scan_rows)?;
        check_positive("content_scan_columns", self.content_scan_columns)?;
        check_positive("content_scan_rows", self.content_scan_rows)?;
        check_unit_interval("community_ratio_threshold", self.community_ratio_threshold)?;
        check_unit_interval("fuzzy_threshold", self.fuzzy_threshold)?;

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_upload_bytes".to_string(),
                value: "0".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "allowed_extensions".to_string(),
                value: "[]".to_string(),
                message: "至少允许一种扩展名".to_string(),
            });
        }

        if crate::importer::similarity::scorer_by_name(&self.similarity_scorer).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "similarity_scorer".to_string(),
                value: self.similarity_scorer.clone(),
                message: "仅支持 levenshtein / jaro_winkler".to_string(),
            });
        }

        Ok(())
    }
}

fn check_positive(key: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: "必须大于 0".to_string(),
        });
    }
    Ok(())
}

fn check_unit_interval(key: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: "必须在 [0, 1] 区间内".to_string(),
        });
    }
    Ok(())
}

impl EngineConfigReader for EngineConfig {
    fn header_scan_rows(&self) -> usize {
        self.header_scan_rows
    }

    fn content_scan_columns(&self) -> usize {
        self.content_scan_columns
    }

    fn content_scan_rows(&self) -> usize {
        self.content_scan_rows
    }

    fn community_ratio_threshold(&self) -> f64 {
        self.community_ratio_threshold
    }

    fn default_community_column(&self) -> usize {
        self.default_community_column
    }

    fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    fn similarity_scorer(&self) -> &str {
        &self.similarity_scorer
    }

    fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }
}
