// ==========================================
// 社区花名册 - 数据质量报告
// ==========================================
// 职责: 单次解析的只读快照（行数 / 识别率 / 表头行 / 社区列 / 字段映射）
// ==========================================

use crate::domain::community::{CommunityMap, CommunityRecord};
use crate::domain::schema::ColumnMapping;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DataQualityReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub analysis_id: String,                  // 分析批次 ID
    pub analyzed_at: DateTime<Utc>,           // 分析时间
    pub total_rows: usize,                    // 数据行总数（不含表头、空白行）
    pub processed_rows: usize,                // 识别为社区的行数
    pub skipped_rows: usize,                  // 跳过的行数
    pub detection_rate: f64,                  // processed_rows / total_rows
    pub header_row: usize,                    // 表头行号
    pub community_column: usize,              // 社区列下标
    pub community_column_name: Option<String>,
    pub headers: Vec<String>,                 // 解析后的列名
    pub column_mapping: ColumnMapping,        // 标准字段 → 列下标
    pub skipped_row_indices: Vec<usize>,      // 跳过行的原始行号
}

impl DataQualityReport {
    /// 识别率（总行数为 0 时为 0）
    pub fn detection_rate(processed_rows: usize, total_rows: usize) -> f64 {
        if total_rows == 0 {
            0.0
        } else {
            processed_rows as f64 / total_rows as f64
        }
    }
}

// ==========================================
// CommunityAnalysis - 单次分析结果
// ==========================================
// 说明: 空记录集 + 报告 = 文件有效但未识别到社区（区别于解码失败）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityAnalysis {
    pub records: CommunityMap,
    pub report: DataQualityReport,
}

impl CommunityAnalysis {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn community_count(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, name: &str) -> Option<&CommunityRecord> {
        self.records.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_rate_zero_total() {
        assert_eq!(DataQualityReport::detection_rate(0, 0), 0.0);
    }

    #[test]
    fn test_detection_rate_exact_ratio() {
        assert_eq!(DataQualityReport::detection_rate(2, 4), 0.5);
        assert_eq!(DataQualityReport::detection_rate(3, 3), 1.0);
        assert_eq!(DataQualityReport::detection_rate(1, 3), 1.0 / 3.0);
    }
}
