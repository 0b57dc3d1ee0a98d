// ==========================================
// 社区花名册 - 社区记录领域模型
// ==========================================
// 职责: 每个社区/村一条结构化记录（看板数据契约）
// 用途: 导入层写入，API 层只读
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ==========================================
// ColumnValue - 单列取值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValue {
    pub raw_data: String,  // 标准化原始值（空值为 "0"）
    pub people_count: u64, // 文本中 "x人" 的人数（无则 0）
}

// ==========================================
// SmartMappingEntry - 标准字段映射值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartMappingEntry {
    pub raw_data: String,
    pub column_index: usize,
    pub column_name: String,
}

// ==========================================
// LegacyColumns - 旧版按位置字段
// ==========================================
// 用途: 兼容旧看板，镜像第 2~5 列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyColumns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count_col2: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count_col3: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count_col4: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count_col5: Option<u64>,
}

impl LegacyColumns {
    /// 按表头位置取第 2~5 列
    pub fn from_columns(headers: &[String], columns: &IndexMap<String, ColumnValue>) -> Self {
        let at = |idx: usize| headers.get(idx).and_then(|h| columns.get(h));

        let mut legacy = LegacyColumns::default();
        if let Some(v) = at(1) {
            legacy.column2 = Some(v.raw_data.clone());
            legacy.people_count_col2 = Some(v.people_count);
        }
        if let Some(v) = at(2) {
            legacy.column3 = Some(v.raw_data.clone());
            legacy.people_count_col3 = Some(v.people_count);
        }
        if let Some(v) = at(3) {
            legacy.column4 = Some(v.raw_data.clone());
            legacy.people_count_col4 = Some(v.people_count);
        }
        if let Some(v) = at(4) {
            legacy.column5 = Some(v.raw_data.clone());
            legacy.people_count_col5 = Some(v.people_count);
        }
        legacy
    }
}

// ==========================================
// CommunityRecord - 社区记录
// ==========================================
// 红线: name 非空、非 "nan"、含社区/村关键词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRecord {
    pub name: String,
    pub row_index: usize, // 原始表行号
    pub columns: IndexMap<String, ColumnValue>,
    pub smart_mapping: IndexMap<String, SmartMappingEntry>,
    #[serde(flatten)]
    pub legacy: LegacyColumns,
}

impl CommunityRecord {
    pub fn column(&self, header: &str) -> Option<&ColumnValue> {
        self.columns.get(header)
    }

    /// 所有列人数合计
    pub fn total_people(&self) -> u64 {
        self.columns.values().map(|v| v.people_count).sum()
    }
}

/// 社区名 → 记录（按首次出现顺序）
pub type CommunityMap = IndexMap<String, CommunityRecord>;
