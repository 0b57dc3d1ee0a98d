// ==========================================
// 社区花名册 - 领域模型层
// ==========================================
// 职责: 定义表格、标准字段、社区记录、质量报告
// 红线: 不含解码逻辑，不含推断引擎逻辑
// ==========================================

pub mod community;
pub mod report;
pub mod schema;
pub mod table;

// 重导出核心类型
pub use community::{ColumnValue, CommunityMap, CommunityRecord, LegacyColumns, SmartMappingEntry};
pub use report::{CommunityAnalysis, DataQualityReport};
pub use schema::{
    CanonicalField, CanonicalSchema, ColumnMapping, COMMUNITY_FIELD, COMMUNITY_KEYWORDS,
    COMMUNITY_SUFFIXES, HEADER_KEYWORDS, TOWN_QUALIFIERS,
};
pub use table::{Cell, DataRow, HeaderedTable, RawTable};
