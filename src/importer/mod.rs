// ==========================================
// 社区花名册 - 导入层
// ==========================================
// 职责: 花名册字节 → 社区记录 + 数据质量报告
// 支持: Excel (xlsx / xls)
// ==========================================

// 模块声明
pub mod community_locator;
pub mod error;
pub mod events;
pub mod field_mapper;
pub mod file_parser;
pub mod header_locator;
pub mod name_extractor;
pub mod record_builder;
pub mod roster_importer_trait;
pub mod similarity;
pub mod value_normalizer;

// 重导出核心类型
pub use community_locator::{find_community_column, ColumnChoice, CommunityColumnLocator};
pub use error::{ImportError, ImportResult};
pub use events::{
    AnalysisEvent, AnalysisEventSink, CollectingEventSink, ColumnDetectionMethod, NoOpEventSink,
    TracingEventSink,
};
pub use field_mapper::{FieldMapper, FieldMatch, FieldMatchKind};
pub use file_parser::{file_extension, ExcelBytesParser, SpreadsheetFormat};
pub use header_locator::{detect_header_row, HeaderChoice, HeaderLocator};
pub use name_extractor::{extract_community_name, CommunityNameExtractor};
pub use record_builder::RecordBuilder;
pub use similarity::{scorer_by_name, JaroWinklerScorer, LevenshteinScorer};
pub use value_normalizer::{extract_count, normalize, ValueNormalizer};

// 重导出 Trait 接口
pub use roster_importer_trait::{RosterImporter, SimilarityScorer};
