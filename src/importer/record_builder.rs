// ==========================================
// 社区花名册 - 社区记录构建器
// ==========================================
// 职责: 整合导入流程（解码 → 表头 → 社区列/字段映射 → 逐行抽取 → 报告）
// 红线: 解码失败整体返回 Err，不产出部分结果
// 红线: 行遍历保持原始顺序，重名时后出现的行覆盖前者
// ==========================================

use crate::config::EngineConfigReader;
use crate::domain::{
    ColumnMapping, ColumnValue, CommunityAnalysis, CommunityMap, CommunityRecord,
    DataQualityReport, DataRow, HeaderedTable, LegacyColumns, RawTable, SmartMappingEntry,
};
use crate::importer::community_locator::CommunityColumnLocator;
use crate::importer::error::ImportResult;
use crate::importer::events::{AnalysisEvent, AnalysisEventSink, TracingEventSink};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::ExcelBytesParser;
use crate::importer::header_locator::HeaderLocator;
use crate::importer::name_extractor::CommunityNameExtractor;
use crate::importer::roster_importer_trait::{RosterImporter, SimilarityScorer};
use crate::importer::similarity::{scorer_by_name, LevenshteinScorer};
use crate::importer::value_normalizer::ValueNormalizer;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

// ==========================================
// RecordBuilder - 导入主流程
// ==========================================
pub struct RecordBuilder {
    parser: ExcelBytesParser,
    header_locator: HeaderLocator,
    column_locator: CommunityColumnLocator,
    field_mapper: FieldMapper,
    normalizer: ValueNormalizer,
    extractor: CommunityNameExtractor,
    sink: Arc<dyn AnalysisEventSink>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self {
            parser: ExcelBytesParser,
            header_locator: HeaderLocator::default(),
            column_locator: CommunityColumnLocator::default(),
            field_mapper: FieldMapper::default(),
            normalizer: ValueNormalizer,
            extractor: CommunityNameExtractor,
            sink: Arc::new(TracingEventSink),
        }
    }
}

impl RecordBuilder {
    /// 按配置构建
    ///
    /// # 参数
    /// - config: 引擎配置（扫描范围 / 阈值 / 相似度策略）
    ///
    /// # 说明
    /// 未知的相似度策略名回退为 levenshtein（配置校验已拦截）
    pub fn from_config<C: EngineConfigReader + ?Sized>(config: &C) -> Self {
        let scorer: Box<dyn SimilarityScorer> = scorer_by_name(config.similarity_scorer())
            .unwrap_or_else(|| Box::new(LevenshteinScorer));

        Self {
            parser: ExcelBytesParser,
            header_locator: HeaderLocator::new(config.header_scan_rows()),
            column_locator: CommunityColumnLocator::new(
                config.content_scan_columns(),
                config.content_scan_rows(),
                config.community_ratio_threshold(),
                config.default_community_column(),
            ),
            field_mapper: FieldMapper::new(scorer, config.fuzzy_threshold()),
            normalizer: ValueNormalizer,
            extractor: CommunityNameExtractor,
            sink: Arc::new(TracingEventSink),
        }
    }

    /// 替换事件接收方
    pub fn with_event_sink(mut self, sink: Arc<dyn AnalysisEventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// 替换相似度策略与模糊匹配阈值
    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>, threshold: f64) -> Self {
        self.field_mapper = FieldMapper::new(scorer, threshold);
        self
    }

    fn analyze(&self, analysis_id: &str, table: &RawTable) -> CommunityAnalysis {
        // === 步骤 1: 表头行 ===
        let header_choice = self.header_locator.locate(table);
        self.sink.emit(
            analysis_id,
            AnalysisEvent::HeaderRowChosen {
                row_index: header_choice.row_index,
                score: header_choice.score,
            },
        );
        let headered = table.with_header(header_choice.row_index);

        // === 步骤 2: 社区列 + 字段映射 ===
        let column_choice = self.column_locator.locate(&headered);
        let community_column = column_choice.column_index;
        let community_column_name = headered.header(community_column).map(str::to_string);
        self.sink.emit(
            analysis_id,
            AnalysisEvent::CommunityColumnChosen {
                column_index: community_column,
                column_name: community_column_name.clone(),
                method: column_choice.method,
            },
        );

        let column_mapping = self.field_mapper.map_columns(headered.headers());
        self.sink.emit(
            analysis_id,
            AnalysisEvent::ColumnsMapped {
                mapping: column_mapping.clone(),
            },
        );

        // === 步骤 3: 逐行抽取 ===
        let mut records = CommunityMap::new();
        let mut processed_rows = 0usize;
        let mut skipped_row_indices = Vec::new();

        for row in headered.data_rows() {
            let cell = row.cell(community_column);
            let Some(name) = self.extractor.extract(cell) else {
                skipped_row_indices.push(row.source_row);
                self.sink.emit(
                    analysis_id,
                    AnalysisEvent::RowSkipped {
                        row_index: row.source_row,
                        cell_text: cell.as_text().unwrap_or_default(),
                    },
                );
                continue;
            };

            processed_rows += 1;
            self.sink.emit(
                analysis_id,
                AnalysisEvent::RowAccepted {
                    row_index: row.source_row,
                    name: name.clone(),
                },
            );

            let record = self.build_record(name.clone(), row, &headered, &column_mapping);
            if let Some(previous) = records.insert(name.clone(), record) {
                self.sink.emit(
                    analysis_id,
                    AnalysisEvent::DuplicateCommunity {
                        name,
                        previous_row: previous.row_index,
                        row_index: row.source_row,
                    },
                );
            }
        }

        // === 步骤 4: 质量报告 ===
        let total_rows = headered.row_count();
        let skipped_rows = skipped_row_indices.len();
        let detection_rate = DataQualityReport::detection_rate(processed_rows, total_rows);

        self.sink.emit(
            analysis_id,
            AnalysisEvent::AnalysisCompleted {
                total_rows,
                processed_rows,
                skipped_rows,
                detection_rate,
            },
        );

        CommunityAnalysis {
            records,
            report: DataQualityReport {
                analysis_id: analysis_id.to_string(),
                analyzed_at: Utc::now(),
                total_rows,
                processed_rows,
                skipped_rows,
                detection_rate,
                header_row: headered.header_row(),
                community_column,
                community_column_name,
                headers: headered.headers().to_vec(),
                column_mapping,
                skipped_row_indices,
            },
        }
    }

    fn build_record(
        &self,
        name: String,
        row: &DataRow,
        headered: &HeaderedTable,
        column_mapping: &ColumnMapping,
    ) -> CommunityRecord {
        let columns: IndexMap<String, ColumnValue> = headered
            .headers()
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let (raw_data, people_count) = self.normalizer.normalize_with_count(row.cell(col));
                (
                    header.clone(),
                    ColumnValue {
                        raw_data,
                        people_count,
                    },
                )
            })
            .collect();

        let smart_mapping = column_mapping
            .iter()
            .map(|(field, &column_index)| {
                (
                    field.clone(),
                    SmartMappingEntry {
                        raw_data: self.normalizer.normalize(row.cell(column_index)),
                        column_index,
                        column_name: headered.header(column_index).unwrap_or_default().to_string(),
                    },
                )
            })
            .collect();

        let legacy = LegacyColumns::from_columns(headered.headers(), &columns);

        CommunityRecord {
            name,
            row_index: row.source_row,
            columns,
            smart_mapping,
            legacy,
        }
    }
}

impl RosterImporter for RecordBuilder {
    #[instrument(skip(self, bytes), fields(byte_len = bytes.len()))]
    fn build_records(&self, bytes: &[u8]) -> ImportResult<CommunityAnalysis> {
        let analysis_id = Uuid::new_v4().to_string();

        let (table, format) = self.parser.decode_with_format(bytes).map_err(|e| {
            error!(analysis_id = %analysis_id, error = %e, "花名册解码失败");
            e
        })?;

        self.sink.emit(
            &analysis_id,
            AnalysisEvent::TableDecoded {
                format,
                rows: table.row_count(),
                columns: table.column_count(),
            },
        );

        Ok(self.analyze(&analysis_id, &table))
    }

    fn build_from_table(&self, table: &RawTable) -> CommunityAnalysis {
        let analysis_id = Uuid::new_v4().to_string();
        self.analyze(&analysis_id, table)
    }
}
