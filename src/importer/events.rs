// ==========================================
// 社区花名册 - 分析事件发布
// ==========================================
// 职责: 推断引擎的结构化观测边界
// 说明: 引擎只发布事件，日志级别/去向由事件接收方决定
// ==========================================

use crate::domain::ColumnMapping;
use crate::importer::file_parser::SpreadsheetFormat;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// ==========================================
// 事件类型
// ==========================================

/// 社区列识别方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnDetectionMethod {
    /// 表头命中社区名同义词
    HeaderMatch,
    /// 内容扫描，ratio 为关键词命中率
    ContentScan { ratio: f64 },
    /// 两种方式均未命中，使用默认列
    Default,
}

/// 分析事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalysisEvent {
    TableDecoded {
        format: SpreadsheetFormat,
        rows: usize,
        columns: usize,
    },
    HeaderRowChosen {
        row_index: usize,
        score: usize,
    },
    CommunityColumnChosen {
        column_index: usize,
        column_name: Option<String>,
        method: ColumnDetectionMethod,
    },
    ColumnsMapped {
        mapping: ColumnMapping,
    },
    RowAccepted {
        row_index: usize,
        name: String,
    },
    RowSkipped {
        row_index: usize,
        cell_text: String,
    },
    DuplicateCommunity {
        name: String,
        previous_row: usize,
        row_index: usize,
    },
    AnalysisCompleted {
        total_rows: usize,
        processed_rows: usize,
        skipped_rows: usize,
        detection_rate: f64,
    },
}

impl AnalysisEvent {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisEvent::TableDecoded { .. } => "TableDecoded",
            AnalysisEvent::HeaderRowChosen { .. } => "HeaderRowChosen",
            AnalysisEvent::CommunityColumnChosen { .. } => "CommunityColumnChosen",
            AnalysisEvent::ColumnsMapped { .. } => "ColumnsMapped",
            AnalysisEvent::RowAccepted { .. } => "RowAccepted",
            AnalysisEvent::RowSkipped { .. } => "RowSkipped",
            AnalysisEvent::DuplicateCommunity { .. } => "DuplicateCommunity",
            AnalysisEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
        }
    }
}

// ==========================================
// AnalysisEventSink Trait
// ==========================================
pub trait AnalysisEventSink: Send + Sync {
    fn emit(&self, analysis_id: &str, event: AnalysisEvent);
}

/// 转发到 tracing（默认）
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink;

impl AnalysisEventSink for TracingEventSink {
    fn emit(&self, analysis_id: &str, event: AnalysisEvent) {
        match &event {
            AnalysisEvent::TableDecoded {
                format,
                rows,
                columns,
            } => tracing::info!(analysis_id, %format, rows, columns, "表格解码完成"),
            AnalysisEvent::HeaderRowChosen { row_index, score } => {
                tracing::info!(analysis_id, row_index, score, "选定表头行")
            }
            AnalysisEvent::CommunityColumnChosen {
                column_index,
                column_name,
                method,
            } => tracing::info!(
                analysis_id,
                column_index,
                column_name = column_name.as_deref().unwrap_or(""),
                method = ?method,
                "选定社区列"
            ),
            AnalysisEvent::ColumnsMapped { mapping } => {
                tracing::info!(analysis_id, mapping = ?mapping, "标准字段映射完成")
            }
            AnalysisEvent::RowAccepted { row_index, name } => {
                tracing::debug!(analysis_id, row_index, name = %name, "识别社区行")
            }
            AnalysisEvent::RowSkipped {
                row_index,
                cell_text,
            } => tracing::debug!(analysis_id, row_index, cell_text = %cell_text, "跳过非社区行"),
            AnalysisEvent::DuplicateCommunity {
                name,
                previous_row,
                row_index,
            } => tracing::warn!(
                analysis_id,
                name = %name,
                previous_row,
                row_index,
                "社区名重复，后出现的行覆盖前者"
            ),
            AnalysisEvent::AnalysisCompleted {
                total_rows,
                processed_rows,
                skipped_rows,
                detection_rate,
            } => tracing::info!(
                analysis_id,
                total_rows,
                processed_rows,
                skipped_rows,
                detection_rate,
                "社区数据分析完成"
            ),
        }
    }
}

/// 空操作接收方
#[derive(Debug, Clone, Default)]
pub struct NoOpEventSink;

impl AnalysisEventSink for NoOpEventSink {
    fn emit(&self, _analysis_id: &str, _event: AnalysisEvent) {}
}

/// 收集事件（诊断 / 测试）
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<AnalysisEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 已收集事件快照
    pub fn events(&self) -> Vec<AnalysisEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == name).count()
    }
}

impl AnalysisEventSink for CollectingEventSink {
    fn emit(&self, _analysis_id: &str, event: AnalysisEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_records_events() {
        let sink = CollectingEventSink::new();
        sink.emit(
            "A1",
            AnalysisEvent::HeaderRowChosen {
                row_index: 0,
                score: 3,
            },
        );
        sink.emit(
            "A1",
            AnalysisEvent::RowSkipped {
                row_index: 2,
                cell_text: "合计".to_string(),
            },
        );

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.count("RowSkipped"), 1);
        assert_eq!(sink.count("RowAccepted"), 0);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = AnalysisEvent::CommunityColumnChosen {
            column_index: 0,
            column_name: Some("名称".to_string()),
            method: ColumnDetectionMethod::ContentScan { ratio: 0.5 },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "community_column_chosen");
        assert_eq!(json["method"]["kind"], "content_scan");
        assert_eq!(json["method"]["ratio"], 0.5);
    }

    #[test]
    fn test_noop_sink_accepts_events() {
        let sink = NoOpEventSink;
        sink.emit(
            "A1",
            AnalysisEvent::AnalysisCompleted {
                total_rows: 0,
                processed_rows: 0,
                skipped_rows: 0,
                detection_rate: 0.0,
            },
        );
    }
}
