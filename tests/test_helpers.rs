// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的花名册表格、内存导入器、应用状态构造
// ==========================================

#![allow(dead_code)]

use community_roster::config::EngineConfig;
use community_roster::domain::{CommunityAnalysis, RawTable};
use community_roster::importer::{
    AnalysisEventSink, ImportError, ImportResult, RecordBuilder, RosterImporter,
};
use community_roster::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 演示花名册（名称 + 三个年龄段人口）
pub fn demo_roster_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["名称", "老年人口", "青壮年人口", "儿童人口"],
        vec!["张家村", "85人", "120人", "35人"],
        vec!["李家社区", "67人", "89人", "42人"],
        vec!["王家村", "93人", "156人", "28人"],
        vec!["赵家社区", "72人", "134人", "39人"],
        vec!["钱家村", "88人", "98人", "45人"],
    ]
}

pub fn demo_roster_table() -> RawTable {
    RawTable::from_rows(demo_roster_rows())
}

/// 带标题行、序号列、合计行的低保花名册
pub fn titled_roster_table() -> RawTable {
    RawTable::from_rows(vec![
        vec!["2024年城关镇低保花名册", "", "", "", ""],
        vec!["", "", "", "", ""],
        vec!["序号", "所属村居", "户主姓名", "保障人数", "补助金额"],
        vec!["1", "城关镇向阳村", "张三", "3人", "900"],
        vec!["2", "城关镇和平社区", "李四", "2人", "600"],
        vec!["3", "红星乡新民村委会", "王五", "4人", "1200"],
        vec!["合计", "", "", "9人", "2700"],
    ])
}

/// 表格 → 制表符分隔文本字节（供 TsvImporter 解码）
pub fn table_bytes(rows: &[Vec<&str>]) -> Vec<u8> {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

pub fn demo_roster_bytes() -> Vec<u8> {
    table_bytes(&demo_roster_rows())
}

/// 读取 tests/fixtures 下的真实工作簿
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(format!("tests/fixtures/{}", name)).expect("Failed to read fixture")
}

/// 非 UTF-8 字节，TsvImporter 视为解码失败
pub fn garbage_bytes() -> Vec<u8> {
    vec![0xff, 0xfe, 0x00, 0x9f, 0x92, 0x96]
}

// ==========================================
// TsvImporter - 内存导入器
// ==========================================
// 用途: 不依赖真实 Excel 文件，按制表符分隔文本解码后走同一推断流程
pub struct TsvImporter {
    builder: RecordBuilder,
    calls: AtomicUsize,
}

impl TsvImporter {
    pub fn new() -> Self {
        Self {
            builder: RecordBuilder::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_event_sink(sink: Arc<dyn AnalysisEventSink>) -> Self {
        Self {
            builder: RecordBuilder::default().with_event_sink(sink),
            calls: AtomicUsize::new(0),
        }
    }

    /// build_records 被调用次数（验证缓存命中）
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RosterImporter for TsvImporter {
    fn build_records(&self, bytes: &[u8]) -> ImportResult<CommunityAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if bytes.is_empty() {
            return Err(ImportError::EmptyInput);
        }
        let text = std::str::from_utf8(bytes).map_err(|e| ImportError::ExcelParseError {
            xlsx: e.to_string(),
            xls: e.to_string(),
        })?;
        let table = RawTable::from_rows(text.lines().map(|line| line.split('\t').collect::<Vec<_>>()));
        Ok(self.builder.build_from_table(&table))
    }

    fn build_from_table(&self, table: &RawTable) -> CommunityAnalysis {
        self.builder.build_from_table(table)
    }
}

/// 使用 TsvImporter 的应用状态
pub fn tsv_app_state(config: EngineConfig) -> (AppState, Arc<TsvImporter>) {
    let importer = Arc::new(TsvImporter::new());
    let state = AppState::with_importer(config, importer.clone());
    (state, importer)
}
