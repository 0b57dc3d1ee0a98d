// ==========================================
// 社区花名册 - 表格领域模型
// ==========================================
// 职责: 原始单元格 / 无表头原始表 / 带表头数据表
// 红线: 不含解码逻辑（解码见 importer::file_parser）
// ==========================================

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ==========================================
// Cell - 单元格原始值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String), // Excel 错误值（#N/A、#DIV/0! 等）
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// 是否为缺失值（空、NaN、错误值、纯空白文本）
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty | Cell::Error(_) => true,
            Cell::Float(f) => f.is_nan(),
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 单元格文本形式（缺失值返回 None，不做 trim）
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty | Cell::Error(_) => None,
            Cell::Float(f) if f.is_nan() => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(format_float(*f)),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::DateTime(dt) => Some(format_datetime(dt)),
        }
    }
}

/// 整数值浮点数去掉 ".0"（Excel 数字列常见）
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.time().num_seconds_from_midnight() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

// ==========================================
// RawTable - 无表头原始表
// ==========================================
// 用途: 解码结果，行×列，解码后只读
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// 从内存数据构造（已解码数据 / 测试数据）
    pub fn from_rows<I, R, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数取最宽行
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 越界位置视为空单元格
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 以指定行作为表头，生成带表头数据表
    ///
    /// # 规则
    /// - 表头行之前的行丢弃
    /// - 表头文本 trim；空表头命名为 `未命名列{n}`；重名表头追加 `.1`、`.2`
    /// - 完全空白的数据行跳过（不计入总行数）
    pub fn with_header(&self, header_row: usize) -> HeaderedTable {
        let column_count = self.column_count();
        let headers = build_headers(self.rows.get(header_row), column_count);

        let rows = self
            .rows
            .iter()
            .enumerate()
            .skip(header_row + 1)
            .filter(|(_, row)| !row.iter().all(Cell::is_missing))
            .map(|(source_row, row)| DataRow {
                source_row,
                cells: row.clone(),
            })
            .collect();

        HeaderedTable {
            header_row,
            headers,
            rows,
        }
    }
}

fn build_headers(header_cells: Option<&Vec<Cell>>, column_count: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(column_count);

    for idx in 0..column_count {
        let text = header_cells
            .and_then(|cells| cells.get(idx))
            .and_then(Cell::as_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("未命名列{}", idx + 1));

        let mut name = text.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", text, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

// ==========================================
// HeaderedTable - 带表头数据表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub source_row: usize, // 在原始表中的行号（溯源）
    pub cells: Vec<Cell>,
}

impl DataRow {
    pub fn cell(&self, col: usize) -> &Cell {
        self.cells.get(col).unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderedTable {
    header_row: usize,
    headers: Vec<String>,
    rows: Vec<DataRow>,
}

impl HeaderedTable {
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn data_rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
