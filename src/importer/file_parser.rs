// ==========================================
// 社区花名册 - 文件解码器实现
// ==========================================
// 职责: 上传字节 → 无表头原始表（首个工作表）
// 支持: Excel 2007+ (.xlsx) / Excel 97-2003 (.xls)
// 顺序: 先按 xlsx 解码，失败再按 xls 解码
// ==========================================

use crate::domain::{Cell, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// SpreadsheetFormat - 支持的表格格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
}

impl SpreadsheetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Xls => "xls",
        }
    }

    /// 按扩展名识别（不区分大小写）
    pub fn from_filename(filename: &str) -> Option<Self> {
        match file_extension(filename).as_str() {
            "xlsx" => Some(SpreadsheetFormat::Xlsx),
            "xls" => Some(SpreadsheetFormat::Xls),
            _ => None,
        }
    }
}

/// 小写扩展名（不含点），无扩展名时为空串
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ==========================================
// ExcelBytesParser - 内存字节解码
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelBytesParser;

impl ExcelBytesParser {
    /// 解码并返回实际命中的格式
    pub fn decode_with_format(&self, bytes: &[u8]) -> ImportResult<(RawTable, SpreadsheetFormat)> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let xlsx_err = match decode_xlsx(bytes) {
            Ok(table) => {
                debug!(rows = table.row_count(), "按 xlsx 解码成功");
                return Ok((table, SpreadsheetFormat::Xlsx));
            }
            Err(e) => e,
        };
        debug!(error = %xlsx_err, "xlsx 解码失败，尝试 xls");

        match decode_xls(bytes) {
            Ok(table) => {
                debug!(rows = table.row_count(), "按 xls 解码成功");
                Ok((table, SpreadsheetFormat::Xls))
            }
            Err(xls_err) => {
                warn!(xlsx = %xlsx_err, xls = %xls_err, "两种格式均解码失败");
                Err(ImportError::ExcelParseError {
                    xlsx: xlsx_err,
                    xls: xls_err,
                })
            }
        }
    }
}

fn decode_xlsx(bytes: &[u8]) -> Result<RawTable, String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "工作簿无工作表".to_string())?
        .map_err(|e| e.to_string())?;
    Ok(range_to_table(&range))
}

fn decode_xls(bytes: &[u8]) -> Result<RawTable, String> {
    let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "工作簿无工作表".to_string())?
        .map_err(|e| e.to_string())?;
    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> RawTable {
    RawTable::new(
        range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect(),
    )
}

/// calamine 单元格 → 领域单元格
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
