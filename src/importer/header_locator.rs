// ==========================================
// 社区花名册 - 表头行识别
// ==========================================
// 规则: 扫描前 N 行（默认 5），按关键词子串命中次数计分
// 规则: 最高分胜出，同分取靠前行；全部 0 分时取第 0 行
// ==========================================

use crate::domain::{Cell, RawTable, HEADER_KEYWORDS};

/// 默认扫描行数
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 5;

/// 表头行识别结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChoice {
    pub row_index: usize,
    pub score: usize,
}

#[derive(Debug, Clone)]
pub struct HeaderLocator {
    scan_rows: usize,
    keywords: &'static [&'static str],
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_SCAN_ROWS)
    }
}

impl HeaderLocator {
    pub fn new(scan_rows: usize) -> Self {
        Self {
            scan_rows,
            keywords: HEADER_KEYWORDS,
        }
    }

    /// 单行得分：每个单元格 × 每个关键词，包含即 +1
    pub fn score_row(&self, row: &[Cell]) -> usize {
        row.iter()
            .filter_map(Cell::as_text)
            .map(|text| self.keywords.iter().filter(|kw| text.contains(*kw)).count())
            .sum()
    }

    pub fn locate(&self, table: &RawTable) -> HeaderChoice {
        let mut best = HeaderChoice {
            row_index: 0,
            score: 0,
        };

        for (row_index, row) in table.rows().iter().take(self.scan_rows).enumerate() {
            let score = self.score_row(row);
            if score > best.score {
                best = HeaderChoice { row_index, score };
            }
        }

        best
    }

    pub fn detect_header_row(&self, table: &RawTable) -> usize {
        self.locate(table).row_index
    }
}

/// 使用默认配置识别表头行
pub fn detect_header_row(table: &RawTable) -> usize {
    HeaderLocator::default().detect_header_row(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_in_first_row() {
        let table = RawTable::from_rows(vec![
            vec!["名称", "老年人口", "青壮年人口", "儿童人口"],
            vec!["张家村", "85人", "120人", "35人"],
            vec!["李家社区", "67人", "89人", "42人"],
        ]);
        assert_eq!(detect_header_row(&table), 0);
    }

    #[test]
    fn test_header_after_title_rows() {
        let table = RawTable::from_rows(vec![
            vec!["2024年城关镇低保花名册", "", "", ""],
            vec!["", "", "", ""],
            vec!["序号", "村名", "姓名", "年龄"],
            vec!["1", "张家村", "张三", "70"],
        ]);
        let choice = HeaderLocator::default().locate(&table);
        assert_eq!(choice.row_index, 2);
        assert_eq!(choice.score, 3);
    }

    #[test]
    fn test_all_zero_defaults_to_row_zero() {
        let table = RawTable::from_rows(vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(detect_header_row(&table), 0);
        assert_eq!(detect_header_row(&RawTable::default()), 0);
    }

    #[test]
    fn test_tie_keeps_earliest_row() {
        let table = RawTable::from_rows(vec![
            vec!["x", "y"],
            vec!["姓名", "y"],
            vec!["年龄", "y"],
        ]);
        assert_eq!(detect_header_row(&table), 1);
    }

    #[test]
    fn test_only_first_five_rows_scanned() {
        let mut rows = vec![vec!["a"]; 5];
        rows.push(vec!["姓名社区村"]);
        let table = RawTable::from_rows(rows);
        assert_eq!(detect_header_row(&table), 0);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let table = RawTable::from_rows(vec![
            vec!["标题"],
            vec!["姓名", "电话", "身份证"],
        ]);
        let locator = HeaderLocator::default();
        assert_eq!(locator.detect_header_row(&table), locator.detect_header_row(&table));
    }
}
