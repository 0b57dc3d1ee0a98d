// ==========================================
// 社区花名册 - 社区列识别
// ==========================================
// 第一步: 表头命中社区名同义词（按列顺序取第一个）
// 第二步: 前 5 列 × 前 20 行内容扫描，关键词命中率 > 0.3 的最高者
// 兜底: 默认列（1），且不超过实际列数
// ==========================================

use crate::domain::{CanonicalSchema, HeaderedTable, COMMUNITY_KEYWORDS};
use crate::importer::events::ColumnDetectionMethod;

pub const DEFAULT_SCAN_COLUMNS: usize = 5;
pub const DEFAULT_SCAN_ROWS: usize = 20;
pub const DEFAULT_MIN_RATIO: f64 = 0.3;
pub const DEFAULT_COMMUNITY_COLUMN: usize = 1;

/// 社区列识别结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnChoice {
    pub column_index: usize,
    pub method: ColumnDetectionMethod,
}

#[derive(Debug, Clone)]
pub struct CommunityColumnLocator {
    scan_columns: usize,
    scan_rows: usize,
    min_ratio: f64,
    default_column: usize,
}

impl Default for CommunityColumnLocator {
    fn default() -> Self {
        Self {
            scan_columns: DEFAULT_SCAN_COLUMNS,
            scan_rows: DEFAULT_SCAN_ROWS,
            min_ratio: DEFAULT_MIN_RATIO,
            default_column: DEFAULT_COMMUNITY_COLUMN,
        }
    }
}

impl CommunityColumnLocator {
    pub fn new(scan_columns: usize, scan_rows: usize, min_ratio: f64, default_column: usize) -> Self {
        Self {
            scan_columns,
            scan_rows,
            min_ratio,
            default_column,
        }
    }

    pub fn locate(&self, table: &HeaderedTable) -> ColumnChoice {
        if let Some(column_index) = self.match_by_header(table) {
            return ColumnChoice {
                column_index,
                method: ColumnDetectionMethod::HeaderMatch,
            };
        }

        if let Some((column_index, ratio)) = self.match_by_content(table) {
            return ColumnChoice {
                column_index,
                method: ColumnDetectionMethod::ContentScan { ratio },
            };
        }

        // 默认列不得越界
        let column_index = self
            .default_column
            .min(table.column_count().saturating_sub(1));
        ColumnChoice {
            column_index,
            method: ColumnDetectionMethod::Default,
        }
    }

    pub fn find_community_column(&self, table: &HeaderedTable) -> usize {
        self.locate(table).column_index
    }

    fn match_by_header(&self, table: &HeaderedTable) -> Option<usize> {
        let field = CanonicalSchema::standard().community_field()?;
        table
            .headers()
            .iter()
            .position(|header| field.matches_header(header))
    }

    /// 返回 (列下标, 命中率)；命中率须严格大于阈值，同率取靠前列
    fn match_by_content(&self, table: &HeaderedTable) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_ratio = self.min_ratio;

        for col in 0..table.column_count().min(self.scan_columns) {
            let mut non_empty = 0usize;
            let mut matched = 0usize;

            for row in table.data_rows().iter().take(self.scan_rows) {
                let Some(text) = row.cell(col).as_text() else {
                    continue;
                };
                if text.trim().is_empty() {
                    continue;
                }
                non_empty += 1;
                if COMMUNITY_KEYWORDS.iter().any(|kw| text.contains(kw)) {
                    matched += 1;
                }
            }

            if non_empty == 0 {
                continue;
            }
            let ratio = matched as f64 / non_empty as f64;
            if ratio > best_ratio {
                best_ratio = ratio;
                best = Some((col, ratio));
            }
        }

        best
    }
}

/// 使用默认配置识别社区列
pub fn find_community_column(table: &HeaderedTable) -> usize {
    CommunityColumnLocator::default().find_community_column(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTable;

    #[test]
    fn test_header_match_wins() {
        let table = RawTable::from_rows(vec![
            vec!["序号", "所属社区", "姓名"],
            vec!["1", "张家村", "张三"],
        ])
        .with_header(0);

        let choice = CommunityColumnLocator::default().locate(&table);
        assert_eq!(choice.column_index, 1);
        assert_eq!(choice.method, ColumnDetectionMethod::HeaderMatch);
    }

    #[test]
    fn test_content_scan_when_headers_unhelpful() {
        let table = RawTable::from_rows(vec![
            vec!["序号", "单位", "备注"],
            vec!["1", "张家村", "x"],
            vec!["2", "李家社区", "y"],
            vec!["3", "王家村委会", "z"],
        ])
        .with_header(0);

        let choice = CommunityColumnLocator::default().locate(&table);
        assert_eq!(choice.column_index, 1);
        assert_eq!(
            choice.method,
            ColumnDetectionMethod::ContentScan { ratio: 1.0 }
        );
    }

    #[test]
    fn test_low_ratio_falls_back_to_default() {
        // 第 0 列 1/4 = 0.25 < 0.3
        let table = RawTable::from_rows(vec![
            vec!["单位", "数量", "备注"],
            vec!["张家村", "1", "a"],
            vec!["甲", "2", "b"],
            vec!["乙", "3", "c"],
            vec!["丙", "4", "d"],
        ])
        .with_header(0);

        let choice = CommunityColumnLocator::default().locate(&table);
        assert_eq!(choice.column_index, 1);
        assert_eq!(choice.method, ColumnDetectionMethod::Default);
    }

    #[test]
    fn test_ratio_exactly_threshold_not_accepted() {
        // 3/10 = 0.3，不严格大于阈值
        let mut rows = vec![vec!["单位".to_string(), "数量".to_string()]];
        for i in 0..10 {
            let name = if i < 3 {
                format!("{}号村", i)
            } else {
                format!("单位{}", i)
            };
            rows.push(vec![name, i.to_string()]);
        }
        let table = RawTable::from_rows(rows).with_header(0);

        let choice = CommunityColumnLocator::default().locate(&table);
        assert_eq!(choice.method, ColumnDetectionMethod::Default);
    }

    #[test]
    fn test_equal_ratio_keeps_earliest_column() {
        let table = RawTable::from_rows(vec![
            vec!["甲", "乙"],
            vec!["张家村", "李家社区"],
        ])
        .with_header(0);

        assert_eq!(find_community_column(&table), 0);
    }

    #[test]
    fn test_default_column_within_bounds() {
        let single = RawTable::from_rows(vec![vec!["编号"], vec!["1"]]).with_header(0);
        assert_eq!(find_community_column(&single), 0);

        let empty = RawTable::default().with_header(0);
        assert_eq!(find_community_column(&empty), 0);
    }

    #[test]
    fn test_only_first_columns_scanned() {
        let table = RawTable::from_rows(vec![
            vec!["a", "b", "c", "d", "e", "f"],
            vec!["1", "2", "3", "4", "5", "张家村"],
        ])
        .with_header(0);

        let choice = CommunityColumnLocator::default().locate(&table);
        assert_eq!(choice.method, ColumnDetectionMethod::Default);
        assert_eq!(choice.column_index, 1);
    }
}
