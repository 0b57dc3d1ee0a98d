// ==========================================
// 社区花名册 - 取值标准化
// ==========================================
// 职责: 单元格 → 标准文本（空值统一为 "0"）
// 职责: 从文本中抽取 "x人" 人数
// ==========================================

use crate::domain::Cell;
use regex::Regex;
use std::sync::LazyLock;

/// 空值占位
pub const EMPTY_PLACEHOLDER: &str = "0";

/// "数字 + 人"，数字允许全角
static PEOPLE_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9０-９]+)人").expect("Invalid regex"));

/// 单元格标准化：缺失/空白 → "0"，否则 trim 后的文本
pub fn normalize(value: &Cell) -> String {
    value
        .as_text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
}

/// 抽取人数：首个 "x人" 中的 x；无匹配 / "nan" / 空 → 0
///
/// 一个单元格中有多个人数时只取第一个，不求和。
pub fn extract_count(text: &str) -> u64 {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return 0;
    }

    PEOPLE_COUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| fold_fullwidth_digits(m.as_str()).parse::<u64>().ok())
        .unwrap_or(0)
}

fn fold_fullwidth_digits(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect()
}

// ==========================================
// ValueNormalizer - 组合入口
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueNormalizer;

impl ValueNormalizer {
    pub fn normalize(&self, value: &Cell) -> String {
        normalize(value)
    }

    pub fn extract_count(&self, text: &str) -> u64 {
        extract_count(text)
    }

    /// 标准化并抽取人数（人数基于标准化后的文本）
    pub fn normalize_with_count(&self, value: &Cell) -> (String, u64) {
        let raw = normalize(value);
        let count = extract_count(&raw);
        (raw, count)
    }
}
