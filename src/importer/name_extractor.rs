// ==========================================
// 社区花名册 - 社区名抽取
// ==========================================
// 规则 A: 去掉街道/乡镇前缀，截取到社区/村后缀
// 规则 B: 截取任意以社区/村后缀结尾的连续片段
// 后缀之后须为结尾或非文字字符（"村民小组"、"村数" 不截断）
// 前缀之后紧跟后缀时不按规则 A 拆分（"幸福乡村社区"）
// 命中后去掉开头的非文字字符（序号、标点）
// 均未命中但含后缀关键词: 原文 trim 后返回
// 否则: 非社区行
// ==========================================

use crate::domain::{Cell, COMMUNITY_SUFFIXES, TOWN_QUALIFIERS};
use regex::Regex;
use std::sync::LazyLock;

/// 片段内不允许出现的分隔符
const SEPARATORS: &str = r"\s,，、;；:：()（）\[\]【】/|";

/// 后缀之后的边界
const SUFFIX_BOUNDARY: &str = r"(?:[^\p{L}]|$)";

static TOWN_PREFIXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"[^{sep}]+?(?:{town})([^{sep}]+(?:{suffix})){end}",
        sep = SEPARATORS,
        town = TOWN_QUALIFIERS.join("|"),
        suffix = COMMUNITY_SUFFIXES.join("|"),
        end = SUFFIX_BOUNDARY,
    ))
    .expect("Invalid regex")
});

static SUFFIX_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"([^{sep}]+(?:{suffix})){end}",
        sep = SEPARATORS,
        suffix = COMMUNITY_SUFFIXES.join("|"),
        end = SUFFIX_BOUNDARY,
    ))
    .expect("Invalid regex")
});

/// 从单元格抽取社区/村名；非社区行返回 None
pub fn extract_community_name(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?;
    extract_from_text(&text)
}

/// 文本版本
pub fn extract_from_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return None;
    }

    let town_prefixed =
        capture_name(&TOWN_PREFIXED_RE, text).filter(|name| !starts_with_suffix(name));
    if let Some(name) = town_prefixed.or_else(|| capture_name(&SUFFIX_RUN_RE, text)) {
        return Some(name.to_string());
    }

    if contains_suffix(text) {
        return Some(text.to_string());
    }

    None
}

fn capture_name<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    let captured = re.captures(text)?.get(1)?;
    let name = strip_leading_noise(captured.as_str());
    contains_suffix(name).then_some(name)
}

/// 去掉开头的非字母/非汉字字符
fn strip_leading_noise(name: &str) -> &str {
    name.trim_start_matches(|c: char| !c.is_alphabetic())
}

fn contains_suffix(text: &str) -> bool {
    COMMUNITY_SUFFIXES.iter().any(|s| text.contains(s))
}

fn starts_with_suffix(text: &str) -> bool {
    COMMUNITY_SUFFIXES.iter().any(|s| text.starts_with(s))
}

// ==========================================
// CommunityNameExtractor - 组合入口
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityNameExtractor;

impl CommunityNameExtractor {
    pub fn extract(&self, cell: &Cell) -> Option<String> {
        extract_community_name(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        extract_community_name(&Cell::Text(text.to_string()))
    }

    #[test]
    fn test_plain_names() {
        assert_eq!(extract("张家村"), Some("张家村".to_string()));
        assert_eq!(extract("  李家社区 "), Some("李家社区".to_string()));
        assert_eq!(extract("向阳村委会"), Some("向阳村委会".to_string()));
    }

    #[test]
    fn test_strip_town_qualifier() {
        assert_eq!(extract("城关镇向阳村"), Some("向阳村".to_string()));
        assert_eq!(extract("东城街道和平社区"), Some("和平社区".to_string()));
        assert_eq!(extract("红星乡新民村委会"), Some("新民村委会".to_string()));
    }

    #[test]
    fn test_leading_qualifier_character_kept() {
        // 名称本身以 "镇" 开头，不当作前缀
        assert_eq!(extract("镇江路社区"), Some("镇江路社区".to_string()));
    }

    #[test]
    fn test_strip_leading_numbering_and_trailing_noise() {
        assert_eq!(extract("1.张家村"), Some("张家村".to_string()));
        assert_eq!(extract("张家村（2023年）"), Some("张家村".to_string()));
        assert_eq!(extract("备注：李家社区 已核实"), Some("李家社区".to_string()));
    }

    #[test]
    fn test_qualifier_inside_name_not_split() {
        // "乡" 后直接是后缀，属于名称本身
        assert_eq!(extract("幸福乡村社区"), Some("幸福乡村社区".to_string()));
        assert_eq!(extract("城关镇村委会"), Some("城关镇村委会".to_string()));
    }

    #[test]
    fn test_suffix_must_end_a_word() {
        assert_eq!(extract("张家村2组"), Some("张家村".to_string()));
        // 片段规则不截断词语，含后缀关键词时按原文返回
        assert_eq!(extract("第3村民小组"), Some("第3村民小组".to_string()));
        assert_eq!(extract("合计村数"), Some("合计村数".to_string()));
        assert_eq!(extract("村民小组：张家村"), Some("张家村".to_string()));
    }

    #[test]
    fn test_verbatim_fallback() {
        // 单独的后缀词无法被片段规则截取
        assert_eq!(extract("村"), Some("村".to_string()));
        assert_eq!(extract("社区"), Some("社区".to_string()));
    }

    #[test]
    fn test_non_community_rows() {
        assert_eq!(extract("合计"), None);
        assert_eq!(extract("nan"), None);
        assert_eq!(extract(""), None);
        assert_eq!(extract_community_name(&Cell::Empty), None);
        assert_eq!(extract_community_name(&Cell::Float(f64::NAN)), None);
        assert_eq!(extract_community_name(&Cell::Int(12)), None);
    }

    #[test]
    fn test_extracted_name_invariants() {
        let inputs = ["张家村", "1、城关镇向阳村", "村", "X街道Y社区", "第3村民小组"];
        for input in inputs {
            if let Some(name) = extract(input) {
                assert!(!name.is_empty());
                assert_ne!(name, "nan");
                assert!(contains_suffix(&name), "name = {}", name);
            }
        }
    }
}
