// ==========================================
// 社区花名册 - 表头相似度打分策略
// ==========================================
// 默认: 归一化编辑距离（按字符，适用于中文）
// 可选: Jaro-Winkler
// ==========================================

use crate::importer::roster_importer_trait::SimilarityScorer;

/// 1 - levenshtein(a, b) / max(len(a), len(b))
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerScorer;

impl SimilarityScorer for JaroWinklerScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// 按名称创建打分策略（配置项 `similarity_scorer`）
pub fn scorer_by_name(name: &str) -> Option<Box<dyn SimilarityScorer>> {
    match name.trim().to_lowercase().as_str() {
        "levenshtein" => Some(Box::new(LevenshteinScorer)),
        "jaro_winkler" | "jaro-winkler" => Some(Box::new(JaroWinklerScorer)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_bounds() {
        let scorer = LevenshteinScorer;
        assert_eq!(scorer.score("金额", "金额"), 1.0);
        assert_eq!(scorer.score("金额", "电话"), 0.0);
        let partial = scorer.score("金额", "金 额");
        assert!(partial > 0.6 && partial < 1.0, "score = {}", partial);
    }

    #[test]
    fn test_jaro_winkler_range() {
        let scorer = JaroWinklerScorer;
        let s = scorer.score("身份证", "身份证件");
        assert!((0.0..=1.0).contains(&s));
        assert!(s > 0.8);
    }

    #[test]
    fn test_scorer_by_name() {
        assert_eq!(scorer_by_name("Levenshtein").unwrap().name(), "levenshtein");
        assert_eq!(scorer_by_name("jaro-winkler").unwrap().name(), "jaro_winkler");
        assert!(scorer_by_name("cosine").is_none());
    }
}
