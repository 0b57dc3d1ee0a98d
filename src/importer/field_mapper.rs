// ==========================================
// 社区花名册 - 标准字段映射器
// ==========================================
// 职责: 源表头 → 标准字段（列下标）
// 规则 1: 同义词子串命中，表头按列顺序取第一个
// 规则 2: 未命中时按相似度打分，取最高分且 > 阈值（默认 0.6）
// 未匹配的标准字段直接省略，不报错
// ==========================================

use crate::domain::{CanonicalSchema, ColumnMapping};
use crate::importer::roster_importer_trait::SimilarityScorer;
use crate::importer::similarity::LevenshteinScorer;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// 单个标准字段的匹配方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldMatchKind {
    Synonym,
    Fuzzy { score: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: &'static str,
    pub column_index: usize,
    pub kind: FieldMatchKind,
}

pub struct FieldMapper {
    schema: &'static CanonicalSchema,
    scorer: Box<dyn SimilarityScorer>,
    threshold: f64,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(Box::new(LevenshteinScorer), DEFAULT_FUZZY_THRESHOLD)
    }
}

impl FieldMapper {
    pub fn new(scorer: Box<dyn SimilarityScorer>, threshold: f64) -> Self {
        Self {
            schema: CanonicalSchema::standard(),
            scorer,
            threshold,
        }
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// 逐字段匹配明细（按标准字段表顺序）
    pub fn match_fields(&self, headers: &[String]) -> Vec<FieldMatch> {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| {
                if let Some(column_index) =
                    headers.iter().position(|h| field.matches_header(h))
                {
                    return Some(FieldMatch {
                        field: field.name,
                        column_index,
                        kind: FieldMatchKind::Synonym,
                    });
                }

                self.best_fuzzy(field.name, headers)
                    .map(|(column_index, score)| FieldMatch {
                        field: field.name,
                        column_index,
                        kind: FieldMatchKind::Fuzzy { score },
                    })
            })
            .collect()
    }

    pub fn map_columns(&self, headers: &[String]) -> ColumnMapping {
        self.match_fields(headers)
            .into_iter()
            .map(|m| (m.field.to_string(), m.column_index))
            .collect()
    }

    /// 最高分表头（严格大于阈值，同分取靠前列）
    fn best_fuzzy(&self, field_name: &str, headers: &[String]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_score = self.threshold;

        for (idx, header) in headers.iter().enumerate() {
            let score = self.scorer.score(field_name, header);
            if score > best_score {
                best_score = score;
                best = Some((idx, score));
            }
        }

        best
    }
}
