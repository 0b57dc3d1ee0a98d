// ==========================================
// 社区花名册 - 导入接口 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{CommunityAnalysis, RawTable};
use crate::importer::error::ImportResult;

// ==========================================
// RosterImporter Trait
// ==========================================
// 用途: 花名册导入主接口
// 实现者: RecordBuilder
pub trait RosterImporter: Send + Sync {
    /// 从原始文件字节构建社区记录
    ///
    /// # 流程
    /// 1. 解码（先 xlsx 后 xls）
    /// 2. 表头行识别
    /// 3. 社区列识别 + 标准字段映射
    /// 4. 逐行抽取社区名 / 标准化取值
    /// 5. 按社区名写入（后写覆盖）
    /// 6. 生成数据质量报告
    ///
    /// # 返回
    /// - Ok(CommunityAnalysis): 记录集可能为空（文件有效但未识别到社区）
    /// - Err: 解码失败
    fn build_records(&self, bytes: &[u8]) -> ImportResult<CommunityAnalysis>;

    /// 对已解码的原始表执行步骤 2~6
    fn build_from_table(&self, table: &RawTable) -> CommunityAnalysis;
}

// ==========================================
// SimilarityScorer Trait
// ==========================================
// 用途: 表头模糊匹配打分策略（可替换）
// 实现者: LevenshteinScorer, JaroWinklerScorer
pub trait SimilarityScorer: Send + Sync {
    /// 相似度，取值 [0, 1]
    fn score(&self, a: &str, b: &str) -> f64;

    /// 策略名称（用于日志/事件）
    fn name(&self) -> &'static str;
}
