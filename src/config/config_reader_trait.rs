// ==========================================
// 社区花名册 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义推断引擎 / 上传校验所需的配置读取接口
// 红线: 不包含配置写入
// ==========================================

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: EngineConfig
pub trait EngineConfigReader: Send + Sync {
    // ===== 表头识别 =====

    /// 表头识别扫描的行数（默认 5）
    fn header_scan_rows(&self) -> usize;

    // ===== 社区列识别 =====

    /// 内容扫描的列数（默认 5）
    fn content_scan_columns(&self) -> usize;

    /// 内容扫描的数据行数（默认 20）
    fn content_scan_rows(&self) -> usize;

    /// 内容扫描命中率阈值，须严格大于（默认 0.3）
    fn community_ratio_threshold(&self) -> f64;

    /// 兜底社区列（默认 1）
    fn default_community_column(&self) -> usize;

    // ===== 字段映射 =====

    /// 模糊匹配阈值，须严格大于（默认 0.6）
    fn fuzzy_threshold(&self) -> f64;

    /// 相似度策略名称
    fn similarity_scorer(&self) -> &str;

    // ===== 上传限制 =====

    fn max_upload_bytes(&self) -> u64;

    fn allowed_extensions(&self) -> &[String];

    // ===== 结果缓存 =====

    fn cache_enabled(&self) -> bool;

    fn cache_capacity(&self) -> usize;
}
