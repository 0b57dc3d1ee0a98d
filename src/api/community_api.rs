// ==========================================
// 社区花名册 - 社区数据API
// ==========================================
// 职责: 上传 / 全量社区数据 / 单个社区 / 当前文件信息 / 数据质量报告
// 数据契约: JSON，社区名 → CommunityRecord
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::session::{AnalysisOutcome, SessionContext};
use crate::domain::{CommunityMap, CommunityRecord, DataQualityReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub filename: String,
    pub community_count: usize,
    pub message: String,
    pub report: DataQualityReport,
}

impl From<AnalysisOutcome> for UploadResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let community_count = outcome.analysis.community_count();
        Self {
            message: format!("成功识别 {} 个社区/村", community_count),
            filename: outcome.filename,
            community_count,
            report: outcome.analysis.report.clone(),
        }
    }
}

/// 当前文件信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentFileInfo {
    pub filename: Option<String>,
    pub community_count: usize,
    pub has_file: bool,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// 社区数据API
pub struct CommunityApi {
    session: Arc<SessionContext>,
}

impl CommunityApi {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// 上传花名册
    ///
    /// # 参数
    /// - filename: 原始文件名（用于扩展名校验）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(UploadResponse): 已成为当前文件
    /// - Err(ApiError): 当前文件保持不变
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<UploadResponse> {
        self.session
            .upload(filename, bytes)
            .await
            .map(UploadResponse::from)
    }

    /// 全量社区数据
    pub async fn list_communities(&self) -> ApiResult<CommunityMap> {
        let analysis = self.session.analysis().await?;
        Ok(analysis.records.clone())
    }

    /// 按名称精确查询
    pub async fn get_community(&self, name: &str) -> ApiResult<CommunityRecord> {
        let analysis = self.session.analysis().await?;
        analysis
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("未找到该社区数据: {}", name)))
    }

    /// 当前文件信息（无文件时 has_file = false）
    pub async fn current_file(&self) -> CurrentFileInfo {
        match self.session.current().await {
            Some(file) => CurrentFileInfo {
                filename: Some(file.filename),
                community_count: file.analysis.community_count(),
                has_file: true,
                uploaded_at: Some(file.uploaded_at),
            },
            None => CurrentFileInfo {
                filename: None,
                community_count: 0,
                has_file: false,
                uploaded_at: None,
            },
        }
    }

    /// 数据质量报告（诊断用）
    pub async fn quality_report(&self) -> ApiResult<DataQualityReport> {
        let analysis = self.session.analysis().await?;
        Ok(analysis.report.clone())
    }

    /// 对当前文件重新分析
    pub async fn reanalyze(&self) -> ApiResult<UploadResponse> {
        self.session.reanalyze().await.map(UploadResponse::from)
    }
}
