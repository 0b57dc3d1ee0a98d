// ==========================================
// 社区花名册 - 会话上下文
// ==========================================
// 职责: 持有"当前文件"槽位（每个会话一份，后上传覆盖）
// 红线: 校验 → 解析 → 非空结果才写入槽位；失败时保留旧数据
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::UploadValidator;
use crate::app::cache::{ContentHash, ResultCache};
use crate::domain::CommunityAnalysis;
use crate::importer::RosterImporter;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// 已加载文件（槽位内容）
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub filename: String,
    pub bytes: Arc<Vec<u8>>,
    pub uploaded_at: DateTime<Utc>,
    pub analysis: Arc<CommunityAnalysis>,
}

/// 一次上传/重新分析的结果
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub filename: String,
    pub analysis: Arc<CommunityAnalysis>,
    pub from_cache: bool,
}

pub struct SessionContext {
    id: String,
    importer: Arc<dyn RosterImporter>,
    validator: UploadValidator,
    cache: Option<Arc<Mutex<ResultCache>>>,
    slot: RwLock<Option<LoadedFile>>,
}

impl SessionContext {
    pub fn new(
        id: impl Into<String>,
        importer: Arc<dyn RosterImporter>,
        validator: UploadValidator,
        cache: Option<Arc<Mutex<ResultCache>>>,
    ) -> Self {
        Self {
            id: id.into(),
            importer,
            validator,
            cache,
            slot: RwLock::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 上传并分析
    ///
    /// # 返回
    /// - Ok: 已写入槽位
    /// - Err: 输入拒绝 / 解码失败 / 未识别到社区（槽位保持不变）
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<AnalysisOutcome> {
        self.validator.validate(filename, bytes.len() as u64)?;

        let bytes = Arc::new(bytes);
        let key = ContentHash::of(&bytes);

        let (analysis, from_cache) = match self.cached(&key).await {
            Some(analysis) => (analysis, true),
            None => (self.run_analysis(Arc::clone(&bytes)).await?, false),
        };

        if analysis.is_empty() {
            warn!(
                session = %self.id,
                filename,
                header_row = analysis.report.header_row,
                community_column = analysis.report.community_column,
                "文件有效但未识别到社区数据"
            );
            return Err(ApiError::NoCommunitiesDetected {
                filename: filename.to_string(),
                report: Box::new(analysis.report.clone()),
            });
        }

        if !from_cache {
            if let Some(cache) = &self.cache {
                let mut cache = cache.lock().await;
                cache.insert(key, Arc::clone(&analysis));
                debug!(session = %self.id, key = %key, cached = cache.len(), "写入结果缓存");
            }
        }

        self.commit(filename, bytes, Arc::clone(&analysis)).await;
        info!(
            session = %self.id,
            filename,
            communities = analysis.community_count(),
            from_cache,
            "上传分析完成"
        );

        Ok(AnalysisOutcome {
            filename: filename.to_string(),
            analysis,
            from_cache,
        })
    }

    /// 对当前文件重新分析（不走缓存，结果整体替换）
    pub async fn reanalyze(&self) -> ApiResult<AnalysisOutcome> {
        let (filename, bytes, uploaded_at) = {
            let slot = self.slot.read().await;
            let file = slot.as_ref().ok_or(ApiError::NoFileLoaded)?;
            (file.filename.clone(), Arc::clone(&file.bytes), file.uploaded_at)
        };

        let analysis = self.run_analysis(Arc::clone(&bytes)).await?;
        if analysis.is_empty() {
            return Err(ApiError::NoCommunitiesDetected {
                filename,
                report: Box::new(analysis.report.clone()),
            });
        }

        *self.slot.write().await = Some(LoadedFile {
            filename: filename.clone(),
            bytes,
            uploaded_at,
            analysis: Arc::clone(&analysis),
        });

        Ok(AnalysisOutcome {
            filename,
            analysis,
            from_cache: false,
        })
    }

    /// 当前文件快照
    pub async fn current(&self) -> Option<LoadedFile> {
        self.slot.read().await.clone()
    }

    /// 当前分析结果
    pub async fn analysis(&self) -> ApiResult<Arc<CommunityAnalysis>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|file| Arc::clone(&file.analysis))
            .ok_or(ApiError::NoFileLoaded)
    }

    async fn cached(&self, key: &ContentHash) -> Option<Arc<CommunityAnalysis>> {
        let cache = self.cache.as_ref()?;
        cache.lock().await.get(key)
    }

    /// 解码属阻塞操作，放到 blocking 线程池执行
    async fn run_analysis(&self, bytes: Arc<Vec<u8>>) -> ApiResult<Arc<CommunityAnalysis>> {
        let importer = Arc::clone(&self.importer);
        let analysis = tokio::task::spawn_blocking(move || importer.build_records(&bytes))
            .await
            .map_err(|e| ApiError::InternalError(format!("分析任务异常: {}", e)))??;
        Ok(Arc::new(analysis))
    }

    async fn commit(&self, filename: &str, bytes: Arc<Vec<u8>>, analysis: Arc<CommunityAnalysis>) {
        *self.slot.write().await = Some(LoadedFile {
            filename: filename.to_string(),
            bytes,
            uploaded_at: Utc::now(),
            analysis,
        });
    }
}
