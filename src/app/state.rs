// ==========================================
// 社区花名册 - 应用状态
// ==========================================
// 职责: 管理共享配置 / 推断引擎 / 结果缓存，以及会话 → 上下文映射
// ==========================================

use crate::api::{CommunityApi, UploadValidator};
use crate::app::cache::ResultCache;
use crate::app::session::SessionContext;
use crate::config::{ConfigManager, EngineConfig, EngineConfigReader};
use crate::importer::{RecordBuilder, RosterImporter};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// 应用状态
///
/// 同一进程内所有会话共享引擎与缓存；每个会话独立持有"当前文件"
pub struct AppState {
    config: Arc<EngineConfig>,
    importer: Arc<dyn RosterImporter>,
    cache: Option<Arc<AsyncMutex<ResultCache>>>,
    sessions: Mutex<HashMap<String, Arc<SessionContext>>>,
}

impl AppState {
    /// 按配置创建（使用默认引擎）
    pub fn new(config: EngineConfig) -> Self {
        let importer = Arc::new(RecordBuilder::from_config(&config));
        Self::with_importer(config, importer)
    }

    /// 加载配置文件后创建
    pub fn from_config_path(path: Option<&Path>) -> Result<Self, crate::config::ConfigError> {
        let config = ConfigManager::load(path)?.into_config();
        Ok(Self::new(config))
    }

    /// 指定引擎（测试 / 自定义事件接收方）
    pub fn with_importer(config: EngineConfig, importer: Arc<dyn RosterImporter>) -> Self {
        let cache = config
            .cache_enabled()
            .then(|| Arc::new(AsyncMutex::new(ResultCache::new(config.cache_capacity()))));

        tracing::info!(
            cache_enabled = config.cache_enabled(),
            cache_capacity = config.cache_capacity(),
            max_upload_bytes = config.max_upload_bytes(),
            "应用状态初始化完成"
        );

        Self {
            config: Arc::new(config),
            importer,
            cache,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 获取（不存在则创建）会话上下文
    pub fn session(&self, session_id: &str) -> Arc<SessionContext> {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        Arc::clone(sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session = session_id, "创建会话上下文");
            Arc::new(SessionContext::new(
                session_id,
                Arc::clone(&self.importer),
                UploadValidator::from_config(&*self.config),
                self.cache.clone(),
            ))
        }))
    }

    /// 会话对应的社区数据API
    pub fn community_api(&self, session_id: &str) -> CommunityApi {
        CommunityApi::new(self.session(session_id))
    }

    /// 结束会话；返回是否存在
    pub fn drop_session(&self, session_id: &str) -> bool {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.remove(session_id).is_some()
    }

    pub fn session_count(&self) -> usize {
        match self.sessions.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
