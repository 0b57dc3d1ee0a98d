// ==========================================
// 社区花名册 - 配置管理器
// ==========================================
// 职责: 配置加载（内置默认 → JSON 文件 → 环境变量）与校验
// 存储: 用户配置目录下 community-roster/config.json
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::ConfigError;
use std::path::{Path, PathBuf};

/// 配置来源（记录最终生效的是哪一层）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EngineConfig,
    source: ConfigSource,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            source: ConfigSource::Defaults,
        }
    }
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式指定的配置文件；None 时使用默认路径（不存在则只用内置默认值）
    ///
    /// # 返回
    /// - Ok(ConfigManager): 已应用环境变量覆写并通过校验
    /// - Err: 显式文件缺失 / JSON 格式错误 / 取值越界
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// 同 load，环境变量由调用方提供
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut manager = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        manager.apply_env_overrides(lookup)?;
        manager.config.validate()?;

        tracing::debug!(source = ?manager.source, "配置加载完成");
        Ok(manager)
    }

    /// 从 JSON 文件读取（未出现的键使用默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 获取当前配置快照（JSON）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.config).map_err(|e| ConfigError::InvalidValue {
            key: "snapshot".to_string(),
            value: String::new(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(config_keys::ENV_MAX_UPLOAD_MB) {
            let mb: u64 = parse_env(config_keys::ENV_MAX_UPLOAD_MB, &raw)?;
            self.config.max_upload_bytes = mb.saturating_mul(1024 * 1024);
        }

        if let Some(raw) = lookup(config_keys::ENV_FUZZY_THRESHOLD) {
            self.config.fuzzy_threshold = parse_env(config_keys::ENV_FUZZY_THRESHOLD, &raw)?;
        }

        if let Some(raw) = lookup(config_keys::ENV_CACHE) {
            self.config.cache_enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => true,
                "0" | "false" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: config_keys::ENV_CACHE.to_string(),
                        value: raw,
                        message: "应为 true/false".to_string(),
                    })
                }
            };
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(config_keys::CONFIG_DIR_NAME)
            .join(config_keys::CONFIG_FILE_NAME)
    })
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 配置文件
    pub const CONFIG_DIR_NAME: &str = "community-roster";
    pub const CONFIG_FILE_NAME: &str = "config.json";

    // 环境变量覆写
    pub const ENV_MAX_UPLOAD_MB: &str = "COMMUNITY_ROSTER_MAX_UPLOAD_MB";
    pub const ENV_FUZZY_THRESHOLD: &str = "COMMUNITY_ROSTER_FUZZY_THRESHOLD";
    pub const ENV_CACHE: &str = "COMMUNITY_ROSTER_CACHE";
}
