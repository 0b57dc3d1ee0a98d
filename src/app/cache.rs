// ==========================================
// 社区花名册 - 分析结果缓存
// ==========================================
// 键: 文件内容 SHA-256（不使用 文件名+长度）
// 淘汰: 容量满时按插入顺序淘汰最早的条目
// ==========================================

use crate::domain::CommunityAnalysis;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// 文件内容哈希
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Self(out)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: IndexMap<ContentHash, Arc<CommunityAnalysis>>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &ContentHash) -> Option<Arc<CommunityAnalysis>> {
        self.entries.get(key).cloned()
    }

    /// 写入；容量为 0 时不缓存
    pub fn insert(&mut self, key: ContentHash, analysis: Arc<CommunityAnalysis>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&key) {
            self.entries.insert(key, analysis);
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, analysis);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
