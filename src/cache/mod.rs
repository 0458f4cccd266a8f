use md5::{Digest, Md5};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::CacheConfig;

pub mod performance_monitor;
pub use performance_monitor::{CachePerformanceMonitor, CachePerformanceReport};

/// 会话内的限时缓存
///
/// 条目只会因过期而失效，不提供按键删除。
pub struct CacheManager<T> {
    config: CacheConfig,
    entries: HashMap<String, CacheEntry<T>>,
    performance_monitor: CachePerformanceMonitor,
}

/// 缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub stored_at: Instant,
    /// 产生该结果所花费的时间，命中时计入节省统计
    pub compute_duration: Duration,
}

impl<T: Clone> CacheManager<T> {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_monitor(config, CachePerformanceMonitor::default())
    }

    pub fn with_monitor(config: CacheConfig, performance_monitor: CachePerformanceMonitor) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            performance_monitor,
        }
    }

    /// 生成键的MD5哈希
    pub fn hash_key(&self, key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    fn is_expired(&self, entry: &CacheEntry<T>) -> bool {
        entry.stored_at.elapsed() >= self.ttl()
    }

    /// 获取缓存，过期条目视为未命中
    pub fn get(&self, key: &str) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        let hash = self.hash_key(key);
        match self.entries.get(&hash) {
            Some(entry) if self.is_expired(entry) => {
                self.performance_monitor.record_cache_expired(&hash);
                None
            }
            Some(entry) => {
                self.performance_monitor
                    .record_cache_hit(&hash, entry.compute_duration);
                Some(entry.data.clone())
            }
            None => {
                self.performance_monitor.record_cache_miss(&hash);
                None
            }
        }
    }

    /// 设置缓存，同时清理所有已过期的条目
    pub fn set(&mut self, key: &str, data: T, compute_duration: Duration) {
        if !self.config.enabled {
            return;
        }

        let ttl = self.ttl();
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);

        let hash = self.hash_key(key);
        self.entries.insert(
            hash.clone(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
                compute_duration,
            },
        );
        self.performance_monitor.record_cache_write(&hash);
    }

    /// 当前持有的条目数（含尚未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 生成性能报告
    pub fn generate_performance_report(&self) -> CachePerformanceReport {
        self.performance_monitor.generate_report()
    }
}
