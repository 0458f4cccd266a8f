use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// 缓存性能监控器
#[derive(Clone)]
pub struct CachePerformanceMonitor {
    metrics: Arc<CacheMetrics>,
    verbose: bool,
}

/// 缓存指标
#[derive(Default)]
pub struct CacheMetrics {
    /// 缓存命中次数
    pub cache_hits: AtomicUsize,
    /// 缓存未命中次数
    pub cache_misses: AtomicUsize,
    /// 命中时发现已过期的次数
    pub cache_expirations: AtomicUsize,
    /// 缓存写入次数
    pub cache_writes: AtomicUsize,
    /// 总节省的流水线耗时（毫秒）
    pub total_time_saved_ms: AtomicU64,
}

/// 缓存性能报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachePerformanceReport {
    /// 缓存命中率
    pub hit_rate: f64,
    /// 总查询次数
    pub total_operations: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_expirations: usize,
    pub cache_writes: usize,
    /// 节省的流水线耗时（秒）
    pub time_saved_seconds: f64,
}

impl CachePerformanceMonitor {
    pub fn new(verbose: bool) -> Self {
        Self {
            metrics: Arc::new(CacheMetrics::default()),
            verbose,
        }
    }

    /// 记录缓存命中
    pub fn record_cache_hit(&self, key: &str, time_saved: Duration) {
        self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .total_time_saved_ms
            .fetch_add(time_saved.as_millis() as u64, Ordering::Relaxed);

        if self.verbose {
            println!(
                "   💰 Cache hit [{}] - tempo economizado: {:.2}s",
                key,
                time_saved.as_secs_f64()
            );
        }
    }

    /// 记录缓存未命中
    pub fn record_cache_miss(&self, key: &str) {
        self.metrics.cache_misses.fetch_add(1, Ordering::Relaxed);
        if self.verbose {
            println!("   ⌛ Cache miss [{}] - executando o pipeline", key);
        }
    }

    /// 记录过期条目（同时计为未命中）
    pub fn record_cache_expired(&self, key: &str) {
        self.metrics.cache_expirations.fetch_add(1, Ordering::Relaxed);
        self.record_cache_miss(key);
    }

    /// 记录缓存写入
    pub fn record_cache_write(&self, key: &str) {
        self.metrics.cache_writes.fetch_add(1, Ordering::Relaxed);
        if self.verbose {
            println!("   💾 Cache write [{}] - resultado armazenado", key);
        }
    }

    /// 生成性能报告
    pub fn generate_report(&self) -> CachePerformanceReport {
        let hits = self.metrics.cache_hits.load(Ordering::Relaxed);
        let misses = self.metrics.cache_misses.load(Ordering::Relaxed);
        let total_operations = hits + misses;

        let hit_rate = if total_operations > 0 {
            hits as f64 / total_operations as f64
        } else {
            0.0
        };

        CachePerformanceReport {
            hit_rate,
            total_operations,
            cache_hits: hits,
            cache_misses: misses,
            cache_expirations: self.metrics.cache_expirations.load(Ordering::Relaxed),
            cache_writes: self.metrics.cache_writes.load(Ordering::Relaxed),
            time_saved_seconds: self.metrics.total_time_saved_ms.load(Ordering::Relaxed) as f64
                / 1000.0,
        }
    }
}

impl Default for CachePerformanceMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
