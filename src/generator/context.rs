use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::cache::{CacheManager, CachePerformanceMonitor, CachePerformanceReport};
use crate::config::Config;
use crate::generator::session::Session;
use crate::generator::types::StageRunner;
use crate::llm::client::LLMClient;
use crate::search::{DuckDuckGoProvider, WebSearch};

/// 会话上下文：在会话开始时创建，运行成功时更新，用户清空时重置
#[derive(Clone)]
pub struct GeneratorContext {
    /// 阶段执行器，用于与AI通信。
    pub runner: Arc<dyn StageRunner>,
    /// 配置
    pub config: Config,
    /// 调研结果缓存，按主题限时保存初稿
    pub cache: Arc<RwLock<CacheManager<String>>>,
    /// 会话状态
    pub session: Arc<RwLock<Session>>,
}

impl GeneratorContext {
    /// 使用给定的阶段执行器创建上下文
    pub fn new(config: Config, runner: Arc<dyn StageRunner>) -> Self {
        let monitor = CachePerformanceMonitor::new(config.verbose);
        let cache = Arc::new(RwLock::new(CacheManager::with_monitor(
            config.cache.clone(),
            monitor,
        )));
        let session = Arc::new(RwLock::new(Session::new()));

        Self {
            runner,
            config,
            cache,
            session,
        }
    }

    /// 创建生产环境的LLM客户端（搜索工具接入DuckDuckGo）
    pub fn build_llm_client(config: &Config) -> Result<LLMClient> {
        let provider = DuckDuckGoProvider::new(&config.search)?;
        let web_search = Arc::new(WebSearch::new(Arc::new(provider), config.search.clone()));
        LLMClient::new(config.clone(), web_search)
    }

    /// 当前会话中的文章
    pub async fn current_article(&self) -> Option<String> {
        let session = self.session.read().await;
        session.article().map(str::to_string)
    }

    /// 获取缓存统计
    pub async fn cache_report(&self) -> CachePerformanceReport {
        let cache = self.cache.read().await;
        cache.generate_performance_report()
    }
}
