//! 网络搜索适配器 - 查询外部搜索服务，去重并格式化结果

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{SafeSearch, SearchConfig};
use crate::utils::retry::RetryPolicy;
use crate::utils::text::escape_markup;

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoProvider;

/// 搜索服务没有返回任何结果
pub const NO_RESULTS: &str = "Nenhum resultado encontrado.";

/// 过滤后没有剩下任何有效结果
pub const NO_VALID_RESULTS: &str = "Nenhum resultado válido.";

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    #[serde(rename = "href")]
    pub url: String,
    #[serde(rename = "body")]
    pub description: String,
}

impl SearchRecord {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// 发给搜索服务的查询
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
}

/// 搜索服务接口
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 文本搜索，按服务返回的顺序给出结果
    async fn text(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>>;
}

/// 网络搜索适配器
///
/// 服务或网络错误会被记录并按[`RetryPolicy`]重试；全部失败时返回错误描述文本，
/// 不会中断调用方的流程。
pub struct WebSearch {
    provider: Arc<dyn SearchProvider>,
    config: SearchConfig,
    retry: RetryPolicy,
}

impl WebSearch {
    pub fn new(provider: Arc<dyn SearchProvider>, config: SearchConfig) -> Self {
        let retry = RetryPolicy::from_search_config(&config);
        Self {
            provider,
            config,
            retry,
        }
    }

    /// 替换重试策略
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 构造只检索`today`及之后内容的查询
    pub fn build_query(&self, topic: &str, today: NaiveDate) -> SearchQuery {
        SearchQuery {
            text: format!("{} after:{}", topic, today.format("%Y-%m-%d")),
            region: self.config.region.clone(),
            safesearch: self.config.safesearch,
            max_results: self.config.max_results,
        }
    }

    /// 搜索主题并返回格式化后的文本
    pub async fn search(&self, topic: &str) -> String {
        let query = self.build_query(topic, Local::now().date_naive());
        let max_attempts = self.retry.max_attempts;

        let outcome = self
            .retry
            .run(
                || self.provider.text(&query),
                |attempt, err| {
                    tracing::error!(
                        "Erro na pesquisa (tentativa {}/{}): {}",
                        attempt,
                        max_attempts,
                        err
                    );
                },
            )
            .await;

        match outcome {
            Ok(records) => {
                let mut records = records;
                records.truncate(self.config.max_results);
                format_results(records)
            }
            Err(err) => {
                eprintln!("   ⚠️ Pesquisa falhou após {} tentativas: {}", max_attempts, err);
                format!("Erro na pesquisa: {}", err)
            }
        }
    }
}

/// 按url去重，保留首次出现的顺序
///
/// url为空的结果同样参与去重：第一条保留，之后的视为重复。
pub fn dedup_records(records: Vec<SearchRecord>) -> Vec<SearchRecord> {
    let mut seen_urls = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen_urls.insert(record.url.clone()))
        .collect()
}

/// 将单条结果格式化为三行文本块
pub fn format_record(record: &SearchRecord) -> String {
    format!(
        "Título: {}\nURL: {}\nDescrição: {}\n",
        escape_markup(&record.title),
        record.url,
        escape_markup(&record.description)
    )
}

/// 去重并格式化全部结果，块之间以空行分隔
pub fn format_results(records: Vec<SearchRecord>) -> String {
    if records.is_empty() {
        return NO_RESULTS.to_string();
    }

    let blocks: Vec<String> = dedup_records(records).iter().map(format_record).collect();

    if blocks.is_empty() {
        NO_VALID_RESULTS.to_string()
    } else {
        blocks.join("\n\n")
    }
}
