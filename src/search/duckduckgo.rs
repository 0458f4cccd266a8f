//! DuckDuckGo HTML搜索服务

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use super::{SearchProvider, SearchQuery, SearchRecord};
use crate::config::SearchConfig;

/// 基于`html.duckduckgo.com`的搜索服务
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub const ENDPOINT: &'static str = "https://html.duckduckgo.com/html/";

    const USER_AGENT: &'static str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build search HTTP client")?;

        Ok(Self {
            client,
            endpoint: Self::ENDPOINT.to_string(),
        })
    }

    /// 解析结果页，跳过广告，最多返回`max_results`条
    pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchRecord>> {
        let document = Html::parse_document(html);
        let result_selector = selector("div.result")?;
        let title_selector = selector("a.result__a")?;
        let snippet_selector = selector(".result__snippet")?;

        let mut records = Vec::new();
        for result in document.select(&result_selector) {
            if records.len() >= max_results {
                break;
            }
            if result.value().classes().any(|class| class == "result--ad") {
                continue;
            }

            let Some(link) = result.select(&title_selector).next() else {
                continue;
            };
            let Some(url) = link.value().attr("href").and_then(resolve_href) else {
                continue;
            };

            let description = result
                .select(&snippet_selector)
                .next()
                .map(element_text)
                .unwrap_or_default();

            records.push(SearchRecord {
                title: element_text(link),
                url,
                description,
            });
        }

        Ok(records)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn text(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("q", query.text.as_str()),
                ("kl", query.region.as_str()),
                ("kp", query.safesearch.code()),
            ])
            .send()
            .await?
            .error_for_status()?;

        // 202表示请求被限流，页面中没有结果
        if response.status() == StatusCode::ACCEPTED {
            return Err(anyhow!("DuckDuckGo rate limit (HTTP 202)"));
        }

        let html = response.text().await?;
        Self::parse_results(&html, query.max_results)
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 解析结果链接；DuckDuckGo的跳转链接（`/l/?uddg=`）还原为目标地址
pub fn resolve_href(href: &str) -> Option<String> {
    let base = Url::parse("https://duckduckgo.com/").ok()?;
    let url = base.join(href.trim()).ok()?;

    if url.domain() == Some("duckduckgo.com") && url.path().starts_with("/l/") {
        return url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned());
    }

    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r##"
<html><body>
<div class="results">
  <div class="result results_links results_links_deep result--ad">
    <a class="result__a" href="https://ads.example.com/promo">Anúncio</a>
    <a class="result__snippet">Compre agora</a>
  </div>
  <div class="result results_links results_links_deep web-result">
    <h2 class="result__title">
      <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fnoticias.example.com%2Fia%3Fp%3D1&amp;rut=abc">
        IA e o   mercado de trabalho
      </a>
    </h2>
    <a class="result__snippet" href="#">Estudo mostra <b>impacto</b> da IA.</a>
  </div>
  <div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://blog.example.com/post">Outro artigo</a>
  </div>
  <div class="result results_links">
    <span>sem link</span>
  </div>
</div>
</body></html>
"##;

    #[test]
    fn test_parse_results_skips_ads_and_decodes_links() {
        let records = DuckDuckGoProvider::parse_results(RESULTS_PAGE, 10).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "IA e o mercado de trabalho");
        assert_eq!(records[0].url, "https://noticias.example.com/ia?p=1");
        assert_eq!(records[0].description, "Estudo mostra impacto da IA.");
        assert_eq!(records[1].url, "https://blog.example.com/post");
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn test_parse_results_respects_limit() {
        let records = DuckDuckGoProvider::parse_results(RESULTS_PAGE, 1).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_results_empty_page() {
        let records =
            DuckDuckGoProvider::parse_results("<html><div class=\"no-results\"></div></html>", 10)
                .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("https://example.com/a").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            resolve_href("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2F&rut=x").as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(resolve_href("javascript:void(0)"), None);
    }
}
