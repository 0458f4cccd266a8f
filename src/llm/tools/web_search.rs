//! 网络搜索工具

use std::sync::Arc;

use rig::tool::Tool;
use serde::Deserialize;

use crate::search::WebSearch;

/// 网络搜索工具，提供给检索阶段的Agent调用
#[derive(Clone)]
pub struct AgentToolWebSearch {
    search: Arc<WebSearch>,
}

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct WebSearchArgs {
    pub query: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WebSearchToolError {
    #[error("Consulta de pesquisa vazia")]
    EmptyQuery,
}

impl AgentToolWebSearch {
    pub fn new(search: Arc<WebSearch>) -> Self {
        Self { search }
    }
}

impl Tool for AgentToolWebSearch {
    const NAME: &'static str = "web_search";

    type Error = WebSearchToolError;
    type Args = WebSearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Pesquisa na web (DuckDuckGo) por conteúdos recentes sobre um tema. \
                Retorna título, URL e descrição de cada resultado."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Tema ou termos da pesquisa"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_search@{:?}", args);

        let query = args.query.trim();
        if query.is_empty() {
            return Err(WebSearchToolError::EmptyQuery);
        }

        Ok(self.search.search(query).await)
    }
}
