//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::generator::types::{AgentRole, AgentTool, ChunkStream, Message, StageRunner};
use crate::llm::tools::web_search::AgentToolWebSearch;
use crate::search::WebSearch;

mod providers;
mod react_executor;

pub use react_executor::ReActConfig;

use providers::{ProviderAgent, ProviderClient};
use react_executor::ReActExecutor;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
    web_search: Arc<WebSearch>,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config, web_search: Arc<WebSearch>) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self {
            client,
            config,
            web_search,
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 Verificando conexão com o modelo...");
        let agent = self.client.create_agent(
            &self.config.llm.model_efficient,
            "You are a helpful assistant.",
            &self.config.llm,
            None,
        )?;
        match agent.chat("Hello", Vec::new()).await {
            Ok(_) => {
                println!("✅ Conexão com o modelo OK");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ Falha na conexão com o modelo: {}", e);
                Err(e)
            }
        }
    }

    fn build_agent(&self, role: &AgentRole) -> Result<ProviderAgent> {
        let web_search = role
            .has_tool(AgentTool::WebSearch)
            .then(|| AgentToolWebSearch::new(self.web_search.clone()));

        self.client
            .create_agent(&role.model, &role.instructions, &self.config.llm, web_search)
    }

    fn react_config(&self) -> ReActConfig {
        ReActConfig {
            max_iterations: self.config.llm.max_tool_turns,
            verbose: self.config.verbose,
            ..ReActConfig::default()
        }
    }
}

/// 最后一条消息作为本轮输入，其余作为历史
fn split_messages(messages: &[Message]) -> Result<(&str, Vec<rig::completion::Message>)> {
    let (last, earlier) = messages
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Nenhuma mensagem para enviar ao modelo"))?;

    let history = earlier
        .iter()
        .map(|m| rig::completion::Message::user(m.content.clone()))
        .collect();

    Ok((last.content.as_str(), history))
}

#[async_trait]
impl StageRunner for LLMClient {
    async fn run(&self, role: &AgentRole, messages: &[Message]) -> Result<String> {
        let (prompt, history) = split_messages(messages)?;
        let agent = self.build_agent(role)?;

        if role.tools.is_empty() {
            agent.chat(prompt, history).await
        } else {
            ReActExecutor::execute(&agent, prompt, history, &self.react_config()).await
        }
    }

    async fn run_streaming(&self, role: &AgentRole, messages: &[Message]) -> Result<ChunkStream> {
        let (prompt, history) = split_messages(messages)?;
        let agent = self.build_agent(role)?;
        agent.stream(prompt, history).await
    }
}
