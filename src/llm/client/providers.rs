//! LLM Provider支持模块

use anyhow::Result;
use futures::StreamExt;
use rig::{
    agent::{Agent, AgentBuilder},
    client::CompletionClient,
    completion::{Chat, CompletionModel, Message, Prompt, PromptError},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
    streaming::{StreamedAssistantContent, StreamingCompletion},
};

use crate::{
    config::{LLMConfig, LLMProvider},
    generator::types::{Chunk, ChunkStream},
    llm::tools::web_search::AgentToolWebSearch,
};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    Moonshot(rig::providers::moonshot::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Mistral(rig::providers::mistral::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Gemini(rig::providers::gemini::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        match config.provider {
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::Moonshot => {
                let client = rig::providers::moonshot::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::Moonshot(client))
            }
            LLMProvider::DeepSeek => {
                let client = rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::DeepSeek(client))
            }
            LLMProvider::Mistral => {
                let client = rig::providers::mistral::Client::builder(&config.api_key).build();
                Ok(ProviderClient::Mistral(client))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(&config.api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Gemini => {
                let client = rig::providers::gemini::Client::builder(&config.api_key).build()?;
                Ok(ProviderClient::Gemini(client))
            }
            LLMProvider::Ollama => {
                let client = rig::providers::ollama::Client::builder()
                    .base_url(ollama_base_url(&config.api_base_url))
                    .build();
                Ok(ProviderClient::Ollama(client))
            }
        }
    }

    /// 创建Agent，传入搜索工具时挂载到Agent上
    pub fn create_agent(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
        web_search: Option<AgentToolWebSearch>,
    ) -> Result<ProviderAgent> {
        let agent = match self {
            ProviderClient::OpenAI(client) => {
                let builder = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder();
                ProviderAgent::OpenAI(configure(builder, system_prompt, config, web_search))
            }
            ProviderClient::Moonshot(client) => ProviderAgent::Moonshot(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
            ProviderClient::DeepSeek(client) => ProviderAgent::DeepSeek(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
            ProviderClient::Mistral(client) => ProviderAgent::Mistral(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
            ProviderClient::OpenRouter(client) => ProviderAgent::OpenRouter(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
            ProviderClient::Anthropic(client) => ProviderAgent::Anthropic(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);
                let builder = client
                    .agent(model)
                    .additional_params(serde_json::to_value(cfg)?);
                ProviderAgent::Gemini(configure(builder, system_prompt, config, web_search))
            }
            ProviderClient::Ollama(client) => ProviderAgent::Ollama(configure(
                client.agent(model),
                system_prompt,
                config,
                web_search,
            )),
        };
        Ok(agent)
    }
}

/// Ollama客户端使用原生接口，去掉OpenAI兼容路径的`/v1`后缀
fn ollama_base_url(api_base_url: &str) -> &str {
    let trimmed = api_base_url.trim_end_matches('/');
    trimmed.strip_suffix("/v1").unwrap_or(trimmed)
}

fn configure<M>(
    builder: AgentBuilder<M>,
    system_prompt: &str,
    config: &LLMConfig,
    web_search: Option<AgentToolWebSearch>,
) -> Agent<M>
where
    M: CompletionModel,
{
    let builder = builder
        .preamble(system_prompt)
        .max_tokens(config.max_tokens.into())
        .temperature(config.temperature);

    match web_search {
        Some(tool) => builder.tool(tool).build(),
        None => builder.build(),
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    Mistral(Agent<rig::providers::mistral::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    Moonshot(Agent<rig::providers::moonshot::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 单轮对话，`history`为此前的消息
    pub async fn chat(&self, prompt: &str, history: Vec<Message>) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::Moonshot(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::Mistral(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::Anthropic(agent) => {
                agent.chat(prompt, history).await.map_err(|e| e.into())
            }
            ProviderAgent::Gemini(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.chat(prompt, history).await.map_err(|e| e.into()),
        }
    }

    /// 执行多轮对话（允许工具调用）
    pub async fn multi_turn(
        &self,
        prompt: &str,
        mut history: Vec<Message>,
        max_iterations: usize,
    ) -> Result<String, PromptError> {
        let history = &mut history;
        match self {
            ProviderAgent::OpenAI(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::Moonshot(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::DeepSeek(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::Mistral(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::OpenRouter(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::Anthropic(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::Gemini(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
            ProviderAgent::Ollama(agent) => {
                agent.prompt(prompt).with_history(history).multi_turn(max_iterations).await
            }
        }
    }

    /// 流式对话，按到达顺序返回文本片段
    pub async fn stream(&self, prompt: &str, history: Vec<Message>) -> Result<ChunkStream> {
        match self {
            ProviderAgent::OpenAI(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::Moonshot(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::DeepSeek(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::Mistral(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::OpenRouter(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::Anthropic(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::Gemini(agent) => stream_chunks(agent, prompt, history).await,
            ProviderAgent::Ollama(agent) => stream_chunks(agent, prompt, history).await,
        }
    }
}

/// 将provider的流式响应转换为片段流；非文本内容（工具调用、推理等）转为空片段
async fn stream_chunks<M>(
    agent: &Agent<M>,
    prompt: &str,
    history: Vec<Message>,
) -> Result<ChunkStream>
where
    M: CompletionModel + 'static,
    M::StreamingResponse: Send + 'static,
{
    let response = agent.stream_completion(prompt, history).await?.stream().await?;

    let chunks = response.map(|item| match item {
        Ok(StreamedAssistantContent::Text(text)) => Ok(Chunk::text(text.text)),
        Ok(_) => Ok(Chunk::empty()),
        Err(e) => Err(anyhow::Error::from(e)),
    });

    Ok(chunks.boxed())
}
