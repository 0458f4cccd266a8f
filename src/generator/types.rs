use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 智能体类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    WebResearcher,
    ContentAnalyst,
    Writer,
    Proofreader,
}

impl Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            AgentType::WebResearcher => "Pesquisador Web",
            AgentType::ContentAnalyst => "Analista de Conteúdo",
            AgentType::Writer => "Redator Profissional",
            AgentType::Proofreader => "Revisor Final",
        };
        write!(f, "{}", str)
    }
}

/// 角色可调用的工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentTool {
    /// 网络搜索适配器
    WebSearch,
}

/// 角色定义：名称 + 指令 + 模型 + 可选工具，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRole {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<AgentTool>,
}

impl AgentRole {
    pub fn has_tool(&self, tool: AgentTool) -> bool {
        self.tools.contains(&tool)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// 传入一次阶段调用的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// 流式响应中的一个片段，可能不含文本
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub content: Option<String>,
}

impl Chunk {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    pub fn empty() -> Self {
        Self { content: None }
    }
}

/// 有限、惰性、不可重启的片段序列
pub type ChunkStream = BoxStream<'static, Result<Chunk>>;

/// 阶段执行器：以给定角色和消息历史调用模型
///
/// 这一层不做重试，模型调用的错误直接返回给调用方。
#[async_trait]
pub trait StageRunner: Send + Sync {
    /// 单次调用，返回最后一条消息的文本
    async fn run(&self, role: &AgentRole, messages: &[Message]) -> Result<String>;

    /// 流式调用，返回片段序列
    async fn run_streaming(&self, role: &AgentRole, messages: &[Message]) -> Result<ChunkStream>;
}
