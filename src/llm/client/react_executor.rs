//! ReAct执行器 - 负责执行带工具调用的多轮对话逻辑

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};

use super::providers::ProviderAgent;

/// ReAct模式配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大迭代次数
    pub max_iterations: usize,
    /// 达到最大迭代次数时是否返回已有的部分结果
    pub return_partial_on_max_depth: bool,
    /// 是否打印执行过程
    pub verbose: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            return_partial_on_max_depth: true,
            verbose: false,
        }
    }
}

/// ReAct执行器
pub struct ReActExecutor;

impl ReActExecutor {
    /// 执行ReAct循环逻辑
    pub async fn execute(
        agent: &ProviderAgent,
        user_prompt: &str,
        history: Vec<Message>,
        config: &ReActConfig,
    ) -> Result<String> {
        if config.verbose {
            println!(
                "   ♻️ Modo ReAct ativado, máximo de iterações: {}",
                config.max_iterations
            );
        }

        match agent
            .multi_turn(user_prompt, history, config.max_iterations)
            .await
        {
            Ok(response) => {
                if config.verbose {
                    println!("   ✅ Agente ReAct concluiu a tarefa");
                }
                Ok(response)
            }
            Err(PromptError::MaxDepthError {
                max_depth,
                chat_history,
                prompt: _,
            }) => {
                if config.verbose {
                    println!("   ⚠️ Limite de iterações atingido ({}), interrompendo", max_depth);
                }

                match (config.return_partial_on_max_depth, last_assistant_text(&chat_history)) {
                    (true, Some(content)) => Ok(content),
                    _ => Err(anyhow::anyhow!(
                        "Agente interrompido após atingir o limite de iterações ({})",
                        max_depth
                    )),
                }
            }
            Err(e) => {
                if config.verbose {
                    println!("   ❌ Erro no agente ReAct: {:?}", e);
                }
                Err(e.into())
            }
        }
    }
}

/// 从聊天历史中提取最后一条助手文本
fn last_assistant_text(chat_history: &[Message]) -> Option<String> {
    chat_history.iter().rev().find_map(|msg| {
        let Message::Assistant { content, .. } = msg else {
            return None;
        };

        let text_content = content
            .iter()
            .filter_map(|c| match c {
                AssistantContent::Text(text) => Some(text.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        (!text_content.is_empty()).then_some(text_content)
    })
}
