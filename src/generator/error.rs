use thiserror::Error;

use crate::generator::validator::{MAX_TOPIC_LENGTH, MIN_TOPIC_LENGTH};

/// 主题校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor insira um tópico válido (mínimo {} caracteres)", MIN_TOPIC_LENGTH)]
    TooShort,
    #[error("Tópico muito longo (máximo {} caracteres)", MAX_TOPIC_LENGTH)]
    TooLong,
}

/// 一次运行中止的原因
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 调研流水线中的某个阶段失败
    #[error("{0}")]
    Stage(anyhow::Error),

    /// 校对阶段在流式输出过程中失败
    #[error("{0}")]
    Stream(anyhow::Error),
}

impl PipelineError {
    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        format!("Erro: {}", self)
    }
}
