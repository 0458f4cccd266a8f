use std::fmt::Display;

use crate::generator::types::AgentType;

/// 单次运行的状态
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Idle,
    Validating,
    Researching { cached: bool },
    StreamingProofread,
    Done,
    Failed(String),
}

impl Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Validating => write!(f, "validating"),
            RunState::Researching { cached: true } => write!(f, "researching(cached)"),
            RunState::Researching { cached: false } => write!(f, "researching(fresh)"),
            RunState::StreamingProofread => write!(f, "streaming-proofread"),
            RunState::Done => write!(f, "done"),
            RunState::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// 校对阶段的流式进度
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// 收到一个文本片段；`preview`为当前缓冲区加光标标记
    Partial { delta: String, preview: String },
    /// 流结束，携带完整文章（不含光标标记）
    Final(String),
}

/// 运行过程中发给展示层的事件
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    State(RunState),
    /// 调试预览，仅在verbose模式下发出
    Preview { stage: AgentType, content: String },
    Stream(StreamEvent),
}

/// 展示层观察者
pub trait RunObserver: Send {
    fn on_event(&mut self, event: RunEvent);
}

impl<F> RunObserver for F
where
    F: FnMut(RunEvent) + Send,
{
    fn on_event(&mut self, event: RunEvent) {
        self(event)
    }
}

/// 忽略所有事件
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_event(&mut self, _event: RunEvent) {}
}
