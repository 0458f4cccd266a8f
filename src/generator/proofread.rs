//! 校对阶段：流式输出并逐片拼接最终文章

use anyhow::Result;
use futures::StreamExt;

use crate::generator::agents::{PipelineAgent, Proofreader};
use crate::generator::context::GeneratorContext;
use crate::generator::events::{RunEvent, RunObserver, StreamEvent};
use crate::generator::types::ChunkStream;

/// 流式输出时附加在缓冲区末尾的光标标记
pub const CURSOR: &str = "▌";

pub struct ProofreadingStreamer<'a> {
    context: &'a GeneratorContext,
}

impl<'a> ProofreadingStreamer<'a> {
    pub fn new(context: &'a GeneratorContext) -> Self {
        Self { context }
    }

    /// 校对初稿，返回完整文章
    pub async fn run(&self, draft: &str, observer: &mut dyn RunObserver) -> Result<String> {
        let config = &self.context.config;
        let role = Proofreader.role(config);
        let message = Proofreader.message(draft, config.target_language);

        let stream = self
            .context
            .runner
            .run_streaming(&role, &[message])
            .await
            .inspect_err(|e| tracing::error!("Erro no processamento [{}]: {}", role.name, e))?;

        assemble(stream, observer)
            .await
            .inspect_err(|e| tracing::error!("Erro durante o streaming [{}]: {}", role.name, e))
    }
}

/// 按到达顺序拼接片段；没有文本的片段被跳过
///
/// 每个文本片段之后发出`Partial`，流结束时发出`Final`。
/// 中途出错时丢弃已拼接的内容并返回错误。
pub async fn assemble(mut stream: ChunkStream, observer: &mut dyn RunObserver) -> Result<String> {
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        let Some(text) = chunk?.content else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        buffer.push_str(&text);
        observer.on_event(RunEvent::Stream(StreamEvent::Partial {
            delta: text,
            preview: format!("{}{}", buffer, CURSOR),
        }));
    }

    observer.on_event(RunEvent::Stream(StreamEvent::Final(buffer.clone())));
    Ok(buffer)
}
