//! 调研流水线：检索 → 分析 → 撰写，整体按主题缓存

use anyhow::Result;
use tokio::time::Instant;

use crate::generator::agents::{ContentAnalyst, PipelineAgent, WebResearcher, Writer};
use crate::generator::context::GeneratorContext;
use crate::generator::events::{RunEvent, RunObserver, RunState};
use crate::generator::validator::Topic;

/// 调研结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchOutcome {
    pub draft: String,
    /// 初稿是否来自缓存
    pub cached: bool,
}

/// 调研流水线
pub struct ResearchPipeline<'a> {
    context: &'a GeneratorContext,
}

impl<'a> ResearchPipeline<'a> {
    pub fn new(context: &'a GeneratorContext) -> Self {
        Self { context }
    }

    /// 查询未过期的缓存初稿
    pub async fn cached(&self, topic: &Topic) -> Option<String> {
        let cache = self.context.cache.read().await;
        cache.get(topic.as_str())
    }

    /// 有缓存时直接返回，否则完整执行三个阶段
    ///
    /// 开始前向观察者发出`Researching`状态，标明是否命中缓存。
    pub async fn run(
        &self,
        topic: &Topic,
        observer: &mut dyn RunObserver,
    ) -> Result<ResearchOutcome> {
        if let Some(draft) = self.cached(topic).await {
            observer.on_event(RunEvent::State(RunState::Researching { cached: true }));
            return Ok(ResearchOutcome {
                draft,
                cached: true,
            });
        }

        observer.on_event(RunEvent::State(RunState::Researching { cached: false }));
        let draft = self.run_fresh(topic, observer).await?;
        Ok(ResearchOutcome {
            draft,
            cached: false,
        })
    }

    /// 依次执行三个阶段并缓存初稿；任何阶段失败时不缓存任何内容
    async fn run_fresh(&self, topic: &Topic, observer: &mut dyn RunObserver) -> Result<String> {
        let started = Instant::now();

        let raw_data = self.execute_stage(&WebResearcher, topic.as_str()).await?;
        self.debug_step(&WebResearcher, &raw_data, observer);

        let clean_data = self.execute_stage(&ContentAnalyst, &raw_data).await?;
        self.debug_step(&ContentAnalyst, &clean_data, observer);

        let draft = self.execute_stage(&Writer, &clean_data).await?;

        let mut cache = self.context.cache.write().await;
        cache.set(topic.as_str(), draft.clone(), started.elapsed());

        Ok(draft)
    }

    /// 执行单个阶段，错误记录后原样返回
    async fn execute_stage<A>(&self, agent: &A, input: &str) -> Result<String>
    where
        A: PipelineAgent,
    {
        let config = &self.context.config;
        let role = agent.role(config);
        let message = agent.message(input, config.target_language);

        if config.verbose {
            println!("🤖 Executando agente {}...", role.name);
        }

        self.context
            .runner
            .run(&role, &[message])
            .await
            .inspect_err(|e| {
                tracing::error!("Erro no processamento [{}]: {}", agent.agent_type(), e);
            })
    }

    fn debug_step<A>(&self, agent: &A, content: &str, observer: &mut dyn RunObserver)
    where
        A: PipelineAgent,
    {
        if self.context.config.verbose {
            observer.on_event(RunEvent::Preview {
                stage: agent.agent_type(),
                content: content.to_string(),
            });
        }
    }
}
