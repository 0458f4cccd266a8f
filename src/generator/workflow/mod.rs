use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::generator::events::{RunEvent, RunObserver, RunState};
use crate::generator::outlet::{DiskOutlet, Outlet};
use crate::generator::proofread::ProofreadingStreamer;
use crate::generator::research::ResearchPipeline;
use crate::generator::validator::validate_topic;
use crate::logging::init_logging;

mod console;

pub use console::ConsoleObserver;

/// 文章生成工作流：校验 → 调研 → 流式校对
///
/// 状态机只有这里会捕获错误：详细信息写入错误日志，用户只看到`Erro: ...`。
/// 失败的运行不会改动会话中已有的文章。
pub struct ArticleWorkflow {
    context: GeneratorContext,
    state: RunState,
}

impl ArticleWorkflow {
    pub fn new(context: GeneratorContext) -> Self {
        Self {
            context,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn context(&self) -> &GeneratorContext {
        &self.context
    }

    /// 针对一个主题完整执行一次运行，成功时返回文章
    pub async fn submit(
        &mut self,
        raw_topic: &str,
        observer: &mut dyn RunObserver,
    ) -> Result<String, PipelineError> {
        let run_id = Uuid::new_v4();

        match self.execute(raw_topic, observer).await {
            Ok(article) => {
                self.context
                    .session
                    .write()
                    .await
                    .set_article(article.clone());
                self.transition(RunState::Done, observer);
                Ok(article)
            }
            Err(err) => {
                if !matches!(err, PipelineError::Validation(_)) {
                    tracing::error!("[{}] Erro no processamento: {:?}", run_id, err);
                }
                self.transition(RunState::Failed(err.user_message()), observer);
                self.transition(RunState::Idle, observer);
                Err(err)
            }
        }
    }

    async fn execute(
        &mut self,
        raw_topic: &str,
        observer: &mut dyn RunObserver,
    ) -> Result<String, PipelineError> {
        self.transition(RunState::Validating, observer);
        let topic = validate_topic(raw_topic)?;

        // 调研流水线自行发出Researching状态
        let research = ResearchPipeline::new(&self.context)
            .run(&topic, observer)
            .await
            .map_err(PipelineError::Stage)?;
        self.state = RunState::Researching {
            cached: research.cached,
        };

        self.transition(RunState::StreamingProofread, observer);
        ProofreadingStreamer::new(&self.context)
            .run(&research.draft, observer)
            .await
            .map_err(PipelineError::Stream)
    }

    /// 清空会话中的文章并回到空闲状态；缓存保留
    pub async fn clear(&mut self, observer: &mut dyn RunObserver) {
        self.context.session.write().await.clear();
        self.transition(RunState::Idle, observer);
    }

    fn transition(&mut self, state: RunState, observer: &mut dyn RunObserver) {
        self.state = state.clone();
        observer.on_event(RunEvent::State(state));
    }
}

/// 将会话中的文章导出到输出目录
pub async fn save_article(context: &GeneratorContext) -> Result<Option<std::path::PathBuf>> {
    let export = context.session.read().await.export();
    match export {
        Some(export) => {
            let outlet = DiskOutlet::new(&context.config.output_path);
            Ok(Some(outlet.save(&export).await?))
        }
        None => Ok(None),
    }
}

/// 单次模式：生成并保存文章
///
/// 运行失败时返回`false`，错误已由观察者展示，这里不再重复输出。
pub async fn run_once(
    workflow: &mut ArticleWorkflow,
    topic: &str,
    observer: &mut dyn RunObserver,
) -> Result<bool> {
    if workflow.submit(topic, observer).await.is_err() {
        return Ok(false);
    }
    if let Some(path) = save_article(workflow.context()).await? {
        println!("💾 Artigo salvo em {}", path.display());
    }
    Ok(true)
}

/// 启动文章生成工作流
///
/// 给出主题时执行一次并保存文章；否则进入交互会话。
pub async fn launch(config: &Config, topic: Option<String>) -> Result<ExitCode> {
    init_logging(&config.log_file)?;

    let llm_client = GeneratorContext::build_llm_client(config)?;

    // 启动时检查模型连接
    if !config.skip_connection_check {
        llm_client.check_connection().await?;
    }

    let context = GeneratorContext::new(config.clone(), std::sync::Arc::new(llm_client));
    let mut workflow = ArticleWorkflow::new(context);
    let mut observer = ConsoleObserver::new(config.verbose);

    let succeeded = match topic {
        Some(topic) => run_once(&mut workflow, &topic, &mut observer).await?,
        None => {
            let input = BufReader::new(tokio::io::stdin());
            interactive(&mut workflow, &mut observer, input).await?;
            true
        }
    };

    if config.verbose {
        let report = workflow.context().cache_report().await;
        println!(
            "📊 Cache: {} acertos, {} falhas, {} gravações ({:.1}% de acertos)",
            report.cache_hits,
            report.cache_misses,
            report.cache_writes,
            report.hit_rate * 100.0
        );
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// 交互命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(String),
    Clear,
    Save,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            ":limpar" | ":clear" => Command::Clear,
            ":salvar" | ":save" => Command::Save,
            ":sair" | ":quit" => Command::Quit,
            _ => Command::Run(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// 交互会话：逐行读取命令直到`:sair`或输入结束
pub async fn interactive<R>(
    workflow: &mut ArticleWorkflow,
    observer: &mut dyn RunObserver,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("📝 Gerador de Artigos com IA");
    println!("   Digite um tópico, ou :salvar, :limpar, :sair");

    let mut lines = input.lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Clear => {
                workflow.clear(observer).await;
                println!("🧹 Sessão limpa");
            }
            Command::Save => match save_article(workflow.context()).await {
                Ok(Some(path)) => println!("💾 Artigo salvo em {}", path.display()),
                Ok(None) => println!("⚠️ Nenhum artigo para salvar"),
                Err(e) => {
                    tracing::error!("Erro ao salvar artigo: {:?}", e);
                    eprintln!("❌ Erro: {}", e);
                }
            },
            Command::Run(topic) => {
                // 错误已由状态机展示给用户
                let _ = workflow.submit(&topic, observer).await;
            }
        }
    }

    Ok(())
}

// Include tests
#[cfg(test)]
mod tests;
