use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use futures::{StreamExt, stream};
use tempfile::TempDir;

use super::*;
use crate::config::Config;
use crate::generator::error::ValidationError;
use crate::generator::events::StreamEvent;
use crate::generator::types::{AgentRole, AgentType, Chunk, ChunkStream, Message, StageRunner};

/// 按角色返回固定文本的阶段执行器，记录每次调用
#[derive(Default)]
struct ScriptedRunner {
    calls: Mutex<Vec<(String, String)>>,
    fail_stage: Mutex<Option<String>>,
    broken_stream: bool,
}

impl ScriptedRunner {
    fn record(&self, role: &AgentRole, messages: &[Message]) -> String {
        let input = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.calls
            .lock()
            .unwrap()
            .push((role.name.clone(), input.clone()));
        input
    }

    fn roles_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(role, _)| role.clone())
            .collect()
    }

    fn fail_at(&self, stage: AgentType) {
        *self.fail_stage.lock().unwrap() = Some(stage.to_string());
    }
}

#[async_trait]
impl StageRunner for ScriptedRunner {
    async fn run(&self, role: &AgentRole, messages: &[Message]) -> Result<String> {
        let input = self.record(role, messages);
        if self.fail_stage.lock().unwrap().as_deref() == Some(role.name.as_str()) {
            anyhow::bail!("falha simulada em {}", role.name);
        }
        Ok(format!("[{}] {}", role.name, input))
    }

    async fn run_streaming(&self, role: &AgentRole, messages: &[Message]) -> Result<ChunkStream> {
        self.record(role, messages);
        let chunks = if self.broken_stream {
            vec![
                Ok(Chunk::text("parcial")),
                Err(anyhow::anyhow!("conexão perdida")),
            ]
        } else {
            vec![
                Ok(Chunk::text("# Artigo\n\n")),
                Ok(Chunk::empty()),
                Ok(Chunk::text("Texto final.")),
            ]
        };
        Ok(stream::iter(chunks).boxed())
    }
}

fn create_workflow(config: Config, runner: Arc<ScriptedRunner>) -> ArticleWorkflow {
    ArticleWorkflow::new(GeneratorContext::new(config, runner))
}

fn states(events: &[RunEvent]) -> Vec<RunState> {
    events
        .iter()
        .filter_map(|event| match event {
            RunEvent::State(state) => Some(state.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_successful_run_walks_every_state() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let mut events: Vec<RunEvent> = Vec::new();

    let article = workflow
        .submit("Energia solar no Brasil", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap();

    assert_eq!(article, "# Artigo\n\nTexto final.");
    assert_eq!(
        states(&events),
        vec![
            RunState::Validating,
            RunState::Researching { cached: false },
            RunState::StreamingProofread,
            RunState::Done,
        ]
    );
    assert_eq!(workflow.state(), &RunState::Done);
    assert_eq!(
        workflow.context().current_article().await.as_deref(),
        Some("# Artigo\n\nTexto final.")
    );
    assert!(events.contains(&RunEvent::Stream(StreamEvent::Final(
        "# Artigo\n\nTexto final.".to_string()
    ))));
}

#[tokio::test]
async fn test_stages_run_in_order_with_wrapped_inputs() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());

    workflow
        .submit("Energia solar no Brasil", &mut crate::generator::events::NoopObserver)
        .await
        .unwrap();

    let calls = runner.calls.lock().unwrap().clone();
    assert_eq!(
        calls.iter().map(|(r, _)| r.as_str()).collect::<Vec<_>>(),
        vec![
            "Pesquisador Web",
            "Analista de Conteúdo",
            "Redator Profissional",
            "Revisor Final"
        ]
    );
    assert_eq!(calls[0].1, "Pesquise sobre: Energia solar no Brasil");
    assert_eq!(
        calls[1].1,
        "Analise estes dados:\n[Pesquisador Web] Pesquise sobre: Energia solar no Brasil"
    );
    assert!(calls[2].1.starts_with("Crie um artigo usando:\n[Analista de Conteúdo]"));
    assert!(calls[3].1.starts_with("Revise:\n[Redator Profissional]"));
}

#[tokio::test]
async fn test_repeated_topic_uses_cached_draft() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let mut noop = crate::generator::events::NoopObserver;

    workflow.submit("Energia solar no Brasil", &mut noop).await.unwrap();

    let mut events: Vec<RunEvent> = Vec::new();
    workflow
        .submit("  Energia solar no Brasil  ", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap();

    assert!(states(&events).contains(&RunState::Researching { cached: true }));
    assert_eq!(runner.roles_called().len(), 5);
    assert_eq!(runner.roles_called()[4], "Revisor Final");
}

#[tokio::test]
async fn test_invalid_topic_never_reaches_the_model() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let mut events: Vec<RunEvent> = Vec::new();

    let err = workflow
        .submit("abc", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Validation(ValidationError::TooShort)
    ));
    assert_eq!(
        states(&events),
        vec![
            RunState::Validating,
            RunState::Failed(
                "Erro: Por favor insira um tópico válido (mínimo 5 caracteres)".to_string()
            ),
            RunState::Idle,
        ]
    );
    assert!(runner.roles_called().is_empty());
    assert_eq!(workflow.state(), &RunState::Idle);
}

#[tokio::test]
async fn test_stage_failure_keeps_previous_article() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let mut noop = crate::generator::events::NoopObserver;

    workflow.submit("Energia solar no Brasil", &mut noop).await.unwrap();
    runner.fail_at(AgentType::Writer);

    let err = workflow
        .submit("Carros elétricos em 2025", &mut noop)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Stage(_)));
    assert_eq!(
        err.user_message(),
        "Erro: falha simulada em Redator Profissional"
    );
    assert_eq!(
        workflow.context().current_article().await.as_deref(),
        Some("# Artigo\n\nTexto final.")
    );
    assert_eq!(workflow.context().cache.read().await.len(), 1);
    assert_eq!(workflow.state(), &RunState::Idle);
}

#[tokio::test]
async fn test_stream_failure_discards_partial_article() {
    let runner = Arc::new(ScriptedRunner {
        broken_stream: true,
        ..Default::default()
    });
    let mut workflow = create_workflow(Config::default(), runner);

    let err = workflow
        .submit("Energia solar no Brasil", &mut crate::generator::events::NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Stream(_)));
    assert_eq!(err.user_message(), "Erro: conexão perdida");
    assert!(workflow.context().current_article().await.is_none());
    // 初稿已缓存，重试只需重新校对
    assert_eq!(workflow.context().cache.read().await.len(), 1);
}

#[tokio::test]
async fn test_clear_resets_article_but_keeps_cache() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let mut noop = crate::generator::events::NoopObserver;

    workflow.submit("Energia solar no Brasil", &mut noop).await.unwrap();
    workflow.clear(&mut noop).await;

    assert_eq!(workflow.state(), &RunState::Idle);
    assert!(workflow.context().current_article().await.is_none());

    let mut events: Vec<RunEvent> = Vec::new();
    workflow
        .submit("Energia solar no Brasil", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap();
    assert!(states(&events).contains(&RunState::Researching { cached: true }));
}

#[tokio::test]
async fn test_verbose_emits_research_previews() {
    let runner = Arc::new(ScriptedRunner::default());
    let config = Config {
        verbose: true,
        ..Default::default()
    };
    let mut workflow = create_workflow(config, runner);
    let mut events: Vec<RunEvent> = Vec::new();

    workflow
        .submit("Energia solar no Brasil", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap();

    let stages: Vec<AgentType> = events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Preview { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        vec![AgentType::WebResearcher, AgentType::ContentAnalyst]
    );
}

#[tokio::test]
async fn test_save_article_writes_session_article() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        output_path: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut workflow = create_workflow(config, Arc::new(ScriptedRunner::default()));

    assert!(save_article(workflow.context()).await.unwrap().is_none());

    workflow
        .submit("Energia solar no Brasil", &mut crate::generator::events::NoopObserver)
        .await
        .unwrap();
    let path = save_article(workflow.context()).await.unwrap().unwrap();

    assert_eq!(path, temp_dir.path().join("artigo_llm.md"));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "# Artigo\n\nTexto final."
    );
}

#[test]
fn test_command_parse() {
    assert_eq!(Command::parse(":limpar\n"), Command::Clear);
    assert_eq!(Command::parse(":clear"), Command::Clear);
    assert_eq!(Command::parse(":salvar"), Command::Save);
    assert_eq!(Command::parse(" :save "), Command::Save);
    assert_eq!(Command::parse(":sair"), Command::Quit);
    assert_eq!(Command::parse(":quit\r\n"), Command::Quit);
    assert_eq!(Command::parse("   \n"), Command::Empty);
    assert_eq!(
        Command::parse("Energia solar\n"),
        Command::Run("Energia solar".to_string())
    );
}

#[tokio::test]
async fn test_run_once_reports_failure_without_saving() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        output_path: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(config, runner.clone());
    let mut events: Vec<RunEvent> = Vec::new();

    let succeeded = run_once(&mut workflow, "abc", &mut |e: RunEvent| events.push(e))
        .await
        .unwrap();

    assert!(!succeeded);
    // 错误只通过观察者展示一次
    let failures = states(&events)
        .into_iter()
        .filter(|state| matches!(state, RunState::Failed(_)))
        .count();
    assert_eq!(failures, 1);
    assert!(runner.roles_called().is_empty());
    assert!(!temp_dir.path().join("artigo_llm.md").exists());
}

#[tokio::test]
async fn test_run_once_saves_article() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        output_path: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut workflow = create_workflow(config, Arc::new(ScriptedRunner::default()));

    let succeeded = run_once(
        &mut workflow,
        "Energia solar no Brasil",
        &mut crate::generator::events::NoopObserver,
    )
    .await
    .unwrap();

    assert!(succeeded);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("artigo_llm.md")).unwrap(),
        "# Artigo\n\nTexto final."
    );
}

#[tokio::test]
async fn test_interactive_runs_commands_until_quit() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        output_path: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(config, runner.clone());
    let input: &[u8] = b"Energia solar no Brasil\n\n:salvar\n:limpar\n:sair\nCarros el\xc3\xa9tricos\n";

    interactive(
        &mut workflow,
        &mut crate::generator::events::NoopObserver,
        input,
    )
    .await
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("artigo_llm.md")).unwrap(),
        "# Artigo\n\nTexto final."
    );
    assert!(workflow.context().current_article().await.is_none());
    assert_eq!(workflow.state(), &RunState::Idle);
    // `:sair`之后的输入不会执行
    assert_eq!(runner.roles_called().len(), 4);
}

#[tokio::test]
async fn test_interactive_stops_at_end_of_input() {
    let runner = Arc::new(ScriptedRunner::default());
    let mut workflow = create_workflow(Config::default(), runner.clone());
    let input = BufReader::new(&b"abc\nEnergia solar no Brasil"[..]);

    interactive(
        &mut workflow,
        &mut crate::generator::events::NoopObserver,
        input,
    )
    .await
    .unwrap();

    assert_eq!(
        workflow.context().current_article().await.as_deref(),
        Some("# Artigo\n\nTexto final.")
    );
    assert_eq!(runner.roles_called().len(), 4);
}
