use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Artigo-RS - 由Rust与AI驱动的网络调研文章生成工具
#[derive(Parser, Debug)]
#[command(name = "artigo-rs")]
#[command(
    about = "AI-powered article generator: researches a topic on the web, analyzes the findings and streams a proofread markdown article."
)]
#[command(version)]
pub struct Args {
    /// 文章主题；省略时进入交互会话
    pub topic: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型，用于检索与分析阶段
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于撰写与校对阶段
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// LLM Provider (openai, moonshot, deepseek, mistral, openrouter, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 目标语言 (pt, en)
    #[arg(long)]
    pub target_language: Option<String>,

    /// 搜索区域，例如 br-pt
    #[arg(long)]
    pub region: Option<String>,

    /// 错误日志文件
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 跳过启动时的模型连接检查
    #[arg(long)]
    pub skip_connection_check: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .with_context(|| format!("Não foi possível ler o arquivo de configuração {:?}", config_path))?
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(Config::DEFAULT_FILE_NAME);

            if default_config_path.exists() {
                Config::from_file(&default_config_path).with_context(|| {
                    format!(
                        "Não foi possível ler o arquivo de configuração padrão {:?}",
                        default_config_path
                    )
                })?
            } else {
                Config::default()
            }
        };

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ Aviso: provider desconhecido: {}, usando o padrão ({})",
                    provider_str, config.llm.provider
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ Aviso: idioma desconhecido: {}, usando o padrão ({})",
                    target_language_str,
                    config.target_language.display_name()
                );
            }
        }

        if let Some(region) = self.region {
            config.search.region = region;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        if self.skip_connection_check {
            config.skip_connection_check = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
