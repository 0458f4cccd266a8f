use crate::generator::agents::{PipelineAgent, PromptTemplate};
use crate::generator::types::{AgentTool, AgentType};
use crate::i18n::TargetLanguage;

/// 检索角色，可调用网络搜索工具
#[derive(Default)]
pub struct WebResearcher;

impl PipelineAgent for WebResearcher {
    fn agent_type(&self) -> AgentType {
        AgentType::WebResearcher
    }

    fn tools(&self) -> Vec<AgentTool> {
        vec![AgentTool::WebSearch]
    }

    fn prompt_template(&self, language: TargetLanguage) -> PromptTemplate {
        match language {
            TargetLanguage::Portuguese => PromptTemplate {
                system_prompt: "Colete artigos e notícias recentes usando a ferramenta de pesquisa web (DuckDuckGo)".to_string(),
                opening_instruction: "Pesquise sobre: ".to_string(),
            },
            TargetLanguage::English => PromptTemplate {
                system_prompt: "Collect recent articles and news using the web search tool (DuckDuckGo)".to_string(),
                opening_instruction: "Search about: ".to_string(),
            },
        }
    }
}
