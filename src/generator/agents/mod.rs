//! 生成文章的四个角色：检索 → 分析 → 撰写 → 校对

use crate::config::Config;
use crate::generator::types::{AgentRole, AgentTool, AgentType, Message};
use crate::i18n::TargetLanguage;

pub mod content_analyst;
pub mod proofreader;
pub mod web_researcher;
pub mod writer;

pub use content_analyst::ContentAnalyst;
pub use proofreader::Proofreader;
pub use web_researcher::WebResearcher;
pub use writer::Writer;

/// 角色使用的模型档位
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelTier {
    /// 对应`llm.model_efficient`
    Efficient,
    /// 对应`llm.model_powerful`
    Powerful,
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 包裹阶段输入的开头指令
    pub opening_instruction: String,
}

/// 流水线角色 - 声明式的固定配置
pub trait PipelineAgent: Send + Sync {
    /// Agent类型标识
    fn agent_type(&self) -> AgentType;

    /// Prompt模板配置
    fn prompt_template(&self, language: TargetLanguage) -> PromptTemplate;

    fn model_tier(&self) -> ModelTier {
        ModelTier::Efficient
    }

    /// 角色可调用的工具
    fn tools(&self) -> Vec<AgentTool> {
        vec![]
    }

    /// 根据配置生成角色定义，系统提示词后追加目标语言指令
    fn role(&self, config: &Config) -> AgentRole {
        let template = self.prompt_template(config.target_language);
        let model = match self.model_tier() {
            ModelTier::Efficient => config.llm.model_efficient.clone(),
            ModelTier::Powerful => config.llm.model_powerful.clone(),
        };

        AgentRole {
            name: self.agent_type().to_string(),
            instructions: format!(
                "{}\n\n{}",
                template.system_prompt,
                config.target_language.prompt_instruction()
            ),
            model,
            tools: self.tools(),
        }
    }

    /// 用开头指令包裹阶段输入
    fn message(&self, input: &str, language: TargetLanguage) -> Message {
        let template = self.prompt_template(language);
        Message::user(format!("{}{}", template.opening_instruction, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::types::MessageRole;

    #[test]
    fn test_roles_follow_config_models() {
        let mut config = Config::default();
        config.llm.model_efficient = "fast".to_string();
        config.llm.model_powerful = "smart".to_string();

        assert_eq!(WebResearcher.role(&config).model, "fast");
        assert_eq!(ContentAnalyst.role(&config).model, "fast");
        assert_eq!(Writer.role(&config).model, "smart");
        assert_eq!(Proofreader.role(&config).model, "smart");
    }

    #[test]
    fn test_only_researcher_has_tools() {
        let config = Config::default();

        assert!(WebResearcher.role(&config).has_tool(AgentTool::WebSearch));
        assert!(ContentAnalyst.role(&config).tools.is_empty());
        assert!(Writer.role(&config).tools.is_empty());
        assert!(Proofreader.role(&config).tools.is_empty());
    }

    #[test]
    fn test_role_names_and_language_instruction() {
        let config = Config::default();
        let role = Proofreader.role(&config);

        assert_eq!(role.name, "Revisor Final");
        assert!(role.instructions.starts_with("Realize uma revisão detalhada"));
        assert!(
            role.instructions
                .ends_with(TargetLanguage::Portuguese.prompt_instruction())
        );
    }

    #[test]
    fn test_stage_messages_portuguese() {
        let lang = TargetLanguage::Portuguese;

        let search = WebResearcher.message("Impacto da IA", lang);
        assert_eq!(search.role, MessageRole::User);
        assert_eq!(search.content, "Pesquise sobre: Impacto da IA");
        assert_eq!(
            ContentAnalyst.message("dados", lang).content,
            "Analise estes dados:\ndados"
        );
        assert_eq!(
            Writer.message("analise", lang).content,
            "Crie um artigo usando:\nanalise"
        );
        assert_eq!(Proofreader.message("rascunho", lang).content, "Revise:\nrascunho");
    }

    #[test]
    fn test_stage_messages_english() {
        let lang = TargetLanguage::English;

        assert_eq!(
            WebResearcher.message("AI impact", lang).content,
            "Search about: AI impact"
        );
        assert_eq!(Proofreader.message("draft", lang).content, "Review:\ndraft");
    }
}
