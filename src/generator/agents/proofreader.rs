use crate::generator::agents::{ModelTier, PipelineAgent, PromptTemplate};
use crate::generator::types::AgentType;
use crate::i18n::TargetLanguage;

/// 校对角色：以流式方式输出最终文章
#[derive(Default)]
pub struct Proofreader;

impl PipelineAgent for Proofreader {
    fn agent_type(&self) -> AgentType {
        AgentType::Proofreader
    }

    fn model_tier(&self) -> ModelTier {
        ModelTier::Powerful
    }

    fn prompt_template(&self, language: TargetLanguage) -> PromptTemplate {
        match language {
            TargetLanguage::Portuguese => PromptTemplate {
                system_prompt: r#"Realize uma revisão detalhada do artigo, corrigindo:
1. Erros gramaticais, ortográficos e de concordância em português.
2. O estilo, mantendo o tom profissional e objetivo.
3. A formatação em markdown, garantindo que títulos, subtítulos e listas estejam claros.
4. Remova qualquer menção a limitações dos agentes ou do modelo de linguagem.
5. Garanta que não haja emojis no texto final."#
                    .to_string(),
                opening_instruction: "Revise:\n".to_string(),
            },
            TargetLanguage::English => PromptTemplate {
                system_prompt: r#"Perform a detailed review of the article, fixing:
1. Grammar, spelling and agreement errors.
2. The style, keeping the tone professional and objective.
3. The markdown formatting, making sure headings, subheadings and lists are clear.
4. Remove any mention of limitations of the agents or of the language model.
5. Make sure there are no emojis in the final text."#
                    .to_string(),
                opening_instruction: "Review:\n".to_string(),
            },
        }
    }
}
