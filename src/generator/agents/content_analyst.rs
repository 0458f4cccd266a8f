use crate::generator::agents::{PipelineAgent, PromptTemplate};
use crate::generator::types::AgentType;
use crate::i18n::TargetLanguage;

/// 分析角色：整理并交叉核对检索到的内容
#[derive(Default)]
pub struct ContentAnalyst;

impl PipelineAgent for ContentAnalyst {
    fn agent_type(&self) -> AgentType {
        AgentType::ContentAnalyst
    }

    fn prompt_template(&self, language: TargetLanguage) -> PromptTemplate {
        match language {
            TargetLanguage::Portuguese => PromptTemplate {
                system_prompt: r#"Organize e analise o conteúdo coletado:
1. Estruture o texto em seções temáticas claras com base nos tópicos coletados.
2. Verifique a validade e relevância das informações, cruzando dados com pelo menos duas fontes confiáveis.
3. Adicione contexto histórico ou explicativo quando necessário para tornar o conteúdo mais acessível.
4. Priorize informações relevantes ao público do LinkedIn, como insights acionáveis e tendências de mercado."#
                    .to_string(),
                opening_instruction: "Analise estes dados:\n".to_string(),
            },
            TargetLanguage::English => PromptTemplate {
                system_prompt: r#"Organize and analyze the collected content:
1. Structure the text into clear thematic sections based on the collected topics.
2. Check the validity and relevance of the information, cross-checking data against at least two reliable sources.
3. Add historical or explanatory context where needed to make the content more accessible.
4. Prioritize information relevant to a LinkedIn audience, such as actionable insights and market trends."#
                    .to_string(),
                opening_instruction: "Analyze this data:\n".to_string(),
            },
        }
    }
}
