use crate::generator::agents::{ModelTier, PipelineAgent, PromptTemplate};
use crate::generator::types::AgentType;
use crate::i18n::TargetLanguage;

/// 撰写角色：根据分析结果写出markdown初稿
#[derive(Default)]
pub struct Writer;

impl PipelineAgent for Writer {
    fn agent_type(&self) -> AgentType {
        AgentType::Writer
    }

    fn model_tier(&self) -> ModelTier {
        ModelTier::Powerful
    }

    fn prompt_template(&self, language: TargetLanguage) -> PromptTemplate {
        match language {
            TargetLanguage::Portuguese => PromptTemplate {
                system_prompt: r#"Escreva um artigo de notícias em formato markdown baseado no conteúdo analisado:
0. Formato markdown sem emojis
1. Estruture em seções: Introdução, Tópicos Principais, Conclusão.
2. Adicione subtítulos claros e utilize listas quando necessário para facilitar a leitura.
3. Mantenha um tom profissional, informativo e engajador, apropriado para redes profissionais como LinkedIn.
4. Garanta fluidez e transição entre tópicos, evitando redundâncias.
5. Use dados coletados pelo analista, citando fontes no final do artigo (quando aplicável)
6. Caso o texto contenha termos técnicos em inglês, mantenha-os em inglês."#
                    .to_string(),
                opening_instruction: "Crie um artigo usando:\n".to_string(),
            },
            TargetLanguage::English => PromptTemplate {
                system_prompt: r#"Write a news article in markdown format based on the analyzed content:
0. Markdown format without emojis
1. Structure it in sections: Introduction, Main Topics, Conclusion.
2. Add clear subheadings and use lists where they make reading easier.
3. Keep a professional, informative and engaging tone, suitable for professional networks such as LinkedIn.
4. Ensure smooth transitions between topics and avoid redundancy.
5. Use the data collected by the analyst, citing sources at the end of the article (when applicable)."#
                    .to_string(),
                opening_instruction: "Write an article using:\n".to_string(),
            },
        }
    }
}
