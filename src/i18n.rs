use serde::{Deserialize, Serialize};

/// 目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "pt")]
    #[default]
    Portuguese,
    #[serde(rename = "en")]
    English,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::Portuguese => write!(f, "pt"),
            TargetLanguage::English => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" | "português" | "portugues" => {
                Ok(TargetLanguage::Portuguese)
            }
            "en" | "english" | "inglês" => Ok(TargetLanguage::English),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Portuguese => "Português",
            TargetLanguage::English => "English",
        }
    }

    /// 获取语言的提示词指令，追加在每个角色的系统提示词之后
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::Portuguese => {
                "Responda sempre em português do Brasil, com linguagem precisa, profissional e fácil de entender."
            }
            TargetLanguage::English => {
                "Always answer in English, using accurate, professional, and easy-to-understand language."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_language_round_trip_names() {
        assert_eq!("pt".parse::<TargetLanguage>().unwrap(), TargetLanguage::Portuguese);
        assert_eq!("PT-BR".parse::<TargetLanguage>().unwrap(), TargetLanguage::Portuguese);
        assert_eq!("english".parse::<TargetLanguage>().unwrap(), TargetLanguage::English);
        assert!("klingon".parse::<TargetLanguage>().is_err());

        assert_eq!(TargetLanguage::Portuguese.to_string(), "pt");
        assert_eq!(TargetLanguage::English.to_string(), "en");
    }

    #[test]
    fn test_prompt_instruction_mentions_language() {
        assert!(TargetLanguage::Portuguese.prompt_instruction().contains("português"));
        assert!(TargetLanguage::English.prompt_instruction().contains("English"));
        assert_eq!(TargetLanguage::default().display_name(), "Português");
    }
}
