//! 主题校验与清洗

use std::fmt::Display;

use crate::generator::error::ValidationError;
use crate::utils::text::escape_markup;

pub const MIN_TOPIC_LENGTH: usize = 5;
pub const MAX_TOPIC_LENGTH: usize = 500;

/// 已通过校验的主题：去除首尾空白并转义
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 校验原始输入
///
/// 先检查去空白后的长度下限，再检查原始长度上限，长度以字符计。
pub fn validate_topic(raw: &str) -> Result<Topic, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TOPIC_LENGTH {
        return Err(ValidationError::TooShort);
    }

    if raw.chars().count() > MAX_TOPIC_LENGTH {
        return Err(ValidationError::TooLong);
    }

    Ok(Topic(escape_markup(trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_and_trims() {
        let topic = validate_topic("  Impacto da IA no mercado de trabalho \n").unwrap();
        assert_eq!(topic.as_str(), "Impacto da IA no mercado de trabalho");
    }

    #[test]
    fn test_escapes_markup() {
        let topic = validate_topic("<script>IA & empregos</script>").unwrap();
        assert_eq!(topic.as_str(), "&lt;script&gt;IA &amp; empregos&lt;/script&gt;");
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(validate_topic("abcd"), Err(ValidationError::TooShort));
        assert_eq!(validate_topic("   abcd   "), Err(ValidationError::TooShort));
        assert_eq!(validate_topic(""), Err(ValidationError::TooShort));
        assert!(validate_topic("abcde").is_ok());

        let max = "a".repeat(MAX_TOPIC_LENGTH);
        assert_eq!(validate_topic(&max).unwrap().as_str(), max);
        assert_eq!(
            validate_topic(&"a".repeat(MAX_TOPIC_LENGTH + 1)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_raw_length_counts_surrounding_whitespace() {
        // 去空白后只有498个字符，但原始输入超过上限
        let raw = format!("  {}  ", "a".repeat(MAX_TOPIC_LENGTH - 2));
        assert_eq!(validate_topic(&raw), Err(ValidationError::TooLong));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // "ação!" 只有5个字符，但超过5个字节
        assert!(validate_topic("ação!").is_ok());
        assert!(validate_topic(&"ç".repeat(MAX_TOPIC_LENGTH)).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::TooShort.to_string(),
            "Por favor insira um tópico válido (mínimo 5 caracteres)"
        );
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Tópico muito longo (máximo 500 caracteres)"
        );
    }
}
