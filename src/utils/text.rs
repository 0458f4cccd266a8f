//! 文本处理工具

/// 转义标记语言中有特殊含义的字符（`& < > " '`）
pub fn escape_markup(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// 按字符截取预览，超长时追加省略号
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
