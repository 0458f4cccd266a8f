use crate::generator::outlet::ArticleExport;

/// 会话状态：保存最近一次成功运行产出的文章
#[derive(Debug, Clone, Default)]
pub struct Session {
    article: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn article(&self) -> Option<&str> {
        self.article.as_deref()
    }

    /// 整体替换文章
    pub fn set_article(&mut self, article: String) {
        self.article = Some(article);
    }

    pub fn clear(&mut self) {
        self.article = None;
    }

    /// 当前文章的导出件；没有文章或文章为空时返回None
    pub fn export(&self) -> Option<ArticleExport> {
        self.article
            .as_deref()
            .filter(|article| !article.is_empty())
            .map(ArticleExport::new)
    }
}
