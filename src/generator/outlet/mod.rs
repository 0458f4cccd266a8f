use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 可下载的文章文件
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    /// 文章原文，不做任何包装
    pub content: String,
}

impl ArticleExport {
    pub const FILE_NAME: &'static str = "artigo_llm.md";
    pub const MIME_TYPE: &'static str = "text/markdown";

    pub fn new(article: &str) -> Self {
        Self {
            file_name: Self::FILE_NAME,
            mime_type: Self::MIME_TYPE,
            content: article.to_string(),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, export: &ArticleExport) -> Result<PathBuf>;
}

/// 将文章写入输出目录
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, export: &ArticleExport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .await
            .context(format!("Failed to create output directory: {:?}", self.output_dir))?;

        let output_file_path = self.output_dir.join(export.file_name);
        fs::write(&output_file_path, export.content.as_bytes())
            .await
            .context(format!("Failed to write article: {:?}", output_file_path))?;

        Ok(output_file_path)
    }
}
