//! 错误日志 - 进程级、仅追加的日志文件

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// 初始化错误日志，将ERROR级别的记录追加写入日志文件
///
/// 重复调用时保持第一次安装的订阅者不变。
pub fn init_logging(log_file: &Path) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create log directory: {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .context(format!("Failed to open log file: {:?}", log_file))?;

    tracing_subscriber::fmt()
        .with_max_level(Level::ERROR)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install error logger: {}", e))
}
