//! 固定间隔重试策略

use std::future::Future;
use std::time::Duration;

use crate::config::SearchConfig;

/// 重试策略：最多尝试`max_attempts`次，每次失败后等待固定的`delay`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_search_config(config: &SearchConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    /// 执行操作，失败时按策略重试，返回最后一次的错误
    ///
    /// `on_error`在每次失败后被调用，参数为已尝试次数与错误。
    pub async fn run<T, E, F, Fut, L>(&self, mut operation: F, mut on_error: L) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        L: FnMut(u32, &E),
    {
        let mut attempts = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    attempts += 1;
                    on_error(attempts, &err);
                    if attempts >= self.max_attempts {
                        return Err(err);
                    }
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_search_config(&SearchConfig::default())
    }
}
