//! HTTP Session - 可释放的持久 HTTP 会话
//!
//! 进行中的请求持有读锁；释放会话需要写锁，因此会等待进行中的请求结束（有超时上限）。
//! 释放后下一次请求会重新建立会话。

use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard};

use super::http_support::build_http_client;
use crate::application::ports::TtsError;

/// 持久 HTTP 会话槽
pub struct HttpSession {
    slot: RwLock<Option<Client>>,
    timeout_secs: u64,
    opened: AtomicU64,
}

impl HttpSession {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            slot: RwLock::new(None),
            timeout_secs,
            opened: AtomicU64::new(0),
        }
    }

    /// 取得会话；未打开时惰性建立
    ///
    /// 返回的守卫存活期间，`close` 会一直等待
    pub async fn enter(&self) -> Result<RwLockReadGuard<'_, Client>, TtsError> {
        loop {
            let guard = self.slot.read().await;
            if let Ok(client) = RwLockReadGuard::try_map(guard, |slot| slot.as_ref()) {
                return Ok(client);
            }

            let mut slot = self.slot.write().await;
            if slot.is_none() {
                *slot = Some(build_http_client(self.timeout_secs)?);
                let count = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::debug!(opened = count, "HTTP session opened");
            }
        }
    }

    /// 关闭会话。幂等；等待进行中的请求，超时返回 `ReleaseTimeout`
    pub async fn close(&self, wait: Duration) -> Result<(), TtsError> {
        let mut slot = tokio::time::timeout(wait, self.slot.write())
            .await
            .map_err(|_| TtsError::ReleaseTimeout(wait))?;
        if slot.take().is_some() {
            tracing::debug!("HTTP session closed");
        }
        Ok(())
    }

    pub async fn is_open(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// 累计建立过的会话数
    pub fn opened_count(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_lazy_open_and_idempotent_close() {
        let session = HttpSession::new(5);
        assert!(!session.is_open().await);

        drop(session.enter().await.unwrap());
        drop(session.enter().await.unwrap());
        assert!(session.is_open().await);
        assert_eq!(session.opened_count(), 1);

        session.close(Duration::from_millis(100)).await.unwrap();
        session.close(Duration::from_millis(100)).await.unwrap();
        assert!(!session.is_open().await);

        drop(session.enter().await.unwrap());
        assert_eq!(session.opened_count(), 2);
    }

    #[tokio::test]
    async fn test_close_waits_for_in_flight_use() {
        let session = Arc::new(HttpSession::new(5));
        let guard = session.enter().await.unwrap();

        let closer = {
            let session = session.clone();
            tokio::spawn(async move { session.close(Duration::from_secs(5)).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!closer.is_finished());

        drop(guard);
        closer.await.unwrap().unwrap();
        assert!(!session.is_open().await);
    }

    #[tokio::test]
    async fn test_close_is_bounded() {
        let session = HttpSession::new(5);
        let _guard = session.enter().await.unwrap();

        let err = session.close(Duration::from_millis(20)).await.unwrap_err();
        assert!(matches!(err, TtsError::ReleaseTimeout(_)));
    }
}
