//! In-Memory Connection Lifecycle Implementation
//!
//! 每个键对应一个带异步锁的槽位，同一键上的操作串行执行；
//! 槽位被移除后，等待中的 acquire 会重新取槽。

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::application::ports::{ConnectionLifecyclePort, LifecycleFailure};
use crate::application::services::ProviderRegistry;
use crate::domain::connection::{ConnectionError, ConnectionKey, VoiceConnection};
use crate::domain::voice::ProviderId;

type Slot = Arc<Mutex<Option<VoiceConnection>>>;

/// 内存连接管理器
pub struct InMemoryConnectionLifecycle {
    slots: DashMap<ConnectionKey, Slot>,
    registry: Arc<ProviderRegistry>,
    release_timeout: Duration,
}

impl InMemoryConnectionLifecycle {
    pub fn new(registry: Arc<ProviderRegistry>, release_timeout: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            registry,
            release_timeout,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn slot(&self, key: &ConnectionKey) -> Option<Slot> {
        self.slots.get(key).map(|slot| slot.clone())
    }

    fn is_current(&self, key: &ConnectionKey, slot: &Slot) -> bool {
        self.slots
            .get(key)
            .map(|current| Arc::ptr_eq(current.value(), slot))
            .unwrap_or(false)
    }

    async fn release_provider(
        &self,
        key: &ConnectionKey,
        provider: ProviderId,
    ) -> Result<(), LifecycleFailure> {
        let client = self.registry.resolve(provider);
        let failure = |message: String| LifecycleFailure {
            key: key.clone(),
            provider,
            message,
        };

        match tokio::time::timeout(self.release_timeout, client.release()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(failure(e.to_string())),
            Err(_) => Err(failure(format!(
                "provider release timed out after {:?}",
                self.release_timeout
            ))),
        }
    }

    async fn transition<F>(
        &self,
        key: &ConnectionKey,
        apply: F,
    ) -> Result<VoiceConnection, ConnectionError>
    where
        F: FnOnce(&mut VoiceConnection) -> Result<(), ConnectionError> + Send,
    {
        let slot = self
            .slot(key)
            .ok_or_else(|| ConnectionError::NotFound(key.clone()))?;
        let mut guard = slot.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| ConnectionError::NotFound(key.clone()))?;
        apply(conn)?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl ConnectionLifecyclePort for InMemoryConnectionLifecycle {
    async fn acquire(&self, key: ConnectionKey, provider: ProviderId) -> VoiceConnection {
        loop {
            let slot = self
                .slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(None)))
                .clone();
            let mut guard = slot.lock().await;

            // 等锁期间槽位被释放移除，重新取槽
            if !self.is_current(&key, &slot) {
                continue;
            }

            if let Some(conn) = guard.as_ref() {
                if conn.provider() != provider {
                    tracing::warn!(
                        key = %key,
                        owner = %conn.provider(),
                        requested = %provider,
                        "Connection already owned by another provider, reusing it"
                    );
                }
                return conn.clone();
            }

            let conn = VoiceConnection::new(key.clone(), provider);
            tracing::info!(
                key = %key,
                connection_id = %conn.id(),
                provider = %provider,
                "Voice connection acquired"
            );
            *guard = Some(conn.clone());
            return conn;
        }
    }

    async fn mark_speaking(&self, key: &ConnectionKey) -> Result<VoiceConnection, ConnectionError> {
        let conn = self.transition(key, |c| c.start_speaking()).await?;
        tracing::debug!(key = %key, "Connection speaking");
        Ok(conn)
    }

    async fn mark_idle(&self, key: &ConnectionKey) -> Result<VoiceConnection, ConnectionError> {
        let conn = self.transition(key, |c| c.finish_speaking()).await?;
        tracing::debug!(key = %key, "Connection idle");
        Ok(conn)
    }

    async fn release(&self, key: &ConnectionKey) -> Result<bool, LifecycleFailure> {
        let Some(slot) = self.slot(key) else {
            return Ok(false);
        };

        // 持锁直到 provider 释放完成，同键上的 acquire 因此排在释放之后
        let mut guard = slot.lock().await;
        let taken = guard.take();
        let result = match taken {
            None => Ok(false),
            Some(mut conn) => {
                conn.disconnect();
                match self.release_provider(key, conn.provider()).await {
                    Ok(()) => {
                        tracing::info!(
                            key = %key,
                            connection_id = %conn.id(),
                            provider = %conn.provider(),
                            "Voice connection released"
                        );
                        Ok(true)
                    }
                    Err(failure) => {
                        tracing::warn!(
                            key = %key,
                            provider = %conn.provider(),
                            error = %failure.message,
                            "Provider release failed, connection record dropped"
                        );
                        Err(failure)
                    }
                }
            }
        };
        self.slots.remove_if(key, |_, current| Arc::ptr_eq(current, &slot));
        drop(guard);

        result
    }

    async fn release_all(&self) -> Result<usize, Vec<LifecycleFailure>> {
        let keys: Vec<ConnectionKey> = self.slots.iter().map(|e| e.key().clone()).collect();
        if keys.is_empty() {
            return Ok(0);
        }

        let results = join_all(keys.iter().map(|key| self.release(key))).await;

        let mut released = 0;
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(true) => released += 1,
                Ok(false) => {}
                Err(failure) => failures.push(failure),
            }
        }

        tracing::info!(
            released = released,
            failed = failures.len(),
            "Released all voice connections"
        );

        if failures.is_empty() {
            Ok(released)
        } else {
            Err(failures)
        }
    }

    async fn get(&self, key: &ConnectionKey) -> Option<VoiceConnection> {
        let slot = self.slot(key)?;
        let guard = slot.lock().await;
        guard.clone()
    }

    async fn list(&self) -> Vec<VoiceConnection> {
        let slots: Vec<Slot> = self.slots.iter().map(|e| e.value().clone()).collect();
        let mut connections = Vec::with_capacity(slots.len());
        for slot in slots {
            if let Some(conn) = slot.lock().await.clone() {
                connections.push(conn);
            }
        }
        connections.sort_by_key(|c| c.created_at());
        connections
    }
}
