//! Connection Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{ConnectionError, ConnectionKey, ConnectionStatus};
use crate::domain::voice::ProviderId;

/// 语音连接聚合根
///
/// 状态机: CONNECTED ⇄ SPEAKING → DISCONNECTED（终态，不可再转出）
///
/// 同一连接上可以有多个并发播报，最后一个结束时才回到 CONNECTED
#[derive(Debug, Clone, Serialize)]
pub struct VoiceConnection {
    id: Uuid,
    key: ConnectionKey,
    provider: ProviderId,
    status: ConnectionStatus,
    #[serde(skip)]
    speakers: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VoiceConnection {
    /// 新建连接，初始状态 CONNECTED
    pub fn new(key: ConnectionKey, provider: ProviderId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            key,
            provider,
            status: ConnectionStatus::Connected,
            speakers: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 开始一次播报
    pub fn start_speaking(&mut self) -> Result<(), ConnectionError> {
        if self.status == ConnectionStatus::Disconnected {
            return Err(ConnectionError::Disconnected(self.key.clone()));
        }
        self.speakers += 1;
        if self.status == ConnectionStatus::Connected {
            self.transition(ConnectionStatus::Speaking);
        }
        Ok(())
    }

    /// 结束一次播报；没有进行中的播报时回到 CONNECTED
    pub fn finish_speaking(&mut self) -> Result<(), ConnectionError> {
        if self.status == ConnectionStatus::Disconnected {
            return Err(ConnectionError::Disconnected(self.key.clone()));
        }
        self.speakers = self.speakers.saturating_sub(1);
        if self.speakers == 0 && self.status == ConnectionStatus::Speaking {
            self.transition(ConnectionStatus::Connected);
        }
        Ok(())
    }

    /// 断开连接；返回是否发生了状态变化
    pub fn disconnect(&mut self) -> bool {
        if self.status == ConnectionStatus::Disconnected {
            return false;
        }
        self.transition(ConnectionStatus::Disconnected);
        true
    }

    fn transition(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &ConnectionKey {
        &self.key
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// 进行中的播报数
    pub fn speakers(&self) -> u32 {
        self.speakers
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> VoiceConnection {
        VoiceConnection::new(ConnectionKey::new("g1", "c1"), ProviderId::Discord)
    }

    #[test]
    fn test_speaking_round_trip() {
        let mut conn = connection();
        assert_eq!(conn.status(), ConnectionStatus::Connected);

        conn.start_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Speaking);

        conn.finish_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Connected);
        conn.finish_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Connected);
        assert_eq!(conn.speakers(), 0);
    }

    #[test]
    fn test_overlapping_speakers() {
        let mut conn = connection();
        conn.start_speaking().unwrap();
        conn.start_speaking().unwrap();
        assert_eq!(conn.speakers(), 2);

        conn.finish_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Speaking);

        conn.finish_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Connected);

        conn.start_speaking().unwrap();
        assert_eq!(conn.status(), ConnectionStatus::Speaking);
        assert_eq!(conn.speakers(), 1);
    }

    #[test]
    fn test_disconnected_is_terminal() {
        let mut conn = connection();
        let id = conn.id();

        assert!(conn.disconnect());
        assert!(!conn.disconnect());
        assert!(!conn.is_live());

        assert_eq!(
            conn.start_speaking(),
            Err(ConnectionError::Disconnected(ConnectionKey::new("g1", "c1")))
        );
        assert!(conn.finish_speaking().is_err());
        assert_eq!(conn.status(), ConnectionStatus::Disconnected);
        assert_eq!(conn.id(), id);
    }
}
