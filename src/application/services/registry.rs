//! Provider Registry - provider 标识到实现的映射
//!
//! 启动时构建，之后只读；NONE 与未注册的标识回退到空实现

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::VoiceProviderPort;
use crate::domain::voice::ProviderId;

/// Provider 注册表
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, Arc<dyn VoiceProviderPort>>,
    fallback: Arc<dyn VoiceProviderPort>,
}

impl ProviderRegistry {
    /// 以回退实现（通常是空实现）开始构建
    pub fn builder(fallback: Arc<dyn VoiceProviderPort>) -> ProviderRegistryBuilder {
        ProviderRegistryBuilder {
            providers: HashMap::new(),
            fallback,
        }
    }

    /// 查找 provider 实现
    pub fn resolve(&self, provider: ProviderId) -> Arc<dyn VoiceProviderPort> {
        if provider == ProviderId::None {
            return self.fallback.clone();
        }
        self.providers
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// 已注册的 provider（含回退实现）
    pub fn providers(&self) -> Vec<ProviderId> {
        let mut ids: Vec<ProviderId> = self.providers.keys().copied().collect();
        ids.push(self.fallback.id());
        ids.sort_by_key(|id| id.as_str());
        ids.dedup();
        ids
    }

    /// 全部实现（含回退实现），用于批量释放
    pub fn clients(&self) -> Vec<Arc<dyn VoiceProviderPort>> {
        let mut clients: Vec<_> = self.providers.values().cloned().collect();
        clients.push(self.fallback.clone());
        clients
    }
}

/// 注册表构建器
pub struct ProviderRegistryBuilder {
    providers: HashMap<ProviderId, Arc<dyn VoiceProviderPort>>,
    fallback: Arc<dyn VoiceProviderPort>,
}

impl ProviderRegistryBuilder {
    /// 注册实现；同一标识只保留一个实例
    pub fn register(mut self, client: Arc<dyn VoiceProviderPort>) -> Self {
        let id = client.id();
        if id == ProviderId::None {
            self.fallback = client;
            return self;
        }
        if self.providers.insert(id, client).is_some() {
            tracing::warn!(provider = %id, "Provider registered twice, keeping the latest");
        }
        self
    }

    pub fn build(self) -> ProviderRegistry {
        tracing::debug!(count = self.providers.len(), "Provider registry built");
        ProviderRegistry {
            providers: self.providers,
            fallback: self.fallback,
        }
    }
}
