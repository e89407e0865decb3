use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::MobileClientData;

/// Source of truth for live mobile client resources.
///
/// Implementations own `uid`, `creationTimestamp` and `resourceVersion` of
/// the objects they store and must enforce name uniqueness per namespace
/// atomically on `create`.
#[async_trait]
pub trait MobileClientStore: Send + Sync {
    /// All clients of a namespace, ordered by name.
    async fn list(&self, namespace: &str) -> Result<Vec<MobileClientData>, ApiError>;

    async fn get(&self, namespace: &str, name: &str) -> Result<MobileClientData, ApiError>;

    async fn create(&self, client: MobileClientData) -> Result<MobileClientData, ApiError>;

    /// Replaces a stored client. When `client` carries a resource version it
    /// must match the stored one.
    async fn update(&self, client: MobileClientData) -> Result<MobileClientData, ApiError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<MobileClientData, ApiError>;
}

type Key = (String, String);

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

#[derive(Default)]
pub struct InMemoryClientStore {
    clients: RwLock<BTreeMap<Key, MobileClientData>>,
    last_version: AtomicU64,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_resource_version(&self) -> String {
        (self.last_version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

#[async_trait]
impl MobileClientStore for InMemoryClientStore {
    async fn list(&self, namespace: &str) -> Result<Vec<MobileClientData>, ApiError> {
        let clients = self.clients.read().await;
        Ok(clients
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, client)| client.clone())
            .collect())
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<MobileClientData, ApiError> {
        let clients = self.clients.read().await;
        clients
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }

    async fn create(&self, mut client: MobileClientData) -> Result<MobileClientData, ApiError> {
        let key = key(client.namespace(), client.name());

        // Held across check and insert so concurrent creates can not both win.
        let mut clients = self.clients.write().await;
        if clients.contains_key(&key) {
            return Err(ApiError::AlreadyExists(key.1));
        }

        client.metadata.uid = Some(Uuid::new_v4().to_string());
        client.metadata.creation_timestamp = Some(Utc::now());
        client.metadata.resource_version = Some(self.next_resource_version());

        debug!(
            "Stored mobile client {}/{} at version {:?}",
            key.0, key.1, client.metadata.resource_version
        );
        clients.insert(key, client.clone());
        Ok(client)
    }

    async fn update(&self, mut client: MobileClientData) -> Result<MobileClientData, ApiError> {
        let key = key(client.namespace(), client.name());

        let mut clients = self.clients.write().await;
        let stored = clients
            .get(&key)
            .ok_or_else(|| ApiError::NotFound(key.1.clone()))?;

        if let Some(expected) = client.metadata.resource_version.as_deref() {
            if stored.metadata.resource_version.as_deref() != Some(expected) {
                return Err(ApiError::Conflict(key.1));
            }
        }

        client.metadata.uid = stored.metadata.uid.clone();
        client.metadata.creation_timestamp = stored.metadata.creation_timestamp;
        client.metadata.resource_version = Some(self.next_resource_version());

        clients.insert(key, client.clone());
        Ok(client)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<MobileClientData, ApiError> {
        let mut clients = self.clients.write().await;
        clients
            .remove(&key(namespace, name))
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }
}
