use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    MobileAppCreateRequest, MobileAppUpdateRequest, MobileClientData, MobileClientDataList,
    MobileClientServiceData, MobileClientSpec, MobileClientStatusData, ObjectMeta, TypeMeta,
    MOBILE_CLIENT_KIND,
};
use crate::services::{MobileClientStore, MobileServiceCatalog};

/// Creates and maintains the mobile clients of one namespace.
#[derive(Clone)]
pub struct MobileClientService {
    store: Arc<dyn MobileClientStore>,
    catalog: Arc<MobileServiceCatalog>,
    cluster_name: String,
    namespace: String,
}

impl MobileClientService {
    pub fn new(
        store: Arc<dyn MobileClientStore>,
        catalog: Arc<MobileServiceCatalog>,
        cluster_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            cluster_name: cluster_name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn catalog(&self) -> &MobileServiceCatalog {
        &self.catalog
    }

    pub async fn list_clients(&self) -> Result<MobileClientDataList, ApiError> {
        let items = self.store.list(&self.namespace).await?;
        Ok(MobileClientDataList::new(items))
    }

    pub async fn get_client(&self, name: &str) -> Result<MobileClientData, ApiError> {
        self.store.get(&self.namespace, name).await
    }

    pub async fn create_client(
        &self,
        request: MobileAppCreateRequest,
    ) -> Result<MobileClientData, ApiError> {
        request.validate()?;
        let client_type = request
            .parsed_client_type()
            .map_err(|e| ApiError::validation("clientType", e.to_string()))?;

        let client = MobileClientData {
            type_meta: TypeMeta::new(MOBILE_CLIENT_KIND),
            metadata: ObjectMeta {
                name: request.name.clone(),
                namespace: self.namespace.clone(),
                ..Default::default()
            },
            status: self.derive_status(&request.name, 1),
            spec: MobileClientSpec {
                name: request.name,
                client_type,
                app_identifier: request.app_identifier,
                dmz_url: request.dmz_url.filter(|url| !url.is_empty()),
            },
        };

        let created = self.store.create(client).await?;
        info!(
            "Created mobile client '{}' ({}) in namespace {}",
            created.name(),
            created.spec.client_type,
            created.namespace()
        );
        Ok(created)
    }

    pub async fn update_client(
        &self,
        name: &str,
        request: MobileAppUpdateRequest,
    ) -> Result<MobileClientData, ApiError> {
        request.validate()?;

        let mut client = self.store.get(&self.namespace, name).await?;
        client.spec.app_identifier = request.app_identifier;

        let version = client.status.version + 1;
        client.status = self.derive_status(name, version);

        let updated = self.store.update(client).await?;
        info!(
            "Updated mobile client '{}', status version {}",
            name, updated.status.version
        );
        Ok(updated)
    }

    pub async fn delete_client(&self, name: &str) -> Result<MobileClientData, ApiError> {
        let deleted = self.store.delete(&self.namespace, name).await?;
        info!("Deleted mobile client '{}'", name);
        Ok(deleted)
    }

    /// The `mobile-services.json` document for a client.
    pub async fn client_config(&self, name: &str) -> Result<MobileClientStatusData, ApiError> {
        Ok(self.get_client(name).await?.status)
    }

    fn derive_status(&self, client_name: &str, version: i64) -> MobileClientStatusData {
        let services = self
            .catalog
            .services()
            .iter()
            .map(|service| MobileClientServiceData {
                id: format!("{}-{}", service.service_type, client_name),
                name: service.name.clone(),
                service_type: service.service_type.clone(),
                url: service.url.clone(),
                config: service.config.clone(),
            })
            .collect();

        MobileClientStatusData {
            version,
            cluster_name: self.cluster_name.clone(),
            namespace: self.namespace.clone(),
            client_id: client_name.to_string(),
            services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientType, MobileServiceEntry};
    use crate::services::InMemoryClientStore;

    fn service() -> MobileClientService {
        let catalog = MobileServiceCatalog::from_entries(vec![
            MobileServiceEntry {
                service_type: "keycloak".to_string(),
                url: Some("https://sso.example.com".to_string()),
                ..Default::default()
            },
            MobileServiceEntry {
                service_type: "push".to_string(),
                url: Some("https://push.example.com".to_string()),
                ..Default::default()
            },
        ]);
        MobileClientService::new(
            Arc::new(InMemoryClientStore::new()),
            Arc::new(catalog),
            "cluster.example.com",
            "mobile",
        )
    }

    fn create_request(name: &str) -> MobileAppCreateRequest {
        MobileAppCreateRequest {
            name: name.to_string(),
            client_type: "cordova".to_string(),
            app_identifier: "com.example.app".to_string(),
            dmz_url: None,
        }
    }

    #[tokio::test]
    async fn created_client_has_derived_status() {
        let service = service();
        let client = service.create_client(create_request("shop")).await.unwrap();

        assert_eq!(client.spec.client_type, ClientType::Cordova);
        assert_eq!(client.metadata.namespace, "mobile");
        assert_eq!(client.status.version, 1);
        assert_eq!(client.status.client_id, "shop");
        assert_eq!(client.status.cluster_name, "cluster.example.com");

        let ids: Vec<_> = client.status.services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["keycloak-shop", "push-shop"]);
    }

    #[tokio::test]
    async fn update_bumps_status_version() {
        let service = service();
        let created = service.create_client(create_request("shop")).await.unwrap();

        let updated = service
            .update_client(
                "shop",
                MobileAppUpdateRequest {
                    app_identifier: "com.example.shop".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.spec.app_identifier, "com.example.shop");
        assert_eq!(updated.status.version, created.status.version + 1);
        assert_ne!(updated.metadata.resource_version, created.metadata.resource_version);
    }

    #[tokio::test]
    async fn invalid_request_is_not_stored() {
        let service = service();
        let mut request = create_request("shop");
        request.client_type = "windows".to_string();

        let err = service.create_client(request).await.unwrap_err();
        assert_eq!(err.field(), Some("clientType"));
        assert!(service.list_clients().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_client() {
        let service = service();
        let err = service
            .update_client(
                "ghost",
                MobileAppUpdateRequest {
                    app_identifier: "x".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
