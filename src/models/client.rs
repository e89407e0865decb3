use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::{ClientType, ConfigMap};
use crate::error::ApiError;

pub const API_VERSION: &str = "mobile.k8s.io/v1alpha1";
pub const MOBILE_CLIENT_KIND: &str = "MobileClient";
pub const MOBILE_CLIENT_LIST_KIND: &str = "MobileClientList";

// Older producers write empty maps and lists as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Kind and API version, inlined into the objects that carry them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl TypeMeta {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            api_version: Some(API_VERSION.to_string()),
        }
    }
}

/// Identity of a stored resource. `resource_version`, `uid` and
/// `creation_timestamp` are owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// List metadata with the pagination cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(rename = "resourceVersion", default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// Desired state of a mobile client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileClientSpec {
    pub name: String,
    pub client_type: ClientType,
    pub app_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmz_url: Option<String>,
}

/// One service entry of the `mobile-services.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileClientServiceData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ConfigMap,
}

/// Content of the `mobile-services.json` file. Derived by the service, never
/// written by API callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileClientStatusData {
    pub version: i64,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<MobileClientServiceData>,
}

/// API representation of a mobile client resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileClientData {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: MobileClientSpec,
    #[serde(default)]
    pub status: MobileClientStatusData,
}

impl MobileClientData {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(self).map_err(|e| ApiError::Internal(e.into()))
    }

    /// Unknown fields are ignored.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileClientDataList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MobileClientData>,
}

impl MobileClientDataList {
    pub fn new(items: Vec<MobileClientData>) -> Self {
        // The list version is the newest version of any item it contains.
        let resource_version = items
            .iter()
            .filter_map(|item| item.metadata.resource_version.as_deref())
            .filter_map(|v| v.parse::<u64>().ok())
            .max()
            .map(|v| v.to_string());

        Self {
            type_meta: TypeMeta::new(MOBILE_CLIENT_LIST_KIND),
            metadata: ListMeta {
                resource_version,
                continue_token: None,
            },
            items,
        }
    }
}
