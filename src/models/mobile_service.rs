use serde::{Deserialize, Serialize};

use super::ConfigMap;

pub const IDENTITY_MANAGEMENT_SERVICE: &str = "keycloak";
pub const PUSH_SERVICE: &str = "push";
pub const METRICS_SERVICE: &str = "metrics";

/// A backend service available to the mobile clients of the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileService {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub config: ConfigMap,
}

/// Entry of the services config file. Everything except `type` is optional
/// and falls back to the built-in description of that service type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MobileServiceEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub config: Option<ConfigMap>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MobileServicesConfigFile {
    #[serde(default)]
    pub services: Vec<MobileServiceEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MobileServiceList {
    pub items: Vec<MobileService>,
}
