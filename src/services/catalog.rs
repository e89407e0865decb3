use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{
    ConfigMap, MobileService, MobileServiceEntry, MobileServicesConfigFile,
    IDENTITY_MANAGEMENT_SERVICE, METRICS_SERVICE, PUSH_SERVICE,
};

/// Built-in display information for the service types the platform knows.
fn builtin_info(service_type: &str) -> Option<(&'static str, &'static str)> {
    match service_type {
        IDENTITY_MANAGEMENT_SERVICE => Some((
            "Identity Management",
            "Authentication and authorization for mobile apps",
        )),
        PUSH_SERVICE => Some((
            "Push Notifications",
            "Send push notifications to Android and iOS devices",
        )),
        METRICS_SERVICE => Some((
            "Mobile Metrics",
            "Collect and visualize metrics from mobile apps",
        )),
        _ => None,
    }
}

/// Backend services available to every mobile client of the cluster, in
/// presentation order. Service types are unique.
#[derive(Debug, Clone, Default)]
pub struct MobileServiceCatalog {
    services: Vec<MobileService>,
}

impl MobileServiceCatalog {
    /// Reads the services config file named by the configuration. A missing
    /// or broken file is not fatal: the default services are used instead.
    pub async fn load(config: &Config) -> Self {
        let path = &config.services_config_file;
        match read_config_file(path).await {
            Ok(Some(file)) => {
                info!("Loaded mobile services from {}", path.display());
                Self::from_entries(file.services)
            }
            Ok(None) => {
                warn!(
                    "Can not find service config file at {}, default services will be used",
                    path.display()
                );
                Self::defaults(config)
            }
            Err(e) => {
                warn!(
                    "Failed to read service config file {}, default services will be used: {:#}",
                    path.display(),
                    e
                );
                Self::defaults(config)
            }
        }
    }

    /// Identity management, push and metrics, pointing at the URLs from the
    /// configuration.
    pub fn defaults(config: &Config) -> Self {
        let entry = |service_type: &str, url: String| MobileServiceEntry {
            service_type: service_type.to_string(),
            url: Some(url),
            ..Default::default()
        };

        Self::from_entries(vec![
            entry(IDENTITY_MANAGEMENT_SERVICE, config.identity_management_url()),
            entry(PUSH_SERVICE, config.push_url()),
            entry(METRICS_SERVICE, config.metrics_url()),
        ])
    }

    pub fn from_entries(entries: Vec<MobileServiceEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.service_type.clone()) {
                warn!("Duplicate mobile service type '{}' ignored", entry.service_type);
                continue;
            }
            services.push(merge_with_builtin(entry));
        }

        Self { services }
    }

    pub fn services(&self) -> &[MobileService] {
        &self.services
    }

    pub fn get(&self, service_type: &str) -> Option<&MobileService> {
        self.services.iter().find(|s| s.service_type == service_type)
    }
}

// Values from the file win over the built-in ones.
fn merge_with_builtin(entry: MobileServiceEntry) -> MobileService {
    let (builtin_name, builtin_description) = match builtin_info(&entry.service_type) {
        Some((name, description)) => (Some(name.to_string()), Some(description.to_string())),
        None => (None, None),
    };

    MobileService {
        name: entry
            .name
            .or(builtin_name)
            .unwrap_or_else(|| entry.service_type.clone()),
        description: entry.description.or(builtin_description),
        url: entry.url.unwrap_or_default(),
        config: entry.config.unwrap_or_else(ConfigMap::new),
        service_type: entry.service_type,
    }
}

async fn read_config_file(path: &Path) -> Result<Option<MobileServicesConfigFile>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file = serde_json::from_slice(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_info_fills_missing_fields() {
        let catalog = MobileServiceCatalog::from_entries(vec![MobileServiceEntry {
            service_type: PUSH_SERVICE.to_string(),
            url: Some("https://push.example.com".to_string()),
            ..Default::default()
        }]);

        let push = catalog.get(PUSH_SERVICE).unwrap();
        assert_eq!(push.name, "Push Notifications");
        assert!(push.description.is_some());
        assert_eq!(push.url, "https://push.example.com");
    }

    #[test]
    fn file_values_override_builtin_info() {
        let catalog = MobileServiceCatalog::from_entries(vec![MobileServiceEntry {
            service_type: IDENTITY_MANAGEMENT_SERVICE.to_string(),
            name: Some("SSO".to_string()),
            ..Default::default()
        }]);

        assert_eq!(catalog.services()[0].name, "SSO");
    }

    #[test]
    fn unknown_types_pass_through_and_duplicates_are_dropped() {
        let catalog = MobileServiceCatalog::from_entries(vec![
            MobileServiceEntry {
                service_type: "sync".to_string(),
                url: Some("https://sync".to_string()),
                ..Default::default()
            },
            MobileServiceEntry {
                service_type: "sync".to_string(),
                url: Some("https://other".to_string()),
                ..Default::default()
            },
        ]);

        assert_eq!(catalog.services().len(), 1);
        let sync = catalog.get("sync").unwrap();
        assert_eq!(sync.name, "sync");
        assert_eq!(sync.description, None);
        assert_eq!(sync.url, "https://sync");
    }
}
