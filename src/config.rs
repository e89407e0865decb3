use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_address: String,
    /// Cluster host; published to clients as `clusterName`.
    pub cluster_host: String,
    /// Namespace the mobile clients live in.
    pub namespace: String,
    pub services_config_file: PathBuf,
    pub idm_url: Option<String>,
    pub ups_url: Option<String>,
    pub metrics_url: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // .env is loaded only when explicitly requested with USE_DOTENV=true
        if env::var("USE_DOTENV").ok().as_deref() == Some("true") {
            dotenv::dotenv().ok();
        }

        let server_address = match env::var("SERVER_ADDRESS") {
            Ok(address) => address,
            Err(_) => format!(
                "0.0.0.0:{}",
                env::var("PORT").unwrap_or_else(|_| "4000".to_string())
            ),
        };

        let config = Config {
            server_address,
            cluster_host: env::var("OPENSHIFT_HOST")
                .unwrap_or_else(|_| "localhost:8443".to_string()),
            namespace: env::var("OPENSHIFT_MDC_NAMESPACE")
                .unwrap_or_else(|_| "myproject".to_string()),
            services_config_file: env::var("MOBILE_SERVICES_CONFIG_FILE")
                .unwrap_or_else(|_| "/etc/mdc/servicesConfig.json".to_string())
                .into(),
            idm_url: non_empty_var("IDM_URL"),
            ups_url: non_empty_var("UPS_URL"),
            metrics_url: non_empty_var("METRICS_URL"),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            bail!("OPENSHIFT_MDC_NAMESPACE must not be empty");
        }
        if self.cluster_host.trim().is_empty() {
            bail!("OPENSHIFT_HOST must not be empty");
        }
        Ok(())
    }

    pub fn identity_management_url(&self) -> String {
        https_url(self.idm_url.as_deref().unwrap_or(&self.cluster_host))
    }

    pub fn push_url(&self) -> String {
        https_url(self.ups_url.as_deref().unwrap_or(&self.cluster_host))
    }

    pub fn metrics_url(&self) -> String {
        https_url(self.metrics_url.as_deref().unwrap_or(&self.cluster_host))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn https_url(host: &str) -> String {
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
