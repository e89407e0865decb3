use std::env;
use std::path::PathBuf;

use mobile_client_service::config::Config;

/// Test configuration
fn create_test_config() -> Config {
    Config {
        server_address: "0.0.0.0:4000".to_string(),
        cluster_host: "cluster.example.com:8443".to_string(),
        namespace: "myproject".to_string(),
        services_config_file: PathBuf::from("/etc/mdc/servicesConfig.json"),
        idm_url: None,
        ups_url: None,
        metrics_url: None,
        log_level: "info".to_string(),
    }
}

#[test]
fn test_service_urls_default_to_cluster_host() {
    // Without explicit URLs every service points at the cluster host
    let config = create_test_config();

    assert_eq!(config.identity_management_url(), "https://cluster.example.com:8443");
    assert_eq!(config.push_url(), "https://cluster.example.com:8443");
    assert_eq!(config.metrics_url(), "https://cluster.example.com:8443");
}

#[test]
fn test_service_urls_use_explicit_hosts() {
    let config = Config {
        idm_url: Some("sso.example.com".to_string()),
        ups_url: Some("https://push.example.com".to_string()),
        metrics_url: Some("http://metrics.local".to_string()),
        ..create_test_config()
    };

    assert_eq!(config.identity_management_url(), "https://sso.example.com");
    // An existing scheme is not prefixed twice
    assert_eq!(config.push_url(), "https://push.example.com");
    assert_eq!(config.metrics_url(), "http://metrics.local");
}

#[test]
fn test_config_validation() {
    assert!(create_test_config().validate().is_ok());

    let no_namespace = Config {
        namespace: "  ".to_string(),
        ..create_test_config()
    };
    assert!(no_namespace.validate().is_err());

    let no_host = Config {
        cluster_host: String::new(),
        ..create_test_config()
    };
    assert!(no_host.validate().is_err());
}

#[test]
fn test_config_load_from_environment() {
    // The only test in this file that touches environment variables
    env::set_var("SERVER_ADDRESS", "127.0.0.1:9000");
    env::set_var("OPENSHIFT_HOST", "openshift.example.com");
    env::set_var("OPENSHIFT_MDC_NAMESPACE", "mobile-apps");
    env::set_var("MOBILE_SERVICES_CONFIG_FILE", "/tmp/services.json");
    env::set_var("UPS_URL", "ups.example.com");
    env::set_var("IDM_URL", "");

    let config = Config::load().unwrap();

    assert_eq!(config.server_address, "127.0.0.1:9000");
    assert_eq!(config.cluster_host, "openshift.example.com");
    assert_eq!(config.namespace, "mobile-apps");
    assert_eq!(config.services_config_file, PathBuf::from("/tmp/services.json"));
    assert_eq!(config.ups_url.as_deref(), Some("ups.example.com"));
    // An empty variable counts as unset
    assert_eq!(config.idm_url, None);
    assert_eq!(config.identity_management_url(), "https://openshift.example.com");
}

#[test]
fn test_config_clone_and_serialize() {
    let config = create_test_config();
    let cloned = config.clone();
    assert_eq!(cloned.namespace, config.namespace);

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"namespace\":\"myproject\""));
    assert!(json.contains("\"cluster_host\":\"cluster.example.com:8443\""));
}
