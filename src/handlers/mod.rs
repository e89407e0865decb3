pub mod health_handler;
pub mod metrics_handler;
pub mod mobile_client_handler;
pub mod mobile_service_handler;
