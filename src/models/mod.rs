// Models module for the mobile client service
// Request payloads, the mobile client resource and the service catalog types

pub mod app;
pub mod client;
pub mod config_value;
pub mod mobile_service;
pub mod response;

pub use app::*;
pub use client::*;
pub use config_value::*;
pub use mobile_service::*;
pub use response::*;
