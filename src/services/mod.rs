pub mod catalog;
pub mod client_service;
pub mod store;

pub use catalog::MobileServiceCatalog;
pub use client_service::MobileClientService;
pub use store::{InMemoryClientStore, MobileClientStore};
