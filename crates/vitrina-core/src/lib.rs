pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod deep_link;
pub mod handoff;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{CartItem, CartSnapshot, CartStore};
pub use catalog::{filter_products, paginate, total_pages, CatalogFilter};
pub use config::{load_app_config, load_app_config_from_env};
pub use deep_link::{normalize_phone, whatsapp_link};
pub use handoff::{
    dispatch_link, CapabilityDetector, ClientCapability, FixedCapability, HandoffMode,
    LinkOpener, UserAgentDetector,
};
pub use products::{categories_in, Category, Collection, Product, ProductPage};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Raised by a [`LinkOpener`] that could not open a new browsing context.
#[derive(Debug, Error)]
#[error("could not open a new context for {url}: {reason}")]
pub struct HandoffError {
    pub url: String,
    pub reason: String,
}
