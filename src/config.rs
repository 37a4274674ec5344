//! Storefront Configuration
//!
//! Stored as JSON next to the application data. Every field has a default,
//! so a partial or missing file is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CategoryId, DomainError, DomainResult, LanguageCode, ProductEntry, DEFAULT_LANGUAGE};
use crate::orders::ORDER_PREVIEW_TAKE;
use crate::sync::DEFAULT_STATUS_RESET;
use crate::tree::{product_page, PRODUCTS_PER_PAGE};

pub const ENV_SHOP_API: &str = "STOREFRONT_SHOP_API";
pub const ENV_ADMIN_API: &str = "STOREFRONT_ADMIN_API";
pub const ENV_LANGUAGE: &str = "STOREFRONT_LANGUAGE";
pub const ENV_LOG: &str = "STOREFRONT_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shop_api_url: String,
    pub admin_api_url: String,
    pub default_language: LanguageCode,
    pub order_preview_take: u32,
    pub status_reset_ms: u64,
    pub products_per_page: usize,
    pub log_filter: String,
    pub log_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shop_api_url: "http://localhost:3000/shop-api".to_string(),
            admin_api_url: "http://localhost:3000/admin-api".to_string(),
            default_language: LanguageCode::new(DEFAULT_LANGUAGE),
            order_preview_take: ORDER_PREVIEW_TAKE,
            status_reset_ms: DEFAULT_STATUS_RESET.as_millis() as u64,
            products_per_page: PRODUCTS_PER_PAGE,
            log_filter: "info".to_string(),
            log_capacity: 500,
        }
    }
}

impl Config {
    /// Read the config file, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Internal(format!("reading {}: {}", path.display(), e)))?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.default_language = LanguageCode::new(config.default_language.as_str());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DomainResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| DomainError::Internal(format!("writing {}: {}", path.display(), e)))
    }

    /// Override fields from `STOREFRONT_*` environment variables
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_SHOP_API) {
            self.shop_api_url = url;
        }
        if let Some(url) = lookup(ENV_ADMIN_API) {
            self.admin_api_url = url;
        }
        if let Some(language) = lookup(ENV_LANGUAGE) {
            self.default_language = LanguageCode::new(&language);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }

    pub fn status_reset(&self) -> Duration {
        Duration::from_millis(self.status_reset_ms)
    }

    /// One page of a category listing, `products_per_page` long
    pub fn product_page<'a>(
        &self,
        products: &'a [ProductEntry],
        category: CategoryId,
        page: usize,
    ) -> Vec<&'a ProductEntry> {
        product_page(products, category, page, self.products_per_page)
    }
}
