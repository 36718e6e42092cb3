//! Storefront configuration.

use std::path::PathBuf;

use anyhow::Context;

use gyuto_catalog::Catalog;
use gyuto_checkout::CheckoutConfig;
use gyuto_observability::LogFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON product file replacing the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    pub const CATALOG_PATH_VAR: &'static str = "GYUTO_CATALOG_PATH";
    pub const LOG_FORMAT_VAR: &'static str = "GYUTO_LOG_FORMAT";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup(Self::CATALOG_PATH_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_format: lookup(Self::LOG_FORMAT_VAR)
                .map(|v| LogFormat::from_name(&v))
                .unwrap_or_default(),
            checkout: CheckoutConfig::from_lookup(&lookup),
        }
    }

    /// Load the configured catalog file, or the bundled one.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog file {path:?}")),
            None => Catalog::builtin().context("bundled catalog is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_catalog() {
        let config = StorefrontConfig::from_lookup(|_| None);
        assert_eq!(config, StorefrontConfig::default());
        let catalog = config.load_catalog().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn reads_all_variables() {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "GYUTO_CATALOG_PATH" => Some("/tmp/knives.json".to_string()),
            "GYUTO_LOG_FORMAT" => Some("pretty".to_string()),
            "STRIPE_PK" => Some("pk_test".to_string()),
            "STRIPE_PRICE_ID_DEFAULT" => Some("price_1".to_string()),
            _ => None,
        });
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/knives.json")));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.checkout.stripe_configured());
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = StorefrontConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here/products.json")),
            ..StorefrontConfig::default()
        };
        let err = config.load_catalog().unwrap_err();
        assert!(err.to_string().contains("failed to load catalog file"));
        assert!(matches!(
            err.downcast_ref::<gyuto_core::DomainError>(),
            Some(gyuto_core::DomainError::NotFound(_))
        ));
    }
}
