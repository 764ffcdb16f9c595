use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::orange::OrangeFranceProvider;
use crate::provider::ProviderInterface;

/// Case-sensitive `(country, name)` pair selecting a provider variant.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
pub struct ProviderKey {
    pub country: String,
    pub name: String,
}

impl ProviderKey {
    pub fn new(country: &str, name: &str) -> Self {
        Self {
            country: country.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.country, self.name)
    }
}

/// Resolves the configured provider once, at startup, and hands out the
/// single shared instance afterwards. An unknown key is reported here,
/// not deep inside a later call chain.
pub struct ProviderRegistry {
    provider: Option<Arc<dyn ProviderInterface>>,
}

impl ProviderRegistry {
    pub fn resolve(key: &ProviderKey) -> Self {
        let provider: Option<Arc<dyn ProviderInterface>> =
            match (key.country.as_str(), key.name.as_str()) {
                ("France", "Orange") => Some(Arc::new(OrangeFranceProvider::new())),
                _ => None,
            };

        if provider.is_none() {
            error!(%key, "cannot instantiate provider");
        }

        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::resolve(&config.provider_key())
    }

    /// The resolved provider, or `None` when the configured key has no
    /// registered implementation. Repeated calls return clones of the
    /// same instance.
    pub fn provider(&self) -> Option<Arc<dyn ProviderInterface>> {
        self.provider.clone()
    }
}
