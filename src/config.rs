use serde::Deserialize;

use crate::registry::ProviderKey;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub provider_country: String,
    pub provider_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }

    pub fn provider_key(&self) -> ProviderKey {
        ProviderKey::new(&self.provider_country, &self.provider_name)
    }
}
