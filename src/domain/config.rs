use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{PaciError, PaciResult};
use crate::model::{AutoscaleRule, CreateVe, Firewall};

/// Pacicli configuration
///
/// Field aliases accept the capitalized keys of existing Pacifiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service endpoint, e.g. `https://api.example.com/paci/v1.0`
    #[serde(alias = "BaseURL")]
    pub base_url: String,
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
    /// Request templates keyed by server name
    #[serde(alias = "Servers")]
    pub servers: HashMap<String, ServerSetting>,
}

/// Per-server request templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSetting {
    #[serde(alias = "Spec")]
    pub spec: Option<CreateVe>,
    #[serde(alias = "Firewall")]
    pub firewall: Option<Firewall>,
    #[serde(alias = "AutoscaleRule")]
    pub autoscale_rule: Vec<AutoscaleRule>,
}

impl Config {
    /// Credentials and endpoint must all be present before any request is made.
    pub fn validate(&self) -> PaciResult<()> {
        let missing: Vec<&str> = [
            ("base_url", &self.base_url),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PaciError::Config {
                message: format!(
                    "{} must be specified in the config file",
                    missing.join(", ")
                ),
            })
        }
    }

    pub fn server(&self, name: &str) -> Option<&ServerSetting> {
        self.servers.get(name)
    }
}
