use std::{path::Path, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShopkeeperError, ShopkeeperResult};

/// Service endpoints and pack settings.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopkeeperConfig {
    /// Identity lookup endpoint; the username is appended verbatim.
    pub api_base_url: String,
    /// Skin render endpoint; the player UUID is appended verbatim.
    pub skin_render_base_url: String,
    /// Placeholder skin shown before the first generation.
    pub default_skin_url: String,
    /// `pack.pack_format` written to `pack.mcmeta`.
    pub pack_format: u32,
    /// Archive name prefix, as in `<prefix>_<username>.zip`.
    pub archive_prefix: String,
    /// Per-request timeout. `None` waits as long as the server does.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ShopkeeperConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.mojang.com/users/profiles/minecraft/".to_string(),
            skin_render_base_url: "https://visage.surgeplay.com/full/512/".to_string(),
            default_skin_url: "https://visage.surgeplay.com/bust/128/Steve".to_string(),
            pack_format: 8,
            archive_prefix: "BedwittoShopkeeper".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ShopkeeperConfig {
    /// Parse JSON and validate the result.
    pub fn from_json_str(json: &str) -> ShopkeeperResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| ShopkeeperError::validation(format!("config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> ShopkeeperResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check endpoints, archive prefix and timeout.
    pub fn validate(&self) -> ShopkeeperResult<()> {
        for (key, url) in [
            ("api_base_url", &self.api_base_url),
            ("skin_render_base_url", &self.skin_render_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ShopkeeperError::validation(format!(
                    "{key} must be an http(s) url, got '{url}'"
                )));
            }
        }
        if self.archive_prefix.trim().is_empty() {
            return Err(ShopkeeperError::validation("archive_prefix must not be empty"));
        }
        if self.archive_prefix.contains(['/', '\\']) {
            return Err(ShopkeeperError::validation(
                "archive_prefix must not contain path separators",
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ShopkeeperError::validation("request_timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Per-request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
