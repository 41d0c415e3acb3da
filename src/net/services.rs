use serde::Deserialize;

use crate::{
    assets::decode::{SKIN_LOAD_FAILED, SkinImage, decode_skin},
    config::ShopkeeperConfig,
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    net::http::HttpClient,
};

/// Message shown when a username does not resolve to a player.
pub const PLAYER_NOT_FOUND: &str = "Player not found! Try a different name.";

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Player profile resolved by the identity lookup service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerProfile {
    /// Undashed player UUID.
    pub id: String,
    /// Canonical spelling of the name, when the service returns one.
    pub name: Option<String>,
}

/// Username → player identifier.
#[derive(Clone, Debug)]
pub struct ProfileLookup<'a, C> {
    client: &'a C,
    api_base_url: &'a str,
}

impl<'a, C: HttpClient> ProfileLookup<'a, C> {
    /// Lookup against `config.api_base_url`.
    pub fn new(client: &'a C, config: &'a ShopkeeperConfig) -> Self {
        Self {
            client,
            api_base_url: &config.api_base_url,
        }
    }

    /// Request URL for `username`.
    pub fn url_for(&self, username: &str) -> String {
        format!("{}{}", self.api_base_url, username)
    }

    /// Resolve `username`; any failure is reported as not-found.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, username: &str) -> ShopkeeperResult<PlayerProfile> {
        let url = self.url_for(username);
        let response = self.client.get(&url).await.map_err(|err| {
            tracing::warn!(error = %err, "identity lookup request failed");
            ShopkeeperError::lookup(PLAYER_NOT_FOUND)
        })?;

        if !response.is_success() {
            tracing::info!(status = response.status, "identity lookup rejected");
            return Err(ShopkeeperError::lookup(PLAYER_NOT_FOUND));
        }

        let parsed: ProfileResponse = serde_json::from_slice(&response.body).map_err(|err| {
            tracing::warn!(error = %err, "identity lookup returned malformed json");
            ShopkeeperError::lookup(PLAYER_NOT_FOUND)
        })?;

        let id = parsed
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ShopkeeperError::lookup(PLAYER_NOT_FOUND))?;
        tracing::debug!(%id, "resolved player");

        Ok(PlayerProfile {
            id,
            name: parsed.name,
        })
    }
}

/// Player identifier → rendered skin image.
#[derive(Clone, Debug)]
pub struct SkinRender<'a, C> {
    client: &'a C,
    render_base_url: &'a str,
}

impl<'a, C: HttpClient> SkinRender<'a, C> {
    /// Renders from `config.skin_render_base_url`.
    pub fn new(client: &'a C, config: &'a ShopkeeperConfig) -> Self {
        Self {
            client,
            render_base_url: &config.skin_render_base_url,
        }
    }

    /// Render URL for `uuid`, optionally with a `?t=` cache-buster.
    pub fn skin_url(&self, uuid: &str, cache_bust: Option<u128>) -> String {
        match cache_bust {
            Some(t) => format!("{}{}?t={}", self.render_base_url, uuid, t),
            None => format!("{}{}", self.render_base_url, uuid),
        }
    }

    /// Download and decode the render at `url`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> ShopkeeperResult<SkinImage> {
        let response = self.client.get(url).await.map_err(|err| {
            tracing::warn!(error = %err, "skin request failed");
            ShopkeeperError::image_load(SKIN_LOAD_FAILED)
        })?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "skin render rejected");
            return Err(ShopkeeperError::image_load(SKIN_LOAD_FAILED));
        }

        let skin = decode_skin(&response.body)?;
        tracing::debug!(width = skin.width, height = skin.height, "decoded skin");
        Ok(skin)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/net/services.rs"]
mod tests;
