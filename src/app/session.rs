use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    app::state::{AppState, Generation},
    config::ShopkeeperConfig,
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    net::http::HttpClient,
    net::services::{ProfileLookup, SkinRender},
    pack::archive::{ResourcePack, build_resource_pack},
    texture::composer::{TextureComposer, VillagerTexture},
};

/// Loading message while a texture is generated.
pub const GENERATE_LOADING: &str = "Working our magic...";
/// Loading message while the resource pack is assembled.
pub const DOWNLOAD_LOADING: &str = "Creating your resource pack...";
/// Shown when the username input is blank.
pub const EMPTY_USERNAME: &str = "Please enter a username!";
/// Shown when the input is not a Minecraft username.
pub const INVALID_USERNAME: &str = "Usernames are 3-16 letters, digits or underscores.";
/// Shown when download is requested before any successful generate.
pub const NOTHING_GENERATED: &str = "Please generate a skin first!";

/// Text of the single blocking notification shown for a failure.
pub fn notification_text(message: &str) -> String {
    format!("Oops! {message}")
}

/// Trim the raw input, apply the `bedwitto` alias and check the name rules.
///
/// The error carries the message for the user's notification.
pub fn normalize_username(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EMPTY_USERNAME);
    }
    if name.eq_ignore_ascii_case("bedwitto") {
        return Ok("TheRealBedwitto".to_string());
    }
    if !is_valid_username(name) {
        return Err(INVALID_USERNAME);
    }
    Ok(name.to_string())
}

/// Minecraft account names: 3 to 16 ASCII letters, digits or `_`.
pub fn is_valid_username(name: &str) -> bool {
    (3..=16).contains(&name.len())
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// The user-facing side of the flows.
pub trait Frontend {
    /// Show the busy indicator with `message`.
    fn show_loading(&mut self, message: &str);
    /// Hide the busy indicator.
    fn hide_loading(&mut self);
    /// Blocking notification; called at most once per failed invocation.
    fn show_error(&mut self, message: &str);
    /// Display a freshly composed texture.
    fn show_preview(&mut self, texture: &VillagerTexture);
    /// Hand the finished archive to the user.
    fn deliver(&mut self, pack: &ResourcePack) -> ShopkeeperResult<()>;

    /// The skin render URL about to be fetched.
    fn show_skin(&mut self, _url: &str) {}
    /// A generation is stored and can be downloaded.
    fn offer_download(&mut self, _generation: &Generation) {}
    /// Any earlier download offer is stale.
    fn withdraw_download(&mut self) {}
}

/// Generate and download flows over one HTTP client and one frontend.
///
/// `&mut self` on both flows means a new invocation cannot start while one is
/// in flight.
pub struct Session<C, F> {
    http: C,
    frontend: F,
    config: ShopkeeperConfig,
    composer: TextureComposer,
    state: AppState,
    busy: bool,
}

impl<C: HttpClient, F: Frontend> Session<C, F> {
    /// Idle session with no generation yet.
    pub fn new(http: C, frontend: F, config: ShopkeeperConfig) -> Self {
        Self {
            http,
            frontend,
            config,
            composer: TextureComposer::villager(),
            state: AppState::default(),
            busy: false,
        }
    }

    /// Settings the flows run with.
    pub fn config(&self) -> &ShopkeeperConfig {
        &self.config
    }

    /// Last successful generation, if any.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// True while a flow is between its loading and idle notifications.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Borrow the frontend.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Consume the session and return the frontend.
    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Look up `raw_username`, fetch the render, compose and show the texture.
    ///
    /// On failure the frontend gets exactly one notification, the previous
    /// generation is kept, and the error is returned for the caller's exit status.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&mut self, raw_username: &str) -> ShopkeeperResult<()> {
        let username = match normalize_username(raw_username) {
            Ok(name) => name,
            Err(reason) => {
                tracing::debug!(reason, "username rejected");
                self.frontend.show_error(&notification_text(reason));
                return Err(ShopkeeperError::validation(reason));
            }
        };

        self.begin(GENERATE_LOADING);
        self.frontend.withdraw_download();

        let outcome = self.run_generate(username).await;
        let result = match outcome {
            Ok(generation) => {
                tracing::info!(username = %generation.username, uuid = %generation.uuid, "generated");
                let generation = self.state.set_generation(generation);
                self.frontend.offer_download(generation);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "generate failed");
                self.frontend.show_error(&notification_text(&err.to_string()));
                Err(err)
            }
        };

        self.end();
        result
    }

    async fn run_generate(&mut self, username: String) -> ShopkeeperResult<Generation> {
        let profile = ProfileLookup::new(&self.http, &self.config)
            .lookup(&username)
            .await?;

        let render = SkinRender::new(&self.http, &self.config);
        let skin_url = render.skin_url(&profile.id, cache_buster());
        self.frontend.show_skin(&skin_url);

        let skin = render.fetch(&skin_url).await?;
        let texture = Arc::new(self.composer.compose(&skin));
        self.frontend.show_preview(&texture);

        Ok(Generation {
            uuid: profile.id,
            username,
            skin_url,
            texture,
        })
    }

    /// Package the last generated texture and deliver it.
    #[tracing::instrument(skip(self))]
    pub async fn download(&mut self) -> ShopkeeperResult<()> {
        let Some(generation) = self.state.generation().cloned() else {
            self.frontend.show_error(&notification_text(NOTHING_GENERATED));
            return Err(ShopkeeperError::validation(NOTHING_GENERATED));
        };

        self.begin(DOWNLOAD_LOADING);

        let result = build_resource_pack(&generation.username, &generation.texture, &self.config)
            .and_then(|pack| {
                self.frontend.deliver(&pack)?;
                tracing::info!(file = %pack.file_name, len = pack.bytes.len(), "delivered pack");
                Ok(())
            });

        if let Err(err) = &result {
            tracing::warn!(error = %err, "download failed");
            self.frontend.show_error(&notification_text(&format!(
                "Failed to create resource pack: {err}"
            )));
        }

        self.end();
        result
    }

    fn begin(&mut self, message: &str) {
        self.busy = true;
        self.frontend.show_loading(message);
    }

    fn end(&mut self) {
        self.frontend.hide_loading();
        self.busy = false;
    }
}

fn cache_buster() -> Option<u128> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis())
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
