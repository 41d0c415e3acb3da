//! Shopkeeper turns a Minecraft player's skin into a villager "shopkeeper"
//! texture and packages it as a resource pack.
//!
//! # Pipeline overview
//!
//! 1. **Lookup**: username -> player UUID (identity service)
//! 2. **Fetch**: UUID -> rendered skin image ([`SkinImage`])
//! 3. **Compose**: [`SkinImage`] -> 64×64 [`VillagerTexture`] via [`TextureComposer`]
//! 4. **Package** (optional): texture + `pack.mcmeta` -> zip ([`ResourcePack`])
//!
//! [`Session`] runs steps 1-3 as `generate` and step 4 as `download`, keeping
//! the last texture in an explicit [`AppState`] so downloading never repeats
//! the network round trip.
//!
//! The compositing geometry is a fixed contract with one skin renderer; see
//! [`recipe`] for the assumed input convention.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod app;
mod assets;
mod config;
mod foundation;
mod net;
mod pack;
mod texture;

pub use texture::recipe;

pub use app::session::{
    DOWNLOAD_LOADING, EMPTY_USERNAME, Frontend, GENERATE_LOADING, INVALID_USERNAME,
    NOTHING_GENERATED, Session, is_valid_username, normalize_username, notification_text,
};
pub use app::state::{AppState, Generation};
pub use assets::decode::{SKIN_LOAD_FAILED, SkinImage, decode_skin};
pub use config::ShopkeeperConfig;
pub use foundation::core::{Paint, PixelRect, Rect, Rgba8Premul};
pub use foundation::error::{ShopkeeperError, ShopkeeperResult};
pub use net::http::{HttpClient, HttpResponse, ReqwestClient};
pub use net::services::{PLAYER_NOT_FOUND, PlayerProfile, ProfileLookup, SkinRender};
pub use pack::archive::{
    PACK_META_PATH, PackInfo, PackMeta, ResourcePack, VILLAGER_TEXTURE_PATH, archive_file_name,
    build_resource_pack,
};
pub use texture::blend::{over, unpremultiply};
pub use texture::canvas::{Canvas, PixelsRef, Raster, SourceImage};
pub use texture::composer::{TextureComposer, VillagerTexture};
pub use texture::recipe::{Overlay, RegionCopy, Step, TEXTURE_SIZE};
