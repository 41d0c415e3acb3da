use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    texture::blend::premultiply_rgba8_in_place,
};

/// Message shown when the skin render cannot be loaded.
pub const SKIN_LOAD_FAILED: &str = "Could not load skin image";

/// Decoded player skin render in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct SkinImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SkinImage {
    /// Take ownership of a straight-alpha image and premultiply it.
    pub fn from_rgba_image(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);

        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }
}

/// Decode encoded image bytes (PNG) into a [`SkinImage`].
pub fn decode_skin(bytes: &[u8]) -> ShopkeeperResult<SkinImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode skin image from memory")
        .map_err(|err| {
            tracing::warn!(error = %format!("{err:#}"), len = bytes.len(), "skin decode failed");
            ShopkeeperError::image_load(SKIN_LOAD_FAILED)
        })?;
    Ok(SkinImage::from_rgba_image(dyn_img.to_rgba8()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
