use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::{
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    texture::blend::unpremultiply,
    texture::composer::VillagerTexture,
};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

impl VillagerTexture {
    /// Straight-alpha copy of the texture.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(unpremultiply(self.pixel(x, y)))
        })
    }

    /// PNG bytes, the form embedded in the resource pack.
    pub fn to_png(&self) -> ShopkeeperResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(self.to_rgba_image())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode villager texture as png")
            .map_err(|err| ShopkeeperError::encode(format!("{err:#}")))?;
        Ok(buf)
    }

    /// `data:image/png;base64,...`, the form used for display.
    pub fn to_data_uri(&self) -> ShopkeeperResult<String> {
        let png = self.to_png()?;
        let mut out = String::with_capacity(DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
        out.push_str(DATA_URI_PREFIX);
        base64::engine::general_purpose::STANDARD.encode_string(&png, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
