use crate::{
    assets::decode::SkinImage,
    foundation::core::Rgba8Premul,
    texture::canvas::{Canvas, PixelsRef, Raster, SourceImage},
    texture::recipe::{Overlay, Step, TEXTURE_SIZE, villager_steps},
};

/// The 64×64 villager texture produced by [`TextureComposer::compose`].
///
/// Pixels are premultiplied RGBA8; encoders in `assets::encode` convert to
/// straight alpha on the way out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VillagerTexture {
    raster: Raster,
}

impl VillagerTexture {
    /// Width in pixels (always [`TEXTURE_SIZE`]).
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels (always [`TEXTURE_SIZE`]).
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Premultiplied pixel at `(x, y)`, transparent outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        self.raster.pixel(x, y)
    }

    /// Premultiplied RGBA8, row-major.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.raster.as_bytes()
    }
}

/// Maps one skin to one villager texture by running a fixed list of [`Step`]s.
#[derive(Clone, Debug)]
pub struct TextureComposer {
    steps: Vec<Step>,
}

impl Default for TextureComposer {
    fn default() -> Self {
        Self::villager()
    }
}

impl TextureComposer {
    /// The shopkeeper recipe: head, nose, hat brim, head outline.
    pub fn villager() -> Self {
        Self::new(villager_steps())
    }

    /// Composer running `steps` in order.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The steps [`TextureComposer::compose`] runs.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Composite `skin` onto a blank 64×64 canvas.
    ///
    /// Never fails and never touches `skin`; source rectangles that fall outside
    /// a small input simply copy transparent pixels.
    #[tracing::instrument(skip_all, fields(skin_w = skin.width, skin_h = skin.height))]
    pub fn compose(&self, skin: &SkinImage) -> VillagerTexture {
        let mut canvas = Canvas::new(TEXTURE_SIZE, TEXTURE_SIZE);
        let src = SourceImage::from_view(PixelsRef {
            width: skin.width,
            height: skin.height,
            rgba8_premul: skin.rgba8_premul.as_slice(),
        });
        if let Err(err) = &src {
            tracing::warn!(error = %err, "skin cannot be sampled; region copies left blank");
        }

        for step in &self.steps {
            match *step {
                Step::Copy(copy) => {
                    if let Ok(src) = &src {
                        canvas.draw_region(src, copy.src, copy.dst);
                    }
                }
                Step::Overlay(Overlay::Fill { rect, paint }) => {
                    canvas.fill_rect(rect.to_rect(), paint)
                }
                Step::Overlay(Overlay::Stroke {
                    rect,
                    paint,
                    line_width,
                }) => canvas.stroke_rect(rect.to_rect(), paint, line_width),
            }
        }

        tracing::debug!(steps = self.steps.len(), "composed villager texture");
        VillagerTexture {
            raster: canvas.finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/composer.rs"]
mod tests;
