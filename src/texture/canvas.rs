use std::sync::Arc;

use crate::{
    foundation::core::{Paint, PixelRect, Rect, Rgba8Premul},
    foundation::error::{ShopkeeperError, ShopkeeperResult},
};

/// Read-only view over a premultiplied RGBA8 buffer.
#[derive(Clone, Copy, Debug)]
pub struct PixelsRef<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major, tightly packed premultiplied RGBA8.
    pub rgba8_premul: &'a [u8],
}

impl PixelsRef<'_> {
    /// Pixel at `(x, y)`, or transparent outside the buffer.
    pub fn sample(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width || y >= self.height {
            return Rgba8Premul::transparent();
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        match self.rgba8_premul.get(i..i + 4) {
            Some(px) => Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]),
            None => Rgba8Premul::transparent(),
        }
    }
}

/// Finished surface: a `vello_cpu` pixmap in premultiplied RGBA8.
#[derive(Clone)]
pub struct Raster {
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.pixmap.width() == other.pixmap.width()
            && self.pixmap.height() == other.pixmap.height()
            && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Raster {}

impl Raster {
    /// Blank, fully transparent surface.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    /// Wrap already premultiplied bytes; the length must match the size.
    pub fn from_premul(width: u32, height: u32, data: &[u8]) -> ShopkeeperResult<Self> {
        Ok(Self {
            pixmap: pixmap_from_premul_bytes(data, width, height)?,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Premultiplied RGBA8, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Borrow the pixels for sampling.
    pub fn view(&self) -> PixelsRef<'_> {
        PixelsRef {
            width: self.width(),
            height: self.height(),
            rgba8_premul: self.as_bytes(),
        }
    }

    /// Pixel at `(x, y)`, transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        self.view().sample(x, y)
    }
}

/// Recording surface over a `vello_cpu::RenderContext`.
///
/// Drawing follows 2D canvas conventions: primitives composite source-over in
/// call order, geometry outside the surface is clipped, and fractional edges
/// are anti-aliased. Nothing is rasterized until [`Canvas::finish`].
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Canvas {
    /// Empty canvas; an unpainted canvas finishes fully transparent.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        }
    }

    /// Copy `src_rect` of `src` onto `dst_rect`, resampling nearest-neighbour.
    ///
    /// Source pixels outside `src` read as transparent.
    pub fn draw_region(&mut self, src: &SourceImage, src_rect: PixelRect, dst_rect: PixelRect) {
        if src_rect.is_empty() || dst_rect.is_empty() {
            return;
        }
        let bounds = Rect::new(0.0, 0.0, src.width, src.height);
        let visible = src_rect.to_rect().intersect(bounds);
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return;
        }

        let sx = f64::from(dst_rect.w) / f64::from(src_rect.w);
        let sy = f64::from(dst_rect.h) / f64::from(src_rect.h);
        let map = vello_cpu::kurbo::Affine::translate((
            f64::from(dst_rect.x) - f64::from(src_rect.x) * sx,
            f64::from(dst_rect.y) - f64::from(src_rect.y) * sy,
        )) * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy);

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(map);
        self.ctx.set_paint(src.paint.clone());
        self.ctx.fill_rect(&rect_to_cpu(visible));
    }

    /// Fill `rect` with `paint`.
    pub fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_to_cpu(paint));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Stroke the border of `rect`; the stroke straddles the geometric edge.
    pub fn stroke_rect(&mut self, rect: Rect, paint: Paint, line_width: f64) {
        if line_width <= 0.0 {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_to_cpu(paint));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    /// Rasterize everything recorded so far.
    pub fn finish(mut self) -> Raster {
        let mut raster = Raster::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut raster.pixmap);
        raster
    }
}

/// A premultiplied image prepared as a nearest-neighbour `vello_cpu` paint.
#[derive(Clone)]
pub struct SourceImage {
    paint: vello_cpu::Image,
    width: f64,
    height: f64,
}

impl SourceImage {
    /// Prepare `view` for drawing; fails when a side exceeds `u16`.
    pub fn from_view(view: PixelsRef<'_>) -> ShopkeeperResult<Self> {
        let pixmap = pixmap_from_premul_bytes(view.rgba8_premul, view.width, view.height)?;
        let sampler = vello_cpu::peniko::ImageSampler {
            quality: vello_cpu::peniko::ImageQuality::Low,
            ..vello_cpu::peniko::ImageSampler::default()
        };
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler,
            },
            width: f64::from(view.width),
            height: f64::from(view.height),
        })
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn paint_to_cpu(paint: Paint) -> vello_cpu::peniko::Color {
    let [r, g, b] = paint.rgb;
    vello_cpu::peniko::Color::from_rgba8(r, g, b, 255).with_alpha(paint.alpha.clamp(0.0, 1.0))
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ShopkeeperResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ShopkeeperError::validation("raster width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ShopkeeperError::validation("raster height exceeds u16"))?;
    let expected = (width as usize) * (height as usize) * 4;
    if rgba8_premul.len() != expected {
        return Err(ShopkeeperError::validation(format!(
            "raster expects {expected} bytes for {width}x{height}, got {}",
            rgba8_premul.len()
        )));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/texture/canvas.rs"]
mod tests;
