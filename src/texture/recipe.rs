//! Fixed compositing geometry for the villager texture.
//!
//! # Assumed skin convention
//!
//! Every source rectangle below is a constant tuned to the layout of the
//! Visage `full/512` render (a 512×512 front-facing full-body projection).
//! Nothing derives these offsets from the input image: a different renderer,
//! projection or resolution still composes "successfully" but copies the wrong
//! pixels, with no error signal. Treat the constants as a contract with the
//! render service, not as a general rule.

use crate::foundation::core::{Paint, PixelRect, Rect};

/// Width and height of every villager texture.
pub const TEXTURE_SIZE: u16 = 64;

/// Smallest skin extent `(width, height)` for which every source rectangle is in-bounds.
pub const MIN_SKIN_EXTENT: (u32, u32) = (28, 32);

/// Face: 8×8 at (8,8), doubled onto 16×16 at (16,16).
pub const HEAD_COPY: RegionCopy = RegionCopy {
    src: PixelRect::new(8, 8, 8, 8),
    dst: PixelRect::new(16, 16, 16, 16),
};

/// Nose: 8×12 at (20,20), copied 1:1 to (20,32).
pub const NOSE_COPY: RegionCopy = RegionCopy {
    src: PixelRect::new(20, 20, 8, 12),
    dst: PixelRect::new(20, 32, 8, 12),
};

/// Hat brim: black at 20% over the top half of the head.
pub const HAT_BRIM: Overlay = Overlay::Fill {
    rect: PixelRect::new(16, 16, 16, 8),
    paint: Paint::rgba(0, 0, 0, 0.2),
};

/// Head outline: 1px black stroke at 50% around the head.
pub const HEAD_OUTLINE: Overlay = Overlay::Stroke {
    rect: PixelRect::new(16, 16, 16, 16),
    paint: Paint::rgba(0, 0, 0, 0.5),
    line_width: 1.0,
};

/// Copy (and resample) one rectangle of the skin onto the texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionCopy {
    /// Area read from the skin.
    pub src: PixelRect,
    /// Area written on the texture.
    pub dst: PixelRect,
}

impl RegionCopy {
    /// True when source and destination sizes differ.
    pub fn is_scaled(&self) -> bool {
        self.src.w != self.dst.w || self.src.h != self.dst.h
    }
}

/// Flat decoration drawn over already-composited content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    /// Solid fill of `rect`.
    Fill {
        /// Area to fill.
        rect: PixelRect,
        /// Fill colour.
        paint: Paint,
    },
    /// Border of `rect`, centred on its edge.
    Stroke {
        /// Outlined area.
        rect: PixelRect,
        /// Stroke colour.
        paint: Paint,
        /// Stroke width; half of it falls outside `rect`.
        line_width: f64,
    },
}

impl Overlay {
    /// Area the overlay can touch.
    pub fn bounds(&self) -> Rect {
        match *self {
            Overlay::Fill { rect, .. } => rect.to_rect(),
            Overlay::Stroke {
                rect, line_width, ..
            } => {
                let half = line_width / 2.0;
                rect.to_rect().inflate(half, half)
            }
        }
    }
}

/// One compositing step; order matters because later steps draw over earlier ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Copy part of the skin.
    Copy(RegionCopy),
    /// Draw a flat decoration.
    Overlay(Overlay),
}

/// Head, nose, hat brim, head outline.
pub fn villager_steps() -> Vec<Step> {
    vec![
        Step::Copy(HEAD_COPY),
        Step::Copy(NOSE_COPY),
        Step::Overlay(HAT_BRIM),
        Step::Overlay(HEAD_OUTLINE),
    ]
}
