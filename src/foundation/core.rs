pub use kurbo::Rect;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// All channels zero.
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Premultiply a straight-alpha colour, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// From `[r, g, b, a]`, already premultiplied.
    pub fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

/// Flat drawing colour: straight RGB plus a fractional alpha, like a CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Straight red, green, blue.
    pub rgb: [u8; 3],
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl Paint {
    /// Colour from CSS-style `rgba(r, g, b, alpha)` components.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: [r, g, b],
            alpha,
        }
    }

    /// Fully opaque premultiplied colour; the fractional alpha is applied as opacity.
    pub fn opaque_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.rgb[0], self.rgb[1], self.rgb[2], 255)
    }
}

/// Integer pixel rectangle, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl PixelRect {
    /// Rectangle at `(x, y)` of size `w`×`h`.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the last column.
    pub fn right(self) -> u32 {
        self.x + self.w
    }

    /// One past the last row.
    pub fn bottom(self) -> u32 {
        self.y + self.h
    }

    /// True when it covers no pixels.
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True when pixel `(x, y)` lies inside (half-open).
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// The same area in continuous coordinates.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}
