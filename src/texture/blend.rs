use crate::foundation::core::Rgba8Premul;

/// Source-over of premultiplied `src` onto premultiplied `dst`, with `src` scaled by `opacity`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: f32) -> Rgba8Premul {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src.a == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src.a), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);
    let channel = |s: u8, d: u8| {
        let sc = mul_div255(u16::from(s), op);
        let dc = mul_div255(u16::from(d), inv);
        sc.saturating_add(dc)
    };

    Rgba8Premul {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: sa.saturating_add(mul_div255(u16::from(dst.a), inv)),
    }
}

/// Convert a premultiplied pixel back to straight alpha.
pub fn unpremultiply(px: Rgba8Premul) -> [u8; 4] {
    if px.a == 0 {
        return [0, 0, 0, 0];
    }
    let a = u32::from(px.a);
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px.r), un(px.g), un(px.b), px.a]
}

/// Premultiply straight-alpha RGBA8 bytes, rounding to nearest.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/texture/blend.rs"]
mod tests;
