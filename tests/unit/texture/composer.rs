use super::*;
use crate::foundation::core::PixelRect;
use crate::texture::recipe::{HEAD_COPY, NOSE_COPY};

fn gradient_skin(width: u32, height: u32) -> SkinImage {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7) as u8, (y * 5) as u8, (x ^ y) as u8, 255])
    });
    SkinImage::from_rgba_image(img)
}

fn solid_skin(width: u32, height: u32, rgba: [u8; 4]) -> SkinImage {
    SkinImage::from_rgba_image(image::RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
}

fn skin_px(skin: &SkinImage, x: u32, y: u32) -> Rgba8Premul {
    PixelsRef {
        width: skin.width,
        height: skin.height,
        rgba8_premul: &skin.rgba8_premul,
    }
    .sample(x, y)
}

fn copies_only() -> TextureComposer {
    TextureComposer::new(vec![Step::Copy(HEAD_COPY), Step::Copy(NOSE_COPY)])
}

#[test]
fn compose_is_deterministic() {
    let skin = gradient_skin(512, 512);
    let composer = TextureComposer::villager();
    let a = composer.compose(&skin);
    let b = composer.compose(&skin);
    assert_eq!(a, b);
    assert!(a.rgba8_premul().iter().any(|&v| v != 0));
}

#[test]
fn output_is_always_64_square() {
    let composer = TextureComposer::default();
    for (w, h) in [(512, 512), (64, 64), (28, 32), (128, 64)] {
        let tex = composer.compose(&gradient_skin(w, h));
        assert_eq!((tex.width(), tex.height()), (64, 64));
        assert_eq!(tex.rgba8_premul().len(), 64 * 64 * 4);
    }
}

#[test]
fn undersized_skin_leaves_blank_copies_instead_of_failing() {
    let skin = solid_skin(4, 4, [255, 0, 0, 255]);
    let tex = copies_only().compose(&skin);
    assert_eq!(tex.width(), 64);
    assert!(tex.rgba8_premul().iter().all(|&v| v == 0));
}

#[test]
fn head_corners_trace_back_to_source_corners() {
    let skin = gradient_skin(64, 64);
    let tex = copies_only().compose(&skin);

    let corners = [((16, 16), (8, 8)), ((31, 16), (15, 8)), ((16, 31), (8, 15)), ((31, 31), (15, 15))];
    for ((dx, dy), (sx, sy)) in corners {
        assert_eq!(tex.pixel(dx, dy), skin_px(&skin, sx, sy), "dst ({dx},{dy})");
    }
}

#[test]
fn head_is_a_2x_upscale() {
    let skin = gradient_skin(64, 64);
    let tex = copies_only().compose(&skin);
    for y in 16..32 {
        for x in 16..32 {
            assert_eq!(tex.pixel(x, y), skin_px(&skin, 8 + (x - 16) / 2, 8 + (y - 16) / 2));
        }
    }
}

#[test]
fn nose_is_a_1to1_copy() {
    let skin = gradient_skin(64, 64);
    let tex = copies_only().compose(&skin);
    for y in 32..44 {
        for x in 20..28 {
            assert_eq!(tex.pixel(x, y), skin_px(&skin, x, y - 12));
        }
    }

    // The outline's lower band touches row 32; everything below is untouched.
    let full = TextureComposer::villager().compose(&skin);
    for y in 33..44 {
        for x in 20..28 {
            assert_eq!(full.pixel(x, y), skin_px(&skin, x, y - 12));
        }
    }
}

#[test]
fn hat_brim_darkens_without_going_black() {
    let skin = gradient_skin(64, 64);
    let plain = copies_only().compose(&skin);
    let full = TextureComposer::villager().compose(&skin);

    // Skip the outline band on the brim's edges.
    for y in 17..24 {
        for x in 17..31 {
            let before = plain.pixel(x, y);
            let after = full.pixel(x, y);
            assert_eq!(after.a, 255);
            assert!(after.r <= before.r && after.g <= before.g && after.b <= before.b);
            if before.r > 10 {
                assert!(after.r < before.r && after.r > 0, "({x},{y})");
            }
        }
    }
}

#[test]
fn outline_is_distinguishable_from_interior() {
    let skin = solid_skin(64, 64, [255, 0, 0, 255]);
    let tex = TextureComposer::villager().compose(&skin);

    let interior = tex.pixel(20, 28);
    assert_eq!(interior, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));

    for (x, y) in [(16, 28), (31, 28), (20, 31)] {
        let edge = tex.pixel(x, y);
        assert_eq!(edge.a, 255);
        assert!(edge.r < interior.r && edge.r > 0, "({x},{y}) = {edge:?}");
    }

    // Outside half of the stroke: partial black on transparent.
    let outside = tex.pixel(15, 28);
    assert_eq!((outside.r, outside.g, outside.b), (0, 0, 0));
    assert!(outside.a > 0 && outside.a < 255);
}

#[test]
fn solid_red_end_to_end() {
    let skin = solid_skin(64, 64, [255, 0, 0, 255]);
    let tex = TextureComposer::villager().compose(&skin);
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);

    // Scaled head below the brim and the nose are pure red.
    assert_eq!(tex.pixel(24, 28), red);
    assert_eq!(tex.pixel(24, 40), red);

    // Brim is darker red, still opaque.
    let brim = tex.pixel(24, 20);
    assert_eq!((brim.g, brim.b, brim.a), (0, 0, 255));
    assert!(brim.r < 255 && brim.r > 0);

    // Nothing outside head + outline + nose.
    let head_and_outline = PixelRect::new(15, 15, 18, 18);
    let nose = PixelRect::new(20, 32, 8, 12);
    for y in 0..64 {
        for x in 0..64 {
            if head_and_outline.contains(x, y) || nose.contains(x, y) {
                continue;
            }
            assert_eq!(tex.pixel(x, y).a, 0, "({x},{y}) should be transparent");
        }
    }
}

#[test]
fn compose_does_not_mutate_the_skin() {
    let skin = gradient_skin(64, 64);
    let before = skin.rgba8_premul.as_ref().clone();
    let _ = TextureComposer::villager().compose(&skin);
    assert_eq!(*skin.rgba8_premul, before);
}
