use base64::Engine as _;

use super::*;
use crate::assets::decode::{SkinImage, decode_skin};
use crate::texture::composer::TextureComposer;

fn red_texture() -> VillagerTexture {
    let skin = SkinImage::from_rgba_image(image::RgbaImage::from_pixel(
        64,
        64,
        image::Rgba([255, 0, 0, 255]),
    ));
    TextureComposer::villager().compose(&skin)
}

#[test]
fn png_decodes_back_to_64_square() {
    let png = red_texture().to_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.get_pixel(24, 28).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn straight_alpha_outline_is_black() {
    let img = red_texture().to_rgba_image();
    let outside = img.get_pixel(15, 28).0;
    assert_eq!(&outside[..3], &[0, 0, 0]);
    assert!(outside[3] > 0 && outside[3] < 255);
}

#[test]
fn data_uri_carries_the_png() {
    let tex = red_texture();
    let uri = tex.to_data_uri().unwrap();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let png = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(png, tex.to_png().unwrap());

    let reloaded = decode_skin(&png).unwrap();
    assert_eq!((reloaded.width, reloaded.height), (64, 64));
}
