use std::io::Read;

use super::*;
use crate::assets::decode::SkinImage;
use crate::texture::composer::TextureComposer;

fn texture() -> VillagerTexture {
    let skin = SkinImage::from_rgba_image(image::RgbaImage::from_pixel(
        64,
        64,
        image::Rgba([0, 128, 255, 255]),
    ));
    TextureComposer::villager().compose(&skin)
}

#[test]
fn pack_meta_json_shape() {
    let json = PackMeta::for_player("Steve", 8).to_json().unwrap();
    assert_eq!(
        json,
        "{\n  \"pack\": {\n    \"pack_format\": 8,\n    \"description\": \"Steve as a shopkeeper | Made with Bedwitto Tools Inc.\"\n  }\n}"
    );
}

#[test]
fn file_name_pattern() {
    assert_eq!(
        archive_file_name("BedwittoShopkeeper", "Steve").unwrap(),
        "BedwittoShopkeeper_Steve.zip"
    );
}

#[test]
fn file_name_refuses_path_separators() {
    for (prefix, username) in [
        ("BedwittoShopkeeper", "x/../../../tmp/evil"),
        ("BedwittoShopkeeper", "..\\evil"),
        ("../packs", "Steve"),
    ] {
        let err = archive_file_name(prefix, username).unwrap_err();
        assert!(err.is_archive(), "{prefix} {username}");
    }

    let err = build_resource_pack("a/b", &texture(), &ShopkeeperConfig::default()).unwrap_err();
    assert!(err.is_archive());
}

#[test]
fn save_in_writes_inside_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let pack = build_resource_pack("Alex", &texture(), &ShopkeeperConfig::default()).unwrap();

    let path = pack.save_in(&dir.path().join("packs")).unwrap();
    assert_eq!(path, dir.path().join("packs").join("BedwittoShopkeeper_Alex.zip"));
    assert_eq!(std::fs::read(&path).unwrap(), pack.bytes);
}

#[test]
fn save_in_refuses_names_that_leave_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("packs");

    for file_name in ["../evil.zip", "sub/evil.zip", "/tmp/evil.zip", "..", ""] {
        let pack = ResourcePack {
            file_name: file_name.to_string(),
            bytes: vec![1, 2, 3],
        };
        let err = pack.save_in(&out).unwrap_err();
        assert!(err.is_archive(), "{file_name:?}");
    }
    assert!(!out.exists());
    assert!(!dir.path().join("evil.zip").exists());
}

#[test]
fn archive_holds_meta_and_texture() {
    let tex = texture();
    let pack = build_resource_pack("Alex", &tex, &ShopkeeperConfig::default()).unwrap();
    assert_eq!(pack.file_name, "BedwittoShopkeeper_Alex.zip");

    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(pack.bytes)).unwrap();
    assert_eq!(zip.len(), 2);
    assert_eq!(zip.by_index(0).unwrap().name(), PACK_META_PATH);
    assert_eq!(zip.by_index(1).unwrap().name(), VILLAGER_TEXTURE_PATH);

    let mut meta = String::new();
    zip.by_name(PACK_META_PATH)
        .unwrap()
        .read_to_string(&mut meta)
        .unwrap();
    let parsed: PackMeta = serde_json::from_str(&meta).unwrap();
    assert_eq!(parsed, PackMeta::for_player("Alex", 8));

    let mut png = Vec::new();
    zip.by_name(VILLAGER_TEXTURE_PATH)
        .unwrap()
        .read_to_end(&mut png)
        .unwrap();
    assert_eq!(png, tex.to_png().unwrap());
}

#[test]
fn pack_format_follows_config() {
    let config = ShopkeeperConfig {
        pack_format: 15,
        archive_prefix: "Shop".to_string(),
        ..ShopkeeperConfig::default()
    };
    let pack = build_resource_pack("Alex", &texture(), &config).unwrap();
    assert_eq!(pack.file_name, "Shop_Alex.zip");

    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(pack.bytes)).unwrap();
    let mut meta = String::new();
    zip.by_name(PACK_META_PATH)
        .unwrap()
        .read_to_string(&mut meta)
        .unwrap();
    assert!(meta.contains("\"pack_format\": 15"));
}
