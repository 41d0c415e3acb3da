use std::{
    io::{Cursor, Write},
    path::{Component, Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    config::ShopkeeperConfig,
    foundation::error::{ShopkeeperError, ShopkeeperResult},
    texture::composer::VillagerTexture,
};

/// Archive path of the pack metadata.
pub const PACK_META_PATH: &str = "pack.mcmeta";

/// Archive path that overrides the vanilla villager texture.
pub const VILLAGER_TEXTURE_PATH: &str = "assets/minecraft/textures/entity/villager/villager.png";

/// `pack.mcmeta` contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMeta {
    /// The single `pack` object.
    pub pack: PackInfo,
}

/// The `pack` object of `pack.mcmeta`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackInfo {
    /// Game-version compatibility number.
    pub pack_format: u32,
    /// Text shown in the in-game pack list.
    pub description: String,
}

impl PackMeta {
    /// Metadata naming `username` in the description.
    pub fn for_player(username: &str, pack_format: u32) -> Self {
        Self {
            pack: PackInfo {
                pack_format,
                description: format!("{username} as a shopkeeper | Made with Bedwitto Tools Inc."),
            },
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> ShopkeeperResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ShopkeeperError::archive(format!("serialize pack.mcmeta: {err}")))
    }
}

/// A finished resource pack ready to be saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePack {
    /// Suggested download name, a plain file name.
    pub file_name: String,
    /// Zip archive bytes.
    pub bytes: Vec<u8>,
}

impl ResourcePack {
    /// Write the archive into `dir` under its own file name.
    ///
    /// Refuses a `file_name` that is anything but one plain path component.
    pub fn save_in(&self, dir: &Path) -> ShopkeeperResult<PathBuf> {
        let mut parts = Path::new(&self.file_name).components();
        if !matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None)) {
            return Err(ShopkeeperError::archive(format!(
                "'{}' is not a plain file name",
                self.file_name
            )));
        }

        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        Ok(path)
    }
}

/// `<prefix>_<username>.zip`; either part containing a path separator is refused.
pub fn archive_file_name(prefix: &str, username: &str) -> ShopkeeperResult<String> {
    for (what, part) in [("prefix", prefix), ("username", username)] {
        if part.contains(['/', '\\', '\0']) {
            return Err(ShopkeeperError::archive(format!(
                "archive {what} '{part}' contains a path separator"
            )));
        }
    }
    Ok(format!("{prefix}_{username}.zip"))
}

/// Assemble `pack.mcmeta` and the villager texture into a deflated zip.
#[tracing::instrument(skip(texture, config))]
pub fn build_resource_pack(
    username: &str,
    texture: &VillagerTexture,
    config: &ShopkeeperConfig,
) -> ShopkeeperResult<ResourcePack> {
    let file_name = archive_file_name(&config.archive_prefix, username)?;
    let meta = PackMeta::for_player(username, config.pack_format).to_json()?;
    let png = texture
        .to_png()
        .map_err(|err| ShopkeeperError::archive(err.to_string()))?;

    let bytes = write_zip(&[(PACK_META_PATH, meta.as_bytes()), (VILLAGER_TEXTURE_PATH, &png)])
        .map_err(|err| ShopkeeperError::archive(format!("{err:#}")))?;
    tracing::debug!(len = bytes.len(), "assembled resource pack");

    Ok(ResourcePack {
        file_name,
        bytes,
    })
}

fn write_zip(entries: &[(&str, &[u8])]) -> anyhow::Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, data) in entries {
        zip.start_file(*path, options)
            .with_context(|| format!("start zip entry '{path}'"))?;
        zip.write_all(data)
            .with_context(|| format!("write zip entry '{path}'"))?;
    }

    let cursor = zip.finish().context("finish zip archive")?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/pack/archive.rs"]
mod tests;
