//! Asset lookup with placeholder fallback.
//!
//! Drawables are embedded from `assets/` at compile time. A drawable that is missing
//! (or that later fails to decode) is replaced by a solid-colour placeholder of the
//! requested size, so a missing file never stops the game.

use std::borrow::Cow;

use glam::UVec2;
use phf::phf_map;
use rust_embed::RustEmbed;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use tracing::{debug, warn};

use crate::error::AssetError;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct EmbeddedAssets;

/// Logical asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Asset {
    Pacman,
    GhostRed,
    GhostOrange,
    Font,
}

/// Where an asset lives and what stands in for it when it cannot be loaded.
#[derive(Debug)]
pub struct AssetInfo {
    pub file: &'static str,
    pub placeholder: (u8, u8, u8),
}

static ASSETS: phf::Map<&'static str, AssetInfo> = phf_map! {
    "pacman" => AssetInfo { file: "pacman.png", placeholder: (255, 255, 0) },
    "ghost_red" => AssetInfo { file: "ghost_red.png", placeholder: (255, 0, 0) },
    "ghost_orange" => AssetInfo { file: "ghost_orange.png", placeholder: (255, 128, 0) },
    "font" => AssetInfo { file: "font.ttf", placeholder: (255, 255, 255) },
};

/// What the renderer should build a drawable from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawableSource {
    /// Encoded image bytes, to be scaled to `size`.
    Image { bytes: Cow<'static, [u8]>, size: UVec2 },
    /// A solid rectangle standing in for a missing image.
    Placeholder { color: (u8, u8, u8), size: UVec2 },
}

impl DrawableSource {
    pub fn size(&self) -> UVec2 {
        match self {
            DrawableSource::Image { size, .. } | DrawableSource::Placeholder { size, .. } => *size,
        }
    }
}

impl Asset {
    /// Looks an asset up by its logical name, e.g. `"ghost_red"`.
    pub fn from_name(name: &str) -> Option<Asset> {
        name.parse().ok()
    }

    pub fn info(self) -> Result<&'static AssetInfo, AssetError> {
        ASSETS
            .get(self.as_ref())
            .ok_or_else(|| AssetError::NotFound(self.as_ref().to_string()))
    }

    /// The colour used when this asset is unavailable.
    pub fn placeholder_color(self) -> (u8, u8, u8) {
        self.info().map(|info| info.placeholder).unwrap_or((255, 0, 255))
    }

    /// Returns the embedded bytes for this asset.
    pub fn get_bytes(self) -> Result<Cow<'static, [u8]>, AssetError> {
        let info = self.info()?;
        EmbeddedAssets::get(info.file)
            .map(|file| file.data)
            .ok_or_else(|| AssetError::NotFound(info.file.to_string()))
    }

    /// Resolves a drawable of the given size, substituting a placeholder when the
    /// image cannot be found.
    pub fn resolve(self, size: UVec2) -> DrawableSource {
        match self.get_bytes() {
            Ok(bytes) => {
                debug!(asset = self.as_ref(), len = bytes.len(), "Loaded asset");
                DrawableSource::Image { bytes, size }
            }
            Err(e) => {
                warn!(asset = self.as_ref(), error = %e, "Using placeholder for missing asset");
                self.placeholder(size)
            }
        }
    }

    /// A placeholder of the given size in this asset's fallback colour.
    pub fn placeholder(self, size: UVec2) -> DrawableSource {
        DrawableSource::Placeholder {
            color: self.placeholder_color(),
            size,
        }
    }
}
