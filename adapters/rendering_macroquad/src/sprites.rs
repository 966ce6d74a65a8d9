use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use swamp_brawler_rendering::{Color, SpriteKey};
use tracing::{debug, warn};

use crate::to_macroquad_color;

/// Parameters describing how a sprite should be drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DrawParams {
    /// Top-left corner in screen-space pixels.
    pub(crate) position: Vec2,
    /// Destination size in screen-space pixels.
    pub(crate) size: Vec2,
    /// Mirror the texture horizontally.
    pub(crate) flip_x: bool,
    /// Tint applied to the sprite.
    pub(crate) tint: Color,
}

impl DrawParams {
    pub(crate) fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            flip_x: false,
            tint: Color::WHITE,
        }
    }

    pub(crate) fn with_flip_x(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub(crate) fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// Cache of textures loaded from the asset manifest.
#[derive(Debug, Default)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads every sprite the manifest lists; unreadable files are skipped.
    pub(crate) fn from_manifest_entries<'a>(
        entries: impl IntoIterator<Item = &'a (SpriteKey, std::path::PathBuf)>,
    ) -> Self {
        Self::from_entries(entries, &mut default_loader)
    }

    /// Draws `key` if it is loaded and reports whether anything was drawn.
    pub(crate) fn draw(&self, key: SpriteKey, params: DrawParams) -> bool {
        let Some(texture) = self.textures.get(&key).copied() else {
            return false;
        };
        if params.size.x <= f32::EPSILON || params.size.y <= f32::EPSILON {
            return false;
        }

        let draw_params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(params.size.x, params.size.y)),
            flip_x: params.flip_x,
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(
            texture,
            params.position.x,
            params.position.y,
            to_macroquad_color(params.tint),
            draw_params,
        );
        true
    }

    /// Returns whether the atlas contains the provided key.
    pub(crate) fn contains(&self, key: SpriteKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Returns the number of textures stored in the atlas.
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a (SpriteKey, std::path::PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Self {
        let mut textures = HashMap::new();
        for (key, path) in entries {
            match loader(*key, path) {
                Ok(texture) => {
                    let _ = textures.insert(*key, texture);
                }
                Err(error) => {
                    warn!(
                        sprite = key.manifest_name(),
                        error = %format!("{error:#}"),
                        "sprite unavailable; drawing its primitive stand-in"
                    );
                }
            }
        }
        debug!(loaded = textures.len(), "sprite atlas ready");
        Self { textures }
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}
