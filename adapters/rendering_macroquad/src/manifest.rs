use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use swamp_brawler_core::SoundCue;
use swamp_brawler_rendering::SpriteKey;
use tracing::warn;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Asset files resolved from a manifest, keyed by what they depict or voice.
///
/// Every entry is optional: the renderer draws primitives for missing
/// sprites and stays silent for missing sounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetManifest {
    sprites: Vec<(SpriteKey, PathBuf)>,
    sounds: Vec<(SoundCue, PathBuf)>,
}

impl AssetManifest {
    /// Returns the default manifest path relative to the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!("failed to read asset manifest at {}", manifest_path.display())
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::parse(&contents, &base)
    }

    /// Loads the manifest at `path`, falling back to an empty one when it cannot be used.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|error| {
            warn!(error = %format!("{error:#}"), "asset manifest unavailable; drawing primitives only");
            Self::default()
        })
    }

    /// Parses manifest `contents`, resolving file paths against `base_path`.
    pub fn parse(contents: &str, base_path: &Path) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse asset manifest toml contents")?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported asset manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_MANIFEST_VERSION
            );
        }

        let sprites = resolve(
            manifest.sprites,
            base_path,
            &SpriteKey::ALL,
            |key| key.manifest_name(),
            "sprite",
        )?;
        let sounds = resolve(
            manifest.sounds,
            base_path,
            &SoundCue::ALL,
            sound_name,
            "sound",
        )?;
        Ok(Self { sprites, sounds })
    }

    /// Sprite files in canonical key order.
    #[must_use]
    pub fn sprites(&self) -> &[(SpriteKey, PathBuf)] {
        &self.sprites
    }

    /// Sound files in canonical cue order.
    #[must_use]
    pub fn sounds(&self) -> &[(SoundCue, PathBuf)] {
        &self.sounds
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default)]
    sprites: HashMap<String, String>,
    #[serde(default)]
    sounds: HashMap<String, String>,
}

fn resolve<K: Copy>(
    entries: HashMap<String, String>,
    base_path: &Path,
    known: &[K],
    name_of: impl Fn(K) -> &'static str,
    section: &str,
) -> Result<Vec<(K, PathBuf)>> {
    let mut by_name = entries;
    let mut ordered = Vec::new();
    for &key in known {
        if let Some(relative_path) = by_name.remove(name_of(key)) {
            ordered.push((key, base_path.join(relative_path)));
        }
    }

    if !by_name.is_empty() {
        let mut unexpected = by_name.into_keys().collect::<Vec<_>>();
        unexpected.sort_unstable();
        bail!(
            "asset manifest contains unknown {section} keys: {}",
            unexpected.join(", ")
        );
    }
    Ok(ordered)
}

/// Name used for `cue` in asset manifests.
#[must_use]
pub fn sound_name(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Punch => "Punch",
        SoundCue::Kick => "Kick",
        SoundCue::Cloud => "Cloud",
        SoundCue::Hit => "Hit",
        SoundCue::Hurt => "Hurt",
        SoundCue::EnemyDefeated => "EnemyDefeated",
        SoundCue::BossRoar => "BossRoar",
        SoundCue::BossDefeated => "BossDefeated",
        SoundCue::Pickup => "Pickup",
        SoundCue::MountSummon => "MountSummon",
        SoundCue::WaveStart => "WaveStart",
        SoundCue::GameOver => "GameOver",
        SoundCue::Victory => "Victory",
    }
}
