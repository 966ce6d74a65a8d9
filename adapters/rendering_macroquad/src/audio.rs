//! Sound playback for the macroquad backend.
//!
//! Playback needs the `audio` feature, which pulls in macroquad's native
//! audio stack. Without it the backend resolves the manifest as usual but
//! every cue is dropped.

use swamp_brawler_core::SoundCue;
use swamp_brawler_rendering::AudioBackend;
use tracing::{debug, trace};

#[cfg(feature = "audio")]
use std::{collections::HashMap, fs};

#[cfg(feature = "audio")]
use macroquad::audio::{self, PlaySoundParams, Sound};
#[cfg(feature = "audio")]
use tracing::warn;

use crate::AssetManifest;

/// Audio backend playing manifest sounds through macroquad.
pub struct MacroquadAudio {
    #[cfg(feature = "audio")]
    sounds: HashMap<SoundCue, Sound>,
    volume: f32,
}

impl MacroquadAudio {
    /// Loads every sound the manifest lists; unreadable files are skipped.
    #[cfg(feature = "audio")]
    pub async fn load(manifest: &AssetManifest, volume: f32) -> Self {
        let mut sounds = HashMap::new();
        for (cue, path) in manifest.sounds() {
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!(?cue, path = %path.display(), %error, "sound unavailable");
                    continue;
                }
            };
            match audio::load_sound_from_bytes(&bytes).await {
                Ok(sound) => {
                    let _ = sounds.insert(*cue, sound);
                }
                Err(error) => {
                    warn!(?cue, path = %path.display(), error = ?error, "sound failed to decode");
                }
            }
        }
        debug!(loaded = sounds.len(), "sound bank ready");
        Self {
            sounds,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Builds a silent bank; compiled without the `audio` feature.
    #[cfg(not(feature = "audio"))]
    pub async fn load(manifest: &AssetManifest, volume: f32) -> Self {
        debug!(
            listed = manifest.sounds().len(),
            "built without the audio feature; sound cues are dropped"
        );
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Master volume applied on top of per-cue volume.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl AudioBackend for MacroquadAudio {
    #[cfg(feature = "audio")]
    fn play(&mut self, cue: SoundCue, volume: f32) {
        let Some(sound) = self.sounds.get(&cue).copied() else {
            trace!(?cue, "no sound loaded for cue");
            return;
        };
        audio::play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: (volume * self.volume).clamp(0.0, 1.0),
            },
        );
    }

    #[cfg(not(feature = "audio"))]
    fn play(&mut self, cue: SoundCue, volume: f32) {
        trace!(?cue, volume = volume * self.volume, "audio disabled");
    }
}
