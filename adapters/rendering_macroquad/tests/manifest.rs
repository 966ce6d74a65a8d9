use std::{fs, path::PathBuf};

use swamp_brawler_core::SoundCue;
use swamp_brawler_rendering::SpriteKey;
use swamp_brawler_rendering_macroquad::AssetManifest;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("swamp-brawler-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch directory");
    dir
}

#[test]
fn manifest_entries_resolve_relative_to_the_manifest_file() {
    let dir = scratch_dir("manifest");
    let path = dir.join("manifest.toml");
    fs::write(
        &path,
        r#"
            version = 1

            [sprites]
            Boss = "sprites/boss.png"
            Player = "sprites/player.png"

            [sounds]
            Victory = "sfx/victory.ogg"
            Punch = "sfx/punch.wav"
        "#,
    )
    .expect("manifest written");

    let manifest = AssetManifest::load(&path).expect("manifest loads");

    assert_eq!(
        manifest.sprites(),
        &[
            (SpriteKey::Player, dir.join("sprites/player.png")),
            (SpriteKey::Boss, dir.join("sprites/boss.png")),
        ]
    );
    assert_eq!(
        manifest.sounds(),
        &[
            (SoundCue::Punch, dir.join("sfx/punch.wav")),
            (SoundCue::Victory, dir.join("sfx/victory.ogg")),
        ]
    );
}

#[test]
fn unsupported_versions_are_rejected() {
    let error = AssetManifest::parse("version = 2", &PathBuf::from("assets"))
        .expect_err("version 2 is unknown");
    assert!(format!("{error}").contains("version 2"));
}

#[test]
fn missing_manifest_falls_back_to_primitives() {
    let manifest = AssetManifest::load_or_empty("definitely/not/here/manifest.toml");
    assert_eq!(manifest, AssetManifest::default());
}
