#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Swamp Brawler.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Enable this crate's `audio` feature to play the
//! sound cues listed in the asset manifest.
//!
//! Scenes are authored in playfield pixels. The backend letterboxes the
//! playfield into the window and maps the pointer back into playfield space
//! so the simulation never sees window coordinates.

mod audio;
mod manifest;
mod sprites;

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    time::{Duration, Instant},
};
use swamp_brawler_core::TickInput;
use swamp_brawler_rendering::{
    AudioBackend, DrawCommand, Presentation, RenderingBackend, Scene, SilentAudio, SpriteKey,
    TextAnchor,
};
use tracing::{debug, info};

pub use self::audio::MacroquadAudio;
pub use self::manifest::{sound_name, AssetManifest};

use self::sprites::{DrawParams, SpriteAtlas};

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    manifest_path: PathBuf,
    volume: f32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            manifest_path: AssetManifest::default_path(),
            volume: 0.8,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Overrides the asset manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Sets the master volume in `0.0..=1.0`.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

/// Time spent in each stage of a frame.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames.max(1),
            avg_render: self.render_accum / frames.max(1),
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

/// Letterbox transform from playfield pixels to window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn fit(playfield: Vec2, screen: Vec2) -> Self {
        if playfield.x <= f32::EPSILON || playfield.y <= f32::EPSILON {
            return Self {
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }
        let scale = (screen.x / playfield.x).min(screen.y / playfield.y).max(0.0);
        let offset = ((screen - playfield * scale) * 0.5).max(Vec2::ZERO);
        Self { scale, offset }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    fn to_playfield(&self, point: Vec2) -> Option<Vec2> {
        (self.scale > f32::EPSILON).then(|| (point - self.offset) / self.scale)
    }
}

/// Raw device state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct InputObservation {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    punch: bool,
    kick: bool,
    cloud: bool,
    mount: bool,
    confirm: bool,
    pause: bool,
    click: bool,
    cursor: Vec2,
    quit: bool,
}

impl InputObservation {
    fn poll() -> Self {
        let (cursor_x, cursor_y) = mouse_position();
        Self {
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            punch: is_key_down(KeyCode::Q),
            kick: is_key_down(KeyCode::R),
            cloud: is_key_down(KeyCode::E),
            mount: is_key_down(KeyCode::Space),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space),
            pause: is_key_pressed(KeyCode::P),
            click: is_mouse_button_pressed(MouseButton::Left),
            cursor: Vec2::new(cursor_x, cursor_y),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }

    fn to_tick_input(self, metrics: &SceneMetrics) -> TickInput {
        let axis = |negative: bool, positive: bool| {
            f32::from(u8::from(positive)) - f32::from(u8::from(negative))
        };
        TickInput {
            movement: Vec2::new(axis(self.left, self.right), axis(self.up, self.down)),
            punch: self.punch,
            kick: self.kick,
            cloud: self.cloud,
            summon_mount: self.mount,
            confirm: self.confirm,
            pause: self.pause,
            pointer: metrics.to_playfield(self.cursor),
            click: self.click,
        }
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, TickInput, &mut Scene) -> Duration + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            manifest_path,
            volume,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            size,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: size.x.round() as i32,
            window_height: size.y.round() as i32,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let manifest = AssetManifest::load_or_empty(&manifest_path);
            let sprite_atlas = if load_sprites {
                let atlas = SpriteAtlas::from_manifest_entries(manifest.sprites());
                debug!(
                    sprites = atlas.len(),
                    background = atlas.contains(SpriteKey::Background),
                    "sprite loading enabled"
                );
                Some(atlas)
            } else {
                None
            };
            let mut audio: Box<dyn AudioBackend> = if is_muted(volume) {
                debug!("volume is zero; sound bank skipped");
                Box::new(SilentAudio)
            } else {
                Box::new(MacroquadAudio::load(&manifest, volume).await)
            };

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let observation = InputObservation::poll();
                if observation.quit {
                    break;
                }

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let metrics = SceneMetrics::fit(size, screen);
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let input = observation.to_tick_input(&metrics);
                let simulation = update_scene(frame_dt, input, &mut scene);
                if scene.exit_requested {
                    break;
                }

                let render_start = Instant::now();
                macroquad::window::clear_background(macroquad::color::BLACK);
                let field_origin = metrics.to_screen(Vec2::ZERO);
                let field_size = size * metrics.scale;
                macroquad::shapes::draw_rectangle(
                    field_origin.x,
                    field_origin.y,
                    field_size.x,
                    field_size.y,
                    background,
                );
                draw_scene(&scene, &metrics, sprite_atlas.as_ref());
                for cue in &scene.sounds {
                    audio.play(*cue, 1.0);
                }
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            fps = per_second,
                            fps_10s = trailing_ten_seconds,
                            sim_ms = avg_simulation.as_secs_f64() * 1_000.0,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics, sprite_atlas: Option<&SpriteAtlas>) {
    for command in &scene.commands {
        match command {
            DrawCommand::Sprite {
                key,
                position,
                size,
                flip_x,
                tint,
                fallback,
            } => {
                let origin = metrics.to_screen(*position);
                let scaled = *size * metrics.scale;
                let drawn = sprite_atlas.is_some_and(|atlas| {
                    atlas.draw(
                        *key,
                        DrawParams::new(origin, scaled)
                            .with_flip_x(*flip_x)
                            .with_tint(*tint),
                    )
                });
                if !drawn {
                    macroquad::shapes::draw_rectangle(
                        origin.x,
                        origin.y,
                        scaled.x,
                        scaled.y,
                        to_macroquad_color(*fallback),
                    );
                }
            }
            DrawCommand::Rect {
                position,
                size,
                color,
                outline,
            } => {
                let origin = metrics.to_screen(*position);
                let scaled = *size * metrics.scale;
                let color = to_macroquad_color(*color);
                match outline {
                    Some(thickness) => macroquad::shapes::draw_rectangle_lines(
                        origin.x,
                        origin.y,
                        scaled.x,
                        scaled.y,
                        thickness * metrics.scale,
                        color,
                    ),
                    None => macroquad::shapes::draw_rectangle(
                        origin.x, origin.y, scaled.x, scaled.y, color,
                    ),
                }
            }
            DrawCommand::Circle {
                centre,
                radius,
                color,
            } => {
                let centre = metrics.to_screen(*centre);
                macroquad::shapes::draw_circle(
                    centre.x,
                    centre.y,
                    radius * metrics.scale,
                    to_macroquad_color(*color),
                );
            }
            DrawCommand::Text {
                text,
                position,
                size,
                color,
                anchor,
            } => {
                let font_size = (size * metrics.scale).max(1.0);
                let baseline = metrics.to_screen(*position);
                let width = match anchor {
                    TextAnchor::Left => 0.0,
                    TextAnchor::Centre => {
                        let font = font_size.round() as u16;
                        macroquad::text::measure_text(text, None, font, 1.0).width
                    }
                };
                let x = anchored_x(baseline.x, width, *anchor);
                let _dimensions = macroquad::text::draw_text(
                    text,
                    x,
                    baseline.y,
                    font_size,
                    to_macroquad_color(*color),
                );
            }
        }
    }
}

fn is_muted(volume: f32) -> bool {
    volume.is_nan() || volume <= 0.0
}

fn anchored_x(x: f32, width: f32, anchor: TextAnchor) -> f32 {
    match anchor {
        TextAnchor::Left => x,
        TextAnchor::Centre => x - width * 0.5,
    }
}

fn to_macroquad_color(color: swamp_brawler_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() <= 1e-4,
            "expected {expected:?}, received {actual:?}"
        );
    }

    #[test]
    fn scene_metrics_letterbox_wide_windows() {
        let metrics = SceneMetrics::fit(Vec2::new(800.0, 600.0), Vec2::new(1600.0, 900.0));
        assert!((metrics.scale - 1.5).abs() <= 1e-6);
        assert_vec2_close(metrics.offset, Vec2::new(200.0, 0.0));
        assert_vec2_close(metrics.to_screen(Vec2::new(800.0, 600.0)), Vec2::new(1400.0, 900.0));
    }

    #[test]
    fn scene_metrics_tolerate_degenerate_playfields() {
        let metrics = SceneMetrics::fit(Vec2::ZERO, Vec2::new(640.0, 480.0));
        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset, Vec2::ZERO);
    }

    #[test]
    fn pointer_is_mapped_into_playfield_space() {
        let metrics = SceneMetrics::fit(Vec2::new(800.0, 600.0), Vec2::new(1600.0, 900.0));
        let observation = InputObservation {
            cursor: Vec2::new(1400.0, 15.0),
            click: true,
            ..InputObservation::default()
        };

        let input = observation.to_tick_input(&metrics);
        assert!(input.click);
        assert_vec2_close(input.pointer.expect("pointer mapped"), Vec2::new(800.0, 10.0));
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let metrics = SceneMetrics::fit(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0));
        let observation = InputObservation {
            left: true,
            right: true,
            down: true,
            punch: true,
            mount: true,
            ..InputObservation::default()
        };

        let input = observation.to_tick_input(&metrics);
        assert_eq!(input.movement, Vec2::new(0.0, 1.0));
        assert!(input.punch && input.summon_mount);
        assert!(!input.kick && !input.confirm);
    }

    #[test]
    fn centred_text_shifts_by_half_its_width() {
        assert_eq!(anchored_x(100.0, 40.0, TextAnchor::Centre), 80.0);
        assert_eq!(anchored_x(100.0, 40.0, TextAnchor::Left), 100.0);
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            simulation: Duration::from_millis(2),
            ..FrameBreakdown::default()
        };
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());

        let metrics = counter
            .record_frame(frame(250))
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert!(counter.record_frame(frame(250)).is_none());
    }

    #[test]
    fn fps_counter_tracks_trailing_ten_second_average() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        for _ in 0..10 {
            for sample in 0..5 {
                let metrics = counter.record_frame(frame(200));
                if sample == 4 {
                    let metrics = metrics.expect("should report every second");
                    assert!((metrics.per_second - 5.0).abs() <= 1e-3);
                    assert!((metrics.trailing_ten_seconds - 5.0).abs() <= 1e-3);
                } else {
                    assert!(metrics.is_none());
                }
            }
        }

        for sample in 0..10 {
            let metrics = counter.record_frame(frame(100));
            if sample == 9 {
                let metrics = metrics.expect("should report every second");
                assert!((metrics.per_second - 10.0).abs() <= 1e-3);
                assert!((metrics.trailing_ten_seconds - 5.5).abs() <= 1e-3);
            } else {
                assert!(metrics.is_none());
            }
        }
    }

    #[test]
    fn zero_volume_mutes_audio() {
        assert!(is_muted(0.0));
        assert!(is_muted(MacroquadBackend::new().with_volume(-1.0).volume));
        assert!(!is_muted(MacroquadBackend::new().volume));
    }
}
