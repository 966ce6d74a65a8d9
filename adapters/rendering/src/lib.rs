#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering and audio contracts for Swamp Brawler adapters.
//!
//! The simulation never touches pixels or speakers. Adapters receive a
//! [`Scene`] per frame: an ordered list of [`DrawCommand`]s plus the sound
//! cues raised since the previous frame.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use swamp_brawler_core::{SoundCue, TickInput};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Sprites an adapter may resolve from its asset manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Full-screen swamp backdrop.
    Background,
    /// Player character.
    Player,
    /// Summoned mount.
    Mount,
    /// Baseline walker.
    EnemyBasic,
    /// Quick walker.
    EnemyFast,
    /// Projectile-firing walker.
    EnemyGunner,
    /// Boss of any tier, scaled per tier.
    Boss,
}

impl SpriteKey {
    /// Every key, in manifest resolution order.
    pub const ALL: [SpriteKey; 7] = [
        Self::Background,
        Self::Player,
        Self::Mount,
        Self::EnemyBasic,
        Self::EnemyFast,
        Self::EnemyGunner,
        Self::Boss,
    ];

    /// Name used for the key in asset manifests.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Player => "Player",
            Self::Mount => "Mount",
            Self::EnemyBasic => "EnemyBasic",
            Self::EnemyFast => "EnemyFast",
            Self::EnemyGunner => "EnemyGunner",
            Self::Boss => "Boss",
        }
    }
}

/// Horizontal anchor applied to text commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// `position` is the left end of the baseline.
    Left,
    /// `position` is the middle of the baseline.
    Centre,
}

/// Single primitive the backend draws, in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Textured quad; backends draw `fallback` as a rectangle when the sprite is missing.
    Sprite {
        /// Sprite to draw.
        key: SpriteKey,
        /// Top-left corner in screen pixels.
        position: Vec2,
        /// Destination size in screen pixels.
        size: Vec2,
        /// Mirror horizontally.
        flip_x: bool,
        /// Multiplicative tint.
        tint: Color,
        /// Color of the primitive stand-in.
        fallback: Color,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Top-left corner in screen pixels.
        position: Vec2,
        /// Width and height in screen pixels.
        size: Vec2,
        /// Fill color.
        color: Color,
        /// Outline thickness; `None` fills the rectangle.
        outline: Option<f32>,
    },
    /// Filled circle.
    Circle {
        /// Centre in screen pixels.
        centre: Vec2,
        /// Radius in screen pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Single line of text.
    Text {
        /// Text to draw.
        text: String,
        /// Baseline anchor point in screen pixels.
        position: Vec2,
        /// Font size in pixels.
        size: f32,
        /// Text color.
        color: Color,
        /// Horizontal anchor.
        anchor: TextAnchor,
    },
}

/// Everything the backend presents for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Draw commands in painter's order.
    pub commands: Vec<DrawCommand>,
    /// Sound cues raised since the previous frame.
    pub sounds: Vec<SoundCue>,
    /// Set once the session wants the window closed.
    pub exit_requested: bool,
}

impl Scene {
    /// Removes every command and sound, keeping allocations.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.sounds.clear();
    }

    /// Appends a sprite with a primitive fallback.
    pub fn sprite(&mut self, key: SpriteKey, position: Vec2, size: Vec2, flip_x: bool, fallback: Color) {
        self.commands.push(DrawCommand::Sprite {
            key,
            position,
            size,
            flip_x,
            tint: Color::WHITE,
            fallback,
        });
    }

    /// Appends a filled rectangle.
    pub fn rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            position,
            size,
            color,
            outline: None,
        });
    }

    /// Appends a rectangle outline.
    pub fn outline(&mut self, position: Vec2, size: Vec2, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            position,
            size,
            color,
            outline: Some(thickness),
        });
    }

    /// Appends a filled circle.
    pub fn circle(&mut self, centre: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            centre,
            radius,
            color,
        });
    }

    /// Appends a line of text.
    pub fn text(&mut self, text: impl Into<String>, position: Vec2, size: f32, color: Color, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            size,
            color,
            anchor,
        });
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Logical playfield size; the window is created at this size.
    pub size: Vec2,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        size: Vec2,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(RenderingError::InvalidSize {
                width: size.x,
                height: size.y,
            });
        }
        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            size,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Swamp Brawler scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the measured frame delta
    /// and the controls sampled for the frame, advances the session and
    /// rebuilds the scene before it is rendered. It returns the time spent
    /// simulating so backends can report a frame breakdown.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, TickInput, &mut Scene) -> Duration + 'static;
}

/// Sink for named sound effects.
pub trait AudioBackend {
    /// Plays `cue` once at `volume` in `0.0..=1.0`; unknown cues are ignored.
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Audio backend that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The playfield must have a positive area.
    InvalidSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "presentation size must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
