#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-level session driver for Swamp Brawler.
//!
//! [`Simulation`] owns the world and the pure systems, runs the screen state
//! machine once per tick and records the events and sound cues each tick
//! produced. [`run`] is the cooperative scheduler hosts plug into.

mod scheduler;
mod victory;

use glam::Vec2;
use swamp_brawler_core::{
    AttackKind, Command, Event, GameConfig, ScreenState, SoundCue, TickInput,
};
use swamp_brawler_system_combat::{ActionIntents, Combat, CombatViews};
use swamp_brawler_system_wave_director::{WaveDirector, WaveOutcome, WavePlan, WaveView};
use swamp_brawler_world::{self as world, query, World};
use tracing::{debug, info};

pub use scheduler::{run, FrameHost, FrameStepper, FrameTicks, InputLatch, RunSummary, TickPacer};
pub use victory::{VictorySequence, VictoryStage};

const DIRECTOR_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl ScreenRect {
    /// Reports whether `point` lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let end = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < end.x && point.y < end.y
    }
}

/// On-screen pause button anchored to the top-right corner of the playfield.
#[must_use]
pub fn pause_button(playfield: Vec2) -> ScreenRect {
    ScreenRect {
        origin: Vec2::new(playfield.x - 50.0, 10.0),
        size: Vec2::splat(40.0),
    }
}

/// Maps world events onto the sound cues they trigger.
#[must_use]
pub fn sound_for(event: &Event) -> Option<SoundCue> {
    match event {
        Event::AttackStarted {
            kind: AttackKind::Punch,
        } => Some(SoundCue::Punch),
        Event::AttackStarted {
            kind: AttackKind::Kick,
        } => Some(SoundCue::Kick),
        Event::CloudReleased => Some(SoundCue::Cloud),
        Event::TargetStruck { .. } => Some(SoundCue::Hit),
        Event::PlayerDamaged { .. } => Some(SoundCue::Hurt),
        Event::EnemyDefeated { .. } => Some(SoundCue::EnemyDefeated),
        Event::BossSignaled { .. } | Event::BossSummoned { .. } => Some(SoundCue::BossRoar),
        Event::BossDefeated { .. } => Some(SoundCue::BossDefeated),
        Event::PickupCollected { .. } => Some(SoundCue::Pickup),
        Event::MountSummoned => Some(SoundCue::MountSummon),
        _ => None,
    }
}

/// Session driver owning the world, the systems and the screen state.
#[derive(Debug)]
pub struct Simulation {
    config: GameConfig,
    seed: u64,
    sessions: u64,
    world: World,
    combat: Combat,
    director: WaveDirector,
    screen: ScreenState,
    wave: u32,
    announcement: u32,
    victory: Option<VictorySequence>,
    commands: Vec<Command>,
    events: Vec<Event>,
    sounds: Vec<SoundCue>,
}

impl Simulation {
    /// Creates a simulation showing the title screen.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let world = World::new(&config, seed);
        Self {
            world,
            combat: Combat::new(),
            director: WaveDirector::new(seed ^ DIRECTOR_STREAM),
            config,
            seed,
            sessions: 0,
            screen: ScreenState::Title,
            wave: 1,
            announcement: 0,
            victory: None,
            commands: Vec::new(),
            events: Vec::new(),
            sounds: Vec::new(),
        }
    }

    /// Configuration the session runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Screen currently shown.
    #[must_use]
    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    /// Current wave number.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Score of the current session.
    #[must_use]
    pub fn score(&self) -> u64 {
        query::score(&self.world)
    }

    /// Ticks the wave announcement has been shown.
    #[must_use]
    pub fn announcement_ticks(&self) -> u32 {
        self.announcement
    }

    /// Victory sequence, once the final boss fell.
    #[must_use]
    pub fn victory(&self) -> Option<&VictorySequence> {
        self.victory.as_ref()
    }

    /// Rectangle of the pause button.
    #[must_use]
    pub fn pause_button(&self) -> ScreenRect {
        pause_button(query::playfield(&self.world))
    }

    /// Events raised during the last tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Sound cues raised during the last tick, without duplicates.
    #[must_use]
    pub fn sounds(&self) -> &[SoundCue] {
        &self.sounds
    }

    /// Leaves the title screen and announces `wave` directly.
    pub fn start_at_wave(&mut self, wave: u32) {
        if self.screen == ScreenState::Title {
            self.announce(wave.max(1));
        }
    }

    /// Advances the session by one fixed tick.
    pub fn tick(&mut self, input: TickInput) {
        self.events.clear();
        self.sounds.clear();

        match self.screen {
            ScreenState::Title => {
                if input.confirm {
                    self.announce(1);
                }
            }
            ScreenState::WaveAnnouncement => self.advance_announcement(),
            ScreenState::BossIntro => self.advance_intro(),
            ScreenState::Playing => {
                if self.pause_requested(&input) {
                    self.transition(ScreenState::Paused);
                } else {
                    self.play(&input);
                }
            }
            ScreenState::Paused => {
                if self.pause_requested(&input) {
                    self.transition(ScreenState::Playing);
                }
            }
            ScreenState::GameOver => {
                if input.confirm {
                    self.restart();
                }
            }
            ScreenState::Victory => self.advance_victory(&input),
        }

        for event in &self.events {
            if let Some(cue) = sound_for(event) {
                if !self.sounds.contains(&cue) {
                    self.sounds.push(cue);
                }
            }
        }
    }

    fn pause_requested(&self, input: &TickInput) -> bool {
        let clicked = input.click
            && input
                .pointer
                .is_some_and(|pointer| self.pause_button().contains(pointer));
        input.pause || clicked
    }

    fn transition(&mut self, next: ScreenState) {
        if self.screen != next {
            info!(from = ?self.screen, to = ?next, wave = self.wave, "screen transition");
            self.screen = next;
        }
    }

    fn cue(&mut self, cue: SoundCue) {
        if !self.sounds.contains(&cue) {
            self.sounds.push(cue);
        }
    }

    fn announce(&mut self, wave: u32) {
        self.wave = wave;
        self.announcement = 0;
        self.transition(ScreenState::WaveAnnouncement);
        self.cue(SoundCue::WaveStart);
    }

    fn advance_announcement(&mut self) {
        self.announcement = self.announcement.saturating_add(1);
        if self.announcement < self.config.waves.announcement_ticks {
            return;
        }

        self.commands.clear();
        let plan = self
            .director
            .begin_wave(self.wave, &self.config, &mut self.commands);
        self.apply_commands();
        match plan {
            WavePlan::Boss(_) => self.transition(ScreenState::BossIntro),
            WavePlan::Regular { .. } => self.transition(ScreenState::Playing),
        }
    }

    fn advance_intro(&mut self) {
        world::apply(&mut self.world, Command::AdvancePortal, &mut self.events);
        self.commands.clear();
        self.director
            .handle(&self.events, &self.config, &mut self.commands);
        self.apply_commands();

        let closed = self
            .events
            .iter()
            .any(|event| matches!(event, Event::PortalClosed));
        if closed || query::portal(&self.world).is_none() {
            self.transition(ScreenState::Playing);
        }
    }

    fn play(&mut self, input: &TickInput) {
        world::apply(
            &mut self.world,
            Command::Tick {
                movement: input.movement,
            },
            &mut self.events,
        );

        self.commands.clear();
        let views = CombatViews::capture(&self.world);
        self.combat.handle(
            &self.config,
            ActionIntents::from(input),
            &views,
            &mut self.commands,
        );
        self.apply_commands();

        self.commands.clear();
        self.director
            .handle(&self.events, &self.config, &mut self.commands);
        self.apply_commands();

        if self.player_fell() {
            self.transition(ScreenState::GameOver);
            self.cue(SoundCue::GameOver);
            info!(wave = self.wave, score = self.score(), "player defeated");
            return;
        }

        let view = WaveView::new(
            query::enemy_count(&self.world),
            query::boss_active(&self.world),
        );
        match self.director.outcome(view, &self.config) {
            Some(WaveOutcome::Advance(next)) => {
                info!(wave = self.wave, next, "wave cleared");
                self.announce(next);
            }
            Some(WaveOutcome::Victory) => {
                info!(score = self.score(), "campaign won");
                self.victory = Some(VictorySequence::new(query::player(&self.world).position));
                self.transition(ScreenState::Victory);
                self.cue(SoundCue::Victory);
            }
            None => {}
        }
    }

    fn advance_victory(&mut self, input: &TickInput) {
        let Some(sequence) = self.victory.as_mut() else {
            return;
        };
        if sequence.stage() == VictoryStage::Finale {
            if input.confirm {
                self.restart();
            }
            return;
        }
        if let Some(position) = sequence.advance(&self.config.victory) {
            world::apply(
                &mut self.world,
                Command::PlacePlayer { position },
                &mut self.events,
            );
        }
    }

    /// True once the player's health reached zero this tick, even if a later
    /// command healed them.
    fn player_fell(&self) -> bool {
        query::player(&self.world).health == 0
            || self
                .events
                .iter()
                .any(|event| matches!(event, Event::PlayerDamaged { remaining: 0, .. }))
    }

    fn apply_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn restart(&mut self) {
        self.sessions = self.sessions.wrapping_add(1);
        let seed = self.seed.wrapping_add(self.sessions);
        debug!(seed, session = self.sessions, "restarting session");
        self.world = World::new(&self.config, seed);
        self.combat = Combat::new();
        self.director = WaveDirector::new(seed ^ DIRECTOR_STREAM);
        self.victory = None;
        self.announce(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swamp_brawler_core::{EnemyId, EnemyKind, SpawnOrigin, StrikeSource, TargetId};

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..TickInput::default()
        }
    }

    fn playing(config: GameConfig) -> Simulation {
        let mut simulation = Simulation::new(config, 3);
        simulation.tick(confirm());
        for _ in 0..500 {
            if simulation.screen() == ScreenState::Playing {
                break;
            }
            simulation.tick(TickInput::default());
        }
        assert_eq!(simulation.screen(), ScreenState::Playing);
        simulation
    }

    fn spawn(simulation: &mut Simulation, kind: EnemyKind, position: Vec2) -> EnemyId {
        let mut events = Vec::new();
        world::apply(
            &mut simulation.world,
            Command::SpawnEnemy {
                kind,
                origin: SpawnOrigin::At(position),
            },
            &mut events,
        );
        events
            .iter()
            .find_map(|event| match event {
                Event::EnemySpawned { enemy, .. } => Some(*enemy),
                _ => None,
            })
            .expect("enemy spawned")
    }

    fn escape_left(simulation: &mut Simulation) -> EnemyId {
        spawn(simulation, EnemyKind::Basic, Vec2::new(-500.0, 300.0))
    }

    #[test]
    fn title_waits_for_confirm() {
        let mut simulation = Simulation::new(GameConfig::default(), 1);
        simulation.tick(TickInput::default());
        assert_eq!(simulation.screen(), ScreenState::Title);

        simulation.tick(confirm());
        assert_eq!(simulation.screen(), ScreenState::WaveAnnouncement);
        assert_eq!(simulation.wave(), 1);
        assert_eq!(simulation.sounds(), &[SoundCue::WaveStart]);
    }

    #[test]
    fn announcement_lasts_its_configured_ticks() {
        let mut simulation = Simulation::new(GameConfig::default(), 1);
        simulation.tick(confirm());

        for _ in 1..simulation.config().waves.announcement_ticks {
            simulation.tick(TickInput::default());
            assert_eq!(simulation.screen(), ScreenState::WaveAnnouncement);
        }
        simulation.tick(TickInput::default());
        assert_eq!(simulation.screen(), ScreenState::Playing);
    }

    #[test]
    fn escapes_drain_health_until_the_session_ends() {
        let mut config = GameConfig::default();
        config.combat.escape_penalty = 20;
        let mut simulation = playing(config);
        assert_eq!(query::player(simulation.world()).health, 100);

        let _ = escape_left(&mut simulation);
        simulation.tick(TickInput::default());
        assert_eq!(query::player(simulation.world()).health, 80);
        assert_eq!(simulation.screen(), ScreenState::Playing);

        for _ in 0..4 {
            let _ = escape_left(&mut simulation);
        }
        simulation.tick(TickInput::default());
        assert_eq!(query::player(simulation.world()).health, 0);
        assert_eq!(simulation.screen(), ScreenState::GameOver);
        assert!(simulation.sounds().contains(&SoundCue::GameOver));
    }

    #[test]
    fn pickup_in_the_lethal_tick_does_not_save_the_player() {
        let mut config = GameConfig::default();
        config.player.max_health = 20;
        config.combat.escape_penalty = 20;
        config.pickups.drop_chance = 1.0;
        config.pickups.collect_radius = 10_000.0;
        let mut simulation = playing(config);

        let centre = query::player(simulation.world()).centre;
        let size = simulation.config().enemy(EnemyKind::Basic).size;
        let dropper = spawn(&mut simulation, EnemyKind::Basic, centre - size * 0.5);
        let mut events = Vec::new();
        world::apply(
            &mut simulation.world,
            Command::Strike {
                target: TargetId::Enemy(dropper),
                source: StrikeSource::Kick,
                damage: 10_000,
                impulse: Vec2::ZERO,
            },
            &mut events,
        );
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PickupDropped { .. })));
        let _ = escape_left(&mut simulation);

        simulation.tick(TickInput::default());

        assert!(simulation.events().contains(&Event::PlayerDamaged {
            amount: 20,
            remaining: 0
        }));
        assert_eq!(simulation.screen(), ScreenState::GameOver);
        assert_eq!(query::player(simulation.world()).health, 0);
    }

    #[test]
    fn pause_button_sits_in_the_top_right_corner() {
        let button = pause_button(Vec2::new(800.0, 600.0));
        assert!(button.contains(Vec2::new(770.0, 30.0)));
        assert!(!button.contains(Vec2::new(740.0, 30.0)));
        assert!(!button.contains(Vec2::new(770.0, 55.0)));
    }

    #[test]
    fn event_sounds() {
        assert_eq!(
            sound_for(&Event::AttackStarted {
                kind: AttackKind::Kick
            }),
            Some(SoundCue::Kick)
        );
        assert_eq!(sound_for(&Event::PortalClosed), None);
    }
}
