#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression system that paces enemy spawns, triggers boss summons and
//! decides when a wave is complete.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swamp_brawler_core::{
    config::WaveTuning, BossPattern, BossTier, Command, EnemyKind, Event, GameConfig, SpawnOrigin,
    SpawnSide,
};
use tracing::{debug, info};

/// Shape of a wave returned when it begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePlan {
    /// Regular wave spawning `quota` enemies on a cadence.
    Regular {
        /// Enemies to spawn over the wave.
        quota: u32,
    },
    /// Boss wave; the portal has been requested.
    Boss(BossTier),
}

/// Result of a completed wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveOutcome {
    /// Announce and start the given wave.
    Advance(u32),
    /// The final wave was cleared.
    Victory,
}

/// Live-entity counts the completion check reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveView {
    enemies: usize,
    boss_active: bool,
}

impl WaveView {
    /// Creates a view from the number of live enemies and boss presence.
    #[must_use]
    pub const fn new(enemies: usize, boss_active: bool) -> Self {
        Self {
            enemies,
            boss_active,
        }
    }
}

/// Spawn interval in ticks for `wave`.
#[must_use]
pub fn spawn_interval(wave: u32, waves: &WaveTuning) -> u32 {
    let reduction = wave.saturating_sub(1).saturating_mul(waves.interval_step_ticks);
    waves
        .base_interval_ticks
        .saturating_sub(reduction)
        .max(waves.min_interval_ticks)
}

/// Enemies spawned each time the cadence elapses on `wave`.
#[must_use]
pub fn burst_size(wave: u32, waves: &WaveTuning) -> u32 {
    let step = waves.burst_step.max(1);
    (1 + wave.saturating_sub(1) / step).min(waves.max_burst)
}

/// Director owning the per-wave spawn state.
#[derive(Debug)]
pub struct WaveDirector {
    wave: u32,
    quota: u32,
    cadence: u32,
    boss: Option<BossTier>,
    boss_summoned: bool,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a director whose draws derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            wave: 0,
            quota: 0,
            cadence: 0,
            boss: None,
            boss_summoned: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current wave number; zero before the first wave.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Enemies still to be spawned this wave.
    #[must_use]
    pub fn quota(&self) -> u32 {
        self.quota
    }

    /// Boss tier of the current wave, if it is a boss wave.
    #[must_use]
    pub fn boss(&self) -> Option<BossTier> {
        self.boss
    }

    /// Resets the spawn state for `wave` and requests the portal on boss waves.
    pub fn begin_wave(
        &mut self,
        wave: u32,
        config: &GameConfig,
        out: &mut Vec<Command>,
    ) -> WavePlan {
        self.wave = wave;
        self.cadence = 0;
        self.boss_summoned = false;
        self.boss = config.boss_for_wave(wave);

        match self.boss {
            Some(tier) => {
                self.quota = 0;
                info!(wave, ?tier, "boss wave begins");
                out.push(Command::OpenPortal { tier });
                WavePlan::Boss(tier)
            }
            None => {
                self.quota = wave.saturating_mul(config.waves.enemies_per_wave);
                info!(wave, quota = self.quota, "wave begins");
                WavePlan::Regular { quota: self.quota }
            }
        }
    }

    /// Consumes the tick's events and emits spawn commands.
    pub fn handle(&mut self, events: &[Event], config: &GameConfig, out: &mut Vec<Command>) {
        let mut ticks = 0_u32;
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => ticks = ticks.saturating_add(1),
                Event::BossSummoned { .. } => self.boss_summoned = true,
                Event::BossSignaled {
                    pattern: BossPattern::SpawnMinions,
                    at,
                } => {
                    debug!(count = config.waves.minion_count, "boss calls minions");
                    for _ in 0..config.waves.minion_count {
                        out.push(Command::SpawnEnemy {
                            kind: EnemyKind::Basic,
                            origin: SpawnOrigin::At(*at),
                        });
                    }
                }
                _ => {}
            }
        }

        if self.quota == 0 || ticks == 0 {
            return;
        }

        self.cadence = self.cadence.saturating_add(ticks);
        let interval = spawn_interval(self.wave, &config.waves);
        if self.cadence < interval {
            return;
        }
        self.cadence = 0;

        let burst = burst_size(self.wave, &config.waves).min(self.quota);
        for _ in 0..burst {
            let kind = self.draw_kind(config);
            let side = SpawnSide::ALL[self.rng.gen_range(0..SpawnSide::ALL.len())];
            out.push(Command::SpawnEnemy {
                kind,
                origin: SpawnOrigin::Edge(side),
            });
        }
        self.quota -= burst;
        debug!(wave = self.wave, burst, remaining = self.quota, "spawn burst");
    }

    /// Reports the wave outcome once the quota is spent and the field is clear.
    #[must_use]
    pub fn outcome(&self, view: WaveView, config: &GameConfig) -> Option<WaveOutcome> {
        if self.wave == 0 || self.quota > 0 || view.enemies > 0 || view.boss_active {
            return None;
        }
        if self.boss.is_some() && !self.boss_summoned {
            return None;
        }
        if config.is_final_wave(self.wave) {
            Some(WaveOutcome::Victory)
        } else {
            Some(WaveOutcome::Advance(self.wave + 1))
        }
    }

    fn draw_kind(&mut self, config: &GameConfig) -> EnemyKind {
        let weights = &config.waves.weights;
        let total: u32 = EnemyKind::ALL
            .iter()
            .map(|kind| weights.weight(*kind, self.wave))
            .sum();
        if total == 0 {
            return EnemyKind::Basic;
        }
        let mut roll = self.rng.gen_range(0..total);
        for kind in EnemyKind::ALL {
            let weight = weights.weight(kind, self.wave);
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        EnemyKind::Basic
    }
}
