use std::time::Duration;

use glam::Vec2;
use swamp_brawler_core::{Event, GameConfig, ScreenState, SoundCue, TickInput};
use swamp_brawler_simulation::{run, FrameHost, Simulation};

/// Input for tick `index` of a fixed script that walks, attacks and clouds.
fn scripted(index: u64) -> TickInput {
    let phase = (index / 90) % 4;
    let movement = match phase {
        0 => Vec2::new(1.0, 0.0),
        1 => Vec2::new(0.0, 1.0),
        2 => Vec2::new(-1.0, 0.0),
        _ => Vec2::new(0.0, -1.0),
    };
    TickInput {
        movement,
        punch: index % 7 == 0,
        kick: index % 11 == 0,
        cloud: index % 97 == 0,
        summon_mount: true,
        confirm: index == 0,
        ..TickInput::default()
    }
}

fn record(seed: u64, ticks: u64) -> Vec<Event> {
    let mut simulation = Simulation::new(GameConfig::default(), seed);
    let mut events = Vec::new();
    for index in 0..ticks {
        simulation.tick(scripted(index));
        events.extend_from_slice(simulation.events());
    }
    events
}

#[test]
fn identical_seed_and_script_replay_identically() {
    let first = record(1234, 2400);
    let second = record(1234, 2400);

    assert!(first
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
    assert_eq!(first, second);
}

struct ScriptedHost {
    frame: u64,
    frames: u64,
    rendered: Vec<ScreenState>,
    sounds: Vec<SoundCue>,
}

impl FrameHost for ScriptedHost {
    fn poll_input(&mut self) -> Option<TickInput> {
        (self.frame < self.frames).then(|| scripted(self.frame))
    }

    fn render(&mut self, simulation: &Simulation, sounds: &[SoundCue]) {
        self.rendered.push(simulation.screen());
        self.sounds.extend_from_slice(sounds);
    }

    fn end_frame(&mut self) -> Duration {
        self.frame += 1;
        Duration::from_secs(1) / 60
    }
}

#[test]
fn scheduler_runs_one_tick_per_frame_until_the_host_quits() {
    let mut simulation = Simulation::new(GameConfig::default(), 3);
    let mut host = ScriptedHost {
        frame: 0,
        frames: 300,
        rendered: Vec::new(),
        sounds: Vec::new(),
    };

    let summary = run(&mut simulation, &mut host, None);

    assert_eq!(summary.frames, 300);
    assert_eq!(summary.ticks, 300);
    assert_eq!(summary.screen, ScreenState::Playing);
    assert_eq!(host.rendered.first(), Some(&ScreenState::WaveAnnouncement));
    assert!(host.sounds.contains(&SoundCue::WaveStart));
}

#[test]
fn scheduler_honours_the_tick_budget() {
    let mut simulation = Simulation::new(GameConfig::default(), 3);
    let mut host = ScriptedHost {
        frame: 0,
        frames: u64::MAX,
        rendered: Vec::new(),
        sounds: Vec::new(),
    };

    let summary = run(&mut simulation, &mut host, Some(50));

    assert_eq!(summary.ticks, 50);
    assert_eq!(summary.frames, 50);
    assert_eq!(summary.screen, ScreenState::WaveAnnouncement);
}

struct HalfRateHost {
    frame: u64,
    screens: Vec<ScreenState>,
}

impl FrameHost for HalfRateHost {
    fn poll_input(&mut self) -> Option<TickInput> {
        (self.frame < 4).then(|| TickInput {
            confirm: self.frame == 1,
            ..TickInput::default()
        })
    }

    fn render(&mut self, simulation: &Simulation, _sounds: &[SoundCue]) {
        self.screens.push(simulation.screen());
    }

    fn end_frame(&mut self) -> Duration {
        self.frame += 1;
        Duration::from_secs(1) / 120
    }
}

#[test]
fn confirm_pressed_on_a_frame_without_ticks_is_not_lost() {
    let mut simulation = Simulation::new(GameConfig::default(), 9);
    let mut host = HalfRateHost {
        frame: 0,
        screens: Vec::new(),
    };

    let _ = run(&mut simulation, &mut host, None);

    assert_eq!(
        host.screens,
        vec![
            ScreenState::Title,
            ScreenState::Title,
            ScreenState::WaveAnnouncement,
            ScreenState::WaveAnnouncement,
        ]
    );
}
