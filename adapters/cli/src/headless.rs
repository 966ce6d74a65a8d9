use std::time::Duration;

use glam::Vec2;
use swamp_brawler_core::{ScreenState, SoundCue, TickInput};
use swamp_brawler_simulation::{FrameHost, Simulation, VictoryStage};
use tracing::{debug, info};

/// Windowless host that plays the game with a fixed autopilot.
///
/// Confirms every screen that waits for a key, walks a slow square and mashes
/// every attack, so long runs visit each screen the session can reach.
#[derive(Debug)]
pub(crate) struct HeadlessHost {
    frame: u64,
    step: Duration,
    confirm: bool,
    restarts: u32,
    screen: ScreenState,
}

impl HeadlessHost {
    pub(crate) fn new(ticks_per_second: u32) -> Self {
        Self {
            frame: 0,
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            confirm: true,
            restarts: 0,
            screen: ScreenState::Title,
        }
    }

    /// Sessions restarted after a game over or a win.
    pub(crate) fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl FrameHost for HeadlessHost {
    fn poll_input(&mut self) -> Option<TickInput> {
        let movement = match (self.frame / 120) % 4 {
            0 => Vec2::X,
            1 => Vec2::Y,
            2 => Vec2::NEG_X,
            _ => Vec2::NEG_Y,
        };
        Some(TickInput {
            movement,
            punch: true,
            kick: self.frame % 3 == 0,
            cloud: true,
            summon_mount: true,
            confirm: std::mem::take(&mut self.confirm),
            ..TickInput::default()
        })
    }

    fn render(&mut self, simulation: &Simulation, sounds: &[SoundCue]) {
        let screen = simulation.screen();
        if screen != self.screen {
            debug!(from = ?self.screen, to = ?screen, frame = self.frame, "headless screen change");
            if matches!(self.screen, ScreenState::GameOver | ScreenState::Victory)
                && screen == ScreenState::WaveAnnouncement
            {
                self.restarts += 1;
                info!(restarts = self.restarts, "session restarted");
            }
            self.screen = screen;
        }

        let finale = simulation
            .victory()
            .is_some_and(|victory| victory.stage() == VictoryStage::Finale);
        self.confirm = matches!(screen, ScreenState::Title | ScreenState::GameOver) || finale;

        if !sounds.is_empty() {
            debug!(?sounds, "cues");
        }
    }

    fn end_frame(&mut self) -> Duration {
        self.frame += 1;
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swamp_brawler_core::GameConfig;
    use swamp_brawler_simulation::run;

    #[test]
    fn autopilot_leaves_the_title_and_plays() {
        let mut simulation = Simulation::new(GameConfig::default(), 11);
        let mut host = HeadlessHost::new(60);

        let summary = run(&mut simulation, &mut host, Some(600));

        assert_eq!(summary.ticks, 600);
        assert_ne!(summary.screen, ScreenState::Title);
        assert!(swamp_brawler_world::query::tick_index(simulation.world()) > 0);
    }

    #[test]
    fn confirm_is_pressed_once_per_waiting_screen() {
        let simulation = Simulation::new(GameConfig::default(), 5);
        let mut host = HeadlessHost::new(60);
        assert!(host.poll_input().map(|input| input.confirm).unwrap_or(false));
        assert!(!host.poll_input().map(|input| input.confirm).unwrap_or(true));

        host.render(&simulation, &[]);
        assert!(host.poll_input().map(|input| input.confirm).unwrap_or(false));
    }
}
