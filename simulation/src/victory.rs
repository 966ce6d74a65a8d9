use glam::Vec2;
use swamp_brawler_core::config::VictoryTuning;

/// Stages of the scripted ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VictoryStage {
    /// Banner announcing the win.
    Announcement,
    /// Player walks from where the fight ended to the destination.
    Walk,
    /// Final screen waiting for a restart.
    Finale,
}

/// Tick-driven ending played after the final boss falls.
#[derive(Clone, Debug, PartialEq)]
pub struct VictorySequence {
    ticks: u32,
    from: Vec2,
    stage: VictoryStage,
}

impl VictorySequence {
    /// Starts the sequence with the player's top-left corner at `from`.
    #[must_use]
    pub fn new(from: Vec2) -> Self {
        Self {
            ticks: 0,
            from,
            stage: VictoryStage::Announcement,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> VictoryStage {
        self.stage
    }

    /// Ticks elapsed since the sequence started.
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advances one tick and returns where the player should stand while walking.
    pub(crate) fn advance(&mut self, tuning: &VictoryTuning) -> Option<Vec2> {
        if self.stage == VictoryStage::Finale {
            return None;
        }
        self.ticks = self.ticks.saturating_add(1);

        if self.ticks <= tuning.announcement_ticks {
            return None;
        }
        self.stage = VictoryStage::Walk;

        let walked = self.ticks - tuning.announcement_ticks;
        if walked >= tuning.walk_ticks {
            self.stage = VictoryStage::Finale;
            return Some(tuning.destination);
        }
        let progress = walked as f32 / tuning.walk_ticks as f32;
        Some(self.from.lerp(tuning.destination, progress))
    }
}
