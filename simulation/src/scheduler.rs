use std::time::Duration;

use swamp_brawler_core::{ScreenState, SoundCue, TickInput};
use tracing::debug;

use crate::Simulation;

/// Converts measured frame time into a number of fixed ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct TickPacer {
    step: Duration,
    accumulator: Duration,
    max_catch_up: u32,
}

impl TickPacer {
    /// Default bound on ticks simulated for one slow frame.
    pub const MAX_CATCH_UP: u32 = 4;

    /// Creates a pacer for the given tick rate.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulator: Duration::ZERO,
            max_catch_up: Self::MAX_CATCH_UP,
        }
    }

    /// Duration of a single tick.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Accumulates `frame` and returns how many ticks are due.
    ///
    /// Time owed beyond the catch-up bound is dropped so a stalled frame
    /// cannot trigger an unbounded burst of updates.
    pub fn ticks_for(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_catch_up {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_catch_up && self.accumulator >= self.step {
            debug!(dropped = ?self.accumulator, "tick pacer fell behind");
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}

/// Holds edge-triggered presses until a tick consumes them.
///
/// A frame may schedule zero ticks; without latching, a confirm or pause
/// pressed on such a frame would be lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    confirm: bool,
    pause: bool,
    click: bool,
}

impl InputLatch {
    /// Records the edge presses of a sampled frame.
    pub fn register(&mut self, input: &TickInput) {
        self.confirm |= input.confirm;
        self.pause |= input.pause;
        self.click |= input.click;
    }

    /// Merges pending presses into `held` and clears them.
    pub fn take(&mut self, held: TickInput) -> TickInput {
        let input = TickInput {
            confirm: self.confirm,
            pause: self.pause,
            click: self.click,
            ..held
        };
        *self = Self::default();
        input
    }
}

/// Ticks a simulation for each measured frame.
///
/// Pairs a [`TickPacer`] with an [`InputLatch`] so every host advances the
/// session the same way: presses are latched, due ticks run, and the cues
/// they raise are collected once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStepper {
    pacer: TickPacer,
    latch: InputLatch,
}

/// Ticks one frame ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicks {
    /// Ticks simulated.
    pub ran: u64,
    /// A tick was still due when the limit stopped the frame.
    pub cut_short: bool,
}

impl FrameStepper {
    /// Creates a stepper for the given tick rate.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            pacer: TickPacer::new(ticks_per_second),
            latch: InputLatch::default(),
        }
    }

    /// Duration of a single tick.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.pacer.step()
    }

    /// Runs the ticks `frame` owes, at most `limit` of them.
    ///
    /// Cues raised by those ticks are appended to `sounds` unless already
    /// present.
    pub fn advance(
        &mut self,
        simulation: &mut Simulation,
        input: TickInput,
        frame: Duration,
        limit: Option<u64>,
        sounds: &mut Vec<SoundCue>,
    ) -> FrameTicks {
        self.latch.register(&input);
        let mut ran = 0_u64;
        for _ in 0..self.pacer.ticks_for(frame) {
            if limit.is_some_and(|limit| ran >= limit) {
                return FrameTicks {
                    ran,
                    cut_short: true,
                };
            }
            simulation.tick(self.latch.take(input));
            ran += 1;
            for cue in simulation.sounds() {
                if !sounds.contains(cue) {
                    sounds.push(*cue);
                }
            }
        }
        FrameTicks {
            ran,
            cut_short: false,
        }
    }
}

/// Frame-driven host the scheduler polls, renders into and yields to.
pub trait FrameHost {
    /// Samples input for the coming frame; `None` ends the run.
    fn poll_input(&mut self) -> Option<TickInput>;

    /// Presents the simulation after the frame's ticks, with the cues they raised.
    fn render(&mut self, simulation: &Simulation, sounds: &[SoundCue]);

    /// Yields until the next frame and reports how long the frame took.
    fn end_frame(&mut self) -> Duration;
}

/// Totals reported when a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented.
    pub frames: u64,
    /// Ticks simulated.
    pub ticks: u64,
    /// Screen shown when the run ended.
    pub screen: ScreenState,
    /// Wave reached.
    pub wave: u32,
    /// Score of the current session.
    pub score: u64,
}

/// Drives `simulation` through `host` until the host quits or `tick_budget` ticks ran.
///
/// Edge-triggered inputs reach only the first tick after they were sampled.
pub fn run<H: FrameHost>(
    simulation: &mut Simulation,
    host: &mut H,
    tick_budget: Option<u64>,
) -> RunSummary {
    let mut stepper = FrameStepper::new(simulation.config().playfield.ticks_per_second);
    let mut frame = stepper.step();
    let mut frames = 0_u64;
    let mut ticks = 0_u64;
    let mut sounds = Vec::new();

    while let Some(input) = host.poll_input() {
        sounds.clear();
        let remaining = tick_budget.map(|budget| budget.saturating_sub(ticks));
        let advanced = stepper.advance(simulation, input, frame, remaining, &mut sounds);
        ticks += advanced.ran;
        if advanced.cut_short {
            break;
        }

        host.render(simulation, &sounds);
        frames += 1;
        frame = host.end_frame();
    }

    RunSummary {
        frames,
        ticks,
        screen: simulation.screen(),
        wave: simulation.wave(),
        score: simulation.score(),
    }
}
