//! Fixed-rate simulation loop shared by the autopilot and scripted input.

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use dualhunt_core::Hunt;
use dualhunt_hal::{FrameSample, InputSource, Presentation};

/// What the loop should do after a driver has been prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Deliver queued events, then advance one tick.
    Tick,
    /// Deliver queued events without advancing time.
    Flush,
    /// Deliver queued events and stop.
    Done,
}

/// An input source that also produces the continuous per-tick sample.
pub trait Driver: InputSource {
    /// Look at the hunt before events are polled and decide the next step.
    fn prepare<P: Presentation>(&mut self, hunt: &Hunt<P>) -> anyhow::Result<Step>;

    /// Poses and targeting for the coming tick.
    fn sample(&self, delta_seconds: f32) -> FrameSample<'_>;
}

pub const MIN_FPS: f32 = 1.0;
pub const MAX_FPS: f32 = 1000.0;

/// Loop pacing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub fps: f32,
    pub max_ticks: u64,
    /// Sleep so ticks run at wall-clock rate.
    pub realtime: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            max_ticks: 100_000,
            realtime: false,
        }
    }
}

/// Run `driver` against `hunt` until it is done. Returns the number of
/// ticks simulated.
pub fn run<P: Presentation, D: Driver>(
    hunt: &mut Hunt<P>,
    driver: &mut D,
    pacing: LoopConfig,
) -> anyhow::Result<u64> {
    if !(MIN_FPS..=MAX_FPS).contains(&pacing.fps) {
        bail!(
            "frame rate must be between {MIN_FPS} and {MAX_FPS}, got {}",
            pacing.fps
        );
    }
    let dt = 1.0 / pacing.fps;
    let frame = Duration::try_from_secs_f32(dt)
        .with_context(|| format!("no frame duration for {} fps", pacing.fps))?;

    driver.init();
    let mut ticks = 0u64;
    loop {
        let step = driver.prepare(hunt)?;
        while let Some(event) = driver.poll() {
            log::debug!("input {event:?}");
            hunt.handle_event(event);
        }

        match step {
            Step::Done => break,
            Step::Flush => continue,
            Step::Tick => {}
        }

        if ticks >= pacing.max_ticks {
            bail!(
                "gave up after {ticks} ticks in {:?} (next item {})",
                hunt.lifecycle(),
                hunt.next_index()
            );
        }

        let started = Instant::now();
        hunt.tick(&driver.sample(dt));
        ticks += 1;

        if pacing.realtime {
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
    Ok(ticks)
}
