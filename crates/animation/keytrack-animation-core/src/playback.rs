//! Per-controller playback state and the time-advance arithmetic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlayerState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// The parts of a clip the time math needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipTiming {
    pub length: f32,
    pub is_looped: bool,
    /// 0 loops forever.
    pub loop_count: u32,
}

/// What one `step` did besides moving time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Loop boundaries crossed and counted.
    pub wraps: u32,
    /// The clip ran off its forward end and playback should stop.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub state: PlayerState,
    /// Milliseconds from clip start.
    pub time: f32,
    /// Negative plays in reverse.
    pub speed: f32,
    pub loops_elapsed: u32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_speed(1.0)
    }
}

/// Floating modulo mapped into [0, b).
#[inline]
fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if m < 0.0 {
        // -tiny % b can round back up to b.
        let w = m + b;
        if w >= b {
            0.0
        } else {
            w
        }
    } else {
        m
    }
}

impl PlaybackState {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            state: PlayerState::Stopped,
            time: 0.0,
            speed,
            loops_elapsed: 0,
        }
    }

    /// Back to time 0 with no loops counted; `state` is untouched.
    pub fn rewind(&mut self) {
        self.time = 0.0;
        self.loops_elapsed = 0;
    }

    fn loop_budget_left(&self, clip: &ClipTiming) -> Option<u32> {
        if clip.loop_count == 0 {
            None
        } else {
            Some(clip.loop_count.saturating_sub(self.loops_elapsed))
        }
    }

    /// Whether the next step wraps instead of clamping.
    #[inline]
    pub fn is_looping(&self, clip: &ClipTiming) -> bool {
        clip.is_looped && self.loop_budget_left(clip) != Some(0)
    }

    /// Move time by `delta_seconds` at the current speed.
    ///
    /// Looping clips wrap into `[0, length)` and count one loop per boundary
    /// crossed; if that would overrun the loop budget, the budget is used up
    /// and the clip clamps at the end it was heading for. Otherwise time clamps
    /// into `[0, length]`; going past `length` while moving forward finishes,
    /// landing exactly on it does not.
    /// State transitions are left to the caller.
    pub fn step(&mut self, clip: ClipTiming, delta_seconds: f32) -> StepOutcome {
        let length = if clip.length.is_finite() {
            clip.length.max(0.0)
        } else {
            0.0
        };
        let delta_ms = self.speed * delta_seconds * 1000.0;
        let delta_ms = if delta_ms.is_finite() { delta_ms } else { 0.0 };
        let mut raw = self.time + delta_ms;
        let mut outcome = StepOutcome::default();

        if length <= 0.0 {
            self.time = 0.0;
            outcome.finished = !clip.is_looped && delta_ms > 0.0;
            return outcome;
        }

        if self.is_looping(&clip) {
            let crossings = (raw / length).floor().abs();
            let crossings = if crossings >= u32::MAX as f32 {
                u32::MAX
            } else {
                crossings as u32
            };
            match self.loop_budget_left(&clip) {
                Some(left) if crossings > left => {
                    self.loops_elapsed = self.loops_elapsed.saturating_add(left);
                    outcome.wraps = left;
                    // Rewind past the loops still allowed; what remains clamps below.
                    let consumed = left as f32 * length;
                    raw = if delta_ms >= 0.0 { raw - consumed } else { raw + consumed };
                }
                _ => {
                    self.loops_elapsed = self.loops_elapsed.saturating_add(crossings);
                    outcome.wraps = crossings;
                    self.time = fmod(raw, length);
                    return outcome;
                }
            }
        }

        self.time = raw.clamp(0.0, length);
        outcome.finished = delta_ms > 0.0 && raw > length;
        outcome
    }

    /// Place time at `ms`: negatives clamp to 0, looping clips wrap, others clamp to length.
    pub fn seek(&mut self, clip: ClipTiming, ms: f32) {
        let length = clip.length.max(0.0);
        let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        self.time = if length <= 0.0 {
            0.0
        } else if self.is_looping(&clip) {
            fmod(ms, length)
        } else {
            ms.min(length)
        };
    }
}
