//! Keyframe tracks: one named, typed property slot per track.
//!
//! Keyframes are kept sorted by time with unique times, so lookups are a
//! binary search. Spline tracks build their control-point curve lazily on the
//! first evaluation after a structural edit; playback never rebuilds it.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::interp::functions::{linear_value, step_value};
use crate::interp::{InterpolationMode, SplineCurve};
use crate::keyframe::{sanitize_time, KeyFrame};
use crate::value::{Value, ValueKind};
use crate::Result;

/// The keyframes bounding a sample time and the normalized fraction between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPair<'a> {
    pub prev: &'a KeyFrame,
    pub next: &'a KeyFrame,
    /// Ordinal of `prev` within the track.
    pub prev_index: usize,
    /// Fraction in [0,1] from `prev` to `next`; 0 when both are the same key.
    pub unit_t: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "TrackData", into = "TrackData")]
pub struct Track {
    name: String,
    kind: ValueKind,
    mode: InterpolationMode,
    enabled: bool,
    keyframes: Vec<KeyFrame>,
    spline: OnceCell<SplineCurve>,
}

impl Track {
    /// Create an empty track.
    pub fn new(name: impl Into<String>, kind: ValueKind, mode: InterpolationMode) -> Result<Self> {
        let name = name.into();
        if !kind.supports(mode) {
            return Err(AnimationError::UnsupportedInterpolation {
                track: name,
                kind,
                mode,
            });
        }
        Ok(Self {
            name,
            kind,
            mode,
            enabled: true,
            keyframes: Vec::new(),
            spline: OnceCell::new(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[inline]
    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.mode
    }

    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) -> Result<()> {
        if !self.kind.supports(mode) {
            return Err(AnimationError::UnsupportedInterpolation {
                track: self.name.clone(),
                kind: self.kind,
                mode,
            });
        }
        self.mode = mode;
        Ok(())
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled tracks stay in the clip but controllers skip them.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Keyframes in ascending time order.
    #[inline]
    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn first_time(&self) -> Option<f32> {
        self.keyframes.first().map(|k| k.time)
    }

    #[inline]
    pub fn last_time(&self) -> Option<f32> {
        self.keyframes.last().map(|k| k.time)
    }

    fn position(&self, time: f32) -> core::result::Result<usize, usize> {
        // total_cmp orders -0.0 before +0.0; stored times are never -0.0.
        let time = if time == 0.0 { 0.0 } else { time };
        self.keyframes
            .binary_search_by(|k| k.time.total_cmp(&time))
    }

    /// Insert a keyframe in time order. A keyframe already at the same time is replaced.
    pub fn add(&mut self, keyframe: KeyFrame) -> Result<()> {
        if keyframe.kind() != self.kind {
            return Err(AnimationError::TypeMismatch {
                track: self.name.clone(),
                expected: self.kind,
                actual: keyframe.kind(),
            });
        }
        let keyframe = KeyFrame {
            time: sanitize_time(keyframe.time),
            value: keyframe.value,
        };
        match self.position(keyframe.time) {
            Ok(idx) => self.keyframes[idx] = keyframe,
            Err(idx) => self.keyframes.insert(idx, keyframe),
        }
        self.invalidate_curve();
        Ok(())
    }

    /// Remove the keyframe sitting exactly at `time`.
    pub fn remove(&mut self, time: f32) -> Result<KeyFrame> {
        match self.position(time) {
            Ok(idx) => {
                let removed = self.keyframes.remove(idx);
                self.invalidate_curve();
                Ok(removed)
            }
            Err(_) => Err(AnimationError::KeyframeNotFound {
                track: self.name.clone(),
                time,
            }),
        }
    }

    /// Remove every keyframe.
    pub fn clear(&mut self) {
        self.keyframes.clear();
        self.invalidate_curve();
    }

    #[inline]
    fn invalidate_curve(&mut self) {
        self.spline.take();
    }

    /// Find the keyframes bounding `time`.
    ///
    /// Before the first key both ends are the first key; after the last key both
    /// are the last key; an exact hit returns that key twice. In all three cases
    /// `unit_t` is 0, so no zero-length span is ever divided by.
    pub fn nearest_pair(&self, time: f32) -> Option<KeyPair<'_>> {
        let time = if time.is_nan() { 0.0 } else { time };
        let keys = &self.keyframes;
        let first = keys.first()?;
        let last_index = keys.len() - 1;
        let last = &keys[last_index];

        if time <= first.time {
            return Some(KeyPair {
                prev: first,
                next: first,
                prev_index: 0,
                unit_t: 0.0,
            });
        }
        if time >= last.time {
            return Some(KeyPair {
                prev: last,
                next: last,
                prev_index: last_index,
                unit_t: 0.0,
            });
        }

        match self.position(time) {
            Ok(idx) => Some(KeyPair {
                prev: &keys[idx],
                next: &keys[idx],
                prev_index: idx,
                unit_t: 0.0,
            }),
            Err(idx) => {
                // first.time < time < last.time, so 1 <= idx <= last_index.
                let prev = &keys[idx - 1];
                let next = &keys[idx];
                let span = next.time - prev.time;
                let unit_t = if span > 0.0 {
                    ((time - prev.time) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                Some(KeyPair {
                    prev,
                    next,
                    prev_index: idx - 1,
                    unit_t,
                })
            }
        }
    }

    /// The spline curve through this track's keys, built on first use.
    pub fn curve(&self) -> &SplineCurve {
        self.spline.get_or_init(|| {
            log::trace!(
                "rebuilding spline tangents for track '{}' ({} keys)",
                self.name,
                self.keyframes.len()
            );
            SplineCurve::from_keyframes(self.kind, &self.keyframes)
        })
    }

    /// Interpolated value at `time` (ms), or `None` for an empty track.
    pub fn sample(&self, time: f32) -> Option<Value> {
        let pair = self.nearest_pair(time)?;
        if std::ptr::eq(pair.prev, pair.next) || pair.unit_t == 0.0 {
            return Some(step_value(&pair.prev.value));
        }
        let value = match self.mode {
            InterpolationMode::None => step_value(&pair.prev.value),
            InterpolationMode::Linear => linear_value(&pair.prev.value, &pair.next.value, pair.unit_t),
            InterpolationMode::Spline => self
                .curve()
                .evaluate_value(self.kind, pair.prev_index, pair.unit_t)
                .unwrap_or_else(|| linear_value(&pair.prev.value, &pair.next.value, pair.unit_t)),
        };
        Some(value)
    }
}

impl Clone for Track {
    /// Deep copy of every keyframe; the spline cache is left to rebuild lazily.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            mode: self.mode,
            enabled: self.enabled,
            keyframes: self.keyframes.clone(),
            spline: OnceCell::new(),
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.mode == other.mode
            && self.enabled == other.enabled
            && self.keyframes == other.keyframes
    }
}

fn default_enabled() -> bool {
    true
}

/// Serialized shape of a track. Loading goes through `Track::add`, so unsorted
/// or mistyped keyframes from external data are ordered or rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TrackData {
    name: String,
    kind: ValueKind,
    #[serde(default)]
    mode: InterpolationMode,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    keyframes: Vec<KeyFrame>,
}

impl TryFrom<TrackData> for Track {
    type Error = AnimationError;

    fn try_from(data: TrackData) -> Result<Self> {
        let mut track = Track::new(data.name, data.kind, data.mode)?;
        track.set_enabled(data.enabled);
        for key in data.keyframes {
            track.add(key)?;
        }
        Ok(track)
    }
}

impl From<Track> for TrackData {
    fn from(track: Track) -> Self {
        TrackData {
            name: track.name,
            kind: track.kind,
            mode: track.mode,
            enabled: track.enabled,
            keyframes: track.keyframes,
        }
    }
}
