//! Fluent clip authoring.
//!
//! Tracks are edited by name, then `build` snaps every key onto the frame
//! grid and computes a default length:
//!
//! ```
//! use keytrack_animation_core::{AnimationBuilder, KeyFrame, ValueKind};
//!
//! let mut builder = AnimationBuilder::new();
//! builder
//!     .edit_track("Opacity", ValueKind::Single)?
//!     .set_key(KeyFrame::new(0.0, 0.0))?
//!     .set_key(KeyFrame::new(490.0, 1.0))?;
//! let clip = builder.build("fade_in", Some(10.0), None)?;
//! assert_eq!(clip.track("Opacity").unwrap().last_time(), Some(500.0));
//! assert_eq!(clip.length(), 600.0);
//! # Ok::<(), keytrack_animation_core::AnimationError>(())
//! ```

use crate::animation::{Animation, DEFAULT_FPS};
use crate::config::Config;
use crate::error::AnimationError;
use crate::interp::InterpolationMode;
use crate::keyframe::KeyFrame;
use crate::track::Track;
use crate::value::ValueKind;
use crate::Result;

/// Times within this many ms of a frame boundary are kept as authored.
const SNAP_EPSILON_MS: f32 = 1e-3;

/// Round `time_ms` to the nearest frame of a `fps` clip.
pub fn snap_to_frame(time_ms: f32, fps: f32) -> f32 {
    let snapped = (time_ms * fps / 1000.0).round() * 1000.0 / fps;
    if (time_ms - snapped).abs() <= SNAP_EPSILON_MS {
        time_ms
    } else {
        snapped
    }
}

fn check_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AnimationError::InvalidName {
            reason: format!("{what} name must not be blank"),
        });
    }
    Ok(())
}

/// Keys and settings for one track under construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackBuilder {
    track: Track,
}

impl TrackBuilder {
    fn new(name: &str, kind: ValueKind) -> Result<Self> {
        let mode = if kind == ValueKind::Texture2D {
            InterpolationMode::None
        } else {
            InterpolationMode::Linear
        };
        Ok(Self {
            track: Track::new(name, kind, mode)?,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.track.name()
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.track.kind()
    }

    #[inline]
    pub fn keys(&self) -> &[KeyFrame] {
        self.track.keyframes()
    }

    /// Add a key, replacing one already at the same time.
    pub fn set_key(&mut self, key: KeyFrame) -> Result<&mut Self> {
        self.track.add(key)?;
        Ok(self)
    }

    pub fn set_keys(&mut self, keys: impl IntoIterator<Item = KeyFrame>) -> Result<&mut Self> {
        for key in keys {
            self.track.add(key)?;
        }
        Ok(self)
    }

    pub fn remove_key(&mut self, time: f32) -> Result<&mut Self> {
        self.track.remove(time)?;
        Ok(self)
    }

    /// Ignored for texture tracks at build time; they always step.
    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) -> Result<&mut Self> {
        self.track.set_interpolation_mode(mode)?;
        Ok(self)
    }

    pub fn enabled(&mut self, enabled: bool) -> &mut Self {
        self.track.set_enabled(enabled);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.track.clear();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationBuilder {
    default_fps: f32,
    tracks: Vec<TrackBuilder>,
}

impl Default for AnimationBuilder {
    fn default() -> Self {
        Self {
            default_fps: DEFAULT_FPS,
            tracks: Vec::new(),
        }
    }
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            default_fps: config.default_fps,
            tracks: Vec::new(),
        }
    }

    /// Open the track called `name`, creating it on first use.
    /// Names match case-sensitively.
    pub fn edit_track(&mut self, name: &str, kind: ValueKind) -> Result<&mut TrackBuilder> {
        check_name(name, "track")?;
        let index = match self.tracks.iter().position(|t| t.name() == name) {
            Some(i) => {
                let existing = self.tracks[i].kind();
                if existing != kind {
                    return Err(AnimationError::TypeMismatch {
                        track: name.to_string(),
                        expected: existing,
                        actual: kind,
                    });
                }
                i
            }
            None => {
                self.tracks.push(TrackBuilder::new(name, kind)?);
                self.tracks.len() - 1
            }
        };
        Ok(&mut self.tracks[index])
    }

    pub fn delete_track(&mut self, name: &str) -> Result<&mut Self> {
        match self.tracks.iter().position(|t| t.name() == name) {
            Some(i) => {
                self.tracks.remove(i);
                Ok(self)
            }
            None => Err(AnimationError::TrackNotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn track_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tracks.iter().map(|t| t.name())
    }

    /// Drop every track.
    pub fn clear(&mut self) -> &mut Self {
        self.tracks.clear();
        self
    }

    /// Reload from `animation`'s tracks and frame rate, or clear on `None`.
    pub fn reset_to(&mut self, animation: Option<&Animation>) -> &mut Self {
        self.tracks.clear();
        if let Some(animation) = animation {
            self.default_fps = animation.fps();
            self.tracks.extend(
                animation
                    .tracks()
                    .iter()
                    .map(|track| TrackBuilder { track: track.clone() }),
            );
        }
        self
    }

    /// Produce a clip.
    ///
    /// `fps` defaults to the builder's frame rate and is clamped to at least 1.
    /// Without `length` the clip runs one frame past its latest key. Lengths
    /// are never shorter than one frame. Tracks with no keys are skipped.
    pub fn build(&self, name: &str, fps: Option<f32>, length: Option<f32>) -> Result<Animation> {
        check_name(name, "animation")?;
        let mut animation = Animation::new(name, 0.0);
        animation.set_fps(fps.unwrap_or(self.default_fps));
        let fps = animation.fps();
        let frame = animation.frame_duration();

        let mut latest = 0.0f32;
        for builder in &self.tracks {
            if builder.keys().is_empty() {
                continue;
            }
            let mode = if builder.kind() == ValueKind::Texture2D {
                InterpolationMode::None
            } else {
                builder.track.interpolation_mode()
            };
            let mut track = Track::new(builder.name(), builder.kind(), mode)?;
            track.set_enabled(builder.track.is_enabled());
            for key in builder.keys() {
                let time = snap_to_frame(key.time, fps);
                latest = latest.max(time);
                track.add(KeyFrame::new(time, key.value.clone()))?;
            }
            animation.insert_track(track);
        }

        let length = length.unwrap_or(latest + frame);
        animation.set_length(length.max(frame));
        log::debug!(
            "built '{}': {} tracks, {} ms at {} fps",
            animation.name(),
            animation.tracks().len(),
            animation.length(),
            fps
        );
        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Rect, TextureKey, TextureRef, Value};
    use approx::assert_relative_eq;

    #[test]
    fn snapping_rounds_to_nearest_frame() {
        assert_eq!(snap_to_frame(149.0, 10.0), 100.0);
        assert_eq!(snap_to_frame(151.0, 10.0), 200.0);
        assert_eq!(snap_to_frame(200.0, 10.0), 200.0);
        assert_relative_eq!(snap_to_frame(20.0, 60.0), 16.666_666, epsilon = 1e-3);
    }

    #[test]
    fn build_snaps_and_computes_length() {
        let mut builder = AnimationBuilder::new();
        builder
            .edit_track("Scale", ValueKind::Vector2)
            .unwrap()
            .set_key(KeyFrame::new(0.0, [1.0, 1.0]))
            .unwrap()
            .set_key(KeyFrame::new(151.0, [2.0, 2.0]))
            .unwrap();
        builder.edit_track("Unused", ValueKind::Single).unwrap();

        let anim = builder.build("pulse", Some(10.0), None).unwrap();
        assert_eq!(anim.fps(), 10.0);
        assert_eq!(anim.length(), 300.0);
        assert!(anim.track("Unused").is_none());
        assert_eq!(anim.track("Scale").unwrap().last_time(), Some(200.0));

        let explicit = builder.build("pulse", Some(10.0), Some(20.0)).unwrap();
        assert_eq!(explicit.length(), 100.0);
    }

    #[test]
    fn edit_track_matches_names_exactly() {
        let mut builder = AnimationBuilder::new();
        builder.edit_track("Scale", ValueKind::Vector2).unwrap();
        builder.edit_track("scale", ValueKind::Single).unwrap();
        assert_eq!(builder.track_names().collect::<Vec<_>>(), ["Scale", "scale"]);
        assert!(builder.delete_track("SCALE").unwrap_err().is_not_found());
    }

    #[test]
    fn build_rejects_blank_names() {
        let mut builder = AnimationBuilder::new();
        assert!(matches!(
            builder.edit_track("  ", ValueKind::Single),
            Err(AnimationError::InvalidName { .. })
        ));
        assert!(matches!(
            builder.build("", None, None),
            Err(AnimationError::InvalidName { .. })
        ));
    }

    #[test]
    fn edit_track_checks_kind() {
        let mut builder = AnimationBuilder::new();
        builder.edit_track("Tint", ValueKind::Color).unwrap();
        assert!(matches!(
            builder.edit_track("Tint", ValueKind::Vector4),
            Err(AnimationError::TypeMismatch { .. })
        ));
        assert!(builder
            .edit_track("Tint", ValueKind::Color)
            .unwrap()
            .set_interpolation_mode(InterpolationMode::Spline)
            .is_err());
    }

    #[test]
    fn texture_tracks_always_step() {
        let mut builder = AnimationBuilder::new();
        let frame = |x: f32| TextureKey::new(Some(TextureRef::new("run")), Rect::new(x, 0.0, 16.0, 16.0), 0);
        builder
            .edit_track("Frame", ValueKind::Texture2D)
            .unwrap()
            .set_interpolation_mode(InterpolationMode::Linear)
            .unwrap()
            .set_keys([KeyFrame::new(0.0, frame(0.0)), KeyFrame::new(100.0, frame(16.0))])
            .unwrap();
        let anim = builder.build("run", Some(10.0), None).unwrap();
        let track = anim.track("Frame").unwrap();
        assert_eq!(track.interpolation_mode(), InterpolationMode::None);
        assert_eq!(track.sample(50.0), Some(Value::Texture2D(frame(0.0))));
    }

    #[test]
    fn delete_clear_and_reset() {
        let mut builder = AnimationBuilder::new();
        builder
            .edit_track("A", ValueKind::Single)
            .unwrap()
            .set_key(KeyFrame::new(0.0, 1.0))
            .unwrap()
            .enabled(false);
        assert!(builder.delete_track("B").unwrap_err().is_not_found());

        let anim = builder.build("a", Some(30.0), Some(1000.0)).unwrap();
        assert!(!anim.track("A").unwrap().is_enabled());

        builder.delete_track("A").unwrap();
        assert_eq!(builder.track_names().count(), 0);

        builder.reset_to(Some(&anim));
        let rebuilt = builder.build("a", None, Some(1000.0)).unwrap();
        assert_eq!(rebuilt, anim);

        builder.reset_to(None);
        assert_eq!(builder.track_names().count(), 0);
        builder.edit_track("C", ValueKind::Single).unwrap();
        builder.clear();
        assert_eq!(builder.track_names().count(), 0);
    }
}
