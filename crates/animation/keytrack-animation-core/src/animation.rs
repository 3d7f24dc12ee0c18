//! Animation clips: a named, fixed-length set of tracks plus loop settings.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::interp::InterpolationMode;
use crate::playback::ClipTiming;
use crate::track::Track;
use crate::value::ValueKind;
use crate::Result;

/// Frame rate used when a clip is created without one.
pub const DEFAULT_FPS: f32 = 60.0;

#[inline]
fn sanitize_length(ms: f32) -> f32 {
    if ms.is_finite() {
        ms.max(0.0)
    } else {
        0.0
    }
}

#[inline]
fn sanitize_fps(fps: f32) -> f32 {
    if fps.is_finite() {
        fps.max(1.0)
    } else {
        DEFAULT_FPS
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnimationData", into = "AnimationData")]
pub struct Animation {
    name: String,
    length: f32,
    fps: f32,
    is_looped: bool,
    loop_count: u32,
    tracks: Vec<Track>,
}

impl Animation {
    /// Create an empty, non-looping clip. Negative or non-finite lengths become 0.
    pub fn new(name: impl Into<String>, length_ms: f32) -> Self {
        Self {
            name: name.into(),
            length: sanitize_length(length_ms),
            fps: DEFAULT_FPS,
            is_looped: false,
            loop_count: 0,
            tracks: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip length in milliseconds.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_length(&mut self, ms: f32) {
        self.length = sanitize_length(ms);
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Authoring frame rate; clamped to at least 1.
    pub fn set_fps(&mut self, fps: f32) {
        self.fps = sanitize_fps(fps);
    }

    /// Duration of one frame in milliseconds.
    #[inline]
    pub fn frame_duration(&self) -> f32 {
        1000.0 / self.fps
    }

    #[inline]
    pub fn is_looped(&self) -> bool {
        self.is_looped
    }

    pub fn set_looped(&mut self, looped: bool) {
        self.is_looped = looped;
    }

    /// Loop budget; 0 loops forever.
    #[inline]
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn set_loop_count(&mut self, count: u32) {
        self.loop_count = count;
    }

    #[inline]
    pub fn timing(&self) -> ClipTiming {
        ClipTiming {
            length: self.length,
            is_looped: self.is_looped,
            loop_count: self.loop_count,
        }
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by exact, case-sensitive name.
    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name() == name)
    }

    pub fn track_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name() == name)
    }

    pub(crate) fn track_index(&self, name: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.name() == name)
    }

    /// Return the track called `name`, creating it with `mode` if absent.
    ///
    /// Names match case-sensitively, so `"Position"` and `"position"` are
    /// two tracks. An existing track keeps its mode; only its kind is checked.
    pub fn get_or_create_track(
        &mut self,
        name: &str,
        kind: ValueKind,
        mode: InterpolationMode,
    ) -> Result<&mut Track> {
        let index = match self.track_index(name) {
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
                self.tracks.push(Track::new(name, kind, mode)?);
                self.tracks.len() - 1
            }
        };
        Ok(&mut self.tracks[index])
    }

    /// Insert an already built track, replacing any track with the same name.
    pub(crate) fn insert_track(&mut self, track: Track) {
        match self.track_index(track.name()) {
            Some(i) => self.tracks[i] = track,
            None => self.tracks.push(track),
        }
    }

    pub fn remove_track(&mut self, name: &str) -> Result<Track> {
        match self.track_index(name) {
            Some(i) => Ok(self.tracks.remove(i)),
            None => Err(AnimationError::TrackNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Drop tracks without keyframes. Returns how many were removed.
    pub fn prune_empty_tracks(&mut self) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| !t.is_empty());
        before - self.tracks.len()
    }
}

fn default_fps() -> f32 {
    DEFAULT_FPS
}

/// Serialized shape of a clip. Loading clamps length and fps and keeps the
/// first track for any repeated name.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct AnimationData {
    name: String,
    length: f32,
    #[serde(default = "default_fps")]
    fps: f32,
    #[serde(default)]
    is_looped: bool,
    #[serde(default)]
    loop_count: u32,
    #[serde(default)]
    tracks: Vec<Track>,
}

impl From<AnimationData> for Animation {
    fn from(data: AnimationData) -> Self {
        let mut anim = Animation::new(data.name, data.length);
        anim.set_fps(data.fps);
        anim.is_looped = data.is_looped;
        anim.loop_count = data.loop_count;
        for track in data.tracks {
            if anim.track_index(track.name()).is_some() {
                log::warn!(
                    "animation '{}': ignoring repeated track '{}'",
                    anim.name,
                    track.name()
                );
                continue;
            }
            anim.tracks.push(track);
        }
        anim
    }
}

impl From<Animation> for AnimationData {
    fn from(anim: Animation) -> Self {
        AnimationData {
            name: anim.name,
            length: anim.length,
            fps: anim.fps,
            is_looped: anim.is_looped,
            loop_count: anim.loop_count,
            tracks: anim.tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::KeyFrame;
    use crate::value::Value;

    #[test]
    fn length_is_clamped() {
        assert_eq!(Animation::new("a", -50.0).length(), 0.0);
        assert_eq!(Animation::new("a", f32::NAN).length(), 0.0);
        let mut anim = Animation::new("a", 100.0);
        anim.set_length(-1.0);
        assert_eq!(anim.length(), 0.0);
        anim.set_fps(0.0);
        assert_eq!(anim.fps(), 1.0);
    }

    #[test]
    fn get_or_create_checks_kind() {
        let mut anim = Animation::new("walk", 1000.0);
        anim.get_or_create_track("Position", ValueKind::Vector2, InterpolationMode::Linear)
            .unwrap()
            .add(KeyFrame::new(0.0, [0.0, 0.0]))
            .unwrap();

        let again = anim
            .get_or_create_track("Position", ValueKind::Vector2, InterpolationMode::None)
            .unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again.interpolation_mode(), InterpolationMode::Linear);

        let err = anim
            .get_or_create_track("Position", ValueKind::Single, InterpolationMode::Linear)
            .unwrap_err();
        assert!(matches!(err, AnimationError::TypeMismatch { .. }));

        let err = anim
            .get_or_create_track("Frame", ValueKind::Texture2D, InterpolationMode::Spline)
            .unwrap_err();
        assert!(matches!(err, AnimationError::UnsupportedInterpolation { .. }));
        assert_eq!(anim.tracks().len(), 1);
    }

    #[test]
    fn track_names_are_case_sensitive() {
        let mut anim = Animation::new("walk", 1000.0);
        anim.get_or_create_track("Position", ValueKind::Vector2, InterpolationMode::Linear)
            .unwrap();
        // A differently cased name is a new track, so its kind is not checked
        // against the first.
        anim.get_or_create_track("position", ValueKind::Single, InterpolationMode::Linear)
            .unwrap();
        assert_eq!(anim.tracks().len(), 2);
        assert_eq!(anim.track("Position").unwrap().kind(), ValueKind::Vector2);
        assert_eq!(anim.track("position").unwrap().kind(), ValueKind::Single);
        assert!(anim.track("POSITION").is_none());
    }

    #[test]
    fn remove_and_prune() {
        let mut anim = Animation::new("a", 100.0);
        anim.get_or_create_track("Empty", ValueKind::Single, InterpolationMode::Linear)
            .unwrap();
        anim.get_or_create_track("Full", ValueKind::Single, InterpolationMode::Linear)
            .unwrap()
            .add(KeyFrame::new(0.0, 1.0))
            .unwrap();
        assert_eq!(anim.prune_empty_tracks(), 1);
        assert!(anim.track("Empty").is_none());

        assert!(anim.remove_track("Missing").unwrap_err().is_not_found());
        assert_eq!(anim.remove_track("Full").unwrap().len(), 1);
        assert!(anim.tracks().is_empty());
    }

    #[test]
    fn clone_copies_everything_independently() {
        let mut anim = Animation::new("spin", 2000.0);
        anim.set_looped(true);
        anim.set_loop_count(3);
        let track = anim
            .get_or_create_track("Angle", ValueKind::Single, InterpolationMode::Spline)
            .unwrap();
        track.add(KeyFrame::new(0.0, 0.0)).unwrap();
        track.add(KeyFrame::new(2000.0, 360.0)).unwrap();

        let mut copy = anim.clone();
        assert_eq!(copy, anim);
        copy.track_mut("Angle")
            .unwrap()
            .add(KeyFrame::new(2000.0, 90.0))
            .unwrap();
        assert_eq!(
            anim.track("Angle").unwrap().keyframes()[1].value,
            Value::Single(360.0)
        );
    }

    #[test]
    fn deserialize_clamps_and_defaults() {
        let anim: Animation =
            serde_json::from_str(r#"{ "name": "x", "length": -10.0 }"#).unwrap();
        assert_eq!(anim.length(), 0.0);
        assert_eq!(anim.fps(), DEFAULT_FPS);
        assert!(!anim.is_looped());
        assert!(anim.tracks().is_empty());
    }
}
