//! Error types for authoring and controller construction.
//!
//! Playback never produces these: anomalies during `advance` (missing tracks,
//! zero-length clips, exhausted loop budgets) are handled by policy instead.

use serde::{Deserialize, Serialize};

use crate::ids::TrackId;
use crate::interp::InterpolationMode;
use crate::value::ValueKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// A keyframe or track kind does not match the declared kind
    #[error("Type mismatch on track '{track}': expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        track: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Two registrations collide on one controller
    #[error("Duplicate track registration: {name} ({id:?})")]
    DuplicateTrack { id: TrackId, name: String },

    /// No keyframe at the exact requested time
    #[error("Keyframe not found at {time} ms in track '{track}'")]
    KeyframeNotFound { track: String, time: f32 },

    /// No track with the requested name
    #[error("Track not found: {name}")]
    TrackNotFound { name: String },

    /// The kind cannot be evaluated with the requested mode
    #[error("Track '{track}' of kind {kind:?} does not support {mode:?} interpolation")]
    UnsupportedInterpolation {
        track: String,
        kind: ValueKind,
        mode: InterpolationMode,
    },

    /// Blank animation or track name
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },
}

impl AnimationError {
    /// Whether this error belongs to the "not found" family.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KeyframeNotFound { .. } | Self::TrackNotFound { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } | Self::UnsupportedInterpolation { .. } => "validation",
            Self::DuplicateTrack { .. } => "registration",
            Self::KeyframeNotFound { .. } | Self::TrackNotFound { .. } => "data",
            Self::InvalidName { .. } => "authoring",
        }
    }
}
