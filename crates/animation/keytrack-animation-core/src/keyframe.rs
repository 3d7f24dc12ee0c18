use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueKind};

/// A (time, value) sample on a track. Time is in milliseconds from clip start.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyFrame {
    pub time: f32,
    pub value: Value,
}

impl KeyFrame {
    /// Create a keyframe; negative or non-finite times are clamped to 0.
    #[inline]
    pub fn new(time: f32, value: impl Into<Value>) -> Self {
        Self {
            time: sanitize_time(time),
            value: value.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

#[inline]
pub(crate) fn sanitize_time(t: f32) -> f32 {
    // `t > 0.0` is false for -0.0, so every zero comes back as +0.0.
    if t.is_finite() && t > 0.0 {
        t
    } else {
        0.0
    }
}
