//! Interpolation modes and helpers.
//!
//! `None` holds the previous key, `Linear` blends component-wise (NLERP for
//! quaternions), `Spline` evaluates a Catmull-Rom curve through every key.

pub mod functions;
pub mod spline;

use serde::{Deserialize, Serialize};

pub use spline::SplineCurve;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    /// Step: always the previous key's value.
    None,
    #[default]
    Linear,
    Spline,
}

impl InterpolationMode {
    pub fn name(self) -> &'static str {
        match self {
            InterpolationMode::None => "none",
            InterpolationMode::Linear => "linear",
            InterpolationMode::Spline => "spline",
        }
    }
}
