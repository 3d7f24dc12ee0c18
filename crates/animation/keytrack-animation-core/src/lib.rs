//! Keytrack Animation Core (engine-agnostic)
//!
//! Keyframe animation of named object properties. Clips hold typed tracks of
//! sparse keyframes; a controller advances time, samples each bound track with
//! step, linear, or spline interpolation and hands the results to a
//! [`TrackApplier`] that writes them onto the host object.

pub mod animation;
pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod interp;
pub mod keyframe;
pub mod playback;
pub mod registration;
pub mod track;
pub mod value;

// Re-exports for hosts
pub use animation::Animation;
pub use builder::{AnimationBuilder, TrackBuilder};
pub use config::Config;
pub use controller::{AnimationController, PlaybackEvent, TrackApplier};
pub use error::AnimationError;
pub use ids::TrackId;
pub use interp::{InterpolationMode, SplineCurve};
pub use keyframe::KeyFrame;
pub use playback::{ClipTiming, PlaybackState, PlayerState, StepOutcome};
pub use registration::{RegistrationTable, TrackRegistration};
pub use track::{KeyPair, Track};
pub use value::{Rect, TextureKey, TextureRef, Value, ValueKind};

pub type Result<T> = core::result::Result<T, AnimationError>;
