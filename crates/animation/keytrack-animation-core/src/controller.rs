//! Animation controller: owns one bound object and drives it from a clip.
//!
//! Values reach the object through [`TrackApplier`], one hook per value kind.
//! Implementations match `registration.id()` against their own registered ids
//! and write the corresponding field; nothing is looked up by name per tick.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::config::Config;
use crate::playback::{PlaybackState, PlayerState};
use crate::registration::{RegistrationTable, TrackRegistration};
use crate::value::{Rect, TextureKey, Value};
use crate::Result;

/// Writes sampled values onto a bound object of type `T`.
///
/// Every hook defaults to doing nothing, so an applier only overrides the kinds
/// it registered.
#[allow(unused_variables)]
pub trait TrackApplier<T> {
    /// Slots this applier understands. Registered when the controller is built.
    fn registrations(&self) -> Vec<TrackRegistration>;

    fn on_single_update(&mut self, registration: &TrackRegistration, target: &mut T, value: f32) {}

    fn on_vector2_update(&mut self, registration: &TrackRegistration, target: &mut T, value: [f32; 2]) {}

    fn on_vector3_update(&mut self, registration: &TrackRegistration, target: &mut T, value: [f32; 3]) {}

    fn on_vector4_update(&mut self, registration: &TrackRegistration, target: &mut T, value: [f32; 4]) {}

    fn on_rectangle_update(&mut self, registration: &TrackRegistration, target: &mut T, value: Rect) {}

    /// RGBA.
    fn on_color_update(&mut self, registration: &TrackRegistration, target: &mut T, value: [f32; 4]) {}

    fn on_texture2d_update(
        &mut self,
        registration: &TrackRegistration,
        target: &mut T,
        value: &TextureKey,
    ) {
    }

    /// Normalized (x, y, z, w).
    fn on_quaternion_update(
        &mut self,
        registration: &TrackRegistration,
        target: &mut T,
        value: [f32; 4],
    ) {
    }
}

fn dispatch<T, A: TrackApplier<T>>(
    applier: &mut A,
    registration: &TrackRegistration,
    target: &mut T,
    value: Value,
) {
    match value {
        Value::Single(v) => applier.on_single_update(registration, target, v),
        Value::Vector2(v) => applier.on_vector2_update(registration, target, v),
        Value::Vector3(v) => applier.on_vector3_update(registration, target, v),
        Value::Vector4(v) => applier.on_vector4_update(registration, target, v),
        Value::Rectangle(r) => applier.on_rectangle_update(registration, target, r),
        Value::Color(c) => applier.on_color_update(registration, target, c),
        Value::Texture2D(t) => applier.on_texture2d_update(registration, target, &t),
        Value::Quaternion(q) => applier.on_quaternion_update(registration, target, q),
    }
}

/// Playback notifications, drained by the host with [`AnimationController::drain_events`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    Started { animation: String },
    /// One or more loop boundaries were crossed; `iteration` is the running count.
    Looped { iteration: u32 },
    Finished { animation: String },
    Stopped,
    Paused,
    Resumed,
}

/// Registration index paired with the clip track it drives.
#[derive(Clone, Copy, Debug)]
struct Binding {
    registration: usize,
    track: usize,
}

pub struct AnimationController<T, A> {
    target: T,
    applier: A,
    registrations: RegistrationTable,
    playback: PlaybackState,
    animation: Option<Arc<Animation>>,
    bindings: Vec<Binding>,
    config: Config,
    events: VecDeque<PlaybackEvent>,
}

impl<T, A: TrackApplier<T>> AnimationController<T, A> {
    pub fn new(target: T, applier: A) -> Result<Self> {
        Self::with_config(target, applier, Config::default())
    }

    /// Build a controller and register every slot the applier declares.
    pub fn with_config(target: T, applier: A, config: Config) -> Result<Self> {
        let mut registrations = RegistrationTable::new();
        for registration in applier.registrations() {
            registrations.register(registration)?;
        }
        Ok(Self {
            target,
            applier,
            registrations,
            playback: PlaybackState::with_speed(config.default_speed),
            animation: None,
            bindings: Vec::new(),
            config,
            events: VecDeque::new(),
        })
    }

    /// Add a slot after construction. A playing clip is rebound so the slot takes effect.
    pub fn register_track(&mut self, registration: TrackRegistration) -> Result<()> {
        self.registrations.register(registration)?;
        if self.animation.is_some() {
            self.bind();
        }
        Ok(())
    }

    #[inline]
    pub fn registrations(&self) -> &RegistrationTable {
        &self.registrations
    }

    /// Start `animation` from time 0 and apply its first frame right away.
    pub fn play(&mut self, animation: Arc<Animation>) {
        log::debug!(
            "play '{}' ({} ms, looped: {}, loop_count: {})",
            animation.name(),
            animation.length(),
            animation.is_looped(),
            animation.loop_count()
        );
        let name = animation.name().to_string();
        self.animation = Some(animation);
        self.playback.rewind();
        self.playback.state = PlayerState::Playing;
        self.bind();
        self.apply_frame();
        self.push_event(PlaybackEvent::Started { animation: name });
    }

    /// Advance playback by `delta_seconds` of host time and apply the new frame.
    pub fn advance(&mut self, delta_seconds: f32) {
        if !self.playback.state.is_playing() {
            return;
        }
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        let outcome = self.playback.step(animation.timing(), delta_seconds);
        log::trace!(
            "advance '{}' by {}s -> {} ms",
            animation.name(),
            delta_seconds,
            self.playback.time
        );
        let finished_name = outcome.finished.then(|| animation.name().to_string());

        if outcome.wraps > 0 {
            self.push_event(PlaybackEvent::Looped {
                iteration: self.playback.loops_elapsed,
            });
        }
        self.apply_frame();

        if let Some(name) = finished_name {
            log::debug!("'{}' finished at {} ms", name, self.playback.time);
            self.playback.state = PlayerState::Stopped;
            self.push_event(PlaybackEvent::Finished { animation: name });
        }
    }

    /// Stop playback, release the clip and rewind.
    pub fn stop(&mut self) {
        let was_active =
            self.animation.is_some() || self.playback.state != PlayerState::Stopped;
        self.playback.state = PlayerState::Stopped;
        self.playback.rewind();
        self.animation = None;
        self.bindings.clear();
        if was_active {
            log::debug!("stopped");
            self.push_event(PlaybackEvent::Stopped);
        }
    }

    /// Rewind to time 0 without changing state; re-applies the first frame if a clip is assigned.
    pub fn reset(&mut self) {
        self.playback.rewind();
        self.apply_frame();
    }

    /// Returns false unless playback was running.
    pub fn pause(&mut self) -> bool {
        if self.playback.state != PlayerState::Playing {
            return false;
        }
        self.playback.state = PlayerState::Paused;
        self.push_event(PlaybackEvent::Paused);
        true
    }

    /// Returns false unless playback was paused.
    pub fn resume(&mut self) -> bool {
        if self.playback.state != PlayerState::Paused {
            return false;
        }
        self.playback.state = PlayerState::Playing;
        self.push_event(PlaybackEvent::Resumed);
        true
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.playback.time
    }

    /// Seek to `ms` and apply that frame when a clip is assigned.
    pub fn set_current_time(&mut self, ms: f32) {
        match self.animation.as_ref() {
            Some(animation) => {
                self.playback.seek(animation.timing(), ms);
                self.apply_frame();
            }
            None => {
                self.playback.time = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
            }
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.playback.speed
    }

    /// Non-finite speeds are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.playback.speed = speed;
        } else {
            log::warn!("ignoring non-finite playback speed {}", speed);
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback.state.is_playing()
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.playback.state
    }

    #[inline]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[inline]
    pub fn loops_elapsed(&self) -> u32 {
        self.playback.loops_elapsed
    }

    #[inline]
    pub fn current_animation(&self) -> Option<&Arc<Animation>> {
        self.animation.as_ref()
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    #[inline]
    pub fn applier(&self) -> &A {
        &self.applier
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: PlaybackEvent) {
        if self.config.max_events == 0 {
            return;
        }
        while self.events.len() >= self.config.max_events {
            if let Some(dropped) = self.events.pop_front() {
                log::warn!("event queue full, dropping {:?}", dropped);
            }
        }
        self.events.push_back(event);
    }

    /// Pair every registration with the clip track of the same name.
    ///
    /// Empty and disabled tracks are left unbound; a kind mismatch is logged
    /// and skipped.
    fn bind(&mut self) {
        self.bindings.clear();
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        for (ri, registration) in self.registrations.iter().enumerate() {
            let Some(ti) = animation.track_index(registration.name()) else {
                continue;
            };
            let track = &animation.tracks()[ti];
            if track.kind() != registration.kind() {
                log::warn!(
                    "track '{}' in '{}' is {}, registration expects {}",
                    track.name(),
                    animation.name(),
                    track.kind().name(),
                    registration.kind().name()
                );
                continue;
            }
            if track.is_empty() || !track.is_enabled() {
                continue;
            }
            self.bindings.push(Binding {
                registration: ri,
                track: ti,
            });
        }
        log::debug!(
            "bound {} of {} registrations to '{}'",
            self.bindings.len(),
            self.registrations.len(),
            animation.name()
        );
    }

    fn apply_frame(&mut self) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        let time = self.playback.time;
        let registrations = self.registrations.as_slice();
        for binding in &self.bindings {
            let registration = &registrations[binding.registration];
            if let Some(value) = animation.tracks()[binding.track].sample(time) {
                dispatch(&mut self.applier, registration, &mut self.target, value);
            }
        }
    }
}
