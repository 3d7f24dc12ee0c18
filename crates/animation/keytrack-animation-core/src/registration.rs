//! Track registrations: the named, typed slots a bound object exposes.
//!
//! Hosts usually declare them once per object type:
//!
//! ```
//! use once_cell::sync::Lazy;
//! use keytrack_animation_core::{InterpolationMode, TrackRegistration, ValueKind};
//!
//! static POSITION: Lazy<TrackRegistration> = Lazy::new(|| {
//!     TrackRegistration::new("Position", ValueKind::Vector2, InterpolationMode::Linear)
//! });
//! assert_eq!(POSITION.name(), "Position");
//! ```

use hashbrown::{HashMap, HashSet};

use crate::error::AnimationError;
use crate::ids::TrackId;
use crate::interp::InterpolationMode;
use crate::value::ValueKind;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackRegistration {
    id: TrackId,
    name: String,
    kind: ValueKind,
    default_mode: InterpolationMode,
}

impl TrackRegistration {
    /// Declare a slot with a fresh process-unique id.
    ///
    /// A default mode the kind cannot use falls back to `Linear`.
    pub fn new(name: impl Into<String>, kind: ValueKind, default_mode: InterpolationMode) -> Self {
        let name = name.into();
        let default_mode = if kind.supports(default_mode) {
            default_mode
        } else {
            log::debug!(
                "registration '{}': {} cannot use {} interpolation, defaulting to linear",
                name,
                kind.name(),
                default_mode.name()
            );
            InterpolationMode::Linear
        };
        Self {
            id: TrackId::next(),
            name,
            kind,
            default_mode,
        }
    }

    #[inline]
    pub fn id(&self) -> TrackId {
        self.id
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
    pub fn default_mode(&self) -> InterpolationMode {
        self.default_mode
    }

    #[inline]
    pub fn supported_modes(&self) -> &'static [InterpolationMode] {
        self.kind.supported_modes()
    }
}

/// Ordered registrations for one controller; ids and (name, kind) pairs are unique.
#[derive(Clone, Debug, Default)]
pub struct RegistrationTable {
    entries: Vec<TrackRegistration>,
    by_id: HashMap<TrackId, usize>,
    names: HashSet<(String, ValueKind)>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration, returning its index in the table.
    pub fn register(&mut self, registration: TrackRegistration) -> Result<usize> {
        let key = (registration.name.clone(), registration.kind);
        if self.by_id.contains_key(&registration.id) || self.names.contains(&key) {
            return Err(AnimationError::DuplicateTrack {
                id: registration.id,
                name: registration.name,
            });
        }
        let index = self.entries.len();
        self.by_id.insert(registration.id, index);
        self.names.insert(key);
        self.entries.push(registration);
        Ok(index)
    }

    pub fn get(&self, id: TrackId) -> Option<&TrackRegistration> {
        self.by_id.get(&id).map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn as_slice(&self) -> &[TrackRegistration] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackRegistration> + '_ {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
