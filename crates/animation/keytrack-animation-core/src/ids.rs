//! Track identifiers.
//!
//! Ids are process-unique and handed out by a monotonic counter, so two
//! registrations created anywhere in the program never compare equal unless
//! one was cloned from the other.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub u32);

static NEXT_TRACK_ID: AtomicU32 = AtomicU32::new(0);

impl TrackId {
    /// Allocate the next process-unique id.
    #[inline]
    pub fn next() -> Self {
        TrackId(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let a = TrackId::next();
        let b = TrackId::next();
        let c = TrackId::next();
        assert!(a < b && b < c);
    }
}
