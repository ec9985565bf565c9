//! Shared claim state for pointer-downs.
//!
//! A single physical pointer-down can reach several nested sensors. Siblings
//! cannot see each other's element-scoped events, so they coordinate through
//! this shared flag: the first sensor to claim it owns the gesture until it
//! releases the claim.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Process-wide marshal state, used by [`CaptureMarshal::global`].
static GLOBAL: Shared = Shared::new();

struct Shared {
    claimed: AtomicBool,
    secondary_taps: AtomicU32,
}

impl Shared {
    const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            secondary_taps: AtomicU32::new(0),
        }
    }
}

#[derive(Clone)]
enum Scope {
    Global,
    Local(Arc<Shared>),
}

/// Handle to a claim flag shared between sensor instances.
///
/// Cloning the handle shares the flag. Sensors built with
/// [`PointerSensor::new`](crate::PointerSensor::new) use the process-wide
/// marshal; [`CaptureMarshal::new`] creates an isolated one.
#[derive(Clone)]
pub struct CaptureMarshal {
    scope: Scope,
}

impl CaptureMarshal {
    /// The process-wide marshal.
    pub const fn global() -> Self {
        Self {
            scope: Scope::Global,
        }
    }

    /// Create a new isolated marshal, unclaimed.
    pub fn new() -> Self {
        Self {
            scope: Scope::Local(Arc::new(Shared::new())),
        }
    }

    fn shared(&self) -> &Shared {
        match &self.scope {
            Scope::Global => &GLOBAL,
            Scope::Local(shared) => shared.as_ref(),
        }
    }

    /// Claim the current pointer-down.
    ///
    /// Fails with [`Error::AlreadyClaimed`] if some sensor already holds it;
    /// callers check [`is_claimed`](Self::is_claimed) first.
    pub fn try_claim(&self) -> Result<()> {
        self.shared()
            .claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| Error::AlreadyClaimed)
    }

    /// Check whether the current pointer-down has been claimed.
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.shared().claimed.load(Ordering::SeqCst)
    }

    /// Release the claim. Safe to call when unclaimed.
    #[inline]
    pub fn release(&self) {
        self.shared().claimed.store(false, Ordering::SeqCst);
    }

    /// Record a release of a non-primary pointer, returning the new count.
    pub fn record_secondary_tap(&self) -> u32 {
        self.shared().secondary_taps.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of non-primary pointer releases observed while capturing.
    #[inline]
    pub fn secondary_taps(&self) -> u32 {
        self.shared().secondary_taps.load(Ordering::SeqCst)
    }
}

impl Default for CaptureMarshal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CaptureMarshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureMarshal")
            .field("global", &matches!(self.scope, Scope::Global))
            .field("claimed", &self.is_claimed())
            .finish()
    }
}
