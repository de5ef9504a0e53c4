//! Time-bounded suppression lease and the per-frame scroll throttle.
//!
//! The lease stores an expiry timestamp rather than a flag, so it lapses on
//! its own once the host clock passes the deadline even if the release timer
//! never fires. Time is passed in explicitly as milliseconds, which lets tests
//! advance a virtual clock.

#[cfg(test)]
#[path = "lease_test.rs"]
mod lease_test;

/// Suppresses scroll-driven recomputation while an explicit navigation settles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuppressionLease {
    expires_at_ms: Option<f64>,
}

impl SuppressionLease {
    /// Start (or restart) the lease for `duration_ms` from `now_ms`.
    pub fn arm(&mut self, now_ms: f64, duration_ms: f64) {
        self.expires_at_ms = Some(now_ms + duration_ms.max(0.0));
    }

    #[must_use]
    pub fn is_active(&self, now_ms: f64) -> bool {
        self.expires_at_ms.is_some_and(|deadline| now_ms < deadline)
    }

    /// Drop the lease. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        self.expires_at_ms.take().is_some()
    }

    #[must_use]
    pub fn expires_at_ms(&self) -> Option<f64> {
        self.expires_at_ms
    }
}

/// Coalesces bursts of scroll events into one computation per animation frame.
///
/// `request` returns `true` when the caller should schedule a frame; further
/// requests are absorbed until `run` marks the frame as handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn run(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
