//! Synchronization primitives for search control.
//!
//! The search itself is single-threaded; these types let another thread
//! cancel it or move its deadline while it runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A thread-safe stop flag for cancelling a search.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock budget for one search.
///
/// The deadline sits behind a mutex so a controller thread can extend or
/// cut it short while the search polls it.
#[derive(Debug)]
pub struct SearchClock {
    start: Instant,
    deadline: Mutex<Option<Instant>>,
}

impl SearchClock {
    /// Clock with no deadline
    #[must_use]
    pub fn unlimited() -> Self {
        SearchClock {
            start: Instant::now(),
            deadline: Mutex::new(None),
        }
    }

    /// Clock expiring `budget` from now
    #[must_use]
    pub fn with_budget(budget: Duration) -> Self {
        let start = Instant::now();
        SearchClock {
            start,
            deadline: Mutex::new(Some(start + budget)),
        }
    }

    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        SearchClock {
            start: Instant::now(),
            deadline: Mutex::new(Some(deadline)),
        }
    }

    /// Replace the deadline (`None` removes it).
    pub fn set_deadline(&self, deadline: Option<Instant>) {
        *self.deadline.lock() = deadline;
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        *self.deadline.lock()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    #[must_use]
    pub fn expired(&self) -> bool {
        match *self.deadline.lock() {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}
