//! Cache Mode Recorder Port
//!
//! Defines the counter sink incremented once per completed fetch.

use crate::value_objects::CacheMode;

/// Counter keyed by [`CacheMode`]
pub trait ModeRecorder: Send + Sync {
    /// Increment the counter for `mode`
    fn record(&self, mode: CacheMode);
}
