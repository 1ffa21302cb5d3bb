//! Cache Mode Recorders
//!
//! | Recorder | Description |
//! |----------|-------------|
//! | [`PrometheusModeRecorder`] | `<namespace>_responses{mode}` counter in a private registry |
//! | [`InMemoryModeRecorder`] | Plain counters, for tests and the CLI summary |

pub mod in_memory;
#[cfg(feature = "metrics-prometheus")]
pub mod prometheus_recorder;

pub use in_memory::InMemoryModeRecorder;
#[cfg(feature = "metrics-prometheus")]
pub use prometheus_recorder::PrometheusModeRecorder;
