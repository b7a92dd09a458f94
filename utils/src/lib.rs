//! Synchronization utilities shared by the bbclient logging pipeline.
//!
//! The crate currently provides [`CriticalSection`], a mutual-exclusion primitive backed by the
//! host's native facility (`pthread_mutex_t` on unix, `CRITICAL_SECTION` on windows). Building
//! without the `critical-section` feature swaps it for a zero-sized no-op with the same API so
//! callers need no conditional compilation of their own.

pub mod concurrent;

pub use concurrent::{CriticalSection, CriticalSectionError, CriticalSectionGuard, NativeOperation};
#[cfg(feature = "critical-section")]
pub use concurrent::{CriticalSectionBackend, NativeCriticalSection};
