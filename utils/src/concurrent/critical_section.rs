//! Mutual exclusion over a region of code, backed by the platform's native lock.
//!
//! The backend is chosen at build time: `pthread_mutex_t` on unix targets, `CRITICAL_SECTION` on
//! windows. With the `critical-section` feature disabled every operation compiles to nothing.

mod error;

pub use error::{CriticalSectionError, NativeOperation};

#[cfg(feature = "critical-section")]
mod backend;
#[cfg(feature = "critical-section")]
mod section;

#[cfg(feature = "critical-section")]
pub use backend::CriticalSectionBackend;
#[cfg(feature = "critical-section")]
pub use section::{CriticalSection, CriticalSectionGuard};

#[cfg(all(feature = "critical-section", unix))]
mod pthread;
#[cfg(all(feature = "critical-section", unix))]
pub use pthread::PthreadMutex;
/// Backend compiled in for the current target.
#[cfg(all(feature = "critical-section", unix))]
pub type NativeCriticalSection = PthreadMutex;

#[cfg(all(feature = "critical-section", windows))]
mod win32;
#[cfg(all(feature = "critical-section", windows))]
pub use win32::Win32CriticalSection;
/// Backend compiled in for the current target.
#[cfg(all(feature = "critical-section", windows))]
pub type NativeCriticalSection = Win32CriticalSection;

#[cfg(all(feature = "critical-section", not(any(unix, windows))))]
compile_error!("the `critical-section` feature needs a unix or windows target; disable it to build the no-op variant");

#[cfg(not(feature = "critical-section"))]
mod noop;
#[cfg(not(feature = "critical-section"))]
pub use noop::{CriticalSection, CriticalSectionGuard};
