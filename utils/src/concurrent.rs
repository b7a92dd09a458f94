pub mod critical_section;

pub use critical_section::{CriticalSection, CriticalSectionError, CriticalSectionGuard, NativeOperation};
#[cfg(feature = "critical-section")]
pub use critical_section::{CriticalSectionBackend, NativeCriticalSection};
