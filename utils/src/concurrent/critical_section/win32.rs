use std::cell::UnsafeCell;
use std::mem;

use windows_sys::Win32::System::Threading::{
  DeleteCriticalSection, EnterCriticalSection, InitializeCriticalSection, LeaveCriticalSection, CRITICAL_SECTION,
};

use crate::concurrent::critical_section::{CriticalSectionBackend, CriticalSectionError};

/// Win32 `CRITICAL_SECTION`.
///
/// The native object is recursive, but `CriticalSection` rejects same-thread re-entry before it
/// ever reaches `EnterCriticalSection`, so callers see the same semantics as on unix.
pub struct Win32CriticalSection {
  inner: Box<UnsafeCell<CRITICAL_SECTION>>,
}

// The critical section is only touched through the Win32 API, which is thread-safe.
unsafe impl Send for Win32CriticalSection {}
unsafe impl Sync for Win32CriticalSection {}

unsafe impl CriticalSectionBackend for Win32CriticalSection {
  const NAME: &'static str = "CRITICAL_SECTION";

  fn create() -> Result<Self, CriticalSectionError> {
    // InitializeCriticalSection cannot fail on Vista and later.
    let inner: Box<UnsafeCell<CRITICAL_SECTION>> = Box::new(UnsafeCell::new(unsafe { mem::zeroed() }));
    unsafe { InitializeCriticalSection(inner.get()) };
    Ok(Self { inner })
  }

  fn destroy(self) -> Result<(), CriticalSectionError> {
    unsafe { DeleteCriticalSection(self.inner.get()) };
    Ok(())
  }

  fn acquire(&self) {
    unsafe { EnterCriticalSection(self.inner.get()) };
  }

  unsafe fn release(&self) {
    LeaveCriticalSection(self.inner.get());
  }
}
