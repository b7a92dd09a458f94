use std::cell::UnsafeCell;
use std::ptr;

use crate::concurrent::critical_section::{CriticalSectionBackend, CriticalSectionError, NativeOperation};

/// `pthread_mutex_t` with default attributes (non-recursive).
///
/// The mutex is boxed: POSIX forbids moving a mutex once it has been initialized.
pub struct PthreadMutex {
  inner: Box<UnsafeCell<libc::pthread_mutex_t>>,
}

// The mutex is only touched through the pthread API, which is thread-safe.
unsafe impl Send for PthreadMutex {}
unsafe impl Sync for PthreadMutex {}

unsafe impl CriticalSectionBackend for PthreadMutex {
  const NAME: &'static str = "pthread_mutex_t";

  fn create() -> Result<Self, CriticalSectionError> {
    let inner = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));
    let rc = unsafe { libc::pthread_mutex_init(inner.get(), ptr::null()) };
    if rc != 0 {
      return Err(CriticalSectionError::native(Self::NAME, NativeOperation::Create, rc));
    }
    Ok(Self { inner })
  }

  fn destroy(self) -> Result<(), CriticalSectionError> {
    let rc = unsafe { libc::pthread_mutex_destroy(self.inner.get()) };
    if rc != 0 {
      return Err(CriticalSectionError::native(Self::NAME, NativeOperation::Destroy, rc));
    }
    Ok(())
  }

  fn acquire(&self) {
    let rc = unsafe { libc::pthread_mutex_lock(self.inner.get()) };
    debug_assert_eq!(rc, 0, "pthread_mutex_lock failed");
  }

  unsafe fn release(&self) {
    let rc = libc::pthread_mutex_unlock(self.inner.get());
    debug_assert_eq!(rc, 0, "pthread_mutex_unlock failed");
  }
}
