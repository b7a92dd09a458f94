use std::marker::PhantomData;

use crate::concurrent::critical_section::CriticalSectionError;

/// Stand-in used when the `critical-section` feature is off. Every operation is empty.
#[derive(Debug, Default)]
pub struct CriticalSection;

impl CriticalSection {
  pub const fn new() -> Self {
    Self
  }

  pub const fn named(_name: &'static str) -> Self {
    Self
  }

  pub fn name(&self) -> Option<&'static str> {
    None
  }

  pub fn backend_name(&self) -> &'static str {
    "noop"
  }

  pub fn is_initialized(&self) -> bool {
    false
  }

  #[inline(always)]
  pub fn try_init(&mut self) -> Result<(), CriticalSectionError> {
    Ok(())
  }

  #[inline(always)]
  pub fn init(&mut self) {}

  #[inline(always)]
  pub fn try_shutdown(&mut self) -> Result<(), CriticalSectionError> {
    Ok(())
  }

  #[inline(always)]
  pub fn shutdown(&mut self) {}

  #[inline(always)]
  pub fn lock(&self) -> CriticalSectionGuard<'_> {
    CriticalSectionGuard { _section: PhantomData }
  }

  #[inline(always)]
  pub fn unlock(&self, _guard: CriticalSectionGuard<'_>) {}

  #[inline(always)]
  pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
    f()
  }
}

#[derive(Debug)]
#[must_use = "the critical section is released as soon as the guard is dropped"]
pub struct CriticalSectionGuard<'a> {
  _section: PhantomData<(&'a CriticalSection, *const ())>,
}

impl CriticalSectionGuard<'_> {
  #[inline(always)]
  pub fn unlock(self) {}
}
