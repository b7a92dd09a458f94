use crate::concurrent::critical_section::CriticalSectionError;

/// Native synchronization object behind a [`CriticalSection`](super::CriticalSection).
///
/// A backend only has to supply four things: construct, destroy, blocking acquire and release.
/// Lifecycle bookkeeping, holder tracking and guards live in `CriticalSection`.
///
/// # Safety
///
/// Implementors must guarantee that between a returning `acquire` and the matching `release` no
/// other thread returns from `acquire` on the same object, and that `release` synchronizes-with
/// the next successful `acquire` (release/acquire ordering). The object must not rely on its
/// own address staying fixed unless it boxes its state.
pub unsafe trait CriticalSectionBackend: Send + Sync + Sized {
  /// Short name of the native primitive, used in logs and errors.
  const NAME: &'static str;

  /// Constructs the native object, ready to be acquired.
  fn create() -> Result<Self, CriticalSectionError>;

  /// Releases the native object. Never called while the object is held.
  fn destroy(self) -> Result<(), CriticalSectionError>;

  /// Blocks until the calling thread owns the object.
  fn acquire(&self);

  /// Gives up ownership.
  ///
  /// # Safety
  ///
  /// The calling thread must own the object through a prior `acquire`.
  unsafe fn release(&self);
}
