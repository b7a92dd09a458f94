use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::concurrent::critical_section::{CriticalSectionBackend, CriticalSectionError, NativeCriticalSection};

const NO_HOLDER: usize = 0;

/// Address of a thread-local byte: unique among live threads and never zero.
///
/// The address can be handed to a new thread once its owner exits. If a guard is leaked with
/// `mem::forget` on a thread that then exits, a later thread reusing the address sees itself as
/// the holder and `lock` panics with "re-locked" instead of blocking forever.
fn current_thread_token() -> usize {
  thread_local! {
    static TOKEN: u8 = const { 0 };
  }
  TOKEN.with(|token| token as *const u8 as usize)
}

/// Non-reentrant lock over a native synchronization object.
///
/// A `CriticalSection` starts out uninitialized. [`init`](Self::init) constructs the native
/// object, [`shutdown`](Self::shutdown) releases it, and any number of
/// [`lock`](Self::lock)/[`unlock`](Self::unlock) pairs may happen in between. Both lifecycle
/// operations take `&mut self`, so no thread can hold or wait on the lock while they run.
///
/// Acquisition gives the usual release/acquire guarantee: whatever the previous holder wrote
/// before unlocking is visible to the next holder once `lock` returns.
///
/// Re-locking from the thread that already holds the section panics on every backend, even
/// where the native primitive would allow recursion.
///
/// # Examples
///
/// ```
/// use bbclient_utils_rs::CriticalSection;
///
/// let mut cs: CriticalSection = CriticalSection::named("writer");
/// cs.init();
/// {
///   let _guard = cs.lock();
///   // protected region
/// }
/// cs.shutdown();
/// assert!(!cs.is_initialized());
/// ```
pub struct CriticalSection<B: CriticalSectionBackend = NativeCriticalSection> {
  platform: Option<B>,
  holder: AtomicUsize,
  name: Option<&'static str>,
}

impl<B: CriticalSectionBackend> CriticalSection<B> {
  /// Creates an uninitialized section.
  pub const fn new() -> Self {
    Self {
      platform: None,
      holder: AtomicUsize::new(NO_HOLDER),
      name: None,
    }
  }

  /// Creates an uninitialized section whose name shows up in logs and panic messages.
  pub const fn named(name: &'static str) -> Self {
    Self {
      platform: None,
      holder: AtomicUsize::new(NO_HOLDER),
      name: Some(name),
    }
  }

  pub fn name(&self) -> Option<&'static str> {
    self.name
  }

  pub fn backend_name(&self) -> &'static str {
    B::NAME
  }

  /// Returns `true` between a successful `init` and the following `shutdown`.
  pub fn is_initialized(&self) -> bool {
    self.platform.is_some()
  }

  /// Constructs the native object.
  ///
  /// Fails with [`CriticalSectionError::AlreadyInitialized`] if the section is live, or with
  /// [`CriticalSectionError::Native`] if the OS refuses; either way the section is left as it
  /// was.
  pub fn try_init(&mut self) -> Result<(), CriticalSectionError> {
    if self.platform.is_some() {
      return Err(CriticalSectionError::AlreadyInitialized);
    }
    let platform = B::create()?;
    *self.holder.get_mut() = NO_HOLDER;
    self.platform = Some(platform);
    tracing::debug!(backend = B::NAME, name = ?self.name, "critical section initialized");
    Ok(())
  }

  /// Like [`try_init`](Self::try_init), but treats failure as fatal.
  ///
  /// # Panics
  ///
  /// Panics if the section is already initialized or the native object cannot be constructed.
  pub fn init(&mut self) {
    if let Err(err) = self.try_init() {
      panic!("failed to initialize {}: {err}", self.describe());
    }
  }

  /// Marks the section uninitialized, then destroys the native object.
  pub fn try_shutdown(&mut self) -> Result<(), CriticalSectionError> {
    let platform = self.platform.take().ok_or(CriticalSectionError::NotInitialized)?;
    tracing::debug!(backend = B::NAME, name = ?self.name, "critical section shut down");
    platform.destroy()
  }

  /// Like [`try_shutdown`](Self::try_shutdown), but treats failure as fatal.
  ///
  /// # Panics
  ///
  /// Panics if the section is not initialized or the native object cannot be destroyed.
  pub fn shutdown(&mut self) {
    if let Err(err) = self.try_shutdown() {
      panic!("failed to shut down {}: {err}", self.describe());
    }
  }

  /// Blocks until the calling thread holds the section.
  ///
  /// The section is released when the returned guard is dropped or passed to
  /// [`unlock`](Self::unlock).
  ///
  /// # Panics
  ///
  /// Panics if the section is not initialized, or if the calling thread already holds it.
  pub fn lock(&self) -> CriticalSectionGuard<'_, B> {
    let platform = self.platform();
    let me = current_thread_token();
    // Only this thread ever stores `me`, so a relaxed load cannot report it spuriously.
    if self.holder.load(Ordering::Relaxed) == me {
      panic!("{} re-locked by the thread that holds it", self.describe());
    }
    platform.acquire();
    self.holder.store(me, Ordering::Relaxed);
    CriticalSectionGuard {
      section: self,
      _not_send: PhantomData,
    }
  }

  /// Releases the section held through `guard`.
  ///
  /// # Panics
  ///
  /// Panics if `guard` was handed out by a different section.
  pub fn unlock(&self, guard: CriticalSectionGuard<'_, B>) {
    assert!(
      ptr::eq(guard.section, self),
      "guard passed to unlock belongs to a different critical section"
    );
    drop(guard);
  }

  /// Runs `f` while holding the section.
  pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
    let _guard = self.lock();
    f()
  }

  fn platform(&self) -> &B {
    match &self.platform {
      Some(platform) => platform,
      None => panic!("{} used before init", self.describe()),
    }
  }

  fn describe(&self) -> String {
    match self.name {
      Some(name) => format!("critical section `{name}`"),
      None => "critical section".to_string(),
    }
  }
}

impl<B: CriticalSectionBackend> Default for CriticalSection<B> {
  fn default() -> Self {
    Self::new()
  }
}

impl<B: CriticalSectionBackend> Debug for CriticalSection<B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("CriticalSection")
      .field("name", &self.name)
      .field("backend", &B::NAME)
      .field("initialized", &self.is_initialized())
      .finish()
  }
}

impl<B: CriticalSectionBackend> Drop for CriticalSection<B> {
  fn drop(&mut self) {
    if let Some(platform) = self.platform.take() {
      if let Err(err) = platform.destroy() {
        tracing::error!(error = %err, name = ?self.name, "failed to destroy critical section on drop");
      }
    }
  }
}

/// Proof that the current thread holds a [`CriticalSection`].
///
/// Not `Send`: the native primitives require release on the acquiring thread.
#[must_use = "the critical section is released as soon as the guard is dropped"]
pub struct CriticalSectionGuard<'a, B: CriticalSectionBackend = NativeCriticalSection> {
  section: &'a CriticalSection<B>,
  _not_send: PhantomData<*const ()>,
}

impl<B: CriticalSectionBackend> CriticalSectionGuard<'_, B> {
  pub fn unlock(self) {
    drop(self);
  }
}

impl<B: CriticalSectionBackend> Debug for CriticalSectionGuard<'_, B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("CriticalSectionGuard")
      .field("section", &self.section)
      .finish()
  }
}

impl<B: CriticalSectionBackend> Drop for CriticalSectionGuard<'_, B> {
  fn drop(&mut self) {
    self.section.holder.store(NO_HOLDER, Ordering::Relaxed);
    if let Some(platform) = &self.section.platform {
      // The guard exists only while this thread holds the section.
      unsafe { platform.release() };
    }
  }
}
