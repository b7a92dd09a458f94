use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Native call that reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOperation {
  Create,
  Destroy,
}

impl Display for NativeOperation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      NativeOperation::Create => write!(f, "create"),
      NativeOperation::Destroy => write!(f, "destroy"),
    }
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CriticalSectionError {
  #[error("critical section is already initialized")]
  AlreadyInitialized,
  #[error("critical section is not initialized")]
  NotInitialized,
  #[error("{backend} {operation} failed with code {code}")]
  Native {
    backend: &'static str,
    operation: NativeOperation,
    code: i32,
  },
}

impl CriticalSectionError {
  #[cfg_attr(any(not(feature = "critical-section"), windows), allow(dead_code))]
  pub(crate) fn native(backend: &'static str, operation: NativeOperation, code: i32) -> Self {
    Self::Native {
      backend,
      operation,
      code,
    }
  }
}
