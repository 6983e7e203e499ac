mod foreign;

use core::alloc::Layout;

pub use foreign::*;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("overflowed while attempting to calculate layout")]
pub struct OverflowedLayoutCalculation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("allocator is out of memory (requested {} bytes aligned to {})", .layout.size(), .layout.align())]
pub struct OutOfMemory {
  pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocateError {
  #[error("{0}")]
  OverflowedLayoutCalculation(#[from] OverflowedLayoutCalculation),
  #[error("{0}")]
  OutOfMemory(#[from] OutOfMemory),
}

impl AllocateError {
  /// Diverges the way the standard collections do when an infallible method cannot allocate.
  #[cold]
  pub(crate) fn handle(self) -> ! {
    match self {
      AllocateError::OverflowedLayoutCalculation(_) => panic!("capacity overflow"),
      AllocateError::OutOfMemory(OutOfMemory { layout }) => rust_alloc::alloc::handle_alloc_error(layout),
    }
  }
}

/// Calculates the layout of a block holding `element_count` slots of `T`.
///
/// Zero-sized element types always produce a zero-sized layout.
pub fn calculate_layout_for_slots<T>(element_count: usize) -> Result<Layout, OverflowedLayoutCalculation> {
  Layout::array::<T>(element_count).map_err(|_| OverflowedLayoutCalculation)
}
