use core::cmp;

use super::Vector;
use crate::alloc::AllocateError;

impl<T: Clone> Vector<T> {
  /// Copies the vector into new storage sized exactly to its length.
  pub fn try_clone(&self) -> Result<Self, AllocateError> {
    let mut copy = Self::try_with_capacity(self.length)?;
    copy.growth_strategy = self.growth_strategy;
    copy.extend_cloned(self);
    Ok(copy)
  }

  /// Makes `self` a copy of `source`.
  ///
  /// If `source` fits in the current capacity, the existing storage is reused: the overlapping prefix is assigned
  /// with [Clone::clone_from], then the rest is either cloned in or dropped. A panicking clone leaves a consistent
  /// vector holding whatever was assigned so far.
  ///
  /// Otherwise a full copy is built first and swapped in, so an allocation failure or a panicking clone leaves `self`
  /// exactly as it was.
  pub fn try_assign_from(&mut self, source: &Self) -> Result<(), AllocateError> {
    if source.length > self.storage.capacity() {
      let mut copy = source.try_clone()?;
      copy.growth_strategy = self.growth_strategy;
      self.swap(&mut copy);
      return Ok(());
    }

    let overlap = cmp::min(self.length, source.length);
    for (destination, value) in self[..overlap].iter_mut().zip(&source[..overlap]) {
      destination.clone_from(value);
    }

    if self.length < source.length {
      self.extend_cloned(&source[overlap..]);
    } else {
      self.truncate(source.length);
    }

    Ok(())
  }

  /// Clones `values` onto the end. The capacity must already be sufficient.
  fn extend_cloned(&mut self, values: &[T]) {
    debug_assert!(self.storage.capacity() - self.length >= values.len());

    for value in values {
      let value = value.clone();
      // Safety: the slot is allocated and uninitialized
      unsafe { self.storage.slot(self.length).write(value) };
      self.length += 1;
    }
  }
}

impl<T: Clone> Clone for Vector<T> {
  fn clone(&self) -> Self {
    self.try_clone().unwrap_or_else(|error| error.handle())
  }

  fn clone_from(&mut self, source: &Self) {
    self.try_assign_from(source).unwrap_or_else(|error| error.handle())
  }
}
