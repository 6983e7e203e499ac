use core::ptr;

use super::Vector;

impl<T> Vector<T> {
  /// Removes and returns the value at `index`, shifting every later value down by one. Never reallocates.
  ///
  /// Panics if `index >= len`.
  pub fn remove(&mut self, index: usize) -> T {
    assert!(index < self.length, "removal index (is {index}) should be < len (is {})", self.length);

    // Safety: the slot holds a live value; it is read out before the tail is shifted over it, and the vacated last
    // slot is dropped from the live range without being dropped in place.
    unsafe {
      let slot = self.storage.slot(index);
      let value = slot.read();
      ptr::copy(slot.add(1), slot, self.length - index - 1);
      self.length -= 1;
      value
    }
  }

  /// Drops the value at `index` and returns the index of its successor, which is `len` if it was the last value.
  pub fn erase(&mut self, index: usize) -> usize {
    // the value is dropped only after the vector is consistent again
    drop(self.remove(index));
    index
  }

  pub fn pop(&mut self) -> Option<T> {
    if self.length == 0 {
      return None;
    }

    self.length -= 1;
    // Safety: the slot held the last live value and is now outside the live range
    Some(unsafe { self.storage.slot(self.length).read() })
  }

  /// Drops every value from `new_length` on. Does nothing if `new_length >= len`; the capacity is kept.
  pub fn truncate(&mut self, new_length: usize) {
    if new_length >= self.length {
      return;
    }

    let tail = ptr::slice_from_raw_parts_mut(self.storage.slot(new_length), self.length - new_length);
    // shrink first so a panicking drop cannot drop the tail twice
    self.length = new_length;
    // Safety: the tail held live values and is no longer part of the live range
    unsafe { ptr::drop_in_place(tail) };
  }

  pub fn clear(&mut self) {
    self.truncate(0);
  }
}
