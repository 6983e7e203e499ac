use core::{
  fmt::{self, Debug}, iter::FusedIterator, ptr, slice
};

use super::Vector;
use crate::alloc::RawStorage;

/// An iterator that moves values out of a [Vector], front to back.
pub struct IntoIter<T> {
  storage: RawStorage<T>,
  start: usize,
  end: usize,
}

impl<T> IntoIter<T> {
  /// The values not yet yielded.
  pub fn as_slice(&self) -> &[T] {
    // Safety: slots [start, end) hold live values
    unsafe { slice::from_raw_parts(self.storage.slot(self.start), self.end - self.start) }
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.start == self.end {
      return None;
    }

    // Safety: the slot holds a live value and leaves the live range before anything else can observe it
    let value = unsafe { self.storage.slot(self.start).read() };
    self.start += 1;
    Some(value)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.end - self.start;
    (remaining, Some(remaining))
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  fn next_back(&mut self) -> Option<T> {
    if self.start == self.end {
      return None;
    }

    self.end -= 1;
    // Safety: the slot held the last live value and is now outside the live range
    Some(unsafe { self.storage.slot(self.end).read() })
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
  fn drop(&mut self) {
    let remaining = ptr::slice_from_raw_parts_mut(self.storage.slot(self.start), self.end - self.start);
    self.start = self.end;
    // Safety: the values were never yielded; the storage releases the block afterwards
    unsafe { ptr::drop_in_place(remaining) };
  }
}

impl<T: Debug> Debug for IntoIter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
  }
}

impl<T> IntoIterator for Vector<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  fn into_iter(mut self) -> IntoIter<T> {
    let end = self.length;
    // the emptied vector still drops, but owns nothing anymore
    self.length = 0;
    IntoIter {
      storage: self.storage.take(),
      start: 0,
      end,
    }
  }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> slice::Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> slice::IterMut<'a, T> {
    self.iter_mut()
  }
}

impl<T> Extend<T> for Vector<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    let iter = iter.into_iter();
    let (lower, _) = iter.size_hint();
    self.try_grow_to(self.length.saturating_add(lower)).unwrap_or_else(|error| error.handle());

    for value in iter {
      self.push(value);
    }
  }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
    self.extend(iter.into_iter().copied());
  }
}

impl<T> FromIterator<T> for Vector<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut vector = Self::new();
    vector.extend(iter);
    vector
  }
}

#[cfg(test)]
pub mod tests {
  use core::cell::Cell;
  use std::rc::Rc;

  use crate::alloc::{Vector, types::vec::tests::Tracked};

  #[test]
  fn forward_iteration_visits_live_range() {
    let mut vector = Vector::with_capacity(16);
    vector.extend([3, 1, 4]);

    let mut seen = std::vec::Vec::new();
    for value in &vector {
      seen.push(*value);
    }
    assert_eq!(seen, [3, 1, 4]);

    for value in &mut vector {
      *value *= 2;
    }
    assert_eq!(vector, [6, 2, 8]);
  }

  #[test]
  fn into_iter_yields_from_both_ends() {
    let vector = Vector::from([1, 2, 3, 4]);
    let mut iter = vector.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), &[2, 3]);
    assert_eq!(std::format!("{iter:?}"), "IntoIter([2, 3])");
    assert_eq!(iter.collect::<std::vec::Vec<_>>(), [2, 3]);
  }

  #[test]
  fn dropping_partial_iterator_drops_the_rest() {
    let live = Rc::new(Cell::new(0isize));
    let vector: Vector<_> = (0..5).map(|value| Tracked::new(value, &live)).collect();

    let mut iter = vector.into_iter();
    let first = iter.next();
    assert_eq!(first.as_ref().map(|tracked| tracked.value), Some(0));
    drop(iter);
    assert_eq!(live.get(), 1);
    drop(first);
    assert_eq!(live.get(), 0);
  }

  #[test]
  fn collect_reserves_from_size_hint() {
    let vector: Vector<u32> = (0..100).collect();
    assert_eq!(vector.capacity(), 100);
    assert!(vector.iter().copied().eq(0..100));

    let mut vector = vector;
    vector.extend(&[100, 101]);
    assert_eq!(vector.len(), 102);
    assert_eq!(vector[101], 101);
  }

  #[test]
  fn repeated_small_extends_grow_geometrically() {
    let mut vector = Vector::new();
    let mut reallocations = 0;
    for value in 0..1000u32 {
      let capacity = vector.capacity();
      vector.extend([value]);
      if vector.capacity() != capacity {
        reallocations += 1;
      }
    }

    assert_eq!(vector.len(), 1000);
    assert_eq!(vector.capacity(), 1024);
    assert_eq!(reallocations, 11);
    assert!(vector.iter().copied().eq(0..1000));
  }

  #[test]
  fn collect_without_size_hint_grows() {
    let vector: Vector<u32> = (0..50).filter(|value| value % 5 == 0).collect();
    assert_eq!(vector, [0, 5, 10, 15, 20, 25, 30, 35, 40, 45]);
    assert_eq!(vector.capacity(), 16);
  }
}
