use core::{convert::Infallible, ptr};

use super::{EmplaceError, Vector};
use crate::alloc::AllocateError;

impl<T> Vector<T> {
  /// Constructs a value with `construct` and places it at `index`, shifting every value from `index` on up by one.
  ///
  /// When the vector is full, the new storage is allocated first and the value is constructed directly into it
  /// before any existing value is relocated. When there is room, the value is constructed before any slot is touched.
  /// Either way, a failing allocation or a failing (or panicking) `construct` leaves the vector exactly as it was.
  ///
  /// Panics if `index > len`.
  pub fn try_emplace<E>(
    &mut self,
    index: usize,
    construct: impl FnOnce() -> Result<T, E>,
  ) -> Result<&mut T, EmplaceError<E>> {
    assert!(index <= self.length, "insertion index (is {index}) should be <= len (is {})", self.length);

    if self.length == self.storage.capacity() {
      let storage = self.grow_for_one()?;
      let value = construct().map_err(EmplaceError::Construct)?;

      // Safety: the slot is allocated and uninitialized
      unsafe { storage.slot(index).write(value) };
      self.transfer_around(storage, index);
    } else {
      let value = construct().map_err(EmplaceError::Construct)?;

      // Safety: slot `length` is free, so shifting [index, length) up by one stays inside the block. The duplicated
      // bits at `index` are overwritten without being dropped.
      unsafe {
        let slot = self.storage.slot(index);
        ptr::copy(slot, slot.add(1), self.length - index);
        slot.write(value);
      }
    }

    self.length += 1;
    // Safety: the slot was just initialized
    Ok(unsafe { &mut *self.storage.slot(index) })
  }

  pub fn emplace(&mut self, index: usize, construct: impl FnOnce() -> T) -> &mut T {
    infallible(self.try_emplace(index, || Ok(construct())))
  }

  /// Appends a value constructed by `construct`. Amortized O(1).
  pub fn try_emplace_back<E>(&mut self, construct: impl FnOnce() -> Result<T, E>) -> Result<&mut T, EmplaceError<E>> {
    self.try_emplace(self.length, construct)
  }

  pub fn emplace_back(&mut self, construct: impl FnOnce() -> T) -> &mut T {
    infallible(self.try_emplace_back(|| Ok(construct())))
  }

  /// Inserts `value` at `index`. On failure the vector is unchanged and `value` is dropped.
  pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut T, AllocateError> {
    self.try_emplace(index, || Ok(value)).map_err(allocate_error)
  }

  pub fn insert(&mut self, index: usize, value: T) -> &mut T {
    self.emplace(index, || value)
  }

  pub fn try_push(&mut self, value: T) -> Result<(), AllocateError> {
    self.try_emplace_back(|| Ok(value)).map(|_| ()).map_err(allocate_error)
  }

  pub fn push(&mut self, value: T) {
    self.emplace_back(|| value);
  }
}

fn allocate_error(error: EmplaceError<Infallible>) -> AllocateError {
  match error {
    EmplaceError::Allocate(error) => error,
    EmplaceError::Construct(never) => match never {},
  }
}

fn infallible<T>(result: Result<T, EmplaceError<Infallible>>) -> T {
  result.unwrap_or_else(|error| allocate_error(error).handle())
}

#[cfg(test)]
pub mod tests {
  use core::cell::Cell;
  use std::{panic, rc::Rc};

  use thiserror::Error;

  use crate::alloc::{
    AllocateError, EmplaceError, GrowthStrategy, OverflowedLayoutCalculation, Vector, types::vec::tests::Tracked
  };

  #[derive(Debug, Error, PartialEq)]
  #[error("refused to construct")]
  struct Refused;

  fn filled(length: u32) -> Vector<u32> {
    let mut vector = Vector::new();
    for value in 0..length {
      vector.push(value);
    }
    vector
  }

  #[test]
  fn push_insert_erase_pop() {
    let mut vector = Vector::new();
    vector.push(1);
    vector.push(2);
    vector.push(3);
    assert_eq!(vector, [1, 2, 3]);
    assert_eq!(vector.len(), 3);

    vector.insert(1, 9);
    assert_eq!(vector, [1, 9, 2, 3]);

    vector.erase(0);
    assert_eq!(vector, [9, 2, 3]);

    vector.pop();
    assert_eq!(vector, [9, 2]);
  }

  #[test]
  fn append_doubles_capacity() {
    let mut vector = Vector::new();
    let mut capacities = std::vec::Vec::new();
    for value in 0..9 {
      vector.push(value);
      capacities.push(vector.capacity());
    }
    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
  }

  #[test]
  fn append_is_amortized_constant() {
    let mut vector = Vector::new();
    let mut reallocations = 0;
    let mut relocated = 0;
    for value in 0..10_000u32 {
      if vector.len() == vector.capacity() {
        reallocations += 1;
        relocated += vector.len();
      }
      vector.push(value);
    }

    assert!(reallocations <= 15);
    assert!(relocated < 2 * 10_000);
    assert!(vector.iter().copied().eq(0..10_000));
  }

  #[test]
  fn exact_growth_adds_one_slot() {
    let mut vector = Vector::with_growth_strategy(GrowthStrategy::Exact);
    for value in 0..4 {
      vector.push(value);
      assert_eq!(vector.capacity(), vector.len());
    }
  }

  #[test]
  fn emplace_back_returns_new_element() {
    let mut vector = Vector::new();
    *vector.emplace_back(|| 5) += 1;
    let last = vector.emplace_back(|| 7);
    assert_eq!(*last, 7);
    assert_eq!(vector, [6, 7]);
  }

  #[test]
  fn emplace_at_every_position() {
    for index in 0..=4 {
      // full vector exercises reallocation, spare capacity exercises the in-place shift
      for spare in [0, 3] {
        let mut vector = filled(4);
        vector.reserve(4 + spare);
        let capacity = vector.capacity();

        assert_eq!(*vector.emplace(index, || 100), 100);

        let mut expected = std::vec![0, 1, 2, 3];
        expected.insert(index, 100);
        assert_eq!(vector.as_slice(), expected.as_slice());
        if spare == 0 {
          assert_eq!(vector.capacity(), 8);
        } else {
          assert_eq!(vector.capacity(), capacity);
        }
      }
    }
  }

  #[test]
  fn insert_into_empty() {
    let mut vector = Vector::new();
    vector.insert(0, 'a');
    vector.insert(0, 'b');
    vector.insert(2, 'c');
    assert_eq!(vector, ['b', 'a', 'c']);
  }

  #[test]
  #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
  fn insert_past_end_panics() {
    let mut vector = filled(2);
    vector.insert(3, 0);
  }

  #[test]
  fn failed_construction_while_growing_changes_nothing() {
    let mut vector = filled(4);
    assert_eq!(vector.capacity(), 4);
    let before = vector.as_ptr();

    let result = vector.try_emplace(2, || Err(Refused));
    assert!(matches!(result, Err(EmplaceError::Construct(Refused))));
    assert_eq!(vector, [0, 1, 2, 3]);
    assert_eq!(vector.capacity(), 4);
    assert_eq!(vector.as_ptr(), before);

    let result = vector.try_emplace_back(|| Err(Refused));
    assert!(matches!(result, Err(EmplaceError::Construct(Refused))));
    assert_eq!(vector, [0, 1, 2, 3]);
  }

  #[test]
  fn failed_construction_in_place_changes_nothing() {
    let mut vector = filled(3);
    vector.reserve(10);

    let result = vector.try_emplace(0, || Err(Refused));
    assert!(matches!(result, Err(EmplaceError::Construct(Refused))));
    assert_eq!(vector, [0, 1, 2]);
    assert_eq!(vector.capacity(), 10);
  }

  #[test]
  fn panicking_construction_changes_nothing() {
    let live = Rc::new(Cell::new(0isize));
    let mut vector = Vector::new();
    for value in 0..4 {
      vector.push(Tracked::new(value, &live));
    }

    for index in [0, 2, 4] {
      let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        vector.emplace(index, || panic!("constructor failed"));
      }));
      assert!(result.is_err());
      assert_eq!(vector.len(), 4);
      assert_eq!(vector.capacity(), 4);
      assert!(vector.iter().map(|tracked| tracked.value).eq(0..4));
      assert_eq!(live.get(), 4);
    }

    drop(vector);
    assert_eq!(live.get(), 0);
  }

  #[test]
  fn construction_error_is_reported() {
    let mut vector = Vector::<u8>::new();
    let error = vector.try_emplace_back(|| Err(Refused)).unwrap_err();
    assert_eq!(std::format!("{error}"), "failed to construct element");
    assert!(core::error::Error::source(&error).is_some());
  }

  #[test]
  fn allocation_failure_changes_nothing() {
    // zero-sized values let the capacity reach usize::MAX without touching memory
    let mut vector = Vector::<()>::zeroed(usize::MAX);
    let overflow = AllocateError::OverflowedLayoutCalculation(OverflowedLayoutCalculation);

    let mut constructed = false;
    let result = vector.try_emplace_back(|| {
      constructed = true;
      Ok::<_, Refused>(())
    });
    assert!(matches!(result, Err(EmplaceError::Allocate(error)) if error == overflow));
    assert!(!constructed);
    assert_eq!(vector.len(), usize::MAX);

    assert_eq!(vector.try_push(()), Err(overflow));
    assert_eq!(vector.try_insert(0, ()).map(|_| ()), Err(overflow));
    assert_eq!(vector.len(), usize::MAX);
  }
}
