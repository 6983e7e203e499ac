use core::{
  cmp, fmt::{self, Debug}, hash::{Hash, Hasher}, mem, ops::{Deref, DerefMut}, ptr, slice
};

use thiserror::Error;
use zerocopy::FromZeros;

use super::GrowthStrategy;
use crate::alloc::{AllocateError, RawStorage};

mod assign;
mod emplace;
mod erase;
mod iter;

pub use iter::IntoIter;

/// The error returned by the fallible emplace family when either the storage or the element could not be produced.
#[derive(Debug, Error)]
pub enum EmplaceError<E> {
  #[error(transparent)]
  Allocate(#[from] AllocateError),
  #[error("failed to construct element")]
  Construct(#[source] E),
}

/// A growable, contiguous sequence of `T` built on a single [RawStorage].
///
/// Slots `[0, len)` always hold live values and slots `[len, capacity)` are always uninitialized. Every method
/// restores that split before it returns, unwinds, or reports an error.
pub struct Vector<T> {
  storage: RawStorage<T>,
  length: usize,
  growth_strategy: GrowthStrategy,
}

impl<T> Vector<T> {
  pub const fn new() -> Self {
    Self::with_growth_strategy(GrowthStrategy::Exponential)
  }

  pub const fn with_growth_strategy(growth_strategy: GrowthStrategy) -> Self {
    Self {
      storage: RawStorage::new(),
      length: 0,
      growth_strategy,
    }
  }

  pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocateError> {
    Ok(Self {
      storage: RawStorage::try_allocate(capacity)?,
      length: 0,
      growth_strategy: GrowthStrategy::default(),
    })
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self::try_with_capacity(capacity).unwrap_or_else(|error| error.handle())
  }

  /// Creates a vector holding `length` default values, with a capacity of exactly `length`.
  pub fn try_with_len(length: usize) -> Result<Self, AllocateError>
  where
    T: Default,
  {
    let mut vector = Self::try_with_capacity(length)?;
    vector.fill_to(length, T::default);
    Ok(vector)
  }

  pub fn with_len(length: usize) -> Self
  where
    T: Default,
  {
    Self::try_with_len(length).unwrap_or_else(|error| error.handle())
  }

  /// Creates a vector of `length` all-zero values without running any constructor.
  pub fn try_zeroed(length: usize) -> Result<Self, AllocateError>
  where
    T: FromZeros,
  {
    let mut vector = Self::try_with_capacity(length)?;
    // Safety: the slots are allocated, and an all-zero bit pattern is a valid T
    unsafe { vector.storage.slot(0).write_bytes(0, length) };
    vector.length = length;
    Ok(vector)
  }

  pub fn zeroed(length: usize) -> Self
  where
    T: FromZeros,
  {
    Self::try_zeroed(length).unwrap_or_else(|error| error.handle())
  }

  pub fn len(&self) -> usize {
    self.length
  }

  pub fn is_empty(&self) -> bool {
    self.length == 0
  }

  pub fn capacity(&self) -> usize {
    self.storage.capacity()
  }

  pub fn growth_strategy(&self) -> GrowthStrategy {
    self.growth_strategy
  }

  pub fn set_growth_strategy(&mut self, growth_strategy: GrowthStrategy) {
    self.growth_strategy = growth_strategy;
  }

  pub fn as_ptr(&self) -> *const T {
    self.storage.as_ptr()
  }

  pub fn as_mut_ptr(&mut self) -> *mut T {
    self.storage.as_mut_ptr()
  }

  pub fn as_slice(&self) -> &[T] {
    // Safety: slots [0, length) hold live values
    unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.length) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [T] {
    // Safety: slots [0, length) hold live values and we hold the only reference to them
    unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.length) }
  }

  /// Safety: `index` must be less than [len](Self::len). This is only checked in debug builds.
  pub unsafe fn get_unchecked(&self, index: usize) -> &T {
    debug_assert!(index < self.length, "index {index} is out of bounds for length {}", self.length);
    unsafe { &*self.storage.slot(index) }
  }

  /// Safety: `index` must be less than [len](Self::len). This is only checked in debug builds.
  pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
    debug_assert!(index < self.length, "index {index} is out of bounds for length {}", self.length);
    unsafe { &mut *self.storage.slot(index) }
  }

  /// Exchanges the contents of two vectors without touching any element.
  pub fn swap(&mut self, other: &mut Self) {
    mem::swap(self, other);
  }

  /// Moves the contents out, leaving `self` empty with no storage.
  pub fn take(&mut self) -> Self {
    let growth_strategy = self.growth_strategy;
    mem::replace(self, Self::with_growth_strategy(growth_strategy))
  }

  /// Grows the storage to hold exactly `new_capacity` slots. Does nothing if the capacity is already large enough.
  ///
  /// Either the vector ends up with the new storage, or it is left exactly as it was.
  pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocateError> {
    if new_capacity <= self.storage.capacity() {
      return Ok(());
    }

    let storage = RawStorage::try_allocate(new_capacity)?;
    self.transfer_around(storage, self.length);
    Ok(())
  }

  pub fn reserve(&mut self, new_capacity: usize) {
    self.try_reserve(new_capacity).unwrap_or_else(|error| error.handle())
  }

  /// Resizes to `new_length`, filling new slots with values produced by `fill`.
  ///
  /// Growing past the capacity reallocates with the growth strategy. If `fill` panics, the values produced so far
  /// are dropped and the length is restored; the grown capacity is kept.
  pub fn try_resize_with(&mut self, new_length: usize, fill: impl FnMut() -> T) -> Result<(), AllocateError> {
    if new_length <= self.length {
      self.truncate(new_length);
      return Ok(());
    }

    self.try_grow_to(new_length)?;
    self.fill_to(new_length, fill);
    Ok(())
  }

  pub fn resize_with(&mut self, new_length: usize, fill: impl FnMut() -> T) {
    self.try_resize_with(new_length, fill).unwrap_or_else(|error| error.handle())
  }

  pub fn try_resize(&mut self, new_length: usize) -> Result<(), AllocateError>
  where
    T: Default,
  {
    self.try_resize_with(new_length, T::default)
  }

  pub fn resize(&mut self, new_length: usize)
  where
    T: Default,
  {
    self.resize_with(new_length, T::default)
  }

  /// Makes room for `new_length` values, growing with the growth strategy when the capacity falls short.
  fn try_grow_to(&mut self, new_length: usize) -> Result<(), AllocateError> {
    let capacity = self.storage.capacity();
    if new_length <= capacity {
      return Ok(());
    }

    let new_capacity = self.growth_strategy.calculate_new_capacity(capacity, new_length - capacity)?;
    self.try_reserve(new_capacity)
  }

  /// Constructs values into slots `[length, new_length)`, which must already be allocated. If `fill` panics, every
  /// value constructed here is dropped again.
  fn fill_to(&mut self, new_length: usize, mut fill: impl FnMut() -> T) {
    debug_assert!(new_length <= self.storage.capacity());

    let start = self.length;
    let mut guard = TruncateOnUnwind { vector: self, length: start };
    while guard.vector.length < new_length {
      let value = fill();
      // Safety: the slot is allocated and uninitialized
      unsafe { guard.vector.storage.slot(guard.vector.length).write(value) };
      guard.vector.length += 1;
    }
    mem::forget(guard);
  }

  /// Allocates the storage the next single-element insertion will move into.
  fn grow_for_one(&self) -> Result<RawStorage<T>, AllocateError> {
    let capacity = self.growth_strategy.calculate_new_capacity(self.storage.capacity(), 1)?;
    RawStorage::try_allocate(capacity)
  }

  /// Relocates every live value into `storage`, leaving slot `gap` free for a value the caller has already written
  /// there, and adopts `storage` as the vector's block.
  ///
  /// Values before `gap` keep their index; values from `gap` on move up by one. With `gap == len` nothing shifts.
  /// Relocation is a bitwise move that cannot fail, so the old block is released holding no live values.
  fn transfer_around(&mut self, mut storage: RawStorage<T>, gap: usize) {
    debug_assert!(gap <= self.length);
    debug_assert!(storage.capacity() > self.length);

    trace!("reallocating {} live values from {} to {} slots", self.length, self.storage.capacity(), storage.capacity());

    // Safety: both ranges hold live values in the old block and are uninitialized in the new one, and the blocks
    // never overlap.
    unsafe {
      ptr::copy_nonoverlapping(self.storage.slot(0), storage.slot(0), gap);
      ptr::copy_nonoverlapping(self.storage.slot(gap), storage.slot(gap + 1), self.length - gap);
    }

    // the old block now only holds moved-out bits, so dropping it just releases the memory
    self.storage.swap(&mut storage);
  }
}

/// Truncates the vector back to `length` when dropped; forgotten once the fill completes.
struct TruncateOnUnwind<'a, T> {
  vector: &'a mut Vector<T>,
  length: usize,
}

impl<T> Drop for TruncateOnUnwind<'_, T> {
  fn drop(&mut self) {
    self.vector.truncate(self.length);
  }
}

impl<T> Drop for Vector<T> {
  fn drop(&mut self) {
    // Safety: slots [0, length) hold live values; the storage releases the block afterwards
    unsafe { ptr::drop_in_place(self.as_mut_slice()) };
  }
}

impl<T> Default for Vector<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Deref for Vector<T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> DerefMut for Vector<T> {
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T> AsRef<[T]> for Vector<T> {
  fn as_ref(&self) -> &[T] {
    self
  }
}

impl<T> AsMut<[T]> for Vector<T> {
  fn as_mut(&mut self) -> &mut [T] {
    self
  }
}

impl<T: Debug> Debug for Vector<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.as_slice().fmt(f)
  }
}

impl<T: PartialEq<U>, U> PartialEq<Vector<U>> for Vector<T> {
  fn eq(&self, other: &Vector<U>) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Vector<T> {
  fn eq(&self, other: &[U]) -> bool {
    self.as_slice() == other
  }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Vector<T> {
  fn eq(&self, other: &[U; N]) -> bool {
    self.as_slice() == other
  }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
  fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
    self.as_slice().partial_cmp(other.as_slice())
  }
}

impl<T: Ord> Ord for Vector<T> {
  fn cmp(&self, other: &Self) -> cmp::Ordering {
    self.as_slice().cmp(other.as_slice())
  }
}

impl<T: Hash> Hash for Vector<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.as_slice().hash(state);
  }
}

impl<T: Clone> From<&[T]> for Vector<T> {
  fn from(values: &[T]) -> Self {
    values.iter().cloned().collect()
  }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
  fn from(values: [T; N]) -> Self {
    values.into_iter().collect()
  }
}
