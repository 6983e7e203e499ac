use core::{
  fmt::{self, Debug}, marker::PhantomData, mem, ptr::NonNull
};

use super::{AllocateError, Backend, CStyleAllocator, calculate_layout_for_slots};

/// An exclusively owned block of uninitialized slots for `capacity` values of `T`.
///
/// The block never constructs or drops a `T`; whoever writes into a slot is responsible for dropping it before the
/// storage is released. Dropping a [RawStorage] only returns the block to the allocator.
///
/// A zero capacity never touches the allocator, and neither do zero-sized element types.
pub struct RawStorage<T> {
  ptr: NonNull<T>,
  capacity: usize,
  phantom: PhantomData<T>,
}

// Safety: RawStorage owns its block uniquely, like a Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
  pub const fn new() -> Self {
    Self {
      ptr: NonNull::dangling(),
      capacity: 0,
      phantom: PhantomData,
    }
  }

  /// Reserves a block for exactly `capacity` slots.
  pub fn try_allocate(capacity: usize) -> Result<Self, AllocateError> {
    let layout = calculate_layout_for_slots::<T>(capacity)?;

    if layout.size() == 0 {
      return Ok(Self {
        capacity,
        ..Self::new()
      });
    }

    let ptr = Backend::default().alloc(layout)?;
    trace!("allocated {} slots ({} bytes) at {:p}", capacity, layout.size(), ptr);

    Ok(Self {
      ptr: ptr.cast(),
      capacity,
      phantom: PhantomData,
    })
  }

  pub fn allocate(capacity: usize) -> Self {
    Self::try_allocate(capacity).unwrap_or_else(|error| error.handle())
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// The start of the block, or [None] if the storage holds no slots.
  pub fn address(&self) -> Option<NonNull<T>> {
    (self.capacity != 0).then_some(self.ptr)
  }

  pub fn as_ptr(&self) -> *const T {
    self.ptr.as_ptr()
  }

  pub fn as_mut_ptr(&mut self) -> *mut T {
    self.ptr.as_ptr()
  }

  /// The address of slot `index`. `index == capacity` yields the one-past-the-end address.
  ///
  /// This is pointer arithmetic only; the bounds are asserted in debug builds.
  pub fn slot(&self, index: usize) -> *mut T {
    debug_assert!(index <= self.capacity, "slot {index} is out of bounds for capacity {}", self.capacity);
    self.ptr.as_ptr().wrapping_add(index)
  }

  pub fn swap(&mut self, other: &mut Self) {
    mem::swap(self, other);
  }

  /// Moves the block out, leaving `self` empty.
  pub fn take(&mut self) -> Self {
    mem::take(self)
  }

  /// Returns the block to the allocator and leaves `self` empty.
  ///
  /// Any values still living in the slots are leaked, never dropped.
  pub fn deallocate(&mut self) {
    *self = Self::new();
  }
}

impl<T> Default for RawStorage<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Drop for RawStorage<T> {
  fn drop(&mut self) {
    let Ok(layout) = calculate_layout_for_slots::<T>(self.capacity) else {
      unreachable!("layout was validated when the block was allocated");
    };

    if layout.size() == 0 {
      return;
    }

    trace!("releasing {} slots at {:p}", self.capacity, self.ptr);
    // Safety: the block was allocated by the backend with this exact layout and is owned exclusively by `self`
    unsafe { Backend::default().free(self.ptr.cast(), layout) };
  }
}

impl<T> Debug for RawStorage<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RawStorage").field("address", &self.address()).field("capacity", &self.capacity).finish()
  }
}
