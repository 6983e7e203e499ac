use core::{alloc::Layout, ptr::NonNull};

use super::OutOfMemory;

/// A memory allocator adapter for C-style allocators (malloc and free).
///
/// Safety:
/// Allocated memory blocks must be valid for `layout`, properly aligned, and remain valid until they are freed.
pub unsafe trait CStyleAllocator {
  /// `layout` never has a size of zero; zero-sized requests are served without calling the allocator.
  fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory>;
  /// Safety:
  /// - `ptr` must point to a valid memory block allocated by this allocator
  /// - `layout` must be the layout of the memory block
  unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The allocator every [RawStorage](crate::alloc::RawStorage) draws its blocks from.
#[cfg(not(feature = "libc"))]
pub type Backend = StdAlloc;
#[cfg(feature = "libc")]
pub type Backend = Malloc;

/// Forwards to the global Rust allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdAlloc;

unsafe impl CStyleAllocator for StdAlloc {
  fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
    debug_assert!(layout.size() != 0, "zero-sized allocation reached the backend");
    // Safety: layout has a non-zero size
    let ptr = unsafe { rust_alloc::alloc::alloc(layout) };
    NonNull::new(ptr).ok_or(OutOfMemory { layout })
  }

  unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
    // Safety: ptr was returned by `alloc` with this layout
    unsafe { rust_alloc::alloc::dealloc(ptr.as_ptr(), layout) };
  }
}

/// Allocates through `aligned_alloc` and releases through `free`.
#[cfg(feature = "libc")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Malloc;

#[cfg(feature = "libc")]
unsafe impl CStyleAllocator for Malloc {
  fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
    // aligned_alloc requires the size to be a multiple of the alignment
    let size = crate::num::align_up_checked(layout.size(), layout.align()).ok_or(OutOfMemory { layout })?;
    let ptr = unsafe { libc::aligned_alloc(layout.align(), size) };
    NonNull::new(ptr.cast::<u8>()).ok_or(OutOfMemory { layout })
  }

  unsafe fn free(&self, ptr: NonNull<u8>, _layout: Layout) {
    unsafe { libc::free(ptr.cast().as_ptr()) };
  }
}
