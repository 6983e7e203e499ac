use num_traits::{PrimInt, Unsigned};

/// Rounds `val` up to the next multiple of `align`, which must be a power of two. Returns `None` on overflow.
pub fn align_up_checked<T: PrimInt + Unsigned>(val: T, align: T) -> Option<T> {
  debug_assert!(align.count_ones() == 1, "align must be a power of two");

  let mask = align - T::one();
  Some(val.checked_add(&mask)? & !mask)
}
