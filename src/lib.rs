#![no_std]

#[macro_use]
#[allow(unused)]
pub extern crate core;
#[cfg(any(test, feature = "debugging"))]
#[macro_use]
#[allow(unused)]
pub extern crate std;
extern crate alloc as rust_alloc;

/// Emits a storage diagnostic on stderr when the `debugging` feature is enabled, and nothing otherwise.
macro_rules! trace {
  ($($arg: tt)*) => {
    #[cfg(feature = "debugging")]
    {
      ::std::eprintln!("[advanced-vector] {}", format_args!($($arg)*));
    }
  };
}

pub mod alloc;
pub mod num;
pub use zerocopy;

pub mod prelude {
  pub use crate::alloc::{
    AllocateError, EmplaceError, GrowthStrategy, OutOfMemory, OverflowedLayoutCalculation, RawStorage, Vector
  };
}
