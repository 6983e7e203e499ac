pub mod allocators;
pub mod raw;
pub mod types;

#[doc(inline)]
pub use allocators::*;
#[doc(inline)]
pub use raw::RawStorage;
#[doc(inline)]
pub use types::{
  GrowthStrategy, vec::{EmplaceError, IntoIter, Vector}
};
