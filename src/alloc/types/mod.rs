use core::cmp;

use super::OverflowedLayoutCalculation;

pub mod vec;

/// How a [Vector](vec::Vector) picks its next capacity when it runs out of slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStrategy {
  /// Grow the capacity of the [Vector](vec::Vector) by exactly the amount that is needed
  Exact,
  /// Grow the capacity of the [Vector](vec::Vector) to 2 * the previous capacity, or the exact capacity that is
  /// required, whichever is larger.
  #[default]
  Exponential,
}

impl GrowthStrategy {
  pub fn calculate_new_capacity(
    &self,
    capacity: usize,
    additional: usize,
  ) -> Result<usize, OverflowedLayoutCalculation> {
    let min_capacity = capacity.checked_add(additional).ok_or(OverflowedLayoutCalculation)?;
    match self {
      GrowthStrategy::Exact => Ok(min_capacity),
      GrowthStrategy::Exponential => Ok(cmp::max(capacity.saturating_mul(2), min_capacity)),
    }
  }
}
