use advanced_vector::prelude::*;
use scratchpad::println;

#[derive(Debug, Clone)]
struct Reading {
  sensor: &'static str,
  value: i32,
}

fn main() {
  let mut numbers = Vector::new();
  numbers.push(1);
  numbers.push(2);
  numbers.push(3);
  println!("pushed:   {numbers:?} (len {}, capacity {})", numbers.len(), numbers.capacity());

  numbers.insert(1, 9);
  println!("inserted: {numbers:?}");
  numbers.erase(0);
  println!("erased:   {numbers:?}");
  numbers.pop();
  println!("popped:   {numbers:?}");

  let mut sized = Vector::<u8>::with_len(5);
  sized.resize(2);
  sized.resize(4);
  println!("resized:  {sized:?} (capacity {})", sized.capacity());

  let mut readings = Vector::with_growth_strategy(GrowthStrategy::Exact);
  readings.emplace_back(|| Reading {
    sensor: "north",
    value: 12,
  });
  let refused = readings.try_emplace_back(|| Err(core::fmt::Error));
  println!("refused:  {:?}", refused.map(|reading| reading.value));
  println!("readings: {readings:?} (capacity {})", readings.capacity());
  for reading in &readings {
    println!("  {} reads {}", reading.sensor, reading.value);
  }

  let copy = readings.clone();
  readings.clear();
  println!("copy:     {copy:?}, original now {readings:?}");

  match Vector::<u64>::try_with_capacity(usize::MAX) {
    Ok(_) => println!("unexpectedly allocated usize::MAX slots"),
    Err(error) => println!("oversized: {error}"),
  }

  let zeroed = Vector::<u32>::zeroed(3);
  println!("zeroed:   {zeroed:?}");
}
