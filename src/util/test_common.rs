// Copyright 2026 VCFLib Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Random value generation used by property-style codec tests: integer
//! and float vectors spanning the width boundaries the typed codec
//! cares about.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Generates `count` random `i32`s, each independently drawn from one
/// of the three width bands (`Int8`/`Int16`/`Int32` range) plus the
/// missing sentinel, so a vector exercises every width decision.
pub fn random_ints(rng: &mut impl Rng, count: usize) -> Vec<i32> {
  let band = Uniform::from(0..4);
  (0..count)
    .map(|_| match band.sample(rng) {
      0 => i32::MIN, // missing
      1 => rng.gen_range((i8::MIN as i32 + 1)..=(i8::MAX as i32)),
      2 => rng.gen_range((i16::MIN as i32 + 1)..=(i16::MAX as i32)),
      _ => rng.gen_range(i32::MIN + 1..=i32::MAX),
    })
    .collect()
}

/// Generates `count` random `f32`s, occasionally the missing sentinel.
pub fn random_floats(rng: &mut impl Rng, count: usize) -> Vec<f32> {
  (0..count)
    .map(|_| {
      if rng.gen_bool(0.1) {
        crate::encodings::encoding::float_missing()
      } else {
        rng.gen_range(-1e6..1e6)
      }
    })
    .collect()
}
