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

//! Encoding half of the typed-value codec: size/type descriptor bytes,
//! narrowest-width integer packing with sentinel-as-missing, and raw
//! float packing.
//!
//! Narrowest-width selection is the compression lever; sentinel-as-missing
//! avoids a parallel presence bitmap.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::basic::RtType;
use crate::errors::{schema_err, Result};

/// Writes the one-byte (or one-byte-plus-nested-int) size/type descriptor:
/// low nibble is `rt_type`, high nibble is `min(count, 15)`; `count >= 15`
/// nests a self-describing int immediately after.
pub fn enc_size(sink: &mut Vec<u8>, count: usize, rt_type: RtType) -> Result<()> {
  let low = rt_type as u8;
  if low > 0x0f {
    return schema_err!("unknown rt_type nibble {}", low);
  }
  if count < 15 {
    sink.push(((count as u8) << 4) | low);
  } else {
    sink.push((15u8 << 4) | low);
    enc_int1(sink, count as i32)?;
  }
  Ok(())
}

/// Encodes `values` at the narrowest integer width that holds every
/// non-missing element, using `i32::MIN` as the missing sentinel on
/// input. `count_override`, when given, is the count recorded in the
/// descriptor byte rather than `values.len()`, used for FORMAT columns
/// where the descriptor carries the per-sample stride while the payload
/// holds `n_sample * stride` raw elements.
pub fn enc_int(sink: &mut Vec<u8>, values: &[i32], count_override: Option<usize>) -> Result<()> {
  if values.is_empty() {
    return enc_size(sink, 0, RtType::Int8);
  }
  let count = count_override.unwrap_or(values.len());
  let mut max = i32::MIN + 1;
  let mut min = i32::MAX;
  for &v in values {
    if v == i32::MIN {
      continue;
    }
    if v > max {
      max = v;
    }
    if v < min {
      min = v;
    }
  }
  if max <= i8::MAX as i32 && min > i8::MIN as i32 {
    enc_size(sink, count, RtType::Int8)?;
    for &v in values {
      let x = if v == i32::MIN { i8::MIN } else { v as i8 };
      sink.push(x as u8);
    }
  } else if max <= i16::MAX as i32 && min > i16::MIN as i32 {
    enc_size(sink, count, RtType::Int16)?;
    for &v in values {
      let x = if v == i32::MIN { i16::MIN } else { v as i16 };
      sink.write_i16::<LittleEndian>(x)?;
    }
  } else {
    enc_size(sink, count, RtType::Int32)?;
    for &v in values {
      sink.write_i32::<LittleEndian>(v)?;
    }
  }
  Ok(())
}

/// Encodes a single self-describing int: a descriptor byte with count 1
/// followed by the narrowest-width value.
#[inline]
pub fn enc_int1(sink: &mut Vec<u8>, value: i32) -> Result<()> {
  enc_int(sink, &[value], None)
}

/// Encodes `values` as IEEE-754 single-precision floats, little-endian.
pub fn enc_float(sink: &mut Vec<u8>, values: &[f32]) -> Result<()> {
  enc_size(sink, values.len(), RtType::Float)?;
  for &v in values {
    sink.write_f32::<LittleEndian>(v)?;
  }
  Ok(())
}

/// The bit pattern used for a missing float element.
#[inline]
pub fn float_missing() -> f32 {
  f32::from_bits(0x7F80_0001)
}

#[inline]
pub fn is_float_missing(v: f32) -> bool {
  v.to_bits() == 0x7F80_0001
}
