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

//! Decoding half of the typed-value codec: reading back the size/type
//! descriptor byte, narrow-width integers widened to `i32` with the
//! missing sentinel restored, and the self-describing single-int form
//! used for INFO/FORMAT key prefixes.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::basic::RtType;
use crate::errors::{parse_err, schema_err, Result};

/// Reads a size/type descriptor byte, returning `(count, rt_type)`. A
/// high nibble of 15 means the real count follows as a nested
/// self-describing int.
pub fn dec_size(cursor: &mut &[u8]) -> Result<(usize, RtType)> {
  if cursor.is_empty() {
    return parse_err!("truncated stream: missing size/type byte");
  }
  let byte = cursor[0];
  *cursor = &cursor[1..];
  let rt_type = RtType::from_nibble(byte & 0x0f)
    .ok_or_else(|| ())
    .or_else(|_| schema_err!("unknown rt_type nibble {}", byte & 0x0f))?;
  let high = byte >> 4;
  if high < 15 {
    Ok((high as usize, rt_type))
  } else {
    let count = dec_typed_int1(cursor)?;
    if count < 0 {
      return parse_err!("negative nested count {}", count);
    }
    Ok((count as usize, rt_type))
  }
}

/// Reads one element of the given, already-known, integer width and
/// widens it to `i32`, restoring `i32::MIN` for the type's missing
/// sentinel.
pub fn dec_int1(cursor: &mut &[u8], rt_type: RtType) -> Result<i32> {
  match rt_type {
    RtType::Int8 => {
      let v = cursor.read_i8()?;
      Ok(if v == i8::MIN { i32::MIN } else { v as i32 })
    }
    RtType::Int16 => {
      let v = cursor.read_i16::<LittleEndian>()?;
      Ok(if v == i16::MIN { i32::MIN } else { v as i32 })
    }
    RtType::Int32 => {
      let v = cursor.read_i32::<LittleEndian>()?;
      Ok(v)
    }
    other => schema_err!("{:?} is not an integer type", other),
  }
}

/// Reads a self-describing single int: a size/type byte followed by one
/// element at the width the byte declares. Used to decode the kid
/// prefix of an INFO/FORMAT field, where the width is not known ahead
/// of time.
pub fn dec_typed_int1(cursor: &mut &[u8]) -> Result<i32> {
  let (count, rt_type) = dec_size(cursor)?;
  if count == 0 {
    return Ok(i32::MIN);
  }
  dec_int1(cursor, rt_type)
}

/// Reads `count` integer elements of the given width into a fresh `Vec`.
pub fn dec_int_array(cursor: &mut &[u8], count: usize, rt_type: RtType) -> Result<Vec<i32>> {
  let mut out = Vec::with_capacity(count);
  for _ in 0..count {
    out.push(dec_int1(cursor, rt_type)?);
  }
  Ok(out)
}

/// Reads `count` `f32` elements, little-endian, with no widening.
pub fn dec_float_array(cursor: &mut &[u8], count: usize) -> Result<Vec<f32>> {
  let mut out = Vec::with_capacity(count);
  for _ in 0..count {
    out.push(cursor.read_f32::<LittleEndian>()?);
  }
  Ok(out)
}

/// Reads `count` raw bytes, used for `Char`/`CStr` element payloads
/// whose interpretation (ASCII scalar vs NUL-terminated text) is the
/// caller's concern.
pub fn dec_bytes(cursor: &mut &[u8], count: usize) -> Result<Vec<u8>> {
  if cursor.len() < count {
    return parse_err!("truncated stream: expected {} bytes, found {}", count, cursor.len());
  }
  let (head, tail) = cursor.split_at(count);
  *cursor = tail;
  Ok(head.to_vec())
}

/// Renders a decoded integer array as comma-joined text, `.` for a
/// missing (sentinel) element.
pub fn render_ints(values: &[i32]) -> String {
  let parts: Vec<String> = values
    .iter()
    .map(|&v| if v == i32::MIN { ".".to_string() } else { format!("{}", v) })
    .collect();
  parts.join(",")
}

/// Renders a decoded float array as comma-joined text, `.` for a
/// missing (sentinel) element.
pub fn render_floats(values: &[f32]) -> String {
  let parts: Vec<String> = values
    .iter()
    .map(|&v| if crate::encodings::encoding::is_float_missing(v) {
      ".".to_string()
    } else {
      format!("{}", v)
    })
    .collect();
  parts.join(",")
}

/// Reads a NUL-terminated string, consuming through the terminator. A
/// `CStr`'s descriptor count is nominally `1` regardless of the text's
/// true length, so it cannot be read with `dec_bytes`.
pub fn dec_cstr(cursor: &mut &[u8]) -> Result<String> {
  let nul = cursor
    .iter()
    .position(|&b| b == 0)
    .ok_or_else(|| ())
    .or_else(|_| parse_err!("truncated stream: unterminated string"))?;
  let (head, tail) = cursor.split_at(nul);
  *cursor = &tail[1..];
  Ok(String::from_utf8_lossy(head).to_string())
}

/// Decodes one complete typed-value field (descriptor byte plus
/// payload) into a textual representation appropriate to its runtime
/// type, for use by the record formatter. Strings and chars decode to
/// `Ok` text; numeric arrays decode to comma-joined values with `.` for
/// missing elements.
pub fn fmt_array(cursor: &mut &[u8]) -> Result<String> {
  let (count, rt_type) = dec_size(cursor)?;
  match rt_type {
    RtType::CStr => dec_cstr(cursor),
    RtType::Char => {
      let bytes = dec_bytes(cursor, count)?;
      Ok(String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string())
    }
    RtType::Float => {
      let values = dec_float_array(cursor, count)?;
      Ok(render_floats(&values))
    }
    RtType::Int8 | RtType::Int16 | RtType::Int32 => {
      let values = dec_int_array(cursor, count, rt_type)?;
      Ok(render_ints(&values))
    }
  }
}
