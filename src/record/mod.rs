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

//! The binary record representation, and the parser/formatter that
//! convert it to and from canonical VCF text.

pub mod formatter;
pub mod parser;

/// One decoded VCF record. `buf` holds, in fixed order at the recorded
/// offsets, the encoded ID, REF, ALT list, FILTER, INFO and FORMAT
/// payloads; see the offset table in the crate's top-level docs.
#[derive(Debug, Clone)]
pub struct Record {
  pub rid: u32,
  pub pos: u32,
  pub qual: f32,
  pub n_alt: u16,
  pub n_fmt: u16,
  pub buf: Vec<u8>,
  pub o_ref: usize,
  pub o_alt: usize,
  pub o_flt: usize,
  pub o_info: usize,
  pub o_fmt: usize,
}

/// Outcome of parsing one record line.
pub enum ParseOutcome {
  Parsed(Record),
  /// CHROM did not resolve to a declared contig. Not an error: the
  /// stream advances to the next line.
  Skipped,
}
