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

//! A parser and in-memory codec for the Variant Call Format (VCF).
//!
//! Given a VCF stream (optionally gzip/BGZF compressed), this crate
//! ingests the header, builds a [`dictionary::Dictionary`] indexing
//! every named entity (contigs, INFO/FILTER/FORMAT keys, sample names),
//! then decodes each record into a compact binary [`record::Record`]
//! that can be re-emitted as canonical VCF text.
//!
//! File opening, decompression and line splitting live in [`io`]; the
//! core parsing and codec logic never touches a filesystem path.

pub mod basic;
pub mod diagnostics;
pub mod dictionary;
pub mod encodings;
pub mod errors;
pub mod header;
pub mod io;
pub mod record;

#[cfg(any(test, feature = "test-util"))]
pub mod util;

use diagnostics::Diagnostics;
use dictionary::Dictionary;
use errors::{fatal_err, Result};
use header::HeaderParser;
use io::{LineResult, LineSource};
use record::formatter::RecordFormatter;
use record::parser::RecordParser;
use record::{ParseOutcome, Record};

/// Reads and parses an entire VCF header (all `##` meta-lines plus the
/// `#CHROM` sample line) from `source`, returning a finalized
/// `Dictionary`. Leaves `source` positioned at the first record line.
pub fn read_header(source: &mut dyn LineSource, diag: &dyn Diagnostics) -> Result<Dictionary> {
  let mut dict = Dictionary::new();
  let header_parser = HeaderParser::new();
  let mut saw_sample_line = false;

  loop {
    match source.next_line()? {
      LineResult::Eof => break,
      LineResult::Line(bytes) => {
        let line = String::from_utf8_lossy(&bytes);
        if line.starts_with("##") {
          header_parser.parse_meta_line(&line, &mut dict, diag);
        } else if line.starts_with('#') {
          header_parser.parse_sample_line(&line, &mut dict, diag)?;
          saw_sample_line = true;
          break;
        } else {
          return fatal_err!("record line encountered before sample header line");
        }
      }
    }
  }

  if !saw_sample_line {
    return fatal_err!("stream ended without a #CHROM sample header line");
  }

  dict.sync();
  Ok(dict)
}

/// Parses the next record line from `source` against `dict`. Returns
/// `Ok(None)` at end of stream.
pub fn read_record(
  source: &mut dyn LineSource,
  dict: &Dictionary,
  diag: &dyn Diagnostics,
) -> Result<Option<ParseOutcome>> {
  match source.next_line()? {
    LineResult::Eof => Ok(None),
    LineResult::Line(bytes) => {
      let line = String::from_utf8_lossy(&bytes);
      let parser = RecordParser::new();
      Ok(Some(parser.parse(&line, dict, diag)?))
    }
  }
}

/// Renders `record` back to canonical VCF text on `sink`.
pub fn write_record(record: &Record, dict: &Dictionary, sink: &mut dyn io::ByteSink) -> Result<()> {
  RecordFormatter::new().format(record, dict, sink)
}
