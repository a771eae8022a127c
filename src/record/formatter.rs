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

//! Inverse of `RecordParser`: renders a binary `Record` back into a
//! canonical tab-delimited VCF text line.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::basic::{DeclKind, Element, RtType};
use crate::dictionary::Dictionary;
use crate::encodings::decoding::{dec_bytes, dec_float_array, dec_int_array, dec_size, dec_typed_int1, fmt_array, render_floats, render_ints};
use crate::encodings::encoding::is_float_missing;
use crate::errors::{parse_err, schema_err, unknown_name_err, Result};
use crate::io::ByteSink;

use super::Record;

/// Stateless: one canonical emit path per record.
pub struct RecordFormatter;

impl RecordFormatter {
  pub fn new() -> Self {
    RecordFormatter
  }

  pub fn format(&self, record: &Record, dict: &Dictionary, sink: &mut dyn ByteSink) -> Result<()> {
    let mut id_cursor = &record.buf[..record.o_ref];
    let id = read_cstr_raw(&mut id_cursor)?;

    let mut ref_cursor = &record.buf[record.o_ref..record.o_alt];
    let ref_allele = read_cstr_raw(&mut ref_cursor)?;

    let mut alt_cursor = &record.buf[record.o_alt..record.o_flt];
    let n_alt = alt_cursor.read_u16::<LittleEndian>()?;
    let mut alts = Vec::with_capacity(n_alt as usize);
    for _ in 0..n_alt {
      alts.push(read_cstr_raw(&mut alt_cursor)?);
    }

    let mut flt_cursor = &record.buf[record.o_flt..record.o_info];
    let (flt_count, flt_rt_type) = dec_size(&mut flt_cursor)?;
    let flt_kids = dec_int_array(&mut flt_cursor, flt_count, flt_rt_type)?;
    let filter_text = if flt_kids.is_empty() {
      ".".to_string()
    } else {
      flt_kids
        .iter()
        .map(|&k| if k == i32::MIN { ".".to_string() } else { dict.key(k as u32).to_string() })
        .collect::<Vec<_>>()
        .join(";")
    };

    let mut info_cursor = &record.buf[record.o_info..record.o_fmt];
    let n_info = info_cursor.read_u16::<LittleEndian>()?;
    let mut info_parts = Vec::with_capacity(n_info as usize);
    for _ in 0..n_info {
      let kid = dec_typed_int1(&mut info_cursor)? as u32;
      let name = dict.key(kid).to_string();
      let descr = match dict.descriptor(kid, DeclKind::Info) {
        Some(d) => *d,
        None => return unknown_name_err!("INFO key '{}' has no declaration", name),
      };
      match descr.element {
        Element::Flag => info_parts.push(name),
        _ => {
          let text = fmt_array(&mut info_cursor)?;
          info_parts.push(format!("{}={}", name, text));
        }
      }
    }
    let info_text = if info_parts.is_empty() { ".".to_string() } else { info_parts.join(";") };

    let n_sample = dict.n_sample() as usize;
    let mut col_names: Vec<String> = Vec::with_capacity(record.n_fmt as usize);
    let mut sample_cols: Vec<Vec<String>> = vec![Vec::with_capacity(record.n_fmt as usize); n_sample];
    if record.n_fmt > 0 {
      let mut fmt_cursor = &record.buf[record.o_fmt + 2..];
      for _ in 0..record.n_fmt {
        let kid = dec_typed_int1(&mut fmt_cursor)? as u32;
        col_names.push(dict.key(kid).to_string());
        let (stride, rt_type) = dec_size(&mut fmt_cursor)?;
        match rt_type {
          RtType::Char => {
            for s in 0..n_sample {
              let bytes = dec_bytes(&mut fmt_cursor, stride)?;
              let text = String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string();
              sample_cols[s].push(text);
            }
          }
          RtType::Int8 | RtType::Int16 | RtType::Int32 => {
            for s in 0..n_sample {
              let values = dec_int_array(&mut fmt_cursor, stride, rt_type)?;
              sample_cols[s].push(render_ints(&values));
            }
          }
          RtType::Float => {
            for s in 0..n_sample {
              let values = dec_float_array(&mut fmt_cursor, stride)?;
              sample_cols[s].push(render_floats(&values));
            }
          }
          RtType::CStr => return schema_err!("CStr is not a valid FORMAT matrix element type"),
        }
      }
    }

    let chrom_kid = dict.r2k(record.rid);
    let mut parts: Vec<String> = Vec::with_capacity(9 + n_sample);
    parts.push(dict.key(chrom_kid).to_string());
    parts.push((record.pos + 1).to_string());
    parts.push(if id.is_empty() { ".".to_string() } else { id });
    parts.push(ref_allele);
    parts.push(if alts.is_empty() { ".".to_string() } else { alts.join(",") });
    parts.push(if is_float_missing(record.qual) { ".".to_string() } else { format!("{}", record.qual) });
    parts.push(filter_text);
    parts.push(info_text);
    if n_sample > 0 {
      parts.push(col_names.join(":"));
      for cols in &sample_cols {
        parts.push(cols.join(":"));
      }
    }

    let line = parts.join("\t");
    sink.write(line.as_bytes())?;
    sink.write(b"\n")?;
    Ok(())
  }
}

impl Default for RecordFormatter {
  fn default() -> Self {
    RecordFormatter::new()
  }
}

fn read_cstr_raw(cursor: &mut &[u8]) -> Result<String> {
  match cursor.iter().position(|&b| b == 0) {
    Some(p) => {
      let text = String::from_utf8_lossy(&cursor[..p]).to_string();
      *cursor = &cursor[p + 1..];
      Ok(text)
    }
    None => parse_err!("unterminated string in record buffer"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::basic::{Cardinality, Descriptor};
  use crate::diagnostics::NullDiagnostics;
  use crate::io::WriteByteSink;
  use crate::record::parser::RecordParser;
  use crate::record::ParseOutcome;

  fn format_line(line: &str, dict: &Dictionary) -> String {
    let diag = NullDiagnostics;
    let parser = RecordParser::new();
    let record = match parser.parse(line, dict, &diag).unwrap() {
      ParseOutcome::Parsed(r) => r,
      ParseOutcome::Skipped => panic!("expected a parsed record"),
    };
    let formatter = RecordFormatter::new();
    let mut out = Vec::new();
    {
      let mut sink = WriteByteSink::new(&mut out);
      formatter.format(&record, dict, &mut sink).unwrap();
    }
    String::from_utf8(out).unwrap().trim_end().to_string()
  }

  #[test]
  fn info_integer_round_trips() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.intern_decl("DP", DeclKind::Info, Descriptor { element: Element::Int, cardinality: Cardinality::Fixed(1) });
    dict.sync();
    let line = "chr1\t100\t.\tA\tT\t.\t.\tDP=34";
    assert_eq!(format_line(line, &dict), line);
  }

  #[test]
  fn filter_round_trips() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.intern_decl("q10", DeclKind::Filter, Descriptor::flag());
    dict.intern_decl("s50", DeclKind::Filter, Descriptor::flag());
    dict.sync();
    let line = "chr1\t1\t.\tA\tT\t.\tq10;s50\t.";
    assert_eq!(format_line(line, &dict), line);
  }

  #[test]
  fn qual_missing_round_trips_to_dot() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.sync();
    let line = "chr1\t1\t.\tA\tT\t.\t.\t.";
    assert_eq!(format_line(line, &dict), line);
  }

  #[test]
  fn format_gt_dp_round_trips_with_missing_sample_values() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.intern_sample("NA001", &diag);
    dict.intern_sample("NA002", &diag);
    dict.intern_decl("GT", DeclKind::Format, Descriptor { element: Element::Str, cardinality: Cardinality::Fixed(1) });
    dict.intern_decl("DP", DeclKind::Format, Descriptor { element: Element::Int, cardinality: Cardinality::Fixed(1) });
    dict.sync();
    let line = "chr1\t1\t.\tA\tT\t.\t.\t.\tGT:DP\t0/1:12\t./.:.";
    assert_eq!(format_line(line, &dict), line);
  }

  #[test]
  fn info_string_value_longer_than_one_byte_round_trips() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.intern_decl("SVTYPE", DeclKind::Info, Descriptor { element: Element::Str, cardinality: Cardinality::Fixed(1) });
    dict.sync();
    let line = "chr1\t1\t.\tA\tT\t.\t.\tSVTYPE=DELETION";
    assert_eq!(format_line(line, &dict), line);
  }

  #[test]
  fn info_float_vector_round_trips() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 1000, &diag);
    dict.intern_decl("AF", DeclKind::Info, Descriptor { element: Element::Real, cardinality: Cardinality::PerAlt });
    dict.sync();
    let line = "chr1\t1\t.\tA\tT,G\t.\t.\tAF=0.5,0.25";
    assert_eq!(format_line(line, &dict), line);
  }
}
