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

//! Tokenizes a tab-delimited record line, resolves every symbolic name
//! against a `Dictionary`, and packs the result into a `Record`'s
//! binary buffer via the typed-value codec.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::basic::{DeclKind, Element, Kid, RtType};
use crate::diagnostics::Diagnostics;
use crate::dictionary::Dictionary;
use crate::encodings::encoding::{enc_float, enc_int, enc_int1, enc_size, float_missing};
use crate::errors::{fatal_err, parse_err, Result};

use super::{ParseOutcome, Record};

/// Stateless: each call operates on one line and a shared, already
/// `sync()`-ed `Dictionary`.
pub struct RecordParser;

impl RecordParser {
  pub fn new() -> Self {
    RecordParser
  }

  pub fn parse(&self, line: &str, dict: &Dictionary, diag: &dyn Diagnostics) -> Result<ParseOutcome> {
    if line.is_empty() {
      return parse_err!("empty record line");
    }
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 8 {
      return parse_err!("record line has fewer than 8 required fields");
    }
    let chrom = fields[0];
    let pos_s = fields[1];
    let id_s = fields[2];
    let ref_s = fields[3];
    let alt_s = fields[4];
    let qual_s = fields[5];
    let filter_s = fields[6];
    let info_s = fields[7];
    let format_s = fields.get(8).copied();
    let sample_fields: &[&str] = if fields.len() > 9 { &fields[9..] } else { &[] };

    let rid = match dict.resolve(chrom).and_then(|kid| dict.key_info(kid).contig_rid) {
      Some(rid) => rid,
      None => return Ok(ParseOutcome::Skipped),
    };

    let pos: u32 = match pos_s.parse::<u32>() {
      Ok(v) => v.saturating_sub(1),
      Err(_) => return parse_err!("POS '{}' is not an integer", pos_s),
    };

    let mut buf = Vec::new();

    if id_s != "." {
      buf.extend_from_slice(id_s.as_bytes());
    }
    buf.push(0);

    let o_ref = buf.len();
    buf.extend_from_slice(ref_s.as_bytes());
    buf.push(0);

    let o_alt = buf.len();
    let alts: Vec<&str> = if alt_s == "." { Vec::new() } else { alt_s.split(',').collect() };
    let n_alt = alts.len() as u16;
    buf.extend_from_slice(&n_alt.to_le_bytes());
    for a in &alts {
      buf.extend_from_slice(a.as_bytes());
      buf.push(0);
    }

    let qual = if qual_s == "." {
      float_missing()
    } else {
      match qual_s.parse::<f32>() {
        Ok(v) => v,
        Err(_) => {
          diag.warning(&format!("QUAL '{}' is not a number, treated as missing", qual_s));
          float_missing()
        }
      }
    };

    let o_flt = buf.len();
    let filter_kids: Vec<i32> = if filter_s == "." {
      Vec::new()
    } else {
      let mut kids = Vec::new();
      for tok in filter_s.split(';') {
        if tok.is_empty() {
          continue;
        }
        match dict.resolve(tok).filter(|&k| dict.descriptor(k, DeclKind::Filter).is_some()) {
          Some(kid) => kids.push(kid as i32),
          None => diag.warning(&format!("unknown FILTER '{}', dropped", tok)),
        }
      }
      kids
    };
    enc_int(&mut buf, &filter_kids, None)?;

    let o_info = buf.len();
    let mut n_info: u16 = 0;
    let mut info_entries = Vec::new();
    if info_s != "." {
      for entry in info_s.split(';') {
        if entry.is_empty() {
          continue;
        }
        let (key, value) = match entry.find('=') {
          Some(i) => (&entry[..i], Some(&entry[i + 1..])),
          None => (entry, None),
        };
        let kid = match dict.resolve(key).filter(|&k| dict.descriptor(k, DeclKind::Info).is_some()) {
          Some(kid) => kid,
          None => {
            diag.warning(&format!("unknown INFO key '{}', dropped", key));
            continue;
          }
        };
        let descr = *dict.descriptor(kid, DeclKind::Info).unwrap();
        enc_int1(&mut info_entries, kid as i32)?;
        // A bare `KEY` token (no `=`) emits the kid only, with no
        // type-specific payload, the same wire shape as a Flag.
        match (descr.element, value) {
          (Element::Flag, Some(v)) if !v.is_empty() => {
            diag.warning(&format!("INFO flag '{}' given a value, ignored", key));
          }
          (Element::Flag, _) => {}
          (_, None) => {
            diag.warning(&format!("INFO '{}' takes a value but none was found", key));
          }
          (Element::Str, Some(text)) => {
            enc_size(&mut info_entries, 1, RtType::CStr)?;
            info_entries.extend_from_slice(text.as_bytes());
            info_entries.push(0);
          }
          (Element::Int, Some(text)) => {
            let values = if text.is_empty() { Vec::new() } else { parse_int_list(text, diag, key) };
            enc_int(&mut info_entries, &values, None)?;
          }
          (Element::Real, Some(text)) => {
            let values = if text.is_empty() { Vec::new() } else { parse_float_list(text, diag, key) };
            enc_float(&mut info_entries, &values)?;
          }
        }
        n_info += 1;
      }
    }
    buf.extend_from_slice(&n_info.to_le_bytes());
    buf.extend_from_slice(&info_entries);

    let o_fmt = buf.len();
    let mut n_fmt: u16 = 0;
    let mut fmt_entries = Vec::new();
    if let Some(format_s) = format_s {
      if dict.n_sample() > 0 {
        let col_names: Vec<&str> = format_s.split(':').collect();
        let mut col_kids: Vec<Kid> = Vec::with_capacity(col_names.len());
        let mut resolved = true;
        for name in &col_names {
          match dict.resolve(name).filter(|&k| dict.descriptor(k, DeclKind::Format).is_some()) {
            Some(kid) => col_kids.push(kid),
            None => {
              diag.warning(&format!("unknown FORMAT key '{}', record's FORMAT column skipped", name));
              resolved = false;
              break;
            }
          }
        }
        if resolved {
          for kid in &col_kids {
            let descr = dict.descriptor(*kid, DeclKind::Format).unwrap();
            if descr.element == Element::Flag {
              return fatal_err!("FLAG key '{}' is not permitted in FORMAT", dict.key(*kid));
            }
          }

          let sample_cols: Vec<Vec<&str>> =
            sample_fields.iter().map(|sf| sf.split(':').collect()).collect();

          let mut max_m = vec![0usize; col_kids.len()];
          let mut max_l = vec![0usize; col_kids.len()];
          for cols in &sample_cols {
            for (j, kid) in col_kids.iter().enumerate() {
              let descr = dict.descriptor(*kid, DeclKind::Format).unwrap();
              let text = cols.get(j).copied().unwrap_or(".");
              match descr.element {
                Element::Str => max_l[j] = max_l[j].max(text.len()),
                Element::Int | Element::Real => {
                  let m = if text == "." { 1 } else { text.split(',').count() };
                  max_m[j] = max_m[j].max(m);
                }
                Element::Flag => unreachable!("FLAG rejected above"),
              }
            }
          }

          n_fmt = col_kids.len() as u16;
          for (j, kid) in col_kids.iter().enumerate() {
            let descr = dict.descriptor(*kid, DeclKind::Format).unwrap();
            enc_int1(&mut fmt_entries, *kid as i32)?;
            match descr.element {
              Element::Str => {
                let stride = max_l[j];
                enc_size(&mut fmt_entries, stride, RtType::Char)?;
                for cols in &sample_cols {
                  let text = cols.get(j).copied().unwrap_or("");
                  let bytes = text.as_bytes();
                  fmt_entries.extend_from_slice(&bytes[..bytes.len().min(stride)]);
                  for _ in bytes.len()..stride {
                    fmt_entries.push(0);
                  }
                }
              }
              Element::Int => {
                let stride = max_m[j];
                enc_size(&mut fmt_entries, stride, RtType::Int32)?;
                for cols in &sample_cols {
                  let text = cols.get(j).copied().unwrap_or(".");
                  let values = if text == "." { Vec::new() } else { parse_int_list(text, diag, dict.key(*kid)) };
                  for k in 0..stride {
                    let v = values.get(k).copied().unwrap_or(i32::MIN);
                    fmt_entries.write_i32::<LittleEndian>(v)?;
                  }
                }
              }
              Element::Real => {
                let stride = max_m[j];
                enc_size(&mut fmt_entries, stride, RtType::Float)?;
                for cols in &sample_cols {
                  let text = cols.get(j).copied().unwrap_or(".");
                  let values = if text == "." { Vec::new() } else { parse_float_list(text, diag, dict.key(*kid)) };
                  for k in 0..stride {
                    let v = values.get(k).copied().unwrap_or_else(float_missing);
                    fmt_entries.write_f32::<LittleEndian>(v)?;
                  }
                }
              }
              Element::Flag => unreachable!("FLAG rejected above"),
            }
          }
        }
      }
    }
    buf.extend_from_slice(&n_fmt.to_le_bytes());
    buf.extend_from_slice(&fmt_entries);

    Ok(ParseOutcome::Parsed(Record {
      rid,
      pos,
      qual,
      n_alt,
      n_fmt,
      buf,
      o_ref,
      o_alt,
      o_flt,
      o_info,
      o_fmt,
    }))
  }
}

impl Default for RecordParser {
  fn default() -> Self {
    RecordParser::new()
  }
}

fn parse_int_list(text: &str, diag: &dyn Diagnostics, key: &str) -> Vec<i32> {
  text
    .split(',')
    .map(|tok| {
      if tok == "." {
        i32::MIN
      } else {
        tok.parse::<i32>().unwrap_or_else(|_| {
          diag.warning(&format!("'{}' value '{}' is not an integer, treated as missing", key, tok));
          i32::MIN
        })
      }
    })
    .collect()
}

fn parse_float_list(text: &str, diag: &dyn Diagnostics, key: &str) -> Vec<f32> {
  text
    .split(',')
    .map(|tok| {
      if tok == "." {
        float_missing()
      } else {
        tok.parse::<f32>().unwrap_or_else(|_| {
          diag.warning(&format!("'{}' value '{}' is not a number, treated as missing", key, tok));
          float_missing()
        })
      }
    })
    .collect()
}
