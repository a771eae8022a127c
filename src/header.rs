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

//! Parses `##INFO=`, `##FILTER=`, `##FORMAT=`, `##contig=` meta-lines and
//! the `#CHROM` sample header line, populating a `Dictionary`.

use crate::basic::{Cardinality, DeclKind, Descriptor, Element};
use crate::diagnostics::Diagnostics;
use crate::dictionary::Dictionary;
use crate::errors::Result;

/// Stateless: each call operates on one line and a shared `Dictionary`.
pub struct HeaderParser;

impl HeaderParser {
  pub fn new() -> Self {
    HeaderParser
  }

  /// Parses one `##KIND=<attr=val,...>` line. Unknown `KIND`s and
  /// malformed lines are warned and skipped; parsing never aborts the
  /// stream.
  pub fn parse_meta_line(&self, line: &str, dict: &mut Dictionary, diag: &dyn Diagnostics) {
    let rest = match line.strip_prefix("##") {
      Some(r) => r,
      None => {
        diag.warning(&format!("not a meta-line: '{}'", line));
        return;
      }
    };
    let eq = match rest.find('=') {
      Some(i) => i,
      None => {
        diag.warning(&format!("meta-line missing '=': '{}'", line));
        return;
      }
    };
    let kind_name = &rest[..eq];
    let body = &rest[eq + 1..];

    let kind = match kind_name {
      "INFO" => DeclKind::Info,
      "FILTER" => DeclKind::Filter,
      "FORMAT" => DeclKind::Format,
      "contig" => DeclKind::Contig,
      _ => {
        diag.warning(&format!("unrecognized meta-line kind '{}', skipped", kind_name));
        return;
      }
    };

    let body = match body.strip_prefix('<').and_then(|b| b.strip_suffix('>')) {
      Some(b) => b,
      None => {
        diag.warning(&format!("'##{}' missing '<...>' delimiters", kind_name));
        return;
      }
    };

    let attrs = match parse_attr_list(body) {
      Ok(a) => a,
      Err(e) => {
        diag.warning(&format!("'##{}' malformed: {}", kind_name, e));
        return;
      }
    };

    let id = match attrs.iter().find(|(k, _)| k == "ID") {
      Some((_, v)) => v.clone(),
      None => {
        diag.warning(&format!("'##{}' missing required ID", kind_name));
        return;
      }
    };

    if kind == DeclKind::Contig {
      let length = match attrs.iter().find(|(k, _)| k == "length") {
        Some((_, v)) => match v.parse::<u64>() {
          Ok(n) => n,
          Err(_) => {
            diag.warning(&format!("contig '{}' has non-integer length '{}'", id, v));
            return;
          }
        },
        None => {
          diag.warning(&format!("contig '{}' missing required length", id));
          return;
        }
      };
      dict.intern_contig(&id, length, diag);
      return;
    }

    // FILTER is always Flag/Number=0, regardless of (or absent) Type/Number
    // attributes: standard FILTER declarations never carry either.
    let mut element = if kind == DeclKind::Filter {
      Element::Flag
    } else {
      match attrs.iter().find(|(k, _)| k == "Type") {
        Some((_, v)) => match v.as_str() {
          "Integer" => Element::Int,
          "Float" => Element::Real,
          "String" => Element::Str,
          other => {
            diag.warning(&format!("'{}' has unrecognized Type '{}'", id, other));
            return;
          }
        },
        None => {
          diag.warning(&format!("'{}' missing required Type", id));
          return;
        }
      }
    };

    let number_attr = attrs.iter().find(|(k, _)| k == "Number").map(|(_, v)| v.as_str());
    let mut cardinality = match number_attr {
      Some(_) if kind == DeclKind::Filter => Cardinality::Fixed(0),
      Some("A") => Cardinality::PerAlt,
      Some("G") => Cardinality::PerGenotype,
      Some(n) => match n.parse::<u32>() {
        Ok(v) => Cardinality::Fixed(v),
        Err(_) => Cardinality::Variable,
      },
      None if kind == DeclKind::Filter => Cardinality::Fixed(0),
      None => {
        diag.warning(&format!("'{}' missing required Number", id));
        return;
      }
    };

    if matches!(cardinality, Cardinality::Fixed(0)) {
      element = Element::Flag;
    }
    if element == Element::Flag && !matches!(cardinality, Cardinality::Fixed(0)) {
      diag.warning(&format!("'{}' is Flag but Number != 0, forcing Number=0", id));
      cardinality = Cardinality::Fixed(0);
    }

    dict.intern_decl(&id, kind, Descriptor { element, cardinality });
  }

  /// Parses the `#CHROM\tPOS\t...` sample header line. Columns from
  /// index 9 onward (the tenth column) are sample names.
  pub fn parse_sample_line(&self, line: &str, dict: &mut Dictionary, diag: &dyn Diagnostics) -> Result<()> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() > 9 {
      for name in &cols[9..] {
        dict.intern_sample(name, diag);
      }
    }
    Ok(())
  }
}

impl Default for HeaderParser {
  fn default() -> Self {
    HeaderParser::new()
  }
}

/// Parses `attr=val,attr="quoted,val with \" escape",...` into an
/// ordered list of pairs. A quoted value runs to the next unescaped
/// `"`; commas inside it do not split.
fn parse_attr_list(body: &str) -> std::result::Result<Vec<(String, String)>, String> {
  let mut out = Vec::new();
  let chars: Vec<char> = body.chars().collect();
  let mut i = 0;
  while i < chars.len() {
    let key_start = i;
    while i < chars.len() && chars[i] != '=' {
      i += 1;
    }
    if i == chars.len() {
      break;
    }
    let key: String = chars[key_start..i].iter().collect();
    let key = key.trim().to_string();
    i += 1; // skip '='

    let mut value = String::new();
    if i < chars.len() && chars[i] == '"' {
      i += 1;
      let mut closed = false;
      while i < chars.len() {
        match chars[i] {
          '\\' if i + 1 < chars.len() => {
            value.push(chars[i + 1]);
            i += 2;
          }
          '"' => {
            i += 1;
            closed = true;
            break;
          }
          c => {
            value.push(c);
            i += 1;
          }
        }
      }
      if !closed {
        return Err("unterminated quoted value".to_string());
      }
    } else {
      while i < chars.len() && chars[i] != ',' {
        value.push(chars[i]);
        i += 1;
      }
    }
    out.push((key, value));
    if i < chars.len() && chars[i] == ',' {
      i += 1;
    }
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::diagnostics::{NullDiagnostics, VecDiagnostics};

  #[test]
  fn parses_info_integer_declaration() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    let parser = HeaderParser::new();
    parser.parse_meta_line(
      r#"##INFO=<ID=DP,Number=1,Type=Integer,Description="depth">"#,
      &mut dict,
      &diag,
    );
    let kid = dict.resolve("DP").unwrap();
    let descr = dict.descriptor(kid, DeclKind::Info).unwrap();
    assert_eq!(descr.element, Element::Int);
    assert_eq!(descr.cardinality, Cardinality::Fixed(1));
  }

  #[test]
  fn filter_type_is_always_forced_to_flag() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    let parser = HeaderParser::new();
    parser.parse_meta_line(r#"##FILTER=<ID=q10,Description="low qual">"#, &mut dict, &diag);
    let kid = dict.resolve("q10").unwrap();
    let descr = dict.descriptor(kid, DeclKind::Filter).unwrap();
    assert_eq!(descr.element, Element::Flag);
    assert_eq!(descr.cardinality, Cardinality::Fixed(0));
  }

  #[test]
  fn number_a_maps_to_per_alt() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    let parser = HeaderParser::new();
    parser.parse_meta_line(r#"##INFO=<ID=AF,Number=A,Type=Float>"#, &mut dict, &diag);
    let kid = dict.resolve("AF").unwrap();
    let descr = dict.descriptor(kid, DeclKind::Info).unwrap();
    assert_eq!(descr.cardinality, Cardinality::PerAlt);
    assert_eq!(descr.element, Element::Real);
  }

  #[test]
  fn contig_requires_length() {
    let mut dict = Dictionary::new();
    let diag = VecDiagnostics::new();
    let parser = HeaderParser::new();
    parser.parse_meta_line(r#"##contig=<ID=chr1>"#, &mut dict, &diag);
    assert_eq!(dict.resolve("chr1"), None);
    assert_eq!(diag.count(crate::diagnostics::Level::Warning), 1);
  }

  #[test]
  fn unknown_kind_is_skipped_with_warning() {
    let mut dict = Dictionary::new();
    let diag = VecDiagnostics::new();
    let parser = HeaderParser::new();
    parser.parse_meta_line(r#"##ALT=<ID=DEL,Description="deletion">"#, &mut dict, &diag);
    assert_eq!(diag.count(crate::diagnostics::Level::Warning), 1);
  }

  #[test]
  fn sample_header_line_interns_columns_from_tenth_onward() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    let parser = HeaderParser::new();
    parser
      .parse_sample_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001\tNA002", &mut dict, &diag)
      .unwrap();
    assert_eq!(dict.n_sample(), 2);
  }

  #[test]
  fn quoted_value_with_embedded_comma_and_escape_is_one_token() {
    let attrs = parse_attr_list(r#"ID=X,Description="a, \"quoted\" thing",Number=1"#).unwrap();
    assert_eq!(attrs[1], ("Description".to_string(), r#"a, "quoted" thing"#.to_string()));
    assert_eq!(attrs[2], ("Number".to_string(), "1".to_string()));
  }
}
