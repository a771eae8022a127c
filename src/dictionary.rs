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

//! String-interned symbol table mapping every declared name (contig,
//! INFO/FILTER/FORMAT key, sample) to a dense `Kid`. Built once while
//! parsing the header, then immutable for the lifetime of the stream.
//!
//! Owns a flat `Vec<KeyInfo>`; callers hold `Kid` indices, never
//! pointers, which keeps `Dictionary` trivially `Send`+`Sync` once built.

use std::collections::HashMap;

use crate::basic::{DeclKind, Descriptor, Kid, N_DECL_KIND};
use crate::diagnostics::Diagnostics;

/// One dictionary entry: everything known about a single declared name.
#[derive(Debug, Clone)]
pub struct KeyInfo {
  pub kid: Kid,
  pub contig_rid: Option<u32>,
  pub contig_len: Option<u64>,
  pub sample_sid: Option<u32>,
  descriptors: [Option<Descriptor>; N_DECL_KIND],
}

impl KeyInfo {
  fn new(kid: Kid) -> Self {
    KeyInfo {
      kid,
      contig_rid: None,
      contig_len: None,
      sample_sid: None,
      descriptors: [None; N_DECL_KIND],
    }
  }

  #[inline]
  pub fn descriptor(&self, kind: DeclKind) -> Option<&Descriptor> {
    self.descriptors[kind.index()].as_ref()
  }
}

/// The symbol table. Built once via `intern_*`, then finalized via
/// `sync()` before any record is parsed.
pub struct Dictionary {
  by_name: HashMap<String, usize>,
  entries: Vec<KeyInfo>,
  names: Vec<String>,
  n_contig: u32,
  n_sample: u32,
  r2k: Vec<Kid>,
  s2k: Vec<Kid>,
  synced: bool,
}

impl Dictionary {
  pub fn new() -> Self {
    Dictionary {
      by_name: HashMap::new(),
      entries: Vec::new(),
      names: Vec::new(),
      n_contig: 0,
      n_sample: 0,
      r2k: Vec::new(),
      s2k: Vec::new(),
      synced: false,
    }
  }

  fn entry_index(&mut self, name: &str) -> usize {
    if let Some(&idx) = self.by_name.get(name) {
      return idx;
    }
    let kid = self.entries.len() as Kid;
    self.entries.push(KeyInfo::new(kid));
    self.names.push(name.to_string());
    let idx = self.entries.len() - 1;
    self.by_name.insert(name.to_string(), idx);
    idx
  }

  /// Declares `name` under `kind` with the given `descriptor`. Last
  /// declaration for a given (name, kind) pair wins, silently.
  pub fn intern_decl(&mut self, name: &str, kind: DeclKind, descriptor: Descriptor) -> Kid {
    let idx = self.entry_index(name);
    self.entries[idx].descriptors[kind.index()] = Some(descriptor);
    self.entries[idx].kid
  }

  /// Declares `name` as a contig of the given `length`. A second
  /// declaration of the same contig name is a no-op save for a warning.
  pub fn intern_contig(&mut self, name: &str, length: u64, diag: &dyn Diagnostics) -> Kid {
    let idx = self.entry_index(name);
    if self.entries[idx].contig_len.is_some() {
      diag.warning(&format!("duplicated contig name '{}'. Skipped.", name));
      return self.entries[idx].kid;
    }
    let rid = self.n_contig;
    self.n_contig += 1;
    self.entries[idx].contig_rid = Some(rid);
    self.entries[idx].contig_len = Some(length);
    self.entries[idx].kid
  }

  /// Declares `name` as a sample. A duplicate sample name is dropped
  /// (warned, first occurrence wins the slot).
  pub fn intern_sample(&mut self, name: &str, diag: &dyn Diagnostics) -> Kid {
    let idx = self.entry_index(name);
    if self.entries[idx].sample_sid.is_some() {
      diag.warning(&format!("duplicated sample name '{}'. Skipped.", name));
      return self.entries[idx].kid;
    }
    let sid = self.n_sample;
    self.n_sample += 1;
    self.entries[idx].sample_sid = Some(sid);
    self.entries[idx].kid
  }

  #[inline]
  pub fn resolve(&self, name: &str) -> Option<Kid> {
    self.by_name.get(name).map(|&idx| self.entries[idx].kid)
  }

  #[inline]
  pub fn key(&self, kid: Kid) -> &str {
    &self.names[kid as usize]
  }

  #[inline]
  pub fn descriptor(&self, kid: Kid, kind: DeclKind) -> Option<&Descriptor> {
    self.entries[kid as usize].descriptor(kind)
  }

  #[inline]
  pub fn key_info(&self, kid: Kid) -> &KeyInfo {
    &self.entries[kid as usize]
  }

  #[inline]
  pub fn n_key(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn n_contig(&self) -> u32 {
    self.n_contig
  }

  #[inline]
  pub fn n_sample(&self) -> u32 {
    self.n_sample
  }

  /// Finalizes the dictionary: builds the dense `r2k`/`s2k` lookup
  /// arrays. Must be called exactly once, after header parsing and
  /// before any record is processed.
  pub fn sync(&mut self) {
    let mut r2k = vec![0 as Kid; self.n_contig as usize];
    let mut s2k = vec![0 as Kid; self.n_sample as usize];
    for entry in &self.entries {
      if let Some(rid) = entry.contig_rid {
        r2k[rid as usize] = entry.kid;
      }
      if let Some(sid) = entry.sample_sid {
        s2k[sid as usize] = entry.kid;
      }
    }
    self.r2k = r2k;
    self.s2k = s2k;
    self.synced = true;
  }

  #[inline]
  pub fn is_synced(&self) -> bool {
    self.synced
  }

  /// Maps a dense contig index back to its `Kid`. Only valid after `sync()`.
  #[inline]
  pub fn r2k(&self, rid: u32) -> Kid {
    self.r2k[rid as usize]
  }

  /// Maps a dense sample index back to its `Kid`. Only valid after `sync()`.
  #[inline]
  pub fn s2k(&self, sid: u32) -> Kid {
    self.s2k[sid as usize]
  }
}

impl Default for Dictionary {
  fn default() -> Self {
    Dictionary::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::basic::{Cardinality, Element};
  use crate::diagnostics::NullDiagnostics;

  #[test]
  fn intern_decl_assigns_dense_kid_in_declaration_order() {
    let mut dict = Dictionary::new();
    let dp = dict.intern_decl("DP", DeclKind::Info, Descriptor {
      element: Element::Int,
      cardinality: Cardinality::Fixed(1),
    });
    let af = dict.intern_decl("AF", DeclKind::Info, Descriptor {
      element: Element::Real,
      cardinality: Cardinality::PerAlt,
    });
    assert_eq!(dp, 0);
    assert_eq!(af, 1);
    assert_eq!(dict.resolve("DP"), Some(0));
    assert_eq!(dict.resolve("AF"), Some(1));
  }

  #[test]
  fn same_key_can_carry_multiple_decl_kinds() {
    let mut dict = Dictionary::new();
    let descr = Descriptor { element: Element::Int, cardinality: Cardinality::Fixed(1) };
    let kid_info = dict.intern_decl("DP", DeclKind::Info, descr);
    let kid_fmt = dict.intern_decl("DP", DeclKind::Format, descr);
    assert_eq!(kid_info, kid_fmt);
    assert!(dict.descriptor(kid_info, DeclKind::Info).is_some());
    assert!(dict.descriptor(kid_info, DeclKind::Format).is_some());
    assert!(dict.descriptor(kid_info, DeclKind::Filter).is_none());
  }

  #[test]
  fn idempotent_declaration_last_wins_but_descriptors_equal() {
    let mut dict = Dictionary::new();
    let descr = Descriptor { element: Element::Int, cardinality: Cardinality::Fixed(1) };
    let a = dict.intern_decl("DP", DeclKind::Info, descr);
    let b = dict.intern_decl("DP", DeclKind::Info, descr);
    assert_eq!(a, b);
    assert_eq!(dict.descriptor(a, DeclKind::Info), Some(&descr));
  }

  #[test]
  fn duplicate_contig_keeps_first_and_warns() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    let a = dict.intern_contig("chr1", 1000, &diag);
    let b = dict.intern_contig("chr1", 2000, &diag);
    assert_eq!(a, b);
    assert_eq!(dict.key_info(a).contig_len, Some(1000));
  }

  #[test]
  fn dense_indexing_after_sync() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_contig("chr1", 100, &diag);
    dict.intern_contig("chr2", 200, &diag);
    dict.intern_sample("NA001", &diag);
    dict.intern_sample("NA002", &diag);
    dict.sync();

    for rid in 0..dict.n_contig() {
      let kid = dict.r2k(rid);
      assert_eq!(dict.key_info(kid).contig_rid, Some(rid));
    }
    for sid in 0..dict.n_sample() {
      let kid = dict.s2k(sid);
      assert_eq!(dict.key_info(kid).sample_sid, Some(sid));
    }
  }

  #[test]
  fn duplicate_sample_is_dropped() {
    let mut dict = Dictionary::new();
    let diag = NullDiagnostics;
    dict.intern_sample("NA001", &diag);
    dict.intern_sample("NA001", &diag);
    assert_eq!(dict.n_sample(), 1);
  }
}
