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

//! Basic shared vocabulary used across the dictionary, header parser and
//! typed codec: the element types a declared key can hold, how many
//! elements it carries, and the four kinds of thing a name can be
//! declared as.

use std::fmt;

/// The element type of a declared key, as it appears in a `##INFO`/
/// `##FORMAT`/`##FILTER` meta-line's `Type=` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
  Flag,
  Int,
  Real,
  Str,
}

/// How many elements a declared key carries per record (or per sample,
/// for FORMAT keys), as it appears in the `Number=` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
  /// `Number=<n>`, a fixed count known ahead of time.
  Fixed(u32),
  /// `Number=A`: one value per ALT allele.
  PerAlt,
  /// `Number=G`: one value per possible genotype.
  PerGenotype,
  /// `Number=.` or any value this parser does not special-case.
  Variable,
}

/// A full header declaration for one (name, kind) pair: what type its
/// values have, and how many of them there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
  pub element: Element,
  pub cardinality: Cardinality,
}

impl Descriptor {
  pub fn flag() -> Self {
    Descriptor { element: Element::Flag, cardinality: Cardinality::Fixed(0) }
  }
}

/// The four kinds a declaration inside `##KIND=<...>` can be, plus the
/// dense index used to address `KeyInfo::descriptors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
  Contig = 0,
  Info = 1,
  Filter = 2,
  Format = 3,
}

pub const N_DECL_KIND: usize = 4;

impl DeclKind {
  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for DeclKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match *self {
      DeclKind::Contig => "contig",
      DeclKind::Info => "INFO",
      DeclKind::Filter => "FILTER",
      DeclKind::Format => "FORMAT",
    };
    write!(f, "{}", name)
  }
}

/// The wire-level type/count descriptor byte's low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtType {
  Int8 = 1,
  Int16 = 2,
  Int32 = 3,
  Float = 5,
  Char = 7,
  CStr = 8,
}

impl RtType {
  #[inline]
  pub fn from_nibble(n: u8) -> Option<RtType> {
    match n {
      1 => Some(RtType::Int8),
      2 => Some(RtType::Int16),
      3 => Some(RtType::Int32),
      5 => Some(RtType::Float),
      7 => Some(RtType::Char),
      8 => Some(RtType::CStr),
      _ => None,
    }
  }

  /// Size in bytes of a single element of this type, when that is
  /// statically known. `CStr` elements are variable-length (NUL
  /// terminated) and have no fixed size.
  #[inline]
  pub fn elem_size(self) -> Option<usize> {
    match self {
      RtType::Int8 => Some(1),
      RtType::Int16 => Some(2),
      RtType::Int32 => Some(4),
      RtType::Float => Some(4),
      RtType::Char => Some(1),
      RtType::CStr => None,
    }
  }
}

/// Dense integer handle for an interned name. Stable once assigned.
pub type Kid = u32;
