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

//! Error taxonomy for the crate (`errors::Result`, `VcfError`) plus the
//! macro shorthands used throughout the header and record parsers.

use std::io;

use quick_error::quick_error;

quick_error! {
  #[derive(Debug)]
  pub enum VcfError {
    /// Propagated straight from a `LineSource`/`ByteSink`. Never retried.
    Io(err: io::Error) {
      from()
      display("I/O error: {}", err)
      source(err)
    }
    /// Malformed header or record line at the lexical level.
    Parse(message: String) {
      display("parse error: {}", message)
    }
    /// A typed value does not match its declared type.
    Schema(message: String) {
      display("schema error: {}", message)
    }
    /// A referenced key or contig is not in the dictionary.
    UnknownName(message: String) {
      display("unknown name: {}", message)
    }
    /// Unrecoverable: surfaces immediately, no partial record emitted.
    Fatal(message: String) {
      display("fatal error: {}", message)
    }
  }
}

pub type Result<T> = std::result::Result<T, VcfError>;

/// Shorthand for `Err(VcfError::Parse(format!(...)))`.
macro_rules! parse_err {
  ($fmt:expr) => {
    Err($crate::errors::VcfError::Parse(format!($fmt)))
  };
  ($fmt:expr, $($arg:tt)*) => {
    Err($crate::errors::VcfError::Parse(format!($fmt, $($arg)*)))
  };
}

/// Shorthand for `Err(VcfError::Schema(format!(...)))`.
macro_rules! schema_err {
  ($fmt:expr) => {
    Err($crate::errors::VcfError::Schema(format!($fmt)))
  };
  ($fmt:expr, $($arg:tt)*) => {
    Err($crate::errors::VcfError::Schema(format!($fmt, $($arg)*)))
  };
}

/// Shorthand for `Err(VcfError::UnknownName(format!(...)))`.
macro_rules! unknown_name_err {
  ($fmt:expr) => {
    Err($crate::errors::VcfError::UnknownName(format!($fmt)))
  };
  ($fmt:expr, $($arg:tt)*) => {
    Err($crate::errors::VcfError::UnknownName(format!($fmt, $($arg)*)))
  };
}

/// Shorthand for `Err(VcfError::Fatal(format!(...)))`.
macro_rules! fatal_err {
  ($fmt:expr) => {
    Err($crate::errors::VcfError::Fatal(format!($fmt)))
  };
  ($fmt:expr, $($arg:tt)*) => {
    Err($crate::errors::VcfError::Fatal(format!($fmt, $($arg)*)))
  };
}

pub(crate) use fatal_err;
pub(crate) use parse_err;
pub(crate) use schema_err;
pub(crate) use unknown_name_err;
