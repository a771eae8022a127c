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

//! The injected diagnostics capability: parsers never write to stderr
//! directly, they report through a caller-supplied `Diagnostics` sink,
//! which decides whether and how to surface a message.

use std::sync::Mutex;

/// Severity levels a diagnostic can be reported at, ordered from most
/// to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Error,
  Warning,
  Message,
  Progress,
  Debug,
}

/// A capability object parsers report diagnostics through. Implementors
/// decide whether and how to surface a message; the core never assumes
/// a destination.
pub trait Diagnostics {
  fn report(&self, level: Level, message: &str);

  #[inline]
  fn error(&self, message: &str) {
    self.report(Level::Error, message);
  }

  #[inline]
  fn warning(&self, message: &str) {
    self.report(Level::Warning, message);
  }

  #[inline]
  fn message(&self, message: &str) {
    self.report(Level::Message, message);
  }

  #[inline]
  fn progress(&self, message: &str) {
    self.report(Level::Progress, message);
  }

  #[inline]
  fn debug(&self, message: &str) {
    self.report(Level::Debug, message);
  }
}

/// Discards every diagnostic. The default for callers who don't care.
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
  #[inline]
  fn report(&self, _level: Level, _message: &str) {}
}

/// Forwards every diagnostic to the `log` crate at the matching level.
/// For application binaries that already initialize a logger (e.g. via
/// `env_logger`).
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
  fn report(&self, level: Level, message: &str) {
    match level {
      Level::Error => log::error!("{}", message),
      Level::Warning => log::warn!("{}", message),
      Level::Message => log::info!("{}", message),
      Level::Progress => log::debug!("{}", message),
      Level::Debug => log::trace!("{}", message),
    }
  }
}

/// Collects every diagnostic in order. Used by tests to assert on what
/// was (or was not) reported during a parse.
#[derive(Default)]
pub struct VecDiagnostics {
  events: Mutex<Vec<(Level, String)>>,
}

impl VecDiagnostics {
  pub fn new() -> Self {
    VecDiagnostics { events: Mutex::new(Vec::new()) }
  }

  pub fn events(&self) -> Vec<(Level, String)> {
    self.events.lock().unwrap().clone()
  }

  pub fn count(&self, level: Level) -> usize {
    self.events.lock().unwrap().iter().filter(|(l, _)| *l == level).count()
  }
}

impl Diagnostics for VecDiagnostics {
  fn report(&self, level: Level, message: &str) {
    self.events.lock().unwrap().push((level, message.to_string()));
  }
}
