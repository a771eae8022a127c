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

//! `LineSource`/`ByteSink` adapters: the external collaborators the core
//! parser delegates file opening and (de)compression to.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::Result;

/// One line of input, terminator stripped.
pub enum LineResult {
  Line(Vec<u8>),
  Eof,
}

/// Source of `\n`-terminated text lines. All compression and file
/// opening live outside the core parser, behind this trait.
pub trait LineSource {
  fn next_line(&mut self) -> Result<LineResult>;

  /// 1-based line number of the line most recently returned, for
  /// diagnostics context.
  fn line_no(&self) -> u64;
}

/// Destination for raw output bytes.
pub trait ByteSink {
  fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Splits a `BufRead` on `\n`, stripping a trailing `\r`.
pub struct BufReadLineSource<R: BufRead> {
  reader: R,
  line_no: u64,
}

impl<R: BufRead> BufReadLineSource<R> {
  pub fn new(reader: R) -> Self {
    BufReadLineSource { reader, line_no: 0 }
  }
}

impl<R: BufRead> LineSource for BufReadLineSource<R> {
  fn next_line(&mut self) -> Result<LineResult> {
    let mut buf = Vec::new();
    let n = self.reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
      return Ok(LineResult::Eof);
    }
    if buf.last() == Some(&b'\n') {
      buf.pop();
      if buf.last() == Some(&b'\r') {
        buf.pop();
      }
    }
    self.line_no += 1;
    Ok(LineResult::Line(buf))
  }

  fn line_no(&self) -> u64 {
    self.line_no
  }
}

/// Wraps a gzip or BGZF byte stream. BGZF is a concatenation of
/// independent gzip members, which `MultiGzDecoder` reads transparently
/// as one logical stream.
pub struct GzLineSource<R: Read> {
  inner: BufReadLineSource<BufReader<MultiGzDecoder<R>>>,
}

impl<R: Read> GzLineSource<R> {
  pub fn new(reader: R) -> Self {
    GzLineSource {
      inner: BufReadLineSource::new(BufReader::new(MultiGzDecoder::new(reader))),
    }
  }
}

impl<R: Read> LineSource for GzLineSource<R> {
  fn next_line(&mut self) -> Result<LineResult> {
    self.inner.next_line()
  }

  fn line_no(&self) -> u64 {
    self.inner.line_no()
  }
}

/// Opens `path`, sniffing the first two bytes to tell a gzip/BGZF stream
/// (magic `1f 8b`) from plain text.
pub fn open_vcf<P: AsRef<Path>>(path: P) -> Result<Box<dyn LineSource>> {
  let mut file = File::open(path)?;
  let mut magic = [0u8; 2];
  let n = file.read(&mut magic)?;
  let rewound = io::Cursor::new(magic[..n].to_vec()).chain(file);
  if n == 2 && magic == [0x1f, 0x8b] {
    Ok(Box::new(GzLineSource::new(rewound)))
  } else {
    Ok(Box::new(BufReadLineSource::new(BufReader::new(rewound))))
  }
}

/// A `ByteSink` backed by any `Write`.
pub struct WriteByteSink<W: Write> {
  writer: W,
}

impl<W: Write> WriteByteSink<W> {
  pub fn new(writer: W) -> Self {
    WriteByteSink { writer }
  }
}

impl<W: Write> ByteSink for WriteByteSink<W> {
  fn write(&mut self, bytes: &[u8]) -> Result<()> {
    self.writer.write_all(bytes)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  #[test]
  fn buf_read_line_source_strips_crlf() {
    let mut src = BufReadLineSource::new(Cursor::new(b"a\r\nb\n".to_vec()));
    match src.next_line().unwrap() {
      LineResult::Line(l) => assert_eq!(l, b"a"),
      LineResult::Eof => panic!("expected a line"),
    }
    assert_eq!(src.line_no(), 1);
    match src.next_line().unwrap() {
      LineResult::Line(l) => assert_eq!(l, b"b"),
      LineResult::Eof => panic!("expected a line"),
    }
    match src.next_line().unwrap() {
      LineResult::Line(_) => panic!("expected eof"),
      LineResult::Eof => {}
    }
  }

  #[test]
  fn write_byte_sink_forwards_to_writer() {
    let mut out = Vec::new();
    {
      let mut sink = WriteByteSink::new(&mut out);
      sink.write(b"hello").unwrap();
    }
    assert_eq!(out, b"hello");
  }

  #[test]
  fn gz_line_source_decodes_gzip_member() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"##fileformat=VCFv4.2\n").unwrap();
    let compressed = encoder.finish().unwrap();
    let mut src = GzLineSource::new(Cursor::new(compressed));
    match src.next_line().unwrap() {
      LineResult::Line(l) => assert_eq!(l, b"##fileformat=VCFv4.2"),
      LineResult::Eof => panic!("expected a line"),
    }
  }
}
