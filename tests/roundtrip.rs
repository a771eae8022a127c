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

//! End-to-end fixtures: header ingestion, record parsing and
//! formatting driven entirely through the public API.

use std::io::Cursor;

use vcflib::diagnostics::{Level, VecDiagnostics};
use vcflib::io::{BufReadLineSource, WriteByteSink};
use vcflib::record::ParseOutcome;
use vcflib::{read_header, read_record, write_record};

const FIXTURE: &str = "\
##fileformat=VCFv4.2
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele freq\">
##FILTER=<ID=q10,Description=\"low qual\">
##FILTER=<ID=s50,Description=\"low map qual\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">
##contig=<ID=chr1,length=1000000>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001\tNA002
chr1\t100\trs1\tA\tT\t29.5\tq10\tDP=34\tGT:DP\t0/1:12\t./.:.
chr1\t200\t.\tG\tA,C\t.\t.\tAF=0.5,0.25\tGT:DP\t1/1:20\t0/0:18
chrX\t1\t.\tA\tT\t.\t.\t.\tGT:DP\t0/1:5\t0/1:5
";

fn parse_fixture(text: &str) -> (Vec<u8>, usize, usize) {
  let diag = VecDiagnostics::new();
  let mut source = BufReadLineSource::new(Cursor::new(text.as_bytes().to_vec()));
  let dict = read_header(&mut source, &diag).unwrap();

  let mut out = Vec::new();
  let mut parsed = 0;
  let mut skipped = 0;
  {
    let mut sink = WriteByteSink::new(&mut out);
    while let Some(outcome) = read_record(&mut source, &dict, &diag).unwrap() {
      match outcome {
        ParseOutcome::Parsed(record) => {
          write_record(&record, &dict, &mut sink).unwrap();
          parsed += 1;
        }
        ParseOutcome::Skipped => skipped += 1,
      }
    }
  }
  (out, parsed, skipped)
}

#[test]
fn header_and_records_round_trip_to_canonical_text() {
  let (out, parsed, skipped) = parse_fixture(FIXTURE);
  assert_eq!(parsed, 2);
  assert_eq!(skipped, 1); // chrX is not a declared contig

  let text = String::from_utf8(out).unwrap();
  let lines: Vec<&str> = text.lines().collect();
  assert_eq!(lines[0], "chr1\t100\trs1\tA\tT\t29.5\tq10\tDP=34\tGT:DP\t0/1:12\t./.:.");
  assert_eq!(lines[1], "chr1\t200\t.\tG\tA,C\t.\t.\tAF=0.5,0.25\tGT:DP\t1/1:20\t0/0:18");
}

#[test]
fn unknown_filter_reference_emits_exactly_one_warning() {
  let diag = VecDiagnostics::new();
  let mut source = BufReadLineSource::new(Cursor::new(
    "##contig=<ID=chr1,length=100>\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n".as_bytes().to_vec(),
  ));
  let dict = read_header(&mut source, &diag).unwrap();

  let mut source = BufReadLineSource::new(Cursor::new(b"chr1\t1\t.\tA\tT\t.\tnope\t.\n".to_vec()));
  let outcome = read_record(&mut source, &dict, &diag).unwrap().unwrap();
  assert!(matches!(outcome, ParseOutcome::Parsed(_)));
  assert_eq!(diag.count(Level::Warning), 1);
}

#[test]
fn gzip_stream_parses_identically_to_plain_text() {
  use flate2::write::GzEncoder;
  use flate2::Compression;
  use std::io::Write;
  use vcflib::io::GzLineSource;

  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(FIXTURE.as_bytes()).unwrap();
  let compressed = encoder.finish().unwrap();

  let diag = VecDiagnostics::new();
  let mut source = GzLineSource::new(Cursor::new(compressed));
  let dict = read_header(&mut source, &diag).unwrap();
  let mut parsed = 0;
  while let Some(outcome) = read_record(&mut source, &dict, &diag).unwrap() {
    if matches!(outcome, ParseOutcome::Parsed(_)) {
      parsed += 1;
    }
  }
  assert_eq!(parsed, 2);
}
