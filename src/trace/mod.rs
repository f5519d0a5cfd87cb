//! Trace loading. A trace is a text file with one memory reference per
//! line: an `R`/`W` flag and a hexadecimal byte address, e.g.
//!
//! ```text
//! R 2d41e7a0
//! W 0x2d41f000
//! ```
//!
//! The loader derives the page number from the byte address before the
//! records ever reach a policy, so the cache core only sees well-formed
//! page references.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::cache::Access;
use crate::cache::PageNumber;
use crate::error::{Error, Result};

pub mod synthetic;

/// Offset bits discarded when mapping a byte address to its page, i.e.
/// 4 KiB pages.
pub const PAGE_SHIFT: u32 = 12;

/// Map a byte address to the page it falls in.
pub fn page_number(addr: u64) -> PageNumber {
    addr >> PAGE_SHIFT
}

/// Load a whole trace file into memory as an ordered access sequence.
/// Traces run to tens of millions of records, so they are read once up
/// front rather than re-parsed per policy and frame size.
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<Vec<Access>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| Error::Value(format!("open trace file {}: {}", path.display(), err)))?;
    read_trace(BufReader::new(file))
}

/// Parse trace records from any buffered reader. Blank lines are skipped;
/// anything else malformed is rejected with its line number.
pub fn read_trace(reader: impl BufRead) -> Result<Vec<Access>> {
    let mut accesses = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let op = match fields.next() {
            Some(op) => op,
            None => continue,
        };
        let addr = fields
            .next()
            .ok_or_else(|| Error::Value(format!("trace line {}: missing address", lineno + 1)))?;
        let is_write = match op {
            "W" | "w" => true,
            "R" | "r" => false,
            _ => {
                return Err(Error::Value(format!(
                    "trace line {}: unknown operation {:?}",
                    lineno + 1,
                    op
                )))
            }
        };
        let addr = addr.strip_prefix("0x").unwrap_or(addr);
        let addr = u64::from_str_radix(addr, 16).map_err(|err| {
            Error::Value(format!("trace line {}: bad address: {}", lineno + 1, err))
        })?;
        accesses.push(Access { page_number: page_number(addr), is_write });
    }
    debug!("loaded {} trace records", accesses.len());
    Ok(accesses)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_page_number_derivation() {
        assert_eq!(0, page_number(0));
        assert_eq!(0, page_number(0xfff));
        assert_eq!(1, page_number(0x1000));
        assert_eq!(0x2d41e, page_number(0x2d41e7a0));
    }

    #[test]
    fn test_read_trace() -> Result<()> {
        let input = "R 2d41e7a0\nW 0x2d41f000\n\nr 1000\nw 0\n";
        let accesses = read_trace(Cursor::new(input))?;
        assert_eq!(
            vec![
                Access::read(0x2d41e),
                Access::write(0x2d41f),
                Access::read(1),
                Access::write(0),
            ],
            accesses
        );
        Ok(())
    }

    #[test]
    fn test_read_trace_rejects_malformed_records() {
        // unknown operation flag
        let err = read_trace(Cursor::new("X 1000\n")).unwrap_err();
        assert!(err.to_string().contains("line 1"));

        // missing address, reported with the right line number
        let err = read_trace(Cursor::new("R 1000\nW\n")).unwrap_err();
        assert!(err.to_string().contains("line 2"));

        // address is not hexadecimal
        let err = read_trace(Cursor::new("R zzzz\n")).unwrap_err();
        assert!(err.to_string().contains("bad address"));
    }

    #[test]
    fn test_load_trace_file_missing() {
        let err = load_trace_file("no/such/trace.txt").unwrap_err();
        assert!(err.to_string().contains("open trace file"));
    }
}
