//! Raw content capture
//!
//! Drains the remainder of an input stream into an output target. Used by
//! the `create file` directive, which hands the interpreter's own script
//! stream over as the byte source: everything after the directive line is
//! file content, with no terminator to switch back to directive mode.

use std::io::{self, ErrorKind, Read, Write};

/// Block size for the copy loop.
const BLOCK_SIZE: usize = 8192;

/// Copy all remaining bytes of `input` into `output`.
///
/// Reads fixed-size blocks until end of input, writing each block in full.
/// Returns the number of bytes written. The payload is treated as opaque
/// bytes; nothing is parsed or stripped.
pub fn capture_remaining<R, W>(input: &mut R, output: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut block = [0u8; BLOCK_SIZE];
    let mut written: u64 = 0;
    loop {
        let n = match input.read(&mut block) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&block[..n])?;
        written += n as u64;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_capture_copies_verbatim() {
        let mut input = Cursor::new(b"hello\nworld".to_vec());
        let mut output = Vec::new();
        let n = capture_remaining(&mut input, &mut output).unwrap();
        assert_eq!(n, 11);
        assert_eq!(output, b"hello\nworld");
    }

    #[test]
    fn test_capture_empty_input() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert_eq!(capture_remaining(&mut input, &mut output).unwrap(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_capture_spans_multiple_blocks() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let mut input = Cursor::new(data.clone());
        let mut output = Vec::new();
        let n = capture_remaining(&mut input, &mut output).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(output, data);
    }
}
