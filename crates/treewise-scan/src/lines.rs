//! Line counting for tracked text files.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Count line terminators in a file.
///
/// The content is decoded lossily, so invalid UTF-8 never fails the count.
/// The file handle is released before returning on every path.
pub fn count_lines(path: &Path) -> io::Result<u64> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    Ok(count_terminators(&String::from_utf8_lossy(&bytes)))
}

/// Count `\n` terminators in decoded text.
pub fn count_terminators(text: &str) -> u64 {
    text.bytes().filter(|&b| b == b'\n').count() as u64
}
