//! Static report download.
//!
//! The PDF is never parsed: its bytes are streamed verbatim to whatever
//! destination the user picks.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::ReportError;

/// Copy the report at `source` to `dest`, returning the number of bytes written.
pub fn save_report(source: &Path, dest: &Path) -> Result<u64, ReportError> {
    let file = File::open(source).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ReportError::NotFound(source.to_path_buf())
        } else {
            ReportError::Read {
                path: source.to_path_buf(),
                source: e,
            }
        }
    })?;

    let out = File::create(dest).map_err(|source| ReportError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    let bytes = stream_report(BufReader::new(file), BufWriter::new(out), source, dest)?;
    tracing::info!(from = %source.display(), to = %dest.display(), bytes, "saved report");
    Ok(bytes)
}

fn stream_report<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    source: &Path,
    dest: &Path,
) -> Result<u64, ReportError> {
    // io::copy doesn't say which side failed, so read and write separately.
    let mut buf = [0u8; 8192];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source_err) => {
                return Err(ReportError::Read {
                    path: source.to_path_buf(),
                    source: source_err,
                });
            }
        };
        writer.write_all(&buf[..n]).map_err(|e| ReportError::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;
        total += n as u64;
    }
    writer.flush().map_err(|e| ReportError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;
    Ok(total)
}
