//! Streams the selected candidate to the caller's sink.

use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult};

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Copies the bytes of `path` to `sink` unchanged and returns the byte count.
///
/// Cancellation is checked between chunks. Nothing is undone on failure: the
/// caller owns whatever partial data reached the sink.
pub fn write_selected(
    path: &Path,
    sink: &mut dyn Write,
    cancel: &CancellationToken,
) -> CoreResult<u64> {
    let mut file = File::open(path).map_err(|source| CoreError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut written = 0u64;
    loop {
        cancel.check()?;
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CoreError::OutputWrite(e)),
        };
        sink.write_all(&buf[..n]).map_err(CoreError::OutputWrite)?;
        written += n as u64;
    }
    sink.flush().map_err(CoreError::OutputWrite)?;

    log::debug!("Wrote {} bytes from {}", written, path.display());
    Ok(written)
}
