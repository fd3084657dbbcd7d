use crate::cli::args::{CopyOptions, Invocation};
use crate::error::{CopyError, CopyResult, WriteFailure};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Totals for a finished copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyReport {
    pub bytes: u64,
    pub chunks: u64,
}

/// Where a chunk transfer failed, before paths are attached.
#[derive(Debug)]
pub enum StreamError {
    Read(io::Error),
    Write(WriteFailure),
}

/// Copy `invocation.input` to `invocation.output`, creating or truncating the output.
///
/// The input is opened first; if that fails the output is never touched.
/// Both handles are dropped on every return path.
pub fn copy_file(invocation: &Invocation, options: &CopyOptions) -> CopyResult<CopyReport> {
    let input = &invocation.input;
    let output = &invocation.output;

    let mut src_file = File::open(input).map_err(|e| CopyError::InputOpen {
        path: input.clone(),
        source: e,
    })?;
    debug!("opened input '{}'", input.display());

    let mut dest_file = File::create(output).map_err(|e| CopyError::OutputOpen {
        path: output.clone(),
        source: e,
    })?;
    debug!("opened output '{}'", output.display());

    let mut buffer = vec![0u8; options.chunk_size.max(1)];
    let report = copy_stream(&mut src_file, &mut dest_file, &mut buffer)
        .map_err(|e| attach_paths(e, input, output))?;

    // Surface deferred write-back errors before reporting success. Devices,
    // pipes and FIFOs reject fsync with EINVAL, so only regular files are synced.
    let write_err = |e: io::Error| CopyError::Write {
        path: output.clone(),
        kind: WriteFailure::Io(e),
    };
    if dest_file.metadata().map_err(write_err)?.is_file() {
        dest_file.sync_all().map_err(write_err)?;
    } else {
        debug!("skipping sync of non-regular output '{}'", output.display());
    }
    debug!(
        "copied {} bytes in {} chunks from '{}' to '{}'",
        report.bytes,
        report.chunks,
        input.display(),
        output.display()
    );

    Ok(report)
}

/// Move bytes from `reader` to `writer` one `buffer`-sized chunk at a time until
/// a read returns zero bytes.
///
/// Each chunk is handed to a single `write` call; writing fewer bytes than were
/// read is a [`WriteFailure::Short`].
pub fn copy_stream<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
) -> Result<CopyReport, StreamError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut report = CopyReport::default();
    loop {
        let bytes_read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };

        let written = writer
            .write(&buffer[..bytes_read])
            .map_err(|e| StreamError::Write(WriteFailure::Io(e)))?;
        if written != bytes_read {
            return Err(StreamError::Write(WriteFailure::Short {
                expected: bytes_read,
                written,
            }));
        }

        report.bytes += bytes_read as u64;
        report.chunks += 1;
        trace!("chunk {}: {} bytes", report.chunks, bytes_read);
    }

    writer
        .flush()
        .map_err(|e| StreamError::Write(WriteFailure::Io(e)))?;
    Ok(report)
}

fn attach_paths(err: StreamError, input: &Path, output: &Path) -> CopyError {
    match err {
        StreamError::Read(e) => CopyError::Read {
            path: input.to_path_buf(),
            source: e,
        },
        StreamError::Write(kind) => CopyError::Write {
            path: output.to_path_buf(),
            kind,
        },
    }
}
