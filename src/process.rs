//! Child processes fed a payload on stdin while their output is collected.
//!
//! stdin is written from a separate thread so a child that streams output
//! while it reads can never fill its stdout pipe and stall both sides.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

/// Run `cmd` with `input` on stdin and capture stdout and stderr.
///
/// A broken pipe while writing is tolerated when the child exits
/// successfully: it answered without reading everything.
pub(crate) fn run_piped(cmd: &mut Command, input: Vec<u8>) -> io::Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let writer = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || -> io::Result<()> {
            stdin.write_all(&input)?;
            stdin.flush()
        })
    });
    let output = child.wait_with_output()?;
    let written = match writer {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))),
        None => Ok(()),
    };
    match written {
        Err(e) if !(e.kind() == io::ErrorKind::BrokenPipe && output.status.success()) => Err(e),
        _ => Ok(output),
    }
}
