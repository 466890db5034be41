use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::trace::format::{self, ParserConfig};
use crate::trace::{abs_time, line};
use crate::types::canlog::CanLog;
use crate::types::errors::TraceReadError;

/// Parses a trace document into a [`CanLog`].
///
/// The text is processed **per physical line** (`\n` or `\r\n`):
/// - until one is found, header lines are probed for an absolute start time
///   (ASC `date ...`, PCAN `;$STARTTIME=`); only the first hit is kept;
/// - blank lines and comment lines (leading `;`, `#` or `//`) are skipped
///   before any recognition is attempted;
/// - every other line is offered to the recognizers in the order selected
///   by `source_name`'s extension (see [`format::order_for_source`]); the
///   first success wins and no further recognizer is tried for that line.
///
/// A line no recognizer accepts is dropped with no diagnostic: the contract
/// is best-effort salvage of noisy captures, not validation. "The whole
/// document produced nothing" is visible as `CanLog::is_empty`, a normal
/// result rather than an error.
///
/// # Parameters
/// - `text`: the whole document.
/// - `source_name`: file name (or any hint) whose extension selects the
///   recognizer order; an empty string selects the configured fallback.
/// - `config`: explicit parser configuration (fallback recognizer order).
pub fn from_text(text: &str, source_name: &str, config: &ParserConfig) -> CanLog {
    let order = format::order_for_source(source_name, config);

    let mut log: CanLog = CanLog::default();
    let mut found_abs_time: bool = false;
    let mut dropped: usize = 0;

    for raw_line in text.lines() {
        let line_trimmed: &str = raw_line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        if !found_abs_time && let Some(time) = abs_time::from_header(line_trimmed) {
            log.absolute_time = time;
            found_abs_time = true;
            continue;
        }

        // comment markers across the supported conventions
        if line_trimmed.starts_with(';')
            || line_trimmed.starts_with('#')
            || line_trimmed.starts_with("//")
        {
            continue;
        }

        match order.iter().find_map(|f| line::recognize(*f, line_trimmed)) {
            Some(frame) => log.frames.push(frame),
            None => {
                dropped += 1;
                log::trace!("dropped unrecognized line: {line_trimmed}");
            }
        }
    }

    log::debug!(
        "trace '{}': {} frame(s) parsed, {} line(s) dropped",
        source_name,
        log.frames.len(),
        dropped
    );
    log
}

/// Reads a trace file and parses it with [`from_text`], using the file name
/// as the recognizer-order hint.
///
/// The raw bytes are decoded as Windows-1252: loggers on Windows write
/// traces that are not valid UTF-8, and every supported convention is ASCII
/// where it matters.
///
/// # Errors
/// - [`TraceReadError::OpenFile`] / [`TraceReadError::Read`] on I/O errors.
///   There is no extension allowlist: unknown extensions just select the
///   fallback recognizer order.
pub fn from_file(path: &str, config: &ParserConfig) -> Result<CanLog, TraceReadError> {
    let file: File = File::open(path).map_err(|source| TraceReadError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut bytes: Vec<u8> = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| TraceReadError::Read {
            path: path.to_string(),
            source,
        })?;

    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    let source_name: &str = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);
    Ok(from_text(&text, source_name, config))
}
