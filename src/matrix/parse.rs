use std::fs::File;
use std::io::{BufReader, Read};

use encoding_rs::WINDOWS_1252;

use crate::matrix::line;
use crate::types::errors::MatrixReadError;
use crate::types::matrix::CanMatrix;

/// Parses a catalog document into a [`CanMatrix`].
///
/// The document is processed **line by line** while carrying a "current
/// message" state:
/// - a `BO_` line declares a new message (decimal or `0x` hex identifier,
///   name, declared byte length) and becomes the context for the signal
///   lines that follow;
/// - a `SG_` line attaches a signal to the current message; it is dropped
///   when no message context exists yet;
/// - every other line (comments, `VERSION`, node lists, blank lines,
///   unrelated sections) is skipped.
///
/// This function is **total**: malformed lines are ignored, never surfaced.
/// Catalogs in the wild vary wildly in how strictly they populate optional
/// fields; the required ones (identifier, name, length, bit layout,
/// factor/offset, unit) reject only their own line when broken. An input
/// that yields no message at all simply returns an empty matrix; whether
/// that is an error is the caller's call.
pub fn from_text(text: &str) -> CanMatrix {
    let mut matrix: CanMatrix = CanMatrix::default();
    // decimal key of the message currently being filled
    let mut current: Option<String> = None;

    for raw_line in text.lines() {
        let line_trimmed: &str = raw_line.trim_start();

        // skip comments and empty lines
        if line_trimmed.is_empty() || line_trimmed.starts_with("//") {
            continue;
        }

        if line_trimmed.starts_with("BO_")
            && let Some((key, msg)) = line::message_line(line_trimmed)
        {
            matrix.insert(key.clone(), msg);
            current = Some(key);
            continue;
        }

        if line_trimmed.starts_with("SG_")
            && let Some(key) = &current
            && let Some(sig) = line::signal_line(line_trimmed)
            && let Some(msg) = matrix.messages.get_mut(key)
        {
            msg.add_signal(sig);
        }
        // anything else: not a catalog line, skip
    }

    log::debug!("catalog parsed: {} message(s)", matrix.len());
    matrix
}

/// Reads a `.dbc` catalog file and parses it with [`from_text`].
///
/// The raw bytes are decoded as Windows-1252 before parsing: catalogs are
/// typically exported by Windows tooling and are not valid UTF-8.
///
/// # Errors
/// - [`MatrixReadError::InvalidExtension`] when `path` does not end in `.dbc`.
/// - [`MatrixReadError::OpenFile`] / [`MatrixReadError::Read`] on I/O errors.
pub fn from_file(path: &str) -> Result<CanMatrix, MatrixReadError> {
    if !path.ends_with(".dbc") {
        return Err(MatrixReadError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let file: File = File::open(path).map_err(|source| MatrixReadError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut bytes: Vec<u8> = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| MatrixReadError::Read {
            path: path.to_string(),
            source,
        })?;

    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    Ok(from_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"VERSION "1.0"

// node list, ignored by the matrix parser
BU_: ECM BCM

BO_ 256 ENGINE_DATA: 8 ECM
 SG_ ENGINE_RPM : 0|16@1+ (0.25,0) [0|16383.75] "rpm"
 SG_ COOLANT_TEMP : 24|8@1+ (1,-40) [-40|215] "degC"

BO_ 512 VEHICLE_DYNAMICS : 8 BCM
 SG_ VEHICLE_SPEED : 0|16@0+ (0.01,0) [0|655.35] "km/h"
 SG_ BRAKE_ACTIVE : 32|1@1+ (1,0) ""
"#;

    #[test]
    fn parses_messages_and_attaches_signals() {
        let matrix = from_text(CATALOG);

        assert_eq!(matrix.len(), 2);
        let engine = matrix.get("256").expect("ENGINE_DATA");
        assert_eq!(engine.name, "ENGINE_DATA");
        assert_eq!(engine.byte_length, 8);
        assert_eq!(engine.signals.len(), 2);
        assert_eq!(engine.signals["ENGINE_RPM"].factor, 0.25);

        let dyn_msg = matrix.get("512").expect("VEHICLE_DYNAMICS");
        assert_eq!(dyn_msg.signals.len(), 2);
        assert!(!dyn_msg.signals["VEHICLE_SPEED"].little_endian);
    }

    #[test]
    fn range_omitted_defaults_to_zero_bounds() {
        let matrix = from_text(CATALOG);
        let brake = &matrix.get("512").unwrap().signals["BRAKE_ACTIVE"];
        assert_eq!(brake.min, 0.0);
        assert_eq!(brake.max, 0.0);
    }

    #[test]
    fn orphan_signal_lines_are_dropped() {
        let text = "SG_ ORPHAN : 0|8@1+ (1,0) \"\"\nBO_ 1 M: 8\n SG_ OK : 0|8@1+ (1,0) \"\"\n";
        let matrix = from_text(text);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("1").unwrap().signals.len(), 1);
        assert!(matrix.get("1").unwrap().signals.contains_key("OK"));
    }

    #[test]
    fn duplicate_signal_name_last_wins() {
        let text = "BO_ 1 M: 8\n SG_ S : 0|8@1+ (1,0) \"\"\n SG_ S : 8|8@1+ (2,0) \"\"\n";
        let matrix = from_text(text);
        let msg = matrix.get("1").unwrap();
        assert_eq!(msg.signals.len(), 1);
        assert_eq!(msg.signals["S"].factor, 2.0);
        assert_eq!(msg.signals["S"].bit_start, 8);
    }

    #[test]
    fn malformed_lines_do_not_stop_the_fold() {
        let text = "BO_ garbage\nBO_ 1 M: 8\n SG_ broken\n SG_ OK : 0|8@1+ (1,0) \"\"\nrandom prose\n";
        let matrix = from_text(text);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("1").unwrap().signals.len(), 1);
    }

    #[test]
    fn empty_document_yields_empty_matrix() {
        let matrix = from_text("// only comments\n\n");
        assert!(matrix.is_empty());
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let text = "BO_ 1 M: 8\r\n SG_ S : 0|8@1+ (1,0) \"V\"\r\n";
        let matrix = from_text(text);
        assert_eq!(matrix.get("1").unwrap().signals["S"].unit, "V");
    }

    #[test]
    fn from_file_rejects_wrong_extension() {
        let err = from_file("catalog.txt").unwrap_err();
        assert!(matches!(err, MatrixReadError::InvalidExtension { .. }));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = from_file("definitely_not_here.dbc").unwrap_err();
        assert!(matches!(err, MatrixReadError::OpenFile { .. }));
    }

    #[test]
    fn from_file_round_trips_a_catalog_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.dbc");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(CATALOG.as_bytes()).expect("write");

        let matrix = from_file(path.to_str().unwrap()).expect("parse");
        assert_eq!(matrix.len(), 2);
    }
}
