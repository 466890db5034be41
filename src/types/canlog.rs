//! Types representing a parsed bus trace.
//!
//! The model is intentionally **flat**:
//! - [`Frame`] is the canonical record for one observed bus message, whatever
//!   textual convention the source logger used.
//! - [`CanLog`] holds the frames in file order plus the optional absolute
//!   start time discovered in trace headers.
//!
//! Frames are immutable after parsing, except for the one-time addition of
//! the `decoded` mapping by the decode engine.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::abs_time::AbsoluteTime;

/// In-memory representation of a parsed bus trace.
///
/// A `CanLog` is created by the trace parser and then consumed by downstream
/// UIs/tools. Frames are stored in file order.
#[derive(Clone, Debug, Default)]
pub struct CanLog {
    /// Absolute start time extracted from a `date` or `;$STARTTIME=` header, if present.
    pub absolute_time: AbsoluteTime,

    /// All parsed frames in file order.
    pub frames: Vec<Frame>,
}

impl CanLog {
    /// Resets the log to its default (empty) state.
    pub fn clear(&mut self) {
        self.absolute_time.clear();
        self.frames = Vec::default();
    }

    /// `true` when the whole document produced no frames (the caller-level
    /// "empty result" condition).
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Direction of a frame as recorded by the logger.
///
/// Formats without a direction token default to [`Direction::Rx`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Rx,
    Tx,
}

impl Direction {
    /// Decodes an `Rx`/`Tx` token (case-insensitive).
    pub fn from_token(token: &str) -> Option<Direction> {
        if token.eq_ignore_ascii_case("rx") {
            Some(Direction::Rx)
        } else if token.eq_ignore_ascii_case("tx") {
            Some(Direction::Tx)
        } else {
            None
        }
    }

    pub fn is_tx(&self) -> bool {
        *self == Direction::Tx
    }
}

/// One observed bus message, normalized from whichever text convention matched.
///
/// - `id` is always uppercase hexadecimal with a leading `0x`, regardless of
///   the radix used by the source line.
/// - `dlc` is the number of data tokens that actually parsed, never a
///   declared length field, so truncated lines yield shorter-but-consistent
///   frames instead of errors.
/// - `decoded` stays `None` until the decode engine runs; it is `Some`
///   (possibly empty) only when a matching message definition existed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Relative timestamp as recorded by the source logger. Seconds unless
    /// the source format states otherwise.
    pub timestamp: f64,

    /// **Normalized** hexadecimal identifier (`"0x..."`, uppercase).
    pub id: String,

    /// Payload length in bytes; always equals `data.len()`.
    pub dlc: usize,

    /// Payload bytes as uppercase two-hex-digit tokens.
    pub data: Vec<String>,

    /// Direction as recorded by the logger; `Rx` when the format has none.
    pub direction: Direction,

    /// Signal name → physical value, filled by the decode engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded: Option<BTreeMap<String, f64>>,
}

impl Frame {
    /// Payload bytes as numeric values, in order.
    ///
    /// Tokens are produced by the parser and are always valid hex pairs; a
    /// token that somehow is not reads as `0`.
    pub fn payload(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|t| u8::from_str_radix(t, 16).unwrap_or(0))
            .collect()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.6} {} {:?} [{}] {}",
            self.timestamp,
            self.id,
            self.direction,
            self.dlc,
            self.data.join(" ")
        )
    }
}
