//! # can_trace
//!
//! Rust engine for ingesting and decoding **automotive bus traffic** logs.
//!
//! ## Highlights
//! - **Multi-format trace parser**: candump, CRTD, GVRET CSV and Vector ASC
//!   lines are recognized per line, first match wins; noisy captures are
//!   salvaged, never rejected (`trace::parse`).
//! - **Catalog parser**: load message/signal layout definitions from `.dbc`
//!   style text into a [`CanMatrix`] (`matrix::parse`), or fall back to the
//!   bundled catalog (`matrix::default_matrix`).
//! - **Bit-exact decoding**: Intel and Motorola bit addressing, cross-byte
//!   fields, two's-complement sign extension, stable 10-significant-digit
//!   physical values (`decode`).
//! - **Canonical frames**: whatever convention a line used, a [`Frame`]
//!   always carries a normalized `0x…` identifier, counted `dlc` and
//!   uppercase hex data tokens.
//!
//! All parsing and decoding is pure and synchronous; the only I/O lives in
//! the `from_file` conveniences.

pub mod decode;
pub mod matrix;
pub mod trace;
#[doc(hidden)]
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::types::{
    abs_time::AbsoluteTime,
    canlog::{CanLog, Direction, Frame},
    errors::{MatrixReadError, TraceReadError},
    matrix::{CanMatrix, dec_key_from_hex, normalize_id_hex},
    message_def::MessageDefinition,
    signal_def::SignalDefinition,
};

pub use crate::matrix::default_matrix;
pub use crate::trace::format::{LogFormat, ParserConfig};
