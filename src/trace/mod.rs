//! # trace
//!
//! Multi-format parsing of logger text dumps. Use
//! `trace::parse::from_text(...)` or `trace::parse::from_file(...)` to build
//! a [`crate::CanLog`]. Recognizer ordering policy lives in
//! [`format`]; the per-convention recognizers are in `trace::line`.

pub mod format;
pub mod parse;
pub(crate) mod abs_time;
pub(crate) mod line;
