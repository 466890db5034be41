//! # decode
//!
//! The signal decode engine: applies a [`CanMatrix`] to parsed frames,
//! attaching the `decoded` signal-name → physical-value mapping.
//!
//! This component is **total**: every identifier lookup miss and every bit
//! range that overruns a payload degrades gracefully. There are no error
//! conditions; unknown traffic is a normal, expected case.

use std::collections::BTreeMap;

use crate::types::canlog::Frame;
use crate::types::matrix::{CanMatrix, dec_key_from_hex};

/// Decodes every frame in sequence against `matrix`.
///
/// Pure function: each output frame equals its input with `decoded`
/// populated where a message definition matched. The matrix is only read,
/// so the same `&CanMatrix` can serve many decode calls (or partitions of
/// one log across threads) concurrently.
pub fn frames(frames: Vec<Frame>, matrix: &CanMatrix) -> Vec<Frame> {
    frames.into_iter().map(|f| frame(&f, matrix)).collect()
}

/// Decodes a single frame against `matrix`.
///
/// The frame's hexadecimal identifier is converted to the decimal canonical
/// key; on a lookup miss the frame passes through untouched (`decoded` stays
/// absent). On a hit, every signal of the definition is extracted from the
/// payload truncated to the shorter of the declared and the actual length,
/// and `decoded` is set (an empty mapping when the message defines no
/// signals).
pub fn frame(frame: &Frame, matrix: &CanMatrix) -> Frame {
    let mut out: Frame = frame.clone();

    let Some(msg) = dec_key_from_hex(&frame.id).and_then(|key| matrix.get(&key)) else {
        return out;
    };

    let payload: Vec<u8> = frame.payload();
    let usable: usize = payload.len().min(msg.byte_length as usize);
    let bytes: &[u8] = &payload[..usable];

    let mut values: BTreeMap<String, f64> = BTreeMap::new();
    for (name, sig) in &msg.signals {
        let raw: i64 = sig.extract_raw(bytes);
        let physical: f64 = round_sig(raw as f64 * sig.factor + sig.offset);
        values.insert(name.clone(), physical);
    }

    out.decoded = Some(values);
    out
}

/// Rounds to 10 significant digits to suppress floating-point noise from the
/// scale multiplication, keeping decoded output stable across runs.
pub fn round_sig(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits: i32 = 10 - 1 - value.abs().log10().floor() as i32;
    let scale: f64 = 10f64.powi(digits);
    (value * scale).round() / scale
}
