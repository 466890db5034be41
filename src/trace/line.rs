use crate::trace::format::LogFormat;
use crate::types::canlog::{Direction, Frame};
use crate::types::matrix::normalize_id_hex;

/// Offers one line to the recognizer for `format`.
///
/// Recognizers are pure pattern-match-and-extract functions: `Some(frame)`
/// on success, `None` when the line has a different shape. They share the
/// extraction contract: float timestamp, `0x…` uppercase id, uppercase hex
/// data tokens, dlc = count of tokens that parsed.
pub(crate) fn recognize(format: LogFormat, line: &str) -> Option<Frame> {
    match format {
        LogFormat::Candump => candump(line),
        LogFormat::Crtd => crtd(line),
        LogFormat::Gvret => gvret(line),
        LogFormat::Asc => asc(line),
    }
}

/// Normalizes one data-byte token to an uppercase two-hex-digit token.
/// Accepts an optional `0x` prefix (GVRET cells carry one).
fn hex_byte_token(token: &str) -> Option<String> {
    let t: &str = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if t.is_empty() || t.len() > 2 {
        return None;
    }
    u8::from_str_radix(t, 16).ok().map(|b| format!("{b:02X}"))
}

// Example:
// (1469941473.862385) can0 0C8#2A366C2B
// (1469941473.862385) can0 0C8##12A366C2B     <- CAN FD, flag nibble after ##
pub(crate) fn candump(line: &str) -> Option<Frame> {
    let mut parts = line.split_whitespace();

    // "(seconds.micros)"
    let ts_token: &str = parts.next()?;
    let ts_inner: &str = ts_token.strip_prefix('(')?.strip_suffix(')')?;
    let timestamp: f64 = ts_inner.parse().ok()?;

    // interface name, content free-form but required
    let _iface: &str = parts.next()?;

    // "ID#DATA" with the no-separator data convention
    let frame_token: &str = parts.next()?;
    let (id_token, payload) = frame_token.split_once('#')?;
    let id: String = normalize_id_hex(id_token)?;

    // CAN FD marker: a second '#' followed by one flag nibble
    let payload: &str = match payload.strip_prefix('#') {
        Some(rest) => rest.get(1..).unwrap_or(""),
        None => payload,
    };

    // successive two-character chunks; stop at the first non-hex chunk,
    // an odd trailing nibble is dropped
    let mut data: Vec<String> = Vec::new();
    for i in 0..payload.len() / 2 {
        match payload.get(2 * i..2 * i + 2).and_then(hex_byte_token) {
            Some(tok) => data.push(tok),
            None => break,
        }
    }

    Some(Frame {
        timestamp,
        id,
        dlc: data.len(),
        data,
        direction: Direction::Rx,
        decoded: None,
    })
}

// Example:
// 1000.234890 R11 7DF 02 01 0C
// token 2 is direction + type digits (bus number / id width), digits ignored
pub(crate) fn crtd(line: &str) -> Option<Frame> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let timestamp: f64 = parts[0].parse().ok()?;

    let mut type_chars = parts[1].chars();
    let direction: Direction = match type_chars.next()? {
        'R' | 'r' => Direction::Rx,
        'T' | 't' => Direction::Tx,
        _ => return None,
    };
    if !type_chars.all(|c| c.is_ascii_digit()) {
        return None;
    }

    let id: String = normalize_id_hex(parts[2])?;

    let mut data: Vec<String> = Vec::new();
    for token in &parts[3..] {
        match hex_byte_token(token) {
            Some(tok) => data.push(tok),
            None => break,
        }
    }

    Some(Frame {
        timestamp,
        id,
        dlc: data.len(),
        data,
        direction,
        decoded: None,
    })
}

// Example (SavvyCAN / GVRET export):
// Time Stamp,ID,Extended,Dir,Bus,LEN,D1,D2,D3,D4,D5,D6,D7,D8
// 45420903,0x12F85250,true,Rx,0,8,40,9A,94,31,B4,6F,AE,86
pub(crate) fn gvret(line: &str) -> Option<Frame> {
    if !line.contains(',') {
        return None;
    }
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 6 {
        return None;
    }

    // header rows are structurally valid CSV; reject on the literal
    // column-name words before any numeric probing
    if fields.iter().any(|f| {
        f.eq_ignore_ascii_case("timestamp") || f.eq_ignore_ascii_case("time stamp")
    }) {
        return None;
    }

    let timestamp: f64 = fields[0].parse().ok()?;
    let id: String = normalize_id_hex(fields[1])?;
    let direction: Direction = Direction::from_token(fields[3]).unwrap_or_default();
    // fields[2] (extended flag), fields[4] (bus) and fields[5] (declared LEN)
    // are not trusted; dlc comes from counting the data cells

    let mut data: Vec<String> = Vec::new();
    for token in &fields[6..] {
        if token.is_empty() {
            continue; // short frames leave trailing empty cells
        }
        match hex_byte_token(token) {
            Some(tok) => data.push(tok),
            None => break,
        }
    }

    Some(Frame {
        timestamp,
        id,
        dlc: data.len(),
        data,
        direction,
        decoded: None,
    })
}

// Example:
// 0.016728 1  17334410x       Rx   d 8 3E 42 03 00 39 00 03 01
// 0.016728 1  17334410x       Rx   Gateway ECU d 8 3E 42 03 00 39 00 03 01
pub(crate) fn asc(line: &str) -> Option<Frame> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }

    let timestamp: f64 = parts[0].parse().ok()?;
    let _channel: usize = parts[1].parse().ok()?;
    let id: String = normalize_id_hex(parts[2])?;
    let direction: Direction = Direction::from_token(parts[3])?;

    // look for 'd' or 'D' starting from parts[4]; optional ECU tokens may
    // sit between direction and the marker
    let d_idx: usize = 4 + parts[4..].iter().position(|p| *p == "d" || *p == "D")?;

    // token after the marker is the declared byte length
    let declared: usize = parts.get(d_idx + 1)?.parse().ok()?;

    // read at most `declared` tokens; dlc is what actually parsed, so a
    // truncated line yields a shorter frame and trailing junk is ignored
    let mut data: Vec<String> = Vec::new();
    for token in parts.iter().skip(d_idx + 2).take(declared) {
        match hex_byte_token(token) {
            Some(tok) => data.push(tok),
            None => break,
        }
    }

    Some(Frame {
        timestamp,
        id,
        dlc: data.len(),
        data,
        direction,
        decoded: None,
    })
}
