use crate::types::matrix::dec_key_from_catalog;
use crate::types::message_def::MessageDefinition;
use crate::types::signal_def::SignalDefinition;

/// Decode a `BO_` message-definition line.
/// Accepts both: `BO_ 256 NAME: 8` and `BO_ 256 NAME : 8`, and a `0x` hex id.
/// Returns the decimal canonical key plus the (still signal-less) definition.
pub(crate) fn message_line(line: &str) -> Option<(String, MessageDefinition)> {
    let line: &str = line.trim();
    let after: &str = line.strip_prefix("BO_")?.trim();

    // 1) ID (first token), normalized to decimal text
    let mut split_once = after.splitn(2, char::is_whitespace);
    let id_str: &str = split_once.next()?;
    let rest: &str = split_once.next().unwrap_or("").trim();
    let key: String = dec_key_from_catalog(id_str)?;

    // 2) NAME (everything up to the first ':')
    let colon_pos: usize = rest.find(':')?;
    let name: &str = rest[..colon_pos].trim().trim_end_matches(':');
    if name.is_empty() {
        return None;
    }

    // 3) After ':' → <len>
    let byte_length: u16 = rest[colon_pos + 1..]
        .trim()
        .split_ascii_whitespace()
        .next()?
        .parse()
        .ok()?;

    Some((key, MessageDefinition::new(name, byte_length)))
}

/// Decode a `SG_` signal-definition line.
/// Format: `SG_ <name> : <start>|<length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>"`
/// The bracketed range is optional (absent ⇒ min = max = 0); the quoted unit
/// is required. Malformed required fields reject the whole line.
pub(crate) fn signal_line(line: &str) -> Option<SignalDefinition> {
    let line: &str = line.trim_start().trim_end_matches(';');
    if !line.starts_with("SG_") {
        return None;
    }

    let mut split_colon = line.splitn(2, ':');
    let left: &str = split_colon.next()?.trim(); // "SG_ NAME"
    let right: &str = split_colon.next()?.trim();

    let mut left_it = left.split_ascii_whitespace();
    let _sg: &str = left_it.next()?; // "SG_"
    let name: &str = left_it.next()?;

    let mut it = right.split_ascii_whitespace();

    // 1) bit info: "24|8@1+"
    let bit_info: &str = it.next()?;
    let (bit_pos_len, es) = bit_info.split_once('@')?;
    let (start_str, len_str) = bit_pos_len.split_once('|')?;
    let bit_start: u16 = start_str.parse().ok()?;
    let bit_length: u16 = len_str.parse().ok()?;
    if bit_length == 0 {
        return None;
    }
    let little_endian: bool = match es.chars().next()? {
        '1' => true,
        '0' => false,
        _ => return None,
    };
    let signed: bool = match es.chars().nth(1)? {
        '-' => true,
        '+' => false,
        _ => return None,
    };

    // 2) "(factor,offset)", possibly split across tokens, gather until ')'
    let paren: &str = it.next()?;
    if !paren.starts_with('(') {
        return None;
    }
    let mut acc = String::from(paren);
    while !acc.ends_with(')') {
        acc.push_str(it.next()?);
    }
    let inner: &str = acc.trim_start_matches('(').trim_end_matches(')');
    let (factor_str, offset_str) = inner.split_once(',')?;
    let factor: f64 = factor_str.trim().parse().ok()?;
    let offset: f64 = offset_str.trim().parse().ok()?;

    // 3) optional "[min|max]"
    let mut min: f64 = 0.0;
    let mut max: f64 = 0.0;
    let mut next_tok: &str = it.next()?;
    let bounds_owned: String;
    if next_tok.starts_with('[') {
        if next_tok.ends_with(']') {
            bounds_owned = next_tok.to_string();
        } else {
            let mut b = String::from(next_tok);
            while !b.ends_with(']') {
                b.push(' ');
                b.push_str(it.next()?);
            }
            bounds_owned = b;
        }
        let inner: &str = bounds_owned.trim_start_matches('[').trim_end_matches(']');
        let (min_str, max_str) = inner.split_once('|')?;
        min = min_str.trim().parse().ok()?;
        max = max_str.trim().parse().ok()?;
        next_tok = it.next()?;
    }

    // 4) "unit": quoted, possibly spanning tokens
    if !next_tok.starts_with('"') {
        return None;
    }
    let mut unit_acc = String::from(next_tok);
    while unit_acc.len() < 2 || !unit_acc.ends_with('"') {
        unit_acc.push(' ');
        unit_acc.push_str(it.next()?);
    }
    let unit: String = unit_acc.trim_matches('"').to_string();

    Some(SignalDefinition {
        name: name.to_string(),
        bit_start,
        bit_length,
        little_endian,
        signed,
        factor,
        offset,
        min,
        max,
        unit,
    })
}
