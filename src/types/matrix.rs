use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::message_def::MessageDefinition;

/// Catalog mapping bus identifiers to message/signal layout definitions.
///
/// Keys are always the **decimal** text form of the arbitration identifier,
/// whatever radix the catalog document used. Frame identifiers (hexadecimal
/// `"0x..."`) go through [`dec_key_from_hex`] before lookup, so decode-time
/// matching is a single canonical-key comparison.
///
/// A matrix is built once and is read-only afterwards; it is plain owned
/// data, so sharing `&CanMatrix` across decoding threads is safe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanMatrix {
    /// Decimal identifier text → message definition.
    pub messages: HashMap<String, MessageDefinition>,
}

impl CanMatrix {
    /// Looks a message up by its canonical decimal identifier.
    pub fn get(&self, dec_id: &str) -> Option<&MessageDefinition> {
        self.messages.get(dec_id)
    }

    /// Looks a message up by a hexadecimal identifier (`"0x1A0"`, `"1A0"`,
    /// extended `"1A0x"` all accepted).
    pub fn get_by_hex_id(&self, hex_id: &str) -> Option<&MessageDefinition> {
        self.messages.get(&dec_key_from_hex(hex_id)?)
    }

    /// Inserts a message under a decimal identifier key, replacing any
    /// earlier definition with the same identifier.
    pub fn insert(&mut self, dec_id: impl Into<String>, message: MessageDefinition) {
        self.messages.insert(dec_id.into(), message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// `true` when the catalog document produced no message (the caller-level
    /// "empty result" condition).
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Converts a hexadecimal identifier to the decimal canonical key.
///
/// Accepts an optional `0x`/`0X` prefix and an optional trailing `x`/`X`
/// extended-identifier suffix (Vector traces).
pub fn dec_key_from_hex(id: &str) -> Option<String> {
    let t: &str = id.trim();
    let t: &str = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
    let t: &str = t.trim_end_matches(['x', 'X']);
    u64::from_str_radix(t, 16).ok().map(|v| v.to_string())
}

/// Normalizes an identifier token from a log line to the canonical frame
/// form: uppercase hexadecimal with a leading `0x`.
///
/// The source token may carry a `0x` prefix or a trailing `x`/`X`
/// extended-identifier suffix; both are absorbed.
pub fn normalize_id_hex(token: &str) -> Option<String> {
    let t: &str = token.trim().trim_end_matches(['x', 'X']);
    let t: &str = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
    if t.is_empty() {
        return None;
    }
    u64::from_str_radix(t, 16).ok().map(|v| format!("0x{v:X}"))
}

/// Converts a catalog identifier token (decimal text, or hexadecimal with a
/// `0x` prefix) to the decimal canonical key.
pub(crate) fn dec_key_from_catalog(token: &str) -> Option<String> {
    let t: &str = token.trim();
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok().map(|v| v.to_string())
    } else {
        t.parse::<u64>().ok().map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_key_accepts_prefixed_and_bare_hex() {
        assert_eq!(dec_key_from_hex("0x100"), Some("256".to_string()));
        assert_eq!(dec_key_from_hex("100"), Some("256".to_string()));
        assert_eq!(dec_key_from_hex("0C8"), Some("200".to_string()));
        assert_eq!(dec_key_from_hex("17334410x"), Some("389694480".to_string()));
        assert_eq!(dec_key_from_hex("zzz"), None);
        assert_eq!(dec_key_from_hex(""), None);
    }

    #[test]
    fn normalize_id_uppercases_and_prefixes() {
        assert_eq!(normalize_id_hex("7c1"), Some("0x7C1".to_string()));
        assert_eq!(normalize_id_hex("0x7c1"), Some("0x7C1".to_string()));
        assert_eq!(normalize_id_hex("17334410x"), Some("0x17334410".to_string()));
        assert_eq!(normalize_id_hex("ABCDEF01X"), Some("0xABCDEF01".to_string()));
        assert_eq!(normalize_id_hex("can0"), None);
        assert_eq!(normalize_id_hex(""), None);
    }

    #[test]
    fn catalog_key_normalizes_both_radixes() {
        assert_eq!(dec_key_from_catalog("256"), Some("256".to_string()));
        assert_eq!(dec_key_from_catalog("0x100"), Some("256".to_string()));
        assert_eq!(dec_key_from_catalog("0256"), Some("256".to_string()));
        assert_eq!(dec_key_from_catalog("NAME"), None);
    }

    #[test]
    fn hex_lookup_matches_decimal_key() {
        let mut matrix = CanMatrix::default();
        matrix.insert("256", MessageDefinition::new("ENGINE_DATA", 8));

        assert!(matrix.get("256").is_some());
        assert!(matrix.get_by_hex_id("0x100").is_some());
        assert!(matrix.get_by_hex_id("100").is_some());
        assert!(matrix.get_by_hex_id("0x101").is_none());
        assert_eq!(matrix.len(), 1);
    }
}
