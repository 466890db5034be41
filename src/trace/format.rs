use std::path::Path;

/// The textual frame conventions the trace parser recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// `candump -l` style: `(1469941473.862385) can0 0C8#2A366C2B`.
    Candump,
    /// CRTD style: `123.456 R11 18F 01 02 03`.
    Crtd,
    /// GVRET/SavvyCAN CSV row: `Time Stamp,ID,Extended,Dir,Bus,LEN,D1,...`.
    Gvret,
    /// Vector ASC: `0.016728 1 17334410x Rx d 8 3E 42 03 00 39 00 03 01`.
    Asc,
}

/// Explicit parser configuration.
///
/// Carries the recognizer order used when the source name's extension is not
/// one of the known ones. Passing this explicitly (instead of a module-level
/// setting) keeps `trace::parse` referentially transparent and trivially
/// testable in parallel.
#[derive(Clone, Debug, PartialEq)]
pub struct ParserConfig {
    /// Recognizer order for unknown or absent extensions.
    pub fallback_order: Vec<LogFormat>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            fallback_order: vec![
                LogFormat::Asc,
                LogFormat::Candump,
                LogFormat::Crtd,
                LogFormat::Gvret,
            ],
        }
    }
}

/// Recognizer order for a source document.
///
/// Ordering is a **policy**, not an implementation detail: some line shapes
/// are structurally compatible subsets of others, and the first matching
/// recognizer wins. The policy is keyed off the source name's extension and
/// kept stable:
/// - `.log` → candump first (`[Candump, Crtd, Asc, Gvret]`);
/// - `.csv` → GVRET first (`[Gvret, Crtd, Candump, Asc]`);
/// - anything else → `config.fallback_order`.
pub fn order_for_source(source_name: &str, config: &ParserConfig) -> Vec<LogFormat> {
    let ext: Option<String> = Path::new(source_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("log") => vec![
            LogFormat::Candump,
            LogFormat::Crtd,
            LogFormat::Asc,
            LogFormat::Gvret,
        ],
        Some("csv") => vec![
            LogFormat::Gvret,
            LogFormat::Crtd,
            LogFormat::Candump,
            LogFormat::Asc,
        ],
        _ => config.fallback_order.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_extension_prefers_candump() {
        let order = order_for_source("capture.log", &ParserConfig::default());
        assert_eq!(order[0], LogFormat::Candump);
    }

    #[test]
    fn csv_extension_prefers_gvret() {
        let order = order_for_source("/tmp/export.CSV", &ParserConfig::default());
        assert_eq!(order[0], LogFormat::Gvret);
    }

    #[test]
    fn unknown_or_missing_extension_uses_fallback() {
        let cfg = ParserConfig::default();
        assert_eq!(order_for_source("trace.asc", &cfg), cfg.fallback_order);
        assert_eq!(order_for_source("trace", &cfg), cfg.fallback_order);
        assert_eq!(order_for_source("", &cfg), cfg.fallback_order);
    }

    #[test]
    fn fallback_order_is_caller_controlled() {
        let cfg = ParserConfig {
            fallback_order: vec![LogFormat::Crtd],
        };
        assert_eq!(order_for_source("trace.bin", &cfg), vec![LogFormat::Crtd]);
    }

    #[test]
    fn extension_comes_from_the_file_name_not_the_path() {
        let cfg = ParserConfig::default();
        // a dot in a directory name must not be mistaken for an extension
        let order = order_for_source("/data/session.d/capture", &cfg);
        assert_eq!(order, cfg.fallback_order);
    }
}
