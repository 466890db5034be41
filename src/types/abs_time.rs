use chrono::NaiveDateTime;

/// Absolute start time of a trace, when the source document declares one.
///
/// `text` keeps the header exactly as it appeared; `value` is the parsed
/// timestamp, `None` when no header was found (purely relative trace).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbsoluteTime {
    /// Raw header text, as found in the document.
    pub text: String,
    /// Parsed start time.
    pub value: Option<NaiveDateTime>,
}

impl AbsoluteTime {
    /// Resets to the "no absolute time" state.
    pub fn clear(&mut self) {
        self.text.clear();
        self.value = None;
    }
}
