//! Selection capture
//!
//! Turns the current state of a display surface into a [`CandidateSelection`],
//! or `None` when there is nothing to propagate. Two surfaces are supported:
//! the editable [`TextSurface`](crate::TextSurface), whose offsets index its
//! whole value, and [`StaticText`], a read-only run of text nodes selected
//! with a DOM-style range.

mod static_text;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use static_text::{NodePoint, NodeRange, OffsetMode, StaticText};

/// A transient `{start, end, text}` record, consumed by the next append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSelection {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl CandidateSelection {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Coerce a loosely-typed selection payload.
    ///
    /// Offsets accept integers, floats (truncated) and numeric strings;
    /// anything else, including a missing field, becomes 0. A missing text
    /// becomes the empty string. Non-object payloads yield `None`.
    pub fn from_json(payload: &Value) -> Option<Self> {
        let fields = payload.as_object()?;
        Some(Self {
            start: coerce_offset(fields.get("start")),
            end: coerce_offset(fields.get("end")),
            text: fields
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

fn coerce_offset(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| v as usize)
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f.trunc() as usize } else { 0 }))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(|v| v.max(0) as usize)
            .unwrap_or(0),
        Some(Value::Bool(b)) => usize::from(*b),
        _ => 0,
    }
}

/// Anything that can report the user's current selection
pub trait SelectionSource {
    fn selection(&self) -> Option<CandidateSelection>;
}

/// Read the selection from a surface that may not exist.
///
/// A missing surface is a silent no-op, never an error.
pub fn capture<S: SelectionSource + ?Sized>(surface: Option<&S>) -> Option<CandidateSelection> {
    let surface = match surface {
        Some(s) => s,
        None => {
            log::debug!("selection surface not found; nothing captured");
            return None;
        }
    };
    surface.selection()
}

/// Convert a UTF-16 code unit offset (as browsers report them) to a char offset
pub fn utf16_to_char_offset(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (i, ch) in text.chars().enumerate() {
        if seen >= units {
            return i;
        }
        seen += ch.len_utf16();
    }
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Option<CandidateSelection>);

    impl SelectionSource for Fixed {
        fn selection(&self) -> Option<CandidateSelection> {
            self.0.clone()
        }
    }

    #[test]
    fn test_capture_missing_surface_is_noop() {
        assert_eq!(capture::<Fixed>(None), None);
    }

    #[test]
    fn test_capture_delegates_to_surface() {
        let candidate = CandidateSelection::new(1, 4, "abc");
        let surface = Fixed(Some(candidate.clone()));
        assert_eq!(capture(Some(&surface)), Some(candidate));
    }

    #[test]
    fn test_from_json_coerces_offsets() {
        let c = CandidateSelection::from_json(&json!({"start": "10", "end": 15.9, "text": " fresh "}))
            .unwrap();
        assert_eq!(c, CandidateSelection::new(10, 15, " fresh "));
    }

    #[test]
    fn test_from_json_defaults() {
        let c = CandidateSelection::from_json(&json!({"end": -3, "start": null})).unwrap();
        assert_eq!(c, CandidateSelection::new(0, 0, ""));

        let c = CandidateSelection::from_json(&json!({"start": "x", "end": 2, "text": 7})).unwrap();
        assert_eq!(c, CandidateSelection::new(0, 2, ""));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert_eq!(CandidateSelection::from_json(&Value::Null), None);
        assert_eq!(CandidateSelection::from_json(&json!([1, 2, "x"])), None);
    }

    #[test]
    fn test_utf16_offsets() {
        // "😀" is two UTF-16 units, one char
        let text = "a😀b";
        assert_eq!(utf16_to_char_offset(text, 0), 0);
        assert_eq!(utf16_to_char_offset(text, 1), 1);
        assert_eq!(utf16_to_char_offset(text, 3), 2);
        assert_eq!(utf16_to_char_offset(text, 4), 3);
        assert_eq!(utf16_to_char_offset(text, 99), 3);
    }
}
