use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::TextRange;

/// A labeled span of text.
///
/// Serialized as a flat JSON array, `[start, end, label]` or
/// `[start, end, label, text]` when the selected text was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub range: TextRange,
    pub label: String,
    pub text: Option<String>,
}

impl Annotation {
    pub fn new(range: TextRange, label: String, text: Option<String>) -> Self {
        Self { range, label, text }
    }

    pub fn start(&self) -> usize {
        self.range.start_offset
    }

    pub fn end(&self) -> usize {
        self.range.end_offset
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.text.is_some() { 4 } else { 3 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.range.start_offset)?;
        seq.serialize_element(&self.range.end_offset)?;
        seq.serialize_element(&self.label)?;
        if let Some(text) = &self.text {
            seq.serialize_element(text)?;
        }
        seq.end()
    }
}

struct AnnotationVisitor;

impl<'de> Visitor<'de> for AnnotationVisitor {
    type Value = Annotation;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array [start, end, label] or [start, end, label, text]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Annotation, A::Error> {
        let start: usize = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let end: usize = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let label: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        let text: Option<String> = seq.next_element()?;

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(5, &self));
        }

        if start >= end {
            return Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(end as u64),
                &"an end offset greater than the start offset",
            ));
        }

        Ok(Annotation::new(TextRange::new(start, end), label, text))
    }
}

impl<'de> Deserialize<'de> for Annotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(AnnotationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_flat_array() {
        let ann = Annotation::new(
            TextRange::new(10, 15),
            "INGREDIENT".to_string(),
            Some("fresh".to_string()),
        );
        let json = serde_json::to_string(&ann).unwrap();
        assert_eq!(json, r#"[10,15,"INGREDIENT","fresh"]"#);
    }

    #[test]
    fn test_three_field_form_omits_text() {
        let ann = Annotation::new(TextRange::new(0, 4), String::new(), None);
        let json = serde_json::to_string(&ann).unwrap();
        assert_eq!(json, r#"[0,4,""]"#);
    }

    #[test]
    fn test_parses_both_forms() {
        let short: Annotation = serde_json::from_str(r#"[1,3,"CITY"]"#).unwrap();
        assert_eq!(short.text, None);
        assert_eq!(short.label, "CITY");

        let long: Annotation = serde_json::from_str(r#"[1,3,"CITY","Oslo"]"#).unwrap();
        assert_eq!(long.text.as_deref(), Some("Oslo"));
        assert_eq!((long.start(), long.end()), (1, 3));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Annotation>(r#"[1,3]"#).is_err());
        assert!(serde_json::from_str::<Annotation>(r#"[1,3,"a","b","c"]"#).is_err());
        assert!(serde_json::from_str::<Annotation>(r#"{"start":1}"#).is_err());
    }

    #[test]
    fn test_rejects_reversed_or_empty_span() {
        assert!(serde_json::from_str::<Annotation>(r#"[9,4,"CITY"]"#).is_err());
        assert!(serde_json::from_str::<Annotation>(r#"[4,4,"CITY","x"]"#).is_err());
    }
}
