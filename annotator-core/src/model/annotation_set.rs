use serde::{Deserialize, Serialize};

use super::Annotation;
use crate::error::{AnnotatorError, Result};

/// The exported document: `{"annotations": [...]}` in save order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSet {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Take all annotations, leaving an empty set behind
    pub fn take(&mut self) -> AnnotationSet {
        std::mem::take(self)
    }

    /// Pretty JSON with 2-space indentation; non-ASCII is written literally
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AnnotatorError::Serialize)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AnnotatorError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRange;

    #[test]
    fn test_empty_set_pretty_json() {
        let json = AnnotationSet::new().to_pretty_json().unwrap();
        assert_eq!(json, "{\n  \"annotations\": []\n}");
    }

    #[test]
    fn test_non_ascii_is_literal() {
        let mut set = AnnotationSet::new();
        set.push(Annotation::new(
            TextRange::new(0, 5),
            "CIUDAD".to_string(),
            Some("Bogotá".to_string()),
        ));
        let json = set.to_pretty_json().unwrap();
        assert!(json.contains("\"Bogotá\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_missing_key_defaults_to_empty() {
        let set = AnnotationSet::from_json("{}").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut set = AnnotationSet::new();
        set.push(Annotation::new(TextRange::new(1, 2), String::new(), None));
        let taken = set.take();
        assert_eq!(taken.len(), 1);
        assert!(set.is_empty());
    }
}
