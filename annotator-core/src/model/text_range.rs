use serde::{Deserialize, Serialize};

/// Represents a range of text by character offsets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_offset: usize,
    pub end_offset: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start_offset: start.min(end),
            end_offset: start.max(end),
        }
    }

    /// Check if this range contains the given offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start_offset && offset < self.end_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_offsets() {
        let range = TextRange::new(15, 10);
        assert_eq!(range.start_offset, 10);
        assert_eq!(range.end_offset, 15);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = TextRange::new(2, 4);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
        assert!(TextRange::new(3, 3).is_empty());
    }
}
