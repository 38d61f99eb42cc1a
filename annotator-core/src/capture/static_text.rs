use super::{CandidateSelection, SelectionSource};

/// How range offsets are reported for static text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetMode {
    /// Offsets index the full displayed text (node-local offset plus the
    /// lengths of all preceding nodes)
    #[default]
    FullText,
    /// Offsets are relative to the text node holding each boundary point.
    /// A range spanning nodes can report `start == end` here, which the
    /// store treats as an empty span and drops.
    NodeLocal,
}

/// A boundary point of a range: surface id, text node index, char offset in node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePoint {
    pub surface: String,
    pub node: usize,
    pub offset: usize,
}

impl NodePoint {
    pub fn new(surface: impl Into<String>, node: usize, offset: usize) -> Self {
        Self {
            surface: surface.into(),
            node,
            offset,
        }
    }
}

/// A selection range; anchor and focus may be in either order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRange {
    pub anchor: NodePoint,
    pub focus: NodePoint,
}

/// A read-only display surface made of text nodes, with the active range
#[derive(Debug, Clone)]
pub struct StaticText {
    id: String,
    nodes: Vec<String>,
    range: Option<NodeRange>,
    mode: OffsetMode,
}

impl StaticText {
    pub fn new(id: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            id: id.into(),
            nodes,
            range: None,
            mode: OffsetMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: OffsetMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The full displayed text
    pub fn text(&self) -> String {
        self.nodes.concat()
    }

    pub fn set_range(&mut self, range: Option<NodeRange>) {
        self.range = range;
    }

    /// Resolve a boundary that sits between text nodes, given how many text
    /// nodes precede it. Maps to the start of the next text node, or to the
    /// end of the last one when nothing follows.
    pub fn point_between_nodes(&self, preceding: usize) -> Option<NodePoint> {
        if preceding < self.nodes.len() {
            return Some(NodePoint::new(self.id.clone(), preceding, 0));
        }
        let last = self.nodes.len().checked_sub(1)?;
        let len = self.nodes[last].chars().count();
        Some(NodePoint::new(self.id.clone(), last, len))
    }

    /// Validate a point against this surface, returning (node, offset)
    fn locate(&self, point: &NodePoint) -> Option<(usize, usize)> {
        if point.surface != self.id {
            return None;
        }
        let node = self.nodes.get(point.node)?;
        if point.offset > node.chars().count() {
            return None;
        }
        Some((point.node, point.offset))
    }

    fn node_start(&self, node: usize) -> usize {
        self.nodes[..node].iter().map(|n| n.chars().count()).sum()
    }

    fn selected_text(
        &self,
        (first_node, first_off): (usize, usize),
        (last_node, last_off): (usize, usize),
    ) -> String {
        if first_node == last_node {
            return self.nodes[first_node]
                .chars()
                .skip(first_off)
                .take(last_off - first_off)
                .collect();
        }

        let mut text: String = self.nodes[first_node].chars().skip(first_off).collect();
        for node in &self.nodes[first_node + 1..last_node] {
            text.push_str(node);
        }
        text.extend(self.nodes[last_node].chars().take(last_off));
        text
    }
}

impl SelectionSource for StaticText {
    fn selection(&self) -> Option<CandidateSelection> {
        let range = self.range.as_ref()?;
        let anchor = self.locate(&range.anchor)?;
        let focus = self.locate(&range.focus)?;

        let (first, last) = if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        };
        if first == last {
            return None;
        }

        let text = self.selected_text(first, last);
        if text.is_empty() {
            return None;
        }

        let (start, end) = match self.mode {
            OffsetMode::FullText => (
                self.node_start(first.0) + first.1,
                self.node_start(last.0) + last.1,
            ),
            OffsetMode::NodeLocal => (first.1, last.1),
        };

        Some(CandidateSelection { start, end, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> StaticText {
        StaticText::new(
            "source",
            vec![
                "Lemon Herb ".to_string(),
                "Roasted".to_string(),
                " Chicken".to_string(),
            ],
        )
    }

    fn range(a: (usize, usize), f: (usize, usize)) -> Option<NodeRange> {
        Some(NodeRange {
            anchor: NodePoint::new("source", a.0, a.1),
            focus: NodePoint::new("source", f.0, f.1),
        })
    }

    #[test]
    fn test_no_range_is_noop() {
        assert_eq!(recipe().selection(), None);
    }

    #[test]
    fn test_single_node_full_text_offsets() {
        let mut surface = recipe();
        surface.set_range(range((1, 0), (1, 7)));
        let c = surface.selection().unwrap();
        assert_eq!(c, CandidateSelection::new(11, 18, "Roasted"));
        assert_eq!(&surface.text()[c.start..c.end], "Roasted");
    }

    #[test]
    fn test_cross_node_backwards_selection() {
        let mut surface = recipe();
        surface.set_range(range((2, 8), (0, 6)));
        let c = surface.selection().unwrap();
        assert_eq!(c.text, "Herb Roasted Chicken");
        assert_eq!((c.start, c.end), (6, 26));
    }

    #[test]
    fn test_node_local_offsets() {
        let mut surface = recipe().with_mode(OffsetMode::NodeLocal);
        surface.set_range(range((1, 2), (2, 4)));
        let c = surface.selection().unwrap();
        assert_eq!(c.text, "asted Chi");
        assert_eq!((c.start, c.end), (2, 4));
    }

    #[test]
    fn test_collapsed_range_is_noop() {
        let mut surface = recipe();
        surface.set_range(range((1, 3), (1, 3)));
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_range_outside_surface_is_noop() {
        let mut surface = recipe();
        surface.set_range(Some(NodeRange {
            anchor: NodePoint::new("elsewhere", 0, 0),
            focus: NodePoint::new("source", 1, 3),
        }));
        assert_eq!(surface.selection(), None);

        surface.set_range(range((0, 0), (5, 1)));
        assert_eq!(surface.selection(), None);

        surface.set_range(range((0, 0), (1, 40)));
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_node_local_cross_node_can_collapse_offsets() {
        let mut surface = recipe().with_mode(OffsetMode::NodeLocal);
        surface.set_range(range((1, 3), (2, 3)));
        let c = surface.selection().unwrap();
        assert_eq!(c.text, "sted Ch");
        assert_eq!((c.start, c.end), (3, 3));

        let mut store = crate::AnnotationStore::default();
        assert_eq!(store.append(Some(c), None), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_point_between_nodes() {
        let surface = recipe();
        assert_eq!(surface.point_between_nodes(0), Some(NodePoint::new("source", 0, 0)));
        assert_eq!(surface.point_between_nodes(2), Some(NodePoint::new("source", 2, 0)));
        // past the last node resolves to its end
        assert_eq!(surface.point_between_nodes(3), Some(NodePoint::new("source", 2, 8)));
        assert_eq!(StaticText::new("source", Vec::new()).point_between_nodes(0), None);
    }

    #[test]
    fn test_element_boundaries_select_whole_nodes() {
        // as for a triple-click: anchor before the first child, focus after the last
        let mut surface = recipe();
        let anchor = surface.point_between_nodes(0).unwrap();
        let focus = surface.point_between_nodes(3).unwrap();
        surface.set_range(Some(NodeRange { anchor, focus }));
        let c = surface.selection().unwrap();
        assert_eq!(c, CandidateSelection::new(0, 26, "Lemon Herb Roasted Chicken"));

        // element boundary before the middle node, text boundary inside it
        let anchor = surface.point_between_nodes(1).unwrap();
        surface.set_range(Some(NodeRange {
            anchor,
            focus: NodePoint::new("source", 1, 5),
        }));
        assert_eq!(surface.selection().unwrap(), CandidateSelection::new(11, 16, "Roast"));
    }
}
