//! DOM selection capture over a static text element
//!
//! Walks the text nodes under the element in document order and maps the
//! browser's selection anchor/focus onto them, so offsets can be resolved
//! against the full displayed text.

use web_sys::{Element, Node};

use annotator_core::{
    capture, utf16_to_char_offset, CandidateSelection, NodePoint, NodeRange, OffsetMode,
    StaticText,
};

/// Id of the element whose selection can be saved
pub const SOURCE_ELEMENT_ID: &str = "annotator-source";

fn collect_text_nodes(node: &Node, out: &mut Vec<Node>) {
    if node.node_type() == Node::TEXT_NODE {
        out.push(node.clone());
        return;
    }
    let children = node.child_nodes();
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            collect_text_nodes(&child, out);
        }
    }
}

/// Number of collected text nodes that come before the boundary `(parent, child)`
fn text_nodes_before(nodes: &[Node], parent: &Node, child: u32) -> usize {
    let precedes = |n: &Node, reference: &Node| {
        reference.compare_document_position(n) & Node::DOCUMENT_POSITION_PRECEDING != 0
    };
    match parent.child_nodes().item(child) {
        Some(next) => nodes.iter().filter(|n| precedes(*n, &next)).count(),
        None => nodes
            .iter()
            .filter(|n| parent.contains(Some(*n)) || precedes(*n, parent))
            .count(),
    }
}

/// Map a DOM boundary point onto the text nodes. Text boundaries carry a
/// UTF-16 offset; element boundaries carry a child index.
fn point(
    element: &Element,
    surface: &StaticText,
    nodes: &[Node],
    node: Option<Node>,
    offset: u32,
) -> Option<NodePoint> {
    let node = node?;
    if let Some(index) = nodes.iter().position(|n| n.is_same_node(Some(&node))) {
        let offset = utf16_to_char_offset(&surface.nodes()[index], offset as usize);
        return Some(NodePoint::new(SOURCE_ELEMENT_ID, index, offset));
    }
    // Boundaries outside the element do not map to any node
    if !element.contains(Some(&node)) {
        return None;
    }
    surface.point_between_nodes(text_nodes_before(nodes, &node, offset))
}

/// Snapshot the source element and the current browser range
fn static_text(element: &Element, mode: OffsetMode) -> Option<StaticText> {
    let mut nodes = Vec::new();
    collect_text_nodes(element, &mut nodes);
    let texts: Vec<String> = nodes
        .iter()
        .map(|n| n.text_content().unwrap_or_default())
        .collect();
    let mut surface = StaticText::new(SOURCE_ELEMENT_ID, texts).with_mode(mode);

    let selection = web_sys::window()?.get_selection().ok()??;
    if selection.is_collapsed() {
        return None;
    }

    let anchor = point(
        element,
        &surface,
        &nodes,
        selection.anchor_node(),
        selection.anchor_offset(),
    );
    let focus = point(
        element,
        &surface,
        &nodes,
        selection.focus_node(),
        selection.focus_offset(),
    );
    surface.set_range(anchor.zip(focus).map(|(anchor, focus)| NodeRange { anchor, focus }));
    Some(surface)
}

/// Capture the browser selection inside the source element, if any
pub fn capture_source_selection(mode: OffsetMode) -> Option<CandidateSelection> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(SOURCE_ELEMENT_ID);
    let surface = element.and_then(|el| static_text(&el, mode));
    capture(surface.as_ref())
}

/// Full text of the source element, used to seed the editor
pub fn source_text() -> Option<String> {
    let element = web_sys::window()?
        .document()?
        .get_element_by_id(SOURCE_ELEMENT_ID)?;
    element.text_content()
}
