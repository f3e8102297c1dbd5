#![forbid(unsafe_code)]

//! In-memory [`Document`] for tests and headless hosts.
//!
//! [`MemoryDocument`] is a flat list of elements in document order. It keeps
//! attributes, inline styles, text, a computed overflow, and focus state, and
//! records every scroll request and text write so tests can assert on the
//! page effects of a tour.
//!
//! Elements are never nested; `append_to_body` places an element at the end
//! of the document. Removed elements keep their handle but stop matching
//! queries, and further mutations through them are ignored.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use guidepost_runtime::{Document, OverflowStyle, ScrollIntoViewOptions};

use crate::selector::SelectorList;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Created,
    Connected,
    Removed,
}

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: String,
    attachment: Attachment,
    focusable: bool,
    overflow: OverflowStyle,
}

impl Node {
    fn new(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let focusable = matches!(
            tag.as_str(),
            "a" | "button" | "input" | "select" | "textarea"
        );
        Self {
            tag,
            attributes: Vec::new(),
            styles: Vec::new(),
            text: String::new(),
            attachment: Attachment::Created,
            focusable,
            overflow: OverflowStyle::default(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn writable(&self) -> bool {
        self.attachment != Attachment::Removed
    }
}

fn upsert(entries: &mut Vec<(String, String)>, name: &str, value: &str) {
    match entries.iter_mut().find(|(k, _)| k == name) {
        Some((_, v)) => value.clone_into(v),
        None => entries.push((name.to_string(), value.to_string())),
    }
}

/// A recorded `scroll_into_view` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRecord {
    pub element: NodeId,
    pub options: ScrollIntoViewOptions,
}

/// A recorded `set_text_content` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWrite {
    pub element: NodeId,
    pub text: String,
}

#[derive(Debug, Default)]
struct Page {
    nodes: Vec<Node>,
    active: Option<NodeId>,
    scrolls: Vec<ScrollRecord>,
    text_writes: Vec<TextWrite>,
    focus_calls: Vec<NodeId>,
    mutations: u64,
}

impl Page {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn writable_node(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|node| node.writable())
    }

    fn connected(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attachment == Attachment::Connected)
            .map(|(i, node)| (NodeId(i), node))
    }

    fn matching(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        self.connected()
            .filter(|(_, node)| list.matches(&node.tag, |name| node.attribute(name)))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Shared in-memory page. Clones are handles onto the same page.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    page: Rc<RefCell<Page>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a connected element with `attributes`.
    pub fn insert(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut page = self.page.borrow_mut();
        let mut node = Node::new(tag);
        for (name, value) in attributes {
            upsert(&mut node.attributes, name, value);
        }
        node.attachment = Attachment::Connected;
        page.nodes.push(node);
        page.mutations += 1;
        NodeId(page.nodes.len() - 1)
    }

    /// Append a `div` carrying `data-tour="{tour_id}"`.
    pub fn insert_tour_target(&self, tour_id: &str) -> NodeId {
        self.insert("div", &[("data-tour", tour_id)])
    }

    /// Remove `element` from the page. Its handle stays valid.
    pub fn detach(&self, element: NodeId) {
        let mut page = self.page.borrow_mut();
        if let Some(node) = page.nodes.get_mut(element.0) {
            node.attachment = Attachment::Removed;
        }
        if page.active == Some(element) {
            page.active = None;
        }
        page.mutations += 1;
    }

    pub fn set_overflow(&self, element: NodeId, overflow: OverflowStyle) {
        if let Some(node) = self.page.borrow_mut().writable_node(element) {
            node.overflow = overflow;
        }
    }

    pub fn set_focusable(&self, element: NodeId, focusable: bool) {
        if let Some(node) = self.page.borrow_mut().writable_node(element) {
            node.focusable = focusable;
        }
    }

    /// Drop focus without focusing anything else.
    pub fn blur(&self) {
        self.page.borrow_mut().active = None;
    }

    /// Currently focused element.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.page.borrow().active
    }

    #[must_use]
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.page
            .borrow()
            .node(element)
            .and_then(|node| node.attribute(name))
            .map(str::to_string)
    }

    #[must_use]
    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    #[must_use]
    pub fn style(&self, element: NodeId, property: &str) -> Option<String> {
        self.page.borrow().node(element).and_then(|node| {
            node.styles
                .iter()
                .find(|(k, _)| k == property)
                .map(|(_, v)| v.clone())
        })
    }

    #[must_use]
    pub fn text_content(&self, element: NodeId) -> String {
        self.page
            .borrow()
            .node(element)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn tag_name(&self, element: NodeId) -> Option<String> {
        self.page.borrow().node(element).map(|node| node.tag.clone())
    }

    /// Connected elements matching `selector`.
    #[must_use]
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.page.borrow().matching(selector)
    }

    /// Every scroll request so far, oldest first.
    #[must_use]
    pub fn scrolls(&self) -> Vec<ScrollRecord> {
        self.page.borrow().scrolls.clone()
    }

    /// Every text write so far, oldest first.
    #[must_use]
    pub fn text_writes(&self) -> Vec<TextWrite> {
        self.page.borrow().text_writes.clone()
    }

    /// Text writes to `element`, oldest first.
    #[must_use]
    pub fn text_history(&self, element: NodeId) -> Vec<String> {
        self.page
            .borrow()
            .text_writes
            .iter()
            .filter(|w| w.element == element)
            .map(|w| w.text.clone())
            .collect()
    }

    /// Every `focus()` call so far, including ones that had no effect.
    #[must_use]
    pub fn focus_calls(&self) -> Vec<NodeId> {
        self.page.borrow().focus_calls.clone()
    }

    /// Total structural and attribute mutations applied to the page.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.page.borrow().mutations
    }

    /// Number of connected elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.page.borrow().connected().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.page.borrow().matching(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.page.borrow().matching(selector)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.page
            .borrow()
            .connected()
            .find(|(_, node)| node.attribute("id") == Some(id))
            .map(|(id, _)| id)
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut page = self.page.borrow_mut();
        page.nodes.push(Node::new(tag));
        NodeId(page.nodes.len() - 1)
    }

    fn append_to_body(&self, element: &NodeId) {
        let mut page = self.page.borrow_mut();
        let Some(node) = page.writable_node(*element) else {
            return;
        };
        if node.attachment == Attachment::Created {
            node.attachment = Attachment::Connected;
            page.mutations += 1;
        }
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        self.page
            .borrow()
            .node(*element)
            .is_some_and(|node| node.attachment == Attachment::Connected)
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.attribute(*element, name)
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        let mut page = self.page.borrow_mut();
        if let Some(node) = page.writable_node(*element) {
            upsert(&mut node.attributes, name, value);
            page.mutations += 1;
        }
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) {
        let mut page = self.page.borrow_mut();
        if let Some(node) = page.writable_node(*element) {
            let before = node.attributes.len();
            node.attributes.retain(|(k, _)| k != name);
            if node.attributes.len() != before {
                page.mutations += 1;
            }
        }
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        if let Some(node) = self.page.borrow_mut().writable_node(*element) {
            upsert(&mut node.styles, property, value);
        }
    }

    fn set_text_content(&self, element: &NodeId, text: &str) {
        let mut page = self.page.borrow_mut();
        let Some(node) = page.writable_node(*element) else {
            return;
        };
        text.clone_into(&mut node.text);
        page.text_writes.push(TextWrite {
            element: *element,
            text: text.to_string(),
        });
        page.mutations += 1;
    }

    fn computed_overflow(&self, element: &NodeId) -> OverflowStyle {
        self.page
            .borrow()
            .node(*element)
            .map(|node| node.overflow)
            .unwrap_or_default()
    }

    fn scroll_into_view(&self, element: &NodeId, options: ScrollIntoViewOptions) {
        self.page.borrow_mut().scrolls.push(ScrollRecord {
            element: *element,
            options,
        });
    }

    fn active_element(&self) -> Option<NodeId> {
        self.page.borrow().active
    }

    fn is_focusable(&self, element: &NodeId) -> bool {
        self.page.borrow().node(*element).is_some_and(|node| {
            node.attachment == Attachment::Connected
                && (node.focusable || node.attribute("tabindex").is_some())
        })
    }

    fn focus(&self, element: &NodeId) {
        let focusable = self.is_focusable(element);
        let mut page = self.page.borrow_mut();
        page.focus_calls.push(*element);
        if focusable {
            page.active = Some(*element);
        }
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page.borrow();
        f.debug_struct("MemoryDocument")
            .field("elements", &page.nodes.len())
            .field("active", &page.active)
            .field("mutations", &page.mutations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_runtime::Overflow;
    use pretty_assertions::assert_eq;

    #[test]
    fn queries_follow_document_order() {
        let doc = MemoryDocument::new();
        let a = doc.insert_tour_target("a");
        let b = doc.insert("span", &[("data-tour", "b"), ("class", "x")]);
        let c = doc.insert("p", &[("class", "x")]);
        assert_eq!(doc.query_selector(".x"), Some(b));
        assert_eq!(doc.query_selector_all(".x"), vec![b, c]);
        assert_eq!(doc.query_selector(r#"[data-tour="a"]"#), Some(a));
        assert_eq!(doc.query_selector("nav > a"), None);
    }

    #[test]
    fn created_elements_join_on_append() {
        let doc = MemoryDocument::new();
        let el = doc.create_element("div");
        doc.set_attribute(&el, "id", "region");
        assert!(!doc.is_connected(&el));
        assert_eq!(doc.get_element_by_id("region"), None);
        doc.append_to_body(&el);
        assert!(doc.is_connected(&el));
        assert_eq!(doc.get_element_by_id("region"), Some(el));
    }

    #[test]
    fn removed_elements_ignore_writes() {
        let doc = MemoryDocument::new();
        let el = doc.insert("div", &[]);
        doc.detach(el);
        doc.set_attribute(&el, "data-x", "1");
        doc.set_text_content(&el, "hi");
        assert!(!doc.has_attribute(el, "data-x"));
        assert_eq!(doc.text_content(el), "");
        assert!(doc.text_writes().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn focus_requires_focusable_connected_element() {
        let doc = MemoryDocument::new();
        let button = doc.insert("button", &[]);
        let div = doc.insert("div", &[]);
        doc.focus(&div);
        assert_eq!(doc.focused(), None);
        doc.focus(&button);
        assert_eq!(doc.active_element(), Some(button));
        doc.detach(button);
        assert_eq!(doc.focused(), None);
        assert!(!doc.is_focusable(&button));
        assert_eq!(doc.focus_calls(), vec![div, button]);
    }

    #[test]
    fn tabindex_makes_focusable() {
        let doc = MemoryDocument::new();
        let div = doc.insert("div", &[("tabindex", "0")]);
        assert!(doc.is_focusable(&div));
        doc.set_focusable(div, false);
        assert!(doc.is_focusable(&div));
        let plain = doc.insert("section", &[]);
        doc.set_focusable(plain, true);
        assert!(doc.is_focusable(&plain));
    }

    #[test]
    fn overflow_is_reported() {
        let doc = MemoryDocument::new();
        let el = doc.insert("div", &[]);
        assert_eq!(doc.computed_overflow(&el), OverflowStyle::default());
        doc.set_overflow(el, OverflowStyle::uniform(Overflow::Hidden));
        assert!(doc.computed_overflow(&el).clips_ring());
    }

    #[test]
    fn attribute_upsert_and_remove() {
        let doc = MemoryDocument::new();
        let el = doc.insert("div", &[("data-a", "1")]);
        doc.set_attribute(&el, "data-a", "2");
        assert_eq!(doc.get_attribute(&el, "data-a").as_deref(), Some("2"));
        let before = doc.mutation_count();
        doc.remove_attribute(&el, "data-missing");
        assert_eq!(doc.mutation_count(), before);
        doc.remove_attribute(&el, "data-a");
        assert_eq!(doc.get_attribute(&el, "data-a"), None);
    }
}
