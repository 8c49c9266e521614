//! HTML document backed by `scraper`
//!
//! Node handles are arena ids into the underlying tree. Detached nodes stay
//! in the arena but are no longer reachable from the root, so they drop out
//! of selector queries and serialization.

use crate::error::{Error, Result};
use ego_tree::{NodeRef, Tree};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use std::fmt::Write as _;

/// Handle to a node inside an [`HtmlDocument`]
pub use ego_tree::NodeId;

/// Parse a CSS selector, mapping parse failures into the crate error
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::selector(selector, e.to_string()))
}

/// A parsed, mutable HTML document
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Serialize the whole document
    pub fn html(&self) -> String {
        self.html.html()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// First element matching `selector`, in document order
    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        self.html.select(selector).next().map(|el| el.id())
    }

    /// Element view of a node, if the node is an attached element
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Direct element children of a node, in document order
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| {
                node.children()
                    .filter_map(ElementRef::wrap)
                    .map(|el| el.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of direct element children of a node
    pub fn child_count(&self, id: NodeId) -> usize {
        self.html
            .tree
            .get(id)
            .map_or(0, |node| node.children().filter_map(ElementRef::wrap).count())
    }

    /// Attribute value of an element
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.value().attr(name)
    }

    /// All attributes of an element, in source order
    pub fn attrs(&self, id: NodeId) -> Vec<(String, String)> {
        self.element(id)
            .map(|el| {
                el.value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether an element matches `selector`
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|el| selector.matches(&el))
    }

    /// Serialized content of an element
    pub fn inner_html(&self, id: NodeId) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    /// Serialized content of the first element matching `selector`
    pub fn inner_html_of(&self, selector: &Selector) -> Option<String> {
        self.select_first(selector).and_then(|id| self.inner_html(id))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Set an attribute on an element, replacing an existing value in place.
    ///
    /// Returns false if `id` is not an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        self.rewrite_attrs(id, |attrs| {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        })
    }

    /// Remove an attribute from an element.
    ///
    /// Returns false if `id` is not an element.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.rewrite_attrs(id, |attrs| attrs.retain(|(key, _)| key != name))
    }

    /// Replace the element value of `id` with one carrying the edited
    /// attribute list. Children and position in the tree are kept.
    fn rewrite_attrs(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Vec<(String, String)>),
    ) -> bool {
        let Some(tag) = self.element(id).map(|el| el.value().name().to_string()) else {
            return false;
        };
        let before = self.attrs(id);
        let mut attrs = before.clone();
        edit(&mut attrs);
        if attrs == before {
            return true;
        }

        let Some(element) = build_element(&tag, &attrs) else {
            return false;
        };
        match self.html.tree.get_mut(id) {
            Some(mut node) => {
                *node.value() = Node::Element(element);
                true
            }
            None => false,
        }
    }

    /// Remove a node (and its subtree) from the document
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Remove every child node (elements, text, comments) of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children: Vec<NodeId> = match self.html.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => return,
        };
        for child in children {
            self.detach(child);
        }
    }

    /// Replace the content of `dest` with a deep copy of the content of
    /// `src` in `source`. The source document is left untouched.
    ///
    /// Returns the new element-child count of `dest`.
    pub fn replace_children_with_copy(
        &mut self,
        dest: NodeId,
        source: &HtmlDocument,
        src: NodeId,
    ) -> usize {
        let Some(src_node) = source.html.tree.get(src) else {
            return self.child_count(dest);
        };
        if self.html.tree.get(dest).is_none() {
            return 0;
        }

        self.clear_children(dest);
        for child in src_node.children() {
            graft(&mut self.html.tree, dest, child);
        }
        self.child_count(dest)
    }

    /// Move `nodes` out of `source` and append them, in order, to the end
    /// of `dest`.
    ///
    /// Returns the number of nodes actually moved.
    pub fn move_children_from(
        &mut self,
        dest: NodeId,
        source: &mut HtmlDocument,
        nodes: &[NodeId],
    ) -> usize {
        if self.html.tree.get(dest).is_none() {
            return 0;
        }

        let mut moved = 0;
        for &id in nodes {
            let Some(node) = source.html.tree.get(id) else {
                continue;
            };
            graft(&mut self.html.tree, dest, node);
            source.detach(id);
            moved += 1;
        }
        moved
    }
}

/// Build a detached element by parsing its start tag
fn build_element(tag: &str, attrs: &[(String, String)]) -> Option<Element> {
    let mut markup = format!("<{tag}");
    for (name, value) in attrs {
        let escaped = value.replace('&', "&amp;").replace('"', "&quot;");
        let _ = write!(markup, r#" {name}="{escaped}""#);
    }
    let _ = write!(markup, "></{tag}>");

    let fragment = Html::parse_fragment(&markup);
    fragment.tree.values().find_map(|node| match node {
        Node::Element(el) if el.name() == tag => Some(el.clone()),
        _ => None,
    })
}

/// Append a deep copy of `node` under `parent`
fn graft(tree: &mut Tree<Node>, parent: NodeId, node: NodeRef<'_, Node>) {
    let Some(mut parent) = tree.get_mut(parent) else {
        return;
    };
    let id = parent.append(node.value().clone()).id();
    for child in node.children() {
        graft(tree, id, child);
    }
}
