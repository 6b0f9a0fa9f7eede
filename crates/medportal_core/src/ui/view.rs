//! Typed view tree rendered to HTML.
//!
//! # Responsibility
//! - Build UI trees with a builder API instead of string concatenation.
//! - Escape all text and attribute values at render time.
//!
//! # Invariants
//! - Text nodes and attribute values are always escaped.
//! - Void elements (`img`, `input`, `br`, `meta`, `link`) never get children
//!   or closing tags.

const VOID_TAGS: &[&str] = &["br", "img", "input", "link", "meta"];

/// One node of the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

/// HTML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    /// Sets an attribute, replacing any previous value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.attrs.retain(|(existing, _)| *existing != name);
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Adds a boolean attribute such as `hidden`.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.attrs.retain(|(existing, _)| *existing != name);
        self.attrs.push((name, None));
        self
    }

    pub fn flag_if(self, condition: bool, name: impl Into<String>) -> Self {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ViewNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    /// Attribute value; `Some("")` for boolean attributes.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn child_nodes(&self) -> &[ViewNode] {
        &self.children
    }
}

impl From<Element> for ViewNode {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first list of elements matching `predicate`.
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(predicate, &mut found);
        found
    }

    fn walk<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Self::Element(element) = self {
            if predicate(element) {
                found.push(element);
            }
            for child in &element.children {
                child.walk(predicate, found);
            }
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(&|element: &Element| element.has_class(class))
    }

    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Element> {
        self.find_all(&|element: &Element| element.get_attr(name) == Some(value))
            .into_iter()
            .next()
    }

    /// Serializes the subtree to HTML.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_text(text)),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&escape_attr(&element.classes.join(" ")));
                    out.push('"');
                }
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// Shorthand for `Element::new`.
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::{el, ViewNode};

    #[test]
    fn renders_nested_tree_with_escaping() {
        let node: ViewNode = el("div")
            .class("card")
            .attr("data-id", "a\"b")
            .child(el("span").text("<script>&"))
            .into();
        assert_eq!(
            node.render_html(),
            "<div class=\"card\" data-id=\"a&quot;b\"><span>&lt;script&gt;&amp;</span></div>"
        );
    }

    #[test]
    fn boolean_attrs_and_void_tags() {
        let node: ViewNode = el("section")
            .flag("hidden")
            .child(el("input").attr("type", "password"))
            .into();
        assert_eq!(
            node.render_html(),
            "<section hidden><input type=\"password\"></section>"
        );
    }

    #[test]
    fn find_helpers_walk_the_tree() {
        let node: ViewNode = el("ul")
            .child(el("li").class("item").text("uno"))
            .child(el("li").class("item").attr("data-id", "2").text("dos"))
            .into();
        assert_eq!(node.find_by_class("item").len(), 2);
        let second = node.find_by_attr("data-id", "2").unwrap();
        assert_eq!(second.tag(), "li");
        assert_eq!(node.text_content(), "unodos");
    }
}
