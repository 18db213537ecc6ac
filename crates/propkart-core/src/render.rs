//! Isolated render tree.
//!
//! Components describe their markup as a [`Node`] tree built from plain
//! values instead of mutating a shared document. A host can serialize the
//! tree with [`Node::to_html`], diff it, or query it in tests with
//! [`Node::find_by_id`] and [`Node::find_all_by_class`].

use std::fmt::Write as _;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "img", "input"];

/// One node of a render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Literal text. Escaped on serialization.
    Text(String),
    /// A `<br>`; text content sees it as a newline.
    LineBreak,
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn class_if(self, class: impl Into<String>, enabled: bool) -> Self {
        if enabled { self.class(class) } else { self }
    }

    /// Set an attribute, replacing any earlier value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Boolean attribute such as `disabled`.
    pub fn flag_if(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled { self.attr(name, "") } else { self }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape_html(value));
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Depth-first search for the element with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.id.as_deref() == Some(id) {
            return Some(el);
        }
        el.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// Every element carrying `class`, in document order.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if el.has_class(class) {
                found.push(el);
            }
            for child in &el.children {
                child.collect_by_class(class, found);
            }
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::LineBreak => out.push('\n'),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::LineBreak => out.push_str("<br>"),
        }
    }
}

/// Split text on literal newlines, emitting a line break between lines.
pub fn multiline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Node::LineBreak);
        }
        if !line.is_empty() {
            nodes.push(Node::text(line));
        }
    }
    nodes
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_inserts_line_breaks() {
        let nodes = multiline("one\ntwo\n\nthree");
        assert_eq!(
            nodes,
            vec![
                Node::text("one"),
                Node::LineBreak,
                Node::text("two"),
                Node::LineBreak,
                Node::LineBreak,
                Node::text("three"),
            ]
        );
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let el = Element::new("a")
            .attr("href", "/property/1/?a=1&b=\"2\"")
            .text("<script>alert(1)</script>");
        assert_eq!(
            el.to_html(),
            "<a href=\"/property/1/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;alert(1)&lt;/script&gt;</a>"
        );
    }

    #[test]
    fn test_to_html_boolean_and_void() {
        let el = Element::new("div")
            .class("bubble")
            .class("user")
            .child(Element::new("button").flag_if("disabled", true).text("Go"))
            .children(multiline("a\nb"));
        assert_eq!(
            el.to_html(),
            "<div class=\"bubble user\"><button disabled>Go</button>a<br>b</div>"
        );
    }

    #[test]
    fn test_attr_replaces_existing_value() {
        let el = Element::new("div")
            .attr("style", "display: none")
            .attr("style", "display: flex");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("style"), Some("display: flex"));
    }

    #[test]
    fn test_queries() {
        let tree: Node = Element::new("div")
            .id("root")
            .child(Element::new("p").class("item").text("first"))
            .child(
                Element::new("div")
                    .child(Element::new("p").id("deep").class("item").text("second")),
            )
            .into();

        assert_eq!(tree.find_by_id("deep").unwrap().text_content(), "second");
        assert!(tree.find_by_id("missing").is_none());

        let items = tree.find_all_by_class("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text_content(), "first");
        assert_eq!(tree.text_content(), "firstsecond");
    }
}
