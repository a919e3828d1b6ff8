//! HTML printer for parsed documents.
//!
//! Walks the tree recursively and builds markup with maud, so every text
//! value is escaped exactly once on its way out. Only the node types, block
//! directives and roles the book actually uses are supported; anything else
//! stops the build with the file name and the offending node.

use super::RstError;
use super::ast::Node;
use maud::{Markup, PreEscaped, html};

/// Rendered for interpreted text that carries no role.
pub const UNSUPPORTED_ROLE_PLACEHOLDER: &str = "دستور پشتیبانی نشده";

/// Escape `&`, `<`, `>` and `"` in a single pass.
pub fn escape_html(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Render a parsed document. `name` identifies the source in errors.
pub fn render(node: &Node, name: &str) -> Result<String, RstError> {
    Ok(Printer { name }.node(node, 0)?.into_string())
}

struct Printer<'a> {
    name: &'a str,
}

impl Printer<'_> {
    fn unsupported(&self, node: &Node) -> RstError {
        RstError::Unsupported {
            file: self.name.to_string(),
            kind: node.type_name(),
            node: format!("{node:?}"),
        }
    }

    fn all(&self, nodes: &[Node], depth: usize) -> Result<Markup, RstError> {
        let mut out = String::new();
        for n in nodes {
            out.push_str(&self.node(n, depth)?.into_string());
        }
        Ok(PreEscaped(out))
    }

    fn node(&self, node: &Node, depth: usize) -> Result<Markup, RstError> {
        let markup = match node {
            Node::Document(children) => self.all(children, depth)?,
            Node::Section { depth, children } => self.all(children, *depth)?,
            Node::Paragraph(children) => html! { p { (self.all(children, depth)?) } },
            Node::Strong(children) => html! { b { (self.all(children, depth)?) } },
            Node::BulletList(children) => html! { ul { (self.all(children, depth)?) } },
            Node::EnumeratedList(children) => html! { ol { (self.all(children, depth)?) } },
            Node::ListItem(children) => html! { li { (self.all(children, depth)?) } },
            Node::Literal(value) => html! { span.pre { (value) } },
            Node::Title(children) => {
                let level = depth.clamp(1, 6);
                let inner = self.all(children, depth)?.into_string();
                PreEscaped(format!("<h{level}>{inner}</h{level}>"))
            }
            Node::Text(value) => html! { (value) },
            Node::Reference { children, .. } => self.all(children, depth)?,
            Node::Directive {
                name,
                argument,
                body,
                ..
            } => match name.as_str() {
                "figure" => html! { img src=(argument); },
                "code-block" => html! { pre dir="ltr" { (body.join("\n")) } },
                "math" => html! { (format!("$$ {} $$", body.join("\n"))) },
                _ => return Err(self.unsupported(node)),
            },
            Node::InterpretedText { role, value } => match role.as_deref() {
                Some("math") => html! { (format!("$ {value} $")) },
                None => html! { (UNSUPPORTED_ROLE_PLACEHOLDER) },
                Some(_) => return Err(self.unsupported(node)),
            },
            Node::Emphasis(_)
            | Node::BlockQuote(_)
            | Node::LiteralBlock(_)
            | Node::Comment(_)
            | Node::Target { .. } => return Err(self.unsupported(node)),
        };
        Ok(markup)
    }
}
