//! Document tree produced by the reStructuredText parser.

/// A node of a parsed document.
///
/// The parser recognizes more than the HTML printer supports; printing an
/// unsupported node is an error rather than a silent fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document(Vec<Node>),
    /// A section opened by a title. `depth` starts at 1.
    Section { depth: usize, children: Vec<Node> },
    Title(Vec<Node>),
    Paragraph(Vec<Node>),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    BulletList(Vec<Node>),
    EnumeratedList(Vec<Node>),
    ListItem(Vec<Node>),
    /// ``inline literal``
    Literal(String),
    Text(String),
    /// `` `label <url>`_ `` or `` `label`_ ``
    Reference {
        children: Vec<Node>,
        target: Option<String>,
    },
    /// `.. name:: argument` followed by `:option:` lines and an indented body.
    Directive {
        name: String,
        argument: String,
        options: Vec<(String, String)>,
        body: Vec<String>,
    },
    /// `` :role:`value` `` or a bare `` `value` `` (no role).
    InterpretedText { role: Option<String>, value: String },
    BlockQuote(Vec<Node>),
    LiteralBlock(String),
    Comment(String),
    /// `.. _name: url`
    Target { name: String, url: String },
}

impl Node {
    /// Docutils-style name of the node type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Document(_) => "document",
            Node::Section { .. } => "section",
            Node::Title(_) => "title",
            Node::Paragraph(_) => "paragraph",
            Node::Strong(_) => "strong",
            Node::Emphasis(_) => "emphasis",
            Node::BulletList(_) => "bullet_list",
            Node::EnumeratedList(_) => "enumerated_list",
            Node::ListItem(_) => "list_item",
            Node::Literal(_) => "literal",
            Node::Text(_) => "text",
            Node::Reference { .. } => "reference",
            Node::Directive { .. } => "directive",
            Node::InterpretedText { .. } => "interpreted_text",
            Node::BlockQuote(_) => "block_quote",
            Node::LiteralBlock(_) => "literal_block",
            Node::Comment(_) => "comment",
            Node::Target { .. } => "target",
        }
    }
}
