//! Block structure: sections, paragraphs, lists and explicit markup.
//!
//! Parsing is line based. Every block starts at a non-blank line with zero
//! indentation relative to its container; indented runs become block quotes
//! (or literal blocks after a paragraph ending in `::`). Section titles are
//! only recognized at the top level, and heading depth follows the order in
//! which adornment styles first appear, as docutils does.

use super::ast::Node;
use super::inline::parse_inline;
use regex::Regex;
use std::sync::OnceLock;

/// Characters allowed in section adornments.
const ADORNMENT_CHARS: &str = "=-~^\"'`#*+_:<>!$%&,;?@\\|/";

/// Adornment style: the character and whether an overline is present.
type Style = (char, bool);

enum Block {
    Title { style: Style, text: String },
    Node(Node),
}

/// Parse a whole document.
pub fn parse(source: &str) -> Node {
    let lines: Vec<String> = source
        .lines()
        .map(|l| l.replace('\t', "        ").trim_end().to_string())
        .collect();
    Node::Document(nest_sections(parse_blocks(&lines, true)))
}

/// Parse nested content (list items, quotes) where titles are not allowed.
fn parse_body(lines: &[String]) -> Vec<Node> {
    parse_blocks(lines, false)
        .into_iter()
        .filter_map(|b| match b {
            Block::Node(n) => Some(n),
            Block::Title { .. } => None,
        })
        .collect()
}

fn parse_blocks(lines: &[String], top_level: bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut literal_next = false;
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        if line.is_empty() {
            i += 1;
            continue;
        }

        if indent(line) > 0 {
            let (body, next) = take_indented(lines, i);
            let node = if literal_next {
                Node::LiteralBlock(body.join("\n"))
            } else {
                Node::BlockQuote(parse_body(&body))
            };
            blocks.push(Block::Node(node));
            literal_next = false;
            i = next;
            continue;
        }
        literal_next = false;

        if top_level && let Some((style, text, next)) = title_at(lines, i) {
            blocks.push(Block::Title { style, text });
            i = next;
            continue;
        }

        if line == ".." || line.starts_with(".. ") {
            let (node, next) = explicit_markup(lines, i);
            blocks.push(Block::Node(node));
            i = next;
            continue;
        }

        if let Some(col) = bullet_marker(line) {
            let marker = line.chars().next().unwrap_or('-');
            let (items, next) = list_items(lines, i, col, |l| {
                l.starts_with(marker) && bullet_marker(l).is_some()
            });
            blocks.push(Block::Node(Node::BulletList(items)));
            i = next;
            continue;
        }

        if let Some(col) = enumerator(line) {
            let (items, next) = list_items(lines, i, col, |l| enumerator(l).is_some());
            blocks.push(Block::Node(Node::EnumeratedList(items)));
            i = next;
            continue;
        }

        let start = i;
        while i < lines.len() && !lines[i].is_empty() {
            i += 1;
        }
        let mut text = lines[start..i]
            .iter()
            .map(|l| l.trim_start())
            .collect::<Vec<_>>()
            .join("\n");
        if text.ends_with("::") {
            literal_next = true;
            if text == "::" {
                continue;
            } else if text.ends_with(" ::") {
                text.truncate(text.len() - 3);
            } else {
                text.truncate(text.len() - 1);
            }
        }
        blocks.push(Block::Node(Node::Paragraph(parse_inline(&text))));
    }

    blocks
}

/// Fold flat titles and blocks into nested sections.
fn nest_sections(blocks: Vec<Block>) -> Vec<Node> {
    let mut styles: Vec<Style> = Vec::new();
    let mut root: Vec<Node> = Vec::new();
    let mut open: Vec<(usize, Vec<Node>)> = Vec::new();

    fn close(open: &mut Vec<(usize, Vec<Node>)>, root: &mut Vec<Node>) {
        if let Some((depth, children)) = open.pop() {
            let section = Node::Section { depth, children };
            match open.last_mut() {
                Some((_, parent)) => parent.push(section),
                None => root.push(section),
            }
        }
    }

    for block in blocks {
        match block {
            Block::Node(node) => match open.last_mut() {
                Some((_, children)) => children.push(node),
                None => root.push(node),
            },
            Block::Title { style, text } => {
                let depth = match styles.iter().position(|s| *s == style) {
                    Some(pos) => pos + 1,
                    None => {
                        styles.push(style);
                        styles.len()
                    }
                };
                while open.last().is_some_and(|(d, _)| *d >= depth) {
                    close(&mut open, &mut root);
                }
                open.push((depth, vec![Node::Title(parse_inline(&text))]));
            }
        }
    }
    while !open.is_empty() {
        close(&mut open, &mut root);
    }
    root
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_adornment(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    line.chars().count() >= 3 && ADORNMENT_CHARS.contains(first) && chars.all(|c| c == first)
}

/// A title at `i`, either underlined or over- and underlined.
fn title_at(lines: &[String], i: usize) -> Option<(Style, String, usize)> {
    let line = &lines[i];
    if is_adornment(line) {
        let text = lines.get(i + 1)?;
        let under = lines.get(i + 2)?;
        let c = line.chars().next()?;
        if !text.trim().is_empty() && is_adornment(under) && under.starts_with(c) {
            return Some(((c, true), text.trim().to_string(), i + 3));
        }
        return None;
    }
    let under = lines.get(i + 1)?;
    if is_adornment(under) {
        let c = under.chars().next()?;
        return Some(((c, false), line.trim().to_string(), i + 2));
    }
    None
}

/// Collect the indented run starting at `start`, dedented by its minimum
/// indentation. Trailing blank lines are dropped.
fn take_indented(lines: &[String], start: usize) -> (Vec<String>, usize) {
    let mut end = start;
    while end < lines.len() && (lines[end].is_empty() || indent(&lines[end]) > 0) {
        end += 1;
    }
    (dedent(&lines[start..end]), end)
}

fn dedent(lines: &[String]) -> Vec<String> {
    let min = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| indent(l))
        .min()
        .unwrap_or(0);
    let mut out: Vec<String> = lines
        .iter()
        .map(|l| if l.is_empty() { String::new() } else { l[min..].to_string() })
        .collect();
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    while out.first().is_some_and(|l| l.is_empty()) {
        out.remove(0);
    }
    out
}

fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([\w-]+)::(?:\s+(.*))?$").expect("well-formed regex"))
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:([^:\s][^:]*):(?:\s+(.*))?$").expect("well-formed regex"))
}

/// `..` blocks: directives, hyperlink targets and comments.
fn explicit_markup(lines: &[String], i: usize) -> (Node, usize) {
    let rest = lines[i].get(2..).unwrap_or("").trim();
    let mut end = i + 1;
    while end < lines.len() && (lines[end].is_empty() || indent(&lines[end]) > 0) {
        end += 1;
    }
    let raw = &lines[i + 1..end];

    if let Some(caps) = directive_re().captures(rest) {
        let name = caps[1].to_string();
        let argument = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
        let mut options = Vec::new();
        let mut k = 0;
        while k < raw.len() {
            let Some(opt) = option_re().captures(raw[k].trim()) else {
                break;
            };
            let value = opt.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            options.push((opt[1].to_string(), value));
            k += 1;
        }
        let body = dedent(&raw[k..]);
        return (
            Node::Directive {
                name,
                argument,
                options,
                body,
            },
            end,
        );
    }

    if let Some(target) = rest.strip_prefix('_')
        && let Some(colon) = target.find(':')
    {
        let mut url = target[colon + 1..].trim().to_string();
        for l in raw.iter().filter(|l| !l.is_empty()) {
            url.push_str(l.trim());
        }
        return (
            Node::Target {
                name: target[..colon].to_string(),
                url,
            },
            end,
        );
    }

    let mut text = rest.to_string();
    for l in dedent(raw) {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&l);
    }
    (Node::Comment(text), end)
}

/// Column where the content of a bullet item starts.
fn bullet_marker(line: &str) -> Option<usize> {
    let first = line.chars().next()?;
    if !matches!(first, '-' | '*' | '+') {
        return None;
    }
    if line.len() == 1 {
        return Some(2);
    }
    let after = &line[1..];
    if !after.starts_with(' ') {
        return None;
    }
    Some(1 + indent(after))
}

fn enumerator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:(?:\d+|#)[.)]|\((?:\d+|#)\))( +|$)").expect("well-formed regex")
    })
}

/// Column where the content of an enumerated item starts.
fn enumerator(line: &str) -> Option<usize> {
    let m = enumerator_re().find(line)?;
    let end = m.end();
    Some(if end == line.len() && !line.ends_with(' ') { end + 1 } else { end })
}

/// Collect consecutive list items. `is_item` recognizes the next item's
/// first line; `col` is the content column of the first item.
fn list_items(
    lines: &[String],
    start: usize,
    col: usize,
    is_item: impl Fn(&str) -> bool,
) -> (Vec<Node>, usize) {
    let mut items = Vec::new();
    let mut i = start;
    let mut col = col;

    loop {
        let first = &lines[i];
        let mut item_lines = vec![first.get(col..).unwrap_or("").to_string()];
        i += 1;
        while i < lines.len() {
            let l = &lines[i];
            if l.is_empty() {
                item_lines.push(String::new());
            } else if indent(l) >= col {
                item_lines.push(l[col..].to_string());
            } else {
                break;
            }
            i += 1;
        }
        while item_lines.last().is_some_and(|l| l.is_empty()) {
            item_lines.pop();
        }
        items.push(Node::ListItem(parse_body(&item_lines)));

        if i < lines.len() && is_item(&lines[i]) {
            col = bullet_marker(&lines[i])
                .or_else(|| enumerator(&lines[i]))
                .unwrap_or(col);
        } else {
            break;
        }
    }
    (items, i)
}
