//! Inline markup: strong, emphasis, literals, roles and references.
//!
//! Start-strings only open markup when the preceding character is not
//! alphanumeric and a matching end-string follows, with no whitespace just
//! inside either delimiter. Anything that fails to close is plain text.

use super::ast::Node;

/// Parse the inline content of a paragraph, title or list item line.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let can_open = i == 0 || !chars[i - 1].is_alphanumeric();

        if c == '\\' && i + 1 < chars.len() {
            buf.push(chars[i + 1]);
            i += 2;
            continue;
        }

        if can_open && let Some((node, next)) = markup_at(&chars, i) {
            if !buf.is_empty() {
                out.push(Node::Text(std::mem::take(&mut buf)));
            }
            out.push(node);
            i = next;
            continue;
        }

        buf.push(c);
        i += 1;
    }

    if !buf.is_empty() {
        out.push(Node::Text(buf));
    }
    out
}

/// Try to read one inline construct starting at `i`.
/// Returns the node and the index just past it.
fn markup_at(chars: &[char], i: usize) -> Option<(Node, usize)> {
    match chars[i] {
        ':' => role_at(chars, i),
        '`' if chars.get(i + 1) == Some(&'`') => {
            let end = find_closing(chars, i + 2, "``")?;
            Some((Node::Literal(collect(&chars[i + 2..end])), end + 2))
        }
        '`' => {
            let end = find_closing(chars, i + 1, "`")?;
            let inner = collect(&chars[i + 1..end]);
            let mut next = end + 1;
            if chars.get(next) == Some(&'_') {
                next += 1;
                if chars.get(next) == Some(&'_') {
                    next += 1;
                }
                return Some((reference(&inner), next));
            }
            Some((Node::InterpretedText { role: None, value: inner }, next))
        }
        '*' if chars.get(i + 1) == Some(&'*') => {
            let end = find_closing(chars, i + 2, "**")?;
            let inner = collect(&chars[i + 2..end]);
            Some((Node::Strong(vec![Node::Text(inner)]), end + 2))
        }
        '*' => {
            let end = find_closing(chars, i + 1, "*")?;
            let inner = collect(&chars[i + 1..end]);
            Some((Node::Emphasis(vec![Node::Text(inner)]), end + 1))
        }
        _ => None,
    }
}

/// `:role:`value``
fn role_at(chars: &[char], i: usize) -> Option<(Node, usize)> {
    let mut j = i + 1;
    while j < chars.len() && (chars[j].is_alphanumeric() || matches!(chars[j], '-' | '_' | '.')) {
        j += 1;
    }
    if j == i + 1 || chars.get(j) != Some(&':') || chars.get(j + 1) != Some(&'`') {
        return None;
    }
    let role = collect(&chars[i + 1..j]);
    let end = find_closing(chars, j + 2, "`")?;
    let value = collect(&chars[j + 2..end]);
    Some((
        Node::InterpretedText {
            role: Some(role),
            value,
        },
        end + 1,
    ))
}

/// `label <url>` or a bare name.
fn reference(inner: &str) -> Node {
    if inner.ends_with('>')
        && let Some(open) = inner.rfind('<')
    {
        let label = inner[..open].trim();
        let url = &inner[open + 1..inner.len() - 1];
        let label = if label.is_empty() { url } else { label };
        return Node::Reference {
            children: vec![Node::Text(label.to_string())],
            target: Some(url.to_string()),
        };
    }
    Node::Reference {
        children: vec![Node::Text(inner.to_string())],
        target: None,
    }
}

/// Index of the end-string `delim` for content starting at `from`.
fn find_closing(chars: &[char], from: usize, delim: &str) -> Option<usize> {
    let delim: Vec<char> = delim.chars().collect();
    let first = *chars.get(from)?;
    if first.is_whitespace() {
        return None;
    }
    let mut j = from + 1;
    while j + delim.len() <= chars.len() {
        if chars[j..j + delim.len()] == delim[..] && !chars[j - 1].is_whitespace() {
            return Some(j);
        }
        j += 1;
    }
    None
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn plain_text() {
        assert_eq!(parse_inline("just words"), vec![text("just words")]);
    }

    #[test]
    fn strong_span() {
        assert_eq!(
            parse_inline("a **bold** move"),
            vec![text("a "), Node::Strong(vec![text("bold")]), text(" move")]
        );
    }

    #[test]
    fn emphasis_span() {
        assert_eq!(
            parse_inline("*soft*"),
            vec![Node::Emphasis(vec![text("soft")])]
        );
    }

    #[test]
    fn star_between_words_is_text() {
        assert_eq!(parse_inline("2*3 = 6"), vec![text("2*3 = 6")]);
    }

    #[test]
    fn unclosed_strong_is_text() {
        assert_eq!(parse_inline("**open"), vec![text("**open")]);
    }

    #[test]
    fn inline_literal() {
        assert_eq!(
            parse_inline("run ``dfs(v)`` now"),
            vec![
                text("run "),
                Node::Literal("dfs(v)".to_string()),
                text(" now")
            ]
        );
    }

    #[test]
    fn math_role() {
        assert_eq!(
            parse_inline("edges :math:`|E| = n-1` hold"),
            vec![
                text("edges "),
                Node::InterpretedText {
                    role: Some("math".to_string()),
                    value: "|E| = n-1".to_string()
                },
                text(" hold")
            ]
        );
    }

    #[test]
    fn math_with_stars_not_emphasis() {
        let nodes = parse_inline(":math:`a*b*c`");
        assert_eq!(
            nodes,
            vec![Node::InterpretedText {
                role: Some("math".to_string()),
                value: "a*b*c".to_string()
            }]
        );
    }

    #[test]
    fn bare_interpreted_text_has_no_role() {
        assert_eq!(
            parse_inline("`x`"),
            vec![Node::InterpretedText {
                role: None,
                value: "x".to_string()
            }]
        );
    }

    #[test]
    fn embedded_uri_reference() {
        assert_eq!(
            parse_inline("see `Codeforces <https://codeforces.com>`_."),
            vec![
                text("see "),
                Node::Reference {
                    children: vec![text("Codeforces")],
                    target: Some("https://codeforces.com".to_string())
                },
                text(".")
            ]
        );
    }

    #[test]
    fn anonymous_reference() {
        assert_eq!(
            parse_inline("`here`__"),
            vec![Node::Reference {
                children: vec![text("here")],
                target: None
            }]
        );
    }

    #[test]
    fn escaped_star() {
        assert_eq!(parse_inline(r"\*not\*"), vec![text("*not*")]);
    }

    #[test]
    fn persian_text_around_math() {
        let nodes = parse_inline("گراف :math:`G` همبند است");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], text("گراف "));
        assert_eq!(nodes[2], text(" همبند است"));
    }
}
