//! Export of book chapters to the wiki dialect used by the "opedia" mirror.
//!
//! A line scanner, not a parser. It only rewrites what the wiki renders
//! differently and passes everything else through:
//!
//! | reStructuredText | wiki |
//! |------------------|------|
//! | title + `====` underline | `====== title ======` |
//! | title + `----` underline | `===== title =====` |
//! | `.. figure:: /_static/a.png` | `{{ <namespace>:a.png?nolink }}` |
//! | `   :width: 50%` under a figure | dropped |
//! | `` :math:`x^2` `` | `$x^2$` |

use regex::Regex;
use std::sync::OnceLock;

/// Prefix stripped from figure paths; the wiki stores images flat.
const STATIC_PREFIX: &str = "/_static/";

fn math_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":math:`([^`]*)`").expect("well-formed regex"))
}

/// Convert one chapter. `namespace` prefixes figure references.
pub fn to_wiki(source: &str, namespace: &str) -> String {
    replace_math(&rewrite_lines(source, namespace))
}

fn rewrite_lines(source: &str, namespace: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_figure = false;

    for line in source.split('\n') {
        if line.starts_with("====") {
            let title = out.pop().unwrap_or_default();
            out.push(format!("====== {title} ======"));
        } else if line.starts_with("----") {
            let title = out.pop().unwrap_or_default();
            out.push(format!("===== {title} ====="));
        } else if let Some(rest) = line.strip_prefix(".. figure::") {
            in_figure = true;
            let path = rest.trim();
            let path = path.strip_prefix(STATIC_PREFIX).unwrap_or(path);
            out.push(format!("\n{{{{ {namespace}:{path}?nolink }}}}\n"));
        } else if line.starts_with("   :") {
            if !in_figure {
                out.push(line.to_string());
            }
        } else {
            in_figure = false;
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

fn replace_math(text: &str) -> String {
    math_re().replace_all(text, "$$$1$$").into_owned()
}
