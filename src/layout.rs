//! Page chrome shared by every generated page: document shell, top bar and
//! footer.

use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const MATHJAX_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";
const FONT_AWESOME: &str = "/_static/font-awesome.min.css";
const CSS: &str = include_str!("../static/problems.css");

/// Top-level areas of the site, as linked from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Book,
    Problems,
    Statistics,
    Contributors,
}

impl Area {
    const ALL: [Area; 4] = [Area::Book, Area::Problems, Area::Statistics, Area::Contributors];

    fn label(self) -> &'static str {
        match self {
            Area::Book => "درس‌نامه",
            Area::Problems => "سوالات",
            Area::Statistics => "آمار",
            Area::Contributors => "مشارکت کنندگان",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Area::Book => "fa fa-book",
            Area::Problems => "fa fa-question",
            Area::Statistics => "fa fa-bar-chart",
            Area::Contributors => "fa fa-users",
        }
    }

    fn href(self) -> &'static str {
        match self {
            Area::Book => "/",
            Area::Problems => "/problems",
            Area::Statistics => "/statistics",
            Area::Contributors => "/contributors",
        }
    }
}

/// Renders the base HTML document. Pages are right-to-left.
pub fn base_document(title: &str, head: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fa" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" type="text/css" href=(FONT_AWESOME);
                style { (PreEscaped(CSS)) }
                @if let Some(head) = head {
                    (head)
                }
            }
            body dir="rtl" {
                (content)
            }
        }
    }
}

/// MathJax loader for pages with `$…$` math.
pub fn mathjax() -> Markup {
    html! {
        script async src=(MATHJAX_URL) {}
    }
}

/// The bar across the top: the current area first, links to the others.
pub fn top_bar(current: Area) -> Markup {
    html! {
        div #body-top {
            a { i class=(current.icon()) {} (PreEscaped("&nbsp; ")) (current.label()) }
            @for area in Area::ALL.iter().filter(|a| **a != current) {
                a style="float: left; padding-right: 20px;" href=(area.href()) {
                    i class=(area.icon()) {} (PreEscaped("&nbsp; ")) (area.label())
                }
            }
        }
    }
}

/// Credits and licence footer.
pub fn footer() -> Markup {
    html! {
        div #body-footer {
            div {
                a href="https://shaazzz.ir/" { img src="/_static/shaazzz_logo.png" alt="shaazzz"; }
            }
            div #text {
                p {
                    "این کتاب توسط "
                    a href="/contributors" { "مشارکت کنندگان شاززز" }
                    " به وجود آمده است."
                }
                p { "این کتاب عمومی است و تحت پروانه cc-by-sa در دسترس است." }
            }
            div {
                a href="https://pdcommunity.ir/license/cc-by-sa/" {
                    img src="/_static/cc-by-sa.png" alt="cc-by-sa";
                }
            }
        }
    }
}
