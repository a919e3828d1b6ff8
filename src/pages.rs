//! Problem-set pages.
//!
//! Renders the three page kinds of the problem hierarchy:
//!
//! - **Problem** (`1.2.html`): one problem with its hint and solution folded
//!   away, or the link list of an extra group.
//! - **Section** (`1.html`): every problem directly under a section written
//!   out in full, extra groups as link lists, sub-sections as links.
//! - **Index** (`index.html`, `2.html`): links to child sections with their
//!   problem counts.
//!
//! Problem bodies are markdown and go through pulldown-cmark. `$…$` and
//! `$$…$$` spans are parsed as math and written back verbatim (HTML-escaped
//! only) so MathJax sees the TeX untouched by emphasis or backslash escapes.

use crate::hierarchy::{self, Child, Hierarchy, Node, PageKind};
use crate::ident::{self, ROOT_ID};
use crate::layout::{self, Area};
use crate::rst::escape_html;
use crate::types::{ExtraLink, Problem, Record, RecordData, Totals};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Event, Options, Parser, html as md_html};

/// A generated page, ready to be written as `ident::page_file_name(id)`.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub id: String,
    pub kind: PageKind,
    pub totals: Totals,
    pub html: String,
}

impl RenderedPage {
    pub fn file_name(&self) -> String {
        ident::page_file_name(&self.id)
    }
}

/// Build the hierarchy and render one page per visited worklist item, in
/// worklist order.
pub fn generate_htmls(records: &[Record]) -> Vec<RenderedPage> {
    render_pages(&hierarchy::build(records))
}

/// Render every page of a built hierarchy.
pub fn render_pages(tree: &Hierarchy) -> Vec<RenderedPage> {
    tree.order
        .iter()
        .map(|item| {
            let (markup, totals) = match item.kind {
                PageKind::Problem => {
                    let record = &tree.records[item.target];
                    (render_record_page(record), record.totals())
                }
                PageKind::Section | PageKind::Index => {
                    let node = &tree.nodes[item.target];
                    let markup = if item.kind == PageKind::Section {
                        render_section_page(tree, node)
                    } else {
                        render_index_page(tree, node)
                    };
                    (markup, node.totals)
                }
            };
            RenderedPage {
                id: item.id.clone(),
                kind: item.kind,
                totals,
                html: markup.into_string(),
            }
        })
        .collect()
}

/// Convert markdown to HTML, passing math spans through for MathJax.
pub fn markdown(text: &str) -> Markup {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_MATH;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::InlineMath(tex) => Event::InlineHtml(format!("${}$", escape_html(&tex)).into()),
        Event::DisplayMath(tex) => Event::InlineHtml(format!("$${}$$", escape_html(&tex)).into()),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

fn section_title(id: &str) -> String {
    if id == ROOT_ID {
        "سوالات".to_string()
    } else {
        format!("بخش {id}")
    }
}

/// "12 سوال و 3 سوال برنامه‌نویسی"
pub fn totals_line(totals: Totals) -> String {
    if totals.count_code > 0 {
        format!(
            "{} سوال و {} سوال برنامه‌نویسی",
            totals.count, totals.count_code
        )
    } else {
        format!("{} سوال", totals.count)
    }
}

fn page_href(id: &str) -> String {
    ident::page_file_name(id)
}

fn breadcrumb(id: &str) -> Markup {
    html! {
        @if let Some(parent) = ident::parent_id(id) {
            nav.breadcrumb {
                a href=(page_href(parent)) { (section_title(parent)) }
            }
        }
    }
}

fn problem_page(title: &str, id: &str, content: Markup) -> Markup {
    let body = html! {
        (layout::top_bar(Area::Problems))
        main {
            (breadcrumb(id))
            (content)
        }
        (layout::footer())
    };
    layout::base_document(title, Some(layout::mathjax()), body)
}

fn render_record_page(record: &Record) -> Markup {
    match &record.data {
        RecordData::Problem(problem) => render_problem_page(&record.id, problem),
        RecordData::Extra(links) => render_extra_page(&record.id, links),
    }
}

fn render_problem_page(id: &str, problem: &Problem) -> Markup {
    let content = html! {
        article.problem-page {
            h1 { "سوال " (id) ":" }
            @if let Some(cat) = &problem.cat {
                span.category { (cat) }
            }
            div.problem-text { (markdown(&problem.text)) }
            @if let Some(source) = &problem.source {
                p.source { "منبع: " (source) }
            }
            @if let Some(hint) = &problem.hint {
                details.hint {
                    summary { "راهنمایی" }
                    (markdown(hint))
                }
            }
            @if let Some(solution) = &problem.solution {
                details.solution {
                    summary { "جواب" }
                    (markdown(solution))
                }
            }
        }
    };
    problem_page(&format!("سوال {id}"), id, content)
}

fn extra_links(links: &[ExtraLink]) -> Markup {
    html! {
        ul.extra-links {
            @for l in links {
                li { a href=(l.link) target="_blank" rel="noopener" { (l.name) } }
            }
        }
    }
}

fn render_extra_page(id: &str, links: &[ExtraLink]) -> Markup {
    let content = html! {
        h1 { "سوالات برنامه‌نویسی" }
        (extra_links(links))
    };
    problem_page(&format!("سوالات برنامه‌نویسی {id}"), id, content)
}

fn render_section_page(tree: &Hierarchy, node: &Node) -> Markup {
    let title = section_title(&node.id);
    let content = html! {
        h1 { (title) }
        p.totals { (totals_line(node.totals)) }
        @for child in tree.sorted_children(node) {
            @match child {
                Child::Record(i) => {
                    @let record = &tree.records[i];
                    @match &record.data {
                        RecordData::Problem(problem) => {
                            article.problem {
                                h2 { a href=(page_href(&record.id)) { "سوال " (record.id) } }
                                @if let Some(cat) = &problem.cat {
                                    span.category { (cat) }
                                }
                                (markdown(&problem.text))
                            }
                        }
                        RecordData::Extra(links) => {
                            section.extra {
                                h2 { "سوالات برنامه‌نویسی" }
                                (extra_links(links))
                            }
                        }
                    }
                }
                Child::Node(i) => {
                    @let sub = &tree.nodes[i];
                    div.subsection {
                        h2 { a href=(page_href(&sub.id)) { (section_title(&sub.id)) } }
                        p.totals { (totals_line(sub.totals)) }
                    }
                }
            }
        }
    };
    problem_page(&title, &node.id, content)
}

fn render_index_page(tree: &Hierarchy, node: &Node) -> Markup {
    let title = section_title(&node.id);
    let content = html! {
        h1 { (title) }
        p.totals { (totals_line(node.totals)) }
        ul.sections {
            @for child in tree.sorted_children(node) {
                @let id = tree.child_id(child);
                li {
                    a href=(page_href(id)) { (section_title(id)) }
                    " — "
                    (totals_line(tree.child_totals(child)))
                }
            }
        }
    };
    problem_page(&title, &node.id, content)
}
