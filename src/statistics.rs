//! Progress dashboard (`statistics.html`).
//!
//! Counts problems and book parts, decides which parts are complete, and
//! renders the numbers with a progress bar. The "days since start" estimate
//! is computed in the browser so the page stays correct between builds.

use crate::config::StatisticsConfig;
use crate::layout::{self, Area};
use crate::types::{BookPart, Record};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Problems written in the book itself.
    pub problem_count: usize,
    /// Programming problems linked from extra groups.
    pub foreign_problem_count: usize,
    pub part_count: usize,
    pub complete_part_count: usize,
    /// Total line count over all parts.
    pub part_lines: usize,
}

impl Statistics {
    /// Completed share of parts, rounded to a whole percent.
    pub fn percent(&self) -> u32 {
        if self.part_count == 0 {
            return 0;
        }
        (self.complete_part_count as f64 / self.part_count as f64 * 100.0).round() as u32
    }

    /// Completed share with one decimal, as shown on the bar.
    pub fn fine_percent(&self) -> String {
        let fine = if self.part_count == 0 {
            0.0
        } else {
            (self.complete_part_count as f64 / self.part_count as f64 * 1000.0).round() / 10.0
        };
        format!("{fine:.1}")
    }
}

/// Number of lines the way an editor would count them: a trailing newline
/// opens one more (empty) line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// A part is complete once it is long enough and no longer ends with the
/// "not finished" marker.
pub fn is_complete(text: &str, config: &StatisticsConfig) -> bool {
    line_count(text) > config.min_complete_lines
        && !text.trim().ends_with(config.incomplete_marker.as_str())
}

pub fn compute(records: &[Record], parts: &[BookPart], config: &StatisticsConfig) -> Statistics {
    let mut stats = Statistics::default();
    for record in records {
        let totals = record.totals();
        stats.problem_count += totals.count;
        stats.foreign_problem_count += totals.count_code;
    }
    stats.part_count = parts.len();
    for part in parts {
        stats.part_lines += line_count(&part.text);
        if is_complete(&part.text, config) {
            stats.complete_part_count += 1;
        }
    }
    stats
}

fn progress_bar(stats: &Statistics) -> Markup {
    html! {
        div.progress {
            div.progress-bar style=(format!("width:{}%", stats.percent())) {
                (stats.fine_percent()) "%"
            }
        }
    }
}

fn day_estimate_script(stats: &Statistics, config: &StatisticsConfig) -> Markup {
    let script = format!(
        "const dayNow = Math.ceil(((new Date) - {start})/86400000);\n\
         const dayFinal = {percent} > 0 ? Math.ceil(dayNow*100/{percent}) : NaN;\n\
         const dayRemain = dayFinal - dayNow;\n\
         document.getElementById('day-pass').innerText = dayNow;\n\
         document.getElementById('day-finish').innerText = isNaN(dayFinal) ? '؟' : dayFinal;\n\
         document.getElementById('day-remain').innerText = isNaN(dayRemain) ? '؟' : dayRemain;\n",
        start = config.start_timestamp_ms,
        percent = stats.percent(),
    );
    html! { script { (PreEscaped(script)) } }
}

pub fn render(stats: &Statistics, config: &StatisticsConfig) -> String {
    let body = html! {
        (layout::top_bar(Area::Statistics))
        main {
            div {
                "این کتاب به " (config.chapters) " فصل و "
                (stats.part_count)
                " بخش تقسیم شده که از آن‌ها "
                (stats.complete_part_count)
                " بخش کامل شده است."
                br;
                (progress_bar(stats))
            }
            div {
                "کتاب در حال حاضر "
                (stats.problem_count)
                " مساله دارد و علاوه بر آن "
                (stats.foreign_problem_count)
                " مساله برنامه نویسی به صورت لینک در آن قرار دارد. "
                "درس نامه این کتاب در مجموع از "
                (stats.part_lines)
                " خط تشکیل شده است."
            }
            div {
                span #day-pass {}
                " روز پیش نوشتن کتاب آغاز شده است. "
                "طبق تقریب ۱، کتاب در روز "
                span #day-finish {}
                " بعد از شروع به پایان می رسد و این یعنی "
                span #day-remain {}
                " روز به پایان کتاب باقی مانده است."
                (day_estimate_script(stats, config))
            }
            div style="height:40vmin" {}
        }
        (layout::footer())
    };
    layout::base_document("آمار", None, body).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtraLink, Problem};

    fn part(text: &str) -> BookPart {
        BookPart {
            rel_path: "1/x.rst".to_string(),
            text: text.to_string(),
        }
    }

    fn lines(n: usize) -> String {
        vec!["line"; n].join("\n")
    }

    #[test]
    fn percent_rounding() {
        let stats = Statistics {
            part_count: 112,
            complete_part_count: 37,
            ..Statistics::default()
        };
        assert_eq!(stats.percent(), 33);
        assert_eq!(stats.fine_percent(), "33.0");
    }

    #[test]
    fn fine_percent_keeps_one_decimal() {
        let stats = Statistics {
            part_count: 3,
            complete_part_count: 1,
            ..Statistics::default()
        };
        assert_eq!(stats.percent(), 33);
        assert_eq!(stats.fine_percent(), "33.3");
    }

    #[test]
    fn zero_parts_is_zero_percent() {
        let stats = Statistics::default();
        assert_eq!(stats.percent(), 0);
        assert_eq!(stats.fine_percent(), "0.0");
    }

    #[test]
    fn completeness_needs_length_and_no_marker() {
        let config = StatisticsConfig::default();
        assert!(!is_complete(&lines(15), &config));
        assert!(is_complete(&lines(16), &config));
        let unfinished = format!("{}\nnot yet\n\n", lines(20));
        assert!(!is_complete(&unfinished, &config));
    }

    #[test]
    fn line_count_counts_trailing_newline() {
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\nb\n"), 3);
        assert_eq!(line_count(""), 1);
    }

    #[test]
    fn compute_counts_everything() {
        let config = StatisticsConfig::default();
        let link = ExtraLink {
            name: "cf".to_string(),
            link: "https://codeforces.com".to_string(),
        };
        let records = vec![
            Record::problem("1.1", Problem::default()),
            Record::problem("1.2", Problem::default()),
            Record::extra("1.extra", vec![link.clone(), link.clone(), link]),
        ];
        let parts = vec![part(&lines(20)), part("short")];
        let stats = compute(&records, &parts, &config);
        assert_eq!(
            stats,
            Statistics {
                problem_count: 2,
                foreign_problem_count: 3,
                part_count: 2,
                complete_part_count: 1,
                part_lines: 21,
            }
        );
    }

    #[test]
    fn render_shows_numbers_and_bar() {
        let config = StatisticsConfig::default();
        let stats = Statistics {
            problem_count: 250,
            foreign_problem_count: 40,
            part_count: 112,
            complete_part_count: 37,
            part_lines: 9000,
        };
        let html = render(&stats, &config);
        assert!(html.contains("14 فصل"));
        assert!(html.contains("250"));
        assert!(html.contains("width:33%"));
        assert!(html.contains("33.0%"));
        assert!(html.contains("1583008200000"));
        assert!(html.contains(r#"id="day-remain""#));
    }
}
